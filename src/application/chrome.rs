//! Shared layout chrome (brand, footer, page metadata) built from site
//! configuration.

use crate::config::SiteSettings;
use crate::presentation::views::{BrandView, FooterView, LayoutChrome, PageMetaView};

pub fn build_chrome(site: &SiteSettings) -> LayoutChrome {
    LayoutChrome {
        brand: BrandView {
            title: site.brand_title.clone(),
            href: "/techblog".to_string(),
        },
        footer: FooterView {
            copy: site.footer_copy.clone(),
        },
        meta: PageMetaView {
            title: site.meta_title.clone(),
            description: site.meta_description.clone(),
        },
    }
}
