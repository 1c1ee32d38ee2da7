//! Gallery page assembly from the compile-time catalogue.

use crate::domain::gallery::{self, GALLERY_EVENTS};
use crate::presentation::views::{
    GalleryContext, GalleryEventView, GalleryImageView, GalleryPreviewView,
};
use crate::util::query::encode_query_value;

#[derive(Clone)]
pub struct GalleryService {
    /// Image host prefix, normalized to end with `/`.
    bucket_url: String,
}

impl GalleryService {
    pub fn new(bucket_url: &str) -> Self {
        let trimmed = bucket_url.trim_end_matches('/');
        Self {
            bucket_url: format!("{trimmed}/"),
        }
    }

    /// Build the gallery page. `preview` opens the overlay when it names a
    /// catalogue image; unknown values are ignored so arbitrary URLs cannot
    /// be reflected into the page.
    pub fn page_context(&self, preview: Option<&str>) -> GalleryContext {
        let events = GALLERY_EVENTS
            .iter()
            .map(|event| GalleryEventView {
                name: event.name.to_string(),
                images: event
                    .images
                    .iter()
                    .map(|file| GalleryImageView {
                        src: self.image_src(file),
                        preview_href: format!("/gallery?preview={}", encode_query_value(file)),
                    })
                    .collect(),
            })
            .collect();

        let preview = preview
            .filter(|file| gallery::is_known_image(file))
            .map(|file| GalleryPreviewView {
                src: self.image_src(file),
                close_href: "/gallery".to_string(),
            });

        GalleryContext { events, preview }
    }

    fn image_src(&self, file: &str) -> String {
        format!("{}{file}", self.bucket_url)
    }
}
