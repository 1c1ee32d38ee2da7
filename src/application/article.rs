//! Article page assembly: fetch, section dispatch, and the More Articles
//! derivation.

use std::sync::Arc;

use metrics::counter;
use tracing::warn;

use crate::application::repos::{ContentRepo, RepoError};
use crate::domain::articles::{
    self, Article, CallToAction, ContentSection, Presence, SectionImage, SectionTable,
    SectionVideo,
};
use crate::domain::dates;
use crate::presentation::views::{
    ArticleContext, MoreArticleCard, SectionCtaView, SectionImageView, SectionTableView,
    SectionVideoView, SectionView, SubscribeView,
};
use crate::util::query::encode_query_value;

#[derive(Clone)]
pub struct ArticleService {
    content: Arc<dyn ContentRepo>,
}

impl ArticleService {
    pub fn new(content: Arc<dyn ContentRepo>) -> Self {
        Self { content }
    }

    /// Assemble the article page for `title`.
    ///
    /// The article payload and the full listing are fetched concurrently;
    /// they fill independent parts of the page, so completion order does not
    /// matter. A listing failure degrades to an empty More Articles list and
    /// never fails the page.
    pub async fn article_page(&self, title: &str) -> Result<Option<ArticleContext>, RepoError> {
        let (article, listing) = tokio::join!(
            self.content.fetch_article(title),
            self.content.fetch_all_articles()
        );

        let Some(article) = article? else {
            return Ok(None);
        };

        let more = match listing {
            Ok(all) => articles::more_articles(all, title),
            Err(err) => {
                counter!("briefin_more_articles_error_total").increment(1);
                warn!(
                    target = "briefin::article",
                    error = %err,
                    title = title,
                    "failed to load the article listing; rendering without More Articles"
                );
                Vec::new()
            }
        };

        let subscribe = SubscribeView::idle(&article.title);
        Ok(Some(build_article_context(article, more, subscribe)))
    }
}

pub(crate) fn build_article_context(
    article: Article,
    more: Vec<Article>,
    subscribe: SubscribeView,
) -> ArticleContext {
    let Article {
        title,
        category,
        date,
        tag,
        content,
    } = article;

    let sections = content.iter().filter_map(section_view).collect();
    let more = more.iter().map(more_article_card).collect();

    ArticleContext {
        title: Some(title).filter(Presence::is_present),
        category: category.filter(Presence::is_present),
        date: formatted_date(date.as_deref()),
        tags: tag.as_deref().map(articles::parse_tags).unwrap_or_default(),
        sections,
        more,
        subscribe,
    }
}

/// The header only shows a date when the raw value is present and formats to
/// something non-empty; a malformed date disappears instead of erroring.
fn formatted_date(raw: Option<&str>) -> Option<String> {
    raw.filter(|value| value.is_present())
        .map(dates::format_article_date)
        .filter(|formatted| !formatted.is_empty())
}

/// Map one content section to its view, or `None` when the section has
/// nothing present and is skipped entirely. Dispatch is additive: every
/// present field renders, in fixed order, within the same section.
fn section_view(section: &ContentSection) -> Option<SectionView> {
    if !section.has_renderable_content() {
        return None;
    }

    Some(SectionView {
        subtitle: section.subtitle.clone().filter(Presence::is_present),
        paragraph: section.paragraph.clone().filter(Presence::is_present),
        image: section.image.as_ref().and_then(image_view),
        video: section.video.as_ref().and_then(video_view),
        table: section.table.as_ref().and_then(table_view),
        cta: section.cta.as_ref().and_then(cta_view),
    })
}

fn image_view(image: &SectionImage) -> Option<SectionImageView> {
    if !image.is_present() || !image.url.is_present() {
        return None;
    }

    Some(SectionImageView {
        src: image.url.clone().unwrap_or_default(),
        alt: image
            .alt
            .clone()
            .filter(Presence::is_present)
            .unwrap_or_else(|| "Article image".to_string()),
        caption: image.caption.clone().filter(Presence::is_present),
    })
}

fn video_view(video: &SectionVideo) -> Option<SectionVideoView> {
    if !video.is_present() || !video.embed_url.is_present() {
        return None;
    }

    Some(SectionVideoView {
        embed_url: video.embed_url.clone().unwrap_or_default(),
        source_url: video.url.clone().filter(Presence::is_present),
    })
}

fn table_view(table: &SectionTable) -> Option<SectionTableView> {
    if !table.is_present() || !table.headers.is_present() || !table.rows.is_present() {
        return None;
    }

    let headers = table
        .headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            if header.is_empty() {
                format!("Column {}", index + 1)
            } else {
                header.clone()
            }
        })
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    if cell.is_empty() {
                        "-".to_string()
                    } else {
                        cell.clone()
                    }
                })
                .collect()
        })
        .collect();

    Some(SectionTableView { headers, rows })
}

fn cta_view(cta: &CallToAction) -> Option<SectionCtaView> {
    if !cta.is_present() || !cta.text.is_present() || !cta.link.is_present() {
        return None;
    }

    let target = cta
        .target
        .clone()
        .filter(Presence::is_present)
        .unwrap_or_else(|| "_self".to_string());
    let rel = (target == "_blank").then(|| "noopener noreferrer".to_string());

    Some(SectionCtaView {
        text: cta.text.clone().unwrap_or_default(),
        href: cta.link.clone().unwrap_or_default(),
        target,
        rel,
    })
}

fn more_article_card(article: &Article) -> MoreArticleCard {
    MoreArticleCard {
        title: Some(article.title.clone()).filter(Presence::is_present),
        category: article.category.clone().filter(Presence::is_present),
        date: formatted_date(article.date.as_deref()),
        href: format!(
            "/techblog?={}",
            encode_query_value(article.title.trim())
        ),
    }
}
