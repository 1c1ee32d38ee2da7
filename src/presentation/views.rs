use crate::application::error::{ErrorReport, HttpError};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub footer: FooterView,
    pub meta: PageMetaView,
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            footer: chrome.footer,
            meta: chrome.meta,
            content,
        }
    }
}

/// The article page: header fields are individually presence-gated, sections
/// arrive pre-filtered (a section with nothing present never reaches the
/// template).
pub struct ArticleContext {
    pub title: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub sections: Vec<SectionView>,
    pub more: Vec<MoreArticleCard>,
    pub subscribe: SubscribeView,
}

pub struct SectionView {
    pub subtitle: Option<String>,
    pub paragraph: Option<String>,
    pub image: Option<SectionImageView>,
    pub video: Option<SectionVideoView>,
    pub table: Option<SectionTableView>,
    pub cta: Option<SectionCtaView>,
}

pub struct SectionImageView {
    pub src: String,
    pub alt: String,
    pub caption: Option<String>,
}

pub struct SectionVideoView {
    pub embed_url: String,
    pub source_url: Option<String>,
}

pub struct SectionTableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub struct SectionCtaView {
    pub text: String,
    pub href: String,
    pub target: String,
    pub rel: Option<String>,
}

pub struct MoreArticleCard {
    pub title: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub href: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubscribeStatus {
    Idle,
    InFlight,
    Success,
}

impl SubscribeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SubscribeStatus::Idle => "Subscribe",
            SubscribeStatus::InFlight => "Subscribing...",
            SubscribeStatus::Success => "Subscribed",
        }
    }
}

#[derive(Clone)]
pub struct SubscribeView {
    pub status: SubscribeStatus,
    pub alert: Option<String>,
    pub email: String,
    pub article_title: String,
}

impl SubscribeView {
    pub fn idle(article_title: &str) -> Self {
        Self {
            status: SubscribeStatus::Idle,
            alert: None,
            email: String::new(),
            article_title: article_title.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "article.html")]
pub struct ArticleTemplate {
    pub view: LayoutContext<ArticleContext>,
}

pub struct GalleryContext {
    pub events: Vec<GalleryEventView>,
    pub preview: Option<GalleryPreviewView>,
}

pub struct GalleryEventView {
    pub name: String,
    pub images: Vec<GalleryImageView>,
}

pub struct GalleryImageView {
    pub src: String,
    pub preview_href: String,
}

pub struct GalleryPreviewView {
    pub src: String,
    pub close_href: String,
}

#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate {
    pub view: LayoutContext<GalleryContext>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Article Not Found".to_string(),
            message: "The article you requested does not exist. Head back to the blog to keep reading.".to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }

    /// Upstream fetch failure: the action reloads the same URL, retrying the
    /// fetch.
    pub fn fetch_failed(retry_href: String) -> Self {
        Self {
            title: "Failed to load article content".to_string(),
            message: "The content service did not answer. This is usually temporary.".to_string(),
            primary_action: Some(ErrorAction {
                href: retry_href,
                label: "Try Again".to_string(),
            }),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/techblog".to_string(),
            label: "Back to the blog".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
