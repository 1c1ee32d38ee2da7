use std::{collections::HashMap, sync::Arc};

use axum::{
    Router,
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    middleware,
    response::Response,
    routing::{get, post},
};
use axum::Form;
use metrics::counter;
use serde::Deserialize;

use crate::{
    application::{
        article::ArticleService,
        error::ErrorReport,
        gallery::GalleryService,
        repos::RepoError,
        subscription::SubscriptionService,
    },
    presentation::views::{
        ArticleTemplate, ErrorPageView, ErrorTemplate, GalleryTemplate, LayoutChrome,
        LayoutContext, render_not_found_response, render_template_response,
    },
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub articles: Arc<ArticleService>,
    pub subscriptions: Arc<SubscriptionService>,
    pub gallery: Arc<GalleryService>,
    pub chrome: LayoutChrome,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/techblog", get(article_page))
        .route("/techblog/", get(article_page))
        .route("/subscribe", post(subscribe))
        .route("/gallery", get(gallery_page))
        .route("/_health", get(health))
        .fallback(fallback_not_found)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

/// The article identifier comes from the query string: `?title=<t>`, with
/// the unnamed form `?=<t>` (what shared article links use) as fallback.
fn resolve_title(params: &HashMap<String, String>) -> Option<&str> {
    let named = params
        .get("title")
        .map(String::as_str)
        .filter(|title| !title.trim().is_empty());
    let unnamed = params
        .get("")
        .map(String::as_str)
        .filter(|title| !title.trim().is_empty());
    named.or(unnamed)
}

async fn article_page(
    State(state): State<HttpState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let chrome = state.chrome.clone();

    let Some(title) = resolve_title(&params) else {
        return render_not_found_response(chrome);
    };

    match state.articles.article_page(title).await {
        Ok(Some(content)) => render_template_response(
            ArticleTemplate {
                view: LayoutContext::new(chrome, content),
            },
            StatusCode::OK,
        ),
        Ok(None) => render_not_found_response(chrome),
        Err(err) => fetch_error_response(err, chrome, uri.to_string()),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SubscribeForm {
    email: String,
    title: String,
}

/// Handle the subscription form and re-render the article page around the
/// updated form state.
async fn subscribe(State(state): State<HttpState>, Form(form): Form<SubscribeForm>) -> Response {
    let chrome = state.chrome.clone();
    let outcome = state.subscriptions.subscribe(&form.email).await;
    let subscribe_view = outcome.into_view(&form.title, &form.email);

    if form.title.trim().is_empty() {
        return render_not_found_response(chrome);
    }

    match state.articles.article_page(&form.title).await {
        Ok(Some(mut content)) => {
            content.subscribe = subscribe_view;
            render_template_response(
                ArticleTemplate {
                    view: LayoutContext::new(chrome, content),
                },
                StatusCode::OK,
            )
        }
        Ok(None) => render_not_found_response(chrome),
        Err(err) => {
            let retry = format!(
                "/techblog?title={}",
                crate::util::query::encode_query_value(&form.title)
            );
            fetch_error_response(err, chrome, retry)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GalleryQuery {
    preview: Option<String>,
}

async fn gallery_page(
    State(state): State<HttpState>,
    Query(query): Query<GalleryQuery>,
) -> Response {
    let content = state.gallery.page_context(query.preview.as_deref());
    render_template_response(
        GalleryTemplate {
            view: LayoutContext::new(state.chrome.clone(), content),
        },
        StatusCode::OK,
    )
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn fallback_not_found(State(state): State<HttpState>) -> Response {
    render_not_found_response(state.chrome.clone())
}

fn fetch_error_response(err: RepoError, chrome: LayoutChrome, retry_href: String) -> Response {
    counter!("briefin_article_fetch_error_total").increment(1);

    let content = ErrorPageView::fetch_failed(retry_href);
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::BAD_GATEWAY);
    ErrorReport::from_error(
        "infra::http::public::fetch_error_response",
        StatusCode::BAD_GATEWAY,
        &err,
    )
    .attach(&mut response);
    response
}
