use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use briefin::application::article::ArticleService;
use briefin::application::chrome::build_chrome;
use briefin::application::gallery::GalleryService;
use briefin::application::repos::{ContentRepo, RepoError};
use briefin::application::subscription::SubscriptionService;
use briefin::config::SiteSettings;
use briefin::domain::articles::{Article, ContentSection};
use briefin::infra::http::{HttpState, build_router};

#[derive(Default)]
struct StubContentRepo {
    articles: Vec<Article>,
    fail_article: bool,
    fail_listing: bool,
}

#[async_trait]
impl ContentRepo for StubContentRepo {
    async fn fetch_article(&self, title: &str) -> Result<Option<Article>, RepoError> {
        if self.fail_article {
            return Err(RepoError::transport("stub offline"));
        }
        Ok(self
            .articles
            .iter()
            .find(|article| article.title == title)
            .cloned())
    }

    async fn fetch_all_articles(&self) -> Result<Vec<Article>, RepoError> {
        if self.fail_listing {
            return Err(RepoError::transport("stub offline"));
        }
        Ok(self.articles.clone())
    }

    async fn add_subscriber(&self, _email: &str) -> Result<u16, RepoError> {
        Ok(200)
    }
}

fn site_settings() -> SiteSettings {
    SiteSettings {
        brand_title: "Brief In".to_string(),
        footer_copy: "© Brief In. All rights reserved.".to_string(),
        meta_title: "Brief In — Tech Blog".to_string(),
        meta_description: "Test instance".to_string(),
    }
}

fn router_with(repo: StubContentRepo) -> Router {
    let content: Arc<dyn ContentRepo> = Arc::new(repo);
    build_router(HttpState {
        articles: Arc::new(ArticleService::new(content.clone())),
        subscriptions: Arc::new(SubscriptionService::new(content)),
        gallery: Arc::new(GalleryService::new("https://cdn.example/")),
        chrome: build_chrome(&site_settings()),
    })
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn titled(title: &str) -> Article {
    Article {
        title: title.to_string(),
        ..Article::default()
    }
}

#[tokio::test]
async fn article_page_renders_header_sections_and_tags() {
    let article = Article {
        title: "Edge AI".to_string(),
        category: Some("Hardware".to_string()),
        date: Some("2025-01-05".to_string()),
        tag: Some(" ai, edge ,,robots ".to_string()),
        content: vec![
            ContentSection {
                subtitle: Some("Why now".to_string()),
                paragraph: Some("Inference moved to the device.".to_string()),
                ..ContentSection::default()
            },
            // Blank section, must be skipped entirely.
            ContentSection {
                paragraph: Some("   ".to_string()),
                ..ContentSection::default()
            },
        ],
    };
    let router = router_with(StubContentRepo {
        articles: vec![article],
        ..StubContentRepo::default()
    });

    let (status, body) = get(router, "/techblog?title=Edge%20AI").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Edge AI"));
    assert!(body.contains("Hardware"));
    assert!(body.contains("January 5, 2025"));
    assert!(body.contains(">ai<"));
    assert!(body.contains(">edge<"));
    assert!(body.contains(">robots<"));
    assert!(body.contains("Why now"));
    assert!(body.contains("Inference moved to the device."));
    assert_eq!(body.matches("article-section").count(), 1);
}

#[tokio::test]
async fn article_without_content_shows_the_empty_notice() {
    let router = router_with(StubContentRepo {
        articles: vec![titled("Bare")],
        ..StubContentRepo::default()
    });

    let (status, body) = get(router, "/techblog?title=Bare").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("This article has no content yet."));
}

#[tokio::test]
async fn unnamed_query_parameter_selects_the_article() {
    let router = router_with(StubContentRepo {
        articles: vec![titled("Shared")],
        ..StubContentRepo::default()
    });

    let (status, body) = get(router, "/techblog?=Shared").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Shared"));
}

#[tokio::test]
async fn missing_title_renders_the_not_found_page() {
    let router = router_with(StubContentRepo::default());

    let (status, body) = get(router, "/techblog").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Article Not Found"));
    assert!(body.contains("Back to the blog"));
}

#[tokio::test]
async fn unknown_article_renders_the_not_found_page() {
    let router = router_with(StubContentRepo {
        articles: vec![titled("Known")],
        ..StubContentRepo::default()
    });

    let (status, body) = get(router, "/techblog?title=Unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Article Not Found"));
}

#[tokio::test]
async fn more_articles_exclude_current_reverse_and_cap_at_four() {
    let mut articles: Vec<Article> = (1..=6).map(|i| titled(&format!("t{i}"))).collect();
    articles.push(titled("current"));
    let router = router_with(StubContentRepo {
        articles,
        ..StubContentRepo::default()
    });

    let (status, body) = get(router, "/techblog?title=current").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("More Articles"));
    for expected in ["t6", "t5", "t4", "t3"] {
        assert!(body.contains(&format!(">{expected}<")), "missing {expected}");
    }
    assert!(!body.contains(">t2<"));
    assert!(!body.contains(">t1<"));
    // "current" appears as the page heading only, never as a card.
    assert_eq!(body.matches(">current<").count(), 1);
}

#[tokio::test]
async fn listing_failure_degrades_to_a_page_without_more_articles() {
    let router = router_with(StubContentRepo {
        articles: vec![titled("Solo")],
        fail_listing: true,
        ..StubContentRepo::default()
    });

    let (status, body) = get(router, "/techblog?title=Solo").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Solo"));
    assert!(!body.contains("More Articles"));
}

#[tokio::test]
async fn upstream_failure_renders_the_retry_page() {
    let router = router_with(StubContentRepo {
        fail_article: true,
        ..StubContentRepo::default()
    });

    let (status, body) = get(router, "/techblog?title=T").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Failed to load article content"));
    assert!(body.contains("Try Again"));
    // The retry action reloads the URL that failed.
    assert!(body.contains("href=\"/techblog?title=T\""));
}

#[tokio::test]
async fn unknown_routes_fall_back_to_not_found() {
    let router = router_with(StubContentRepo::default());

    let (status, body) = get(router, "/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Article Not Found"));
}

#[tokio::test]
async fn health_endpoint_answers_no_content() {
    let router = router_with(StubContentRepo::default());

    let (status, body) = get(router, "/_health").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}
