use std::{process, sync::Arc};

use briefin::{
    application::{
        article::ArticleService, chrome::build_chrome, error::AppError, gallery::GalleryService,
        repos::ContentRepo, subscription::SubscriptionService,
    },
    config,
    infra::{
        content_api::ContentApiClient,
        error::InfraError,
        http::{HttpState, build_router},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let content: Arc<dyn ContentRepo> =
        Arc::new(ContentApiClient::new(&settings.content_api).map_err(AppError::from)?);

    let state = HttpState {
        articles: Arc::new(ArticleService::new(content.clone())),
        subscriptions: Arc::new(SubscriptionService::new(content)),
        gallery: Arc::new(GalleryService::new(&settings.gallery.bucket_url)),
        chrome: build_chrome(&settings.site),
    };

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "briefin::serve",
        addr = %settings.server.public_addr,
        "Listening"
    );

    axum::serve(listener, router.into_make_service())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}
