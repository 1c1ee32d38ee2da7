use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.public_port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        public_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.public_addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn content_api_base_url_gains_trailing_slash() {
    let mut raw = RawSettings::default();
    raw.content_api.base_url = Some("https://api.example.com/v1".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    let base = settings.content_api.base_url.expect("base url");
    assert_eq!(base.as_str(), "https://api.example.com/v1/");
}

#[test]
fn content_api_base_url_rejects_garbage() {
    let mut raw = RawSettings::default();
    raw.content_api.base_url = Some("not a url".to_string());

    let err = Settings::from_raw(raw).expect_err("invalid base url");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "content_api.base_url",
            ..
        }
    ));
}

#[test]
fn blank_api_key_is_treated_as_absent() {
    let mut raw = RawSettings::default();
    raw.content_api.api_key = Some("   ".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.content_api.api_key.is_none());
}

#[test]
fn content_api_timeout_defaults_to_10_seconds() {
    let raw = RawSettings::default();
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(
        settings.content_api.timeout,
        Duration::from_secs(DEFAULT_CONTENT_API_TIMEOUT_SECS)
    );
}

#[test]
fn zero_timeout_is_rejected() {
    let mut raw = RawSettings::default();
    raw.content_api.timeout_seconds = Some(0);

    let err = Settings::from_raw(raw).expect_err("invalid timeout");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "content_api.timeout_seconds",
            ..
        }
    ));
}

#[test]
fn gallery_bucket_url_has_a_default() {
    let raw = RawSettings::default();
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.gallery.bucket_url, DEFAULT_GALLERY_BUCKET_URL);
}

#[test]
fn site_strings_fall_back_to_defaults() {
    let raw = RawSettings::default();
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.site.brand_title, DEFAULT_BRAND_TITLE);
    assert_eq!(settings.site.meta_title, DEFAULT_META_TITLE);
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["briefin"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_overrides() {
    let args = CliArgs::parse_from([
        "briefin",
        "serve",
        "--server-host",
        "0.0.0.0",
        "--content-api-url",
        "https://api.example.com/",
        "--content-api-key",
        "secret",
        "--gallery-bucket-url",
        "https://cdn.example.com/gallery",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_host.as_deref(), Some("0.0.0.0"));
            assert_eq!(
                serve.overrides.content_api_url.as_deref(),
                Some("https://api.example.com/")
            );
            assert_eq!(serve.overrides.content_api_key.as_deref(), Some("secret"));
            assert_eq!(
                serve.overrides.gallery_bucket_url.as_deref(),
                Some("https://cdn.example.com/gallery")
            );
        }
    }
}
