use std::io::Write;

use log::LevelFilter;

use crate::config::{BridgeConfig, DEFAULT_LOG_TAG};
use crate::error::Error;

#[test]
fn defaults_match_the_activity_tag() {
    let config = BridgeConfig::default();
    assert_eq!(config.log_tag, DEFAULT_LOG_TAG);
    assert_eq!(config.log_tag, "OculusMobileActivity");
    assert_eq!(config.max_level().unwrap(), LevelFilter::Debug);
    assert!(!config.drop_posts_after_destroy);
}

#[test]
fn partial_toml_keeps_defaults() {
    let config: BridgeConfig = r#"
        log_level = "warn"
        drop_posts_after_destroy = true
    "#
    .parse()
    .unwrap();
    assert_eq!(config.max_level().unwrap(), LevelFilter::Warn);
    assert!(config.drop_posts_after_destroy);
    assert_eq!(config.ui_thread_name, "quest-ui");
}

#[test]
fn unknown_keys_are_rejected() {
    let parsed = "log_tagg = \"typo\"".parse::<BridgeConfig>();
    assert!(parsed.is_err());
}

#[test]
fn display_is_loadable_toml() {
    let config = BridgeConfig {
        log_tag: "QuestActivity".to_string(),
        ..BridgeConfig::default()
    };
    let reparsed: BridgeConfig = config.to_string().parse().unwrap();
    assert_eq!(reparsed, config);
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "log_tag = \"QuestBridge\"").unwrap();
    writeln!(file, "ui_thread_name = \"main\"").unwrap();

    let config = BridgeConfig::load(file.path()).unwrap();
    assert_eq!(config.log_tag, "QuestBridge");
    assert_eq!(config.ui_thread_name, "main");
}

#[test]
fn load_rejects_bad_level_and_missing_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "log_level = \"loud\"").unwrap();
    assert!(matches!(
        BridgeConfig::load(file.path()),
        Err(Error::Config(_))
    ));

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        BridgeConfig::load(dir.path().join("missing.toml")),
        Err(Error::Config(_))
    ));
}

#[test]
fn logging_init_validates_level() {
    assert!(crate::logging::init(&BridgeConfig::default()).is_ok());
    let config = BridgeConfig {
        log_level: "chatty".to_string(),
        ..BridgeConfig::default()
    };
    assert!(crate::logging::init(&config).is_err());
}

#[test]
fn load_or_default_falls_back_and_reports() {
    let (config, err) = BridgeConfig::load_or_default(None);
    assert_eq!(config, BridgeConfig::default());
    assert!(err.is_none());

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("quest_bridge.toml");
    let (config, err) = BridgeConfig::load_or_default(Some(missing.as_path()));
    assert_eq!(config, BridgeConfig::default());
    assert!(matches!(err, Some(Error::Config(_))));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "drop_posts_after_destroy = true").unwrap();
    let (config, err) = BridgeConfig::load_or_default(Some(file.path()));
    assert!(config.drop_posts_after_destroy);
    assert!(err.is_none());
}

#[test]
fn logging_falls_back_to_defaults_on_bad_level() {
    assert!(crate::logging::init_or_default(&BridgeConfig::default()).is_none());
    let config = BridgeConfig {
        log_level: "chatty".to_string(),
        ..BridgeConfig::default()
    };
    assert!(matches!(
        crate::logging::init_or_default(&config),
        Some(Error::Config(_))
    ));
}
