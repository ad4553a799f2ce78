//! Tests for client configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        endpoint = "http://localhost:8080/"
        timeout_seconds = 60
        ssl_verify = false
        log_filter = "qaekwy=debug"

        [solve]
        searcher = "LDS"
        solution_limit = 4
    "#;

    let config = ClientConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.endpoint, "http://localhost:8080/");
    assert_eq!(config.timeout_seconds, 60);
    assert!(!config.ssl_verify);
    assert_eq!(config.solve.searcher, SearcherType::Lds);
    assert_eq!(config.solve.solution_limit, 4);
    assert_eq!(config.log_filter.as_deref(), Some("qaekwy=debug"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        endpoint: https://engine.example.invalid
        solve:
          searcher: rbs
    "#;

    let config = ClientConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.solve.searcher, SearcherType::Rbs);
    assert_eq!(config.solve.solution_limit, 1);
    assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    assert!(config.ssl_verify);
}

#[test]
fn test_defaults_from_empty_document() {
    let config = ClientConfig::from_toml_str("").unwrap();
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.solve.searcher, SearcherType::Dfs);
}

#[test]
fn test_unknown_searcher_is_rejected() {
    let toml = r#"
        [solve]
        searcher = "bfs"
    "#;
    assert!(matches!(
        ClientConfig::from_toml_str(toml),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_builder() {
    let config = ClientConfig::new("http://engine")
        .with_timeout_seconds(10)
        .with_ssl_verify(false)
        .with_searcher(SearcherType::Bab)
        .with_solution_limit(2)
        .with_log_filter("qaekwy=trace");

    assert_eq!(config.timeout(), Duration::from_secs(10));
    assert_eq!(config.solve.searcher, SearcherType::Bab);
    assert_eq!(config.solve.solution_limit, 2);
    assert_eq!(config.log_filter.as_deref(), Some("qaekwy=trace"));
}

#[test]
fn test_validate() {
    assert!(matches!(
        ClientConfig::default().validate(),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        ClientConfig::new("http://engine")
            .with_solution_limit(0)
            .validate(),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_command_url_joins_once() {
    let config = ClientConfig::new("http://engine/api/");
    assert_eq!(config.command_url("model"), "http://engine/api/model");
    assert_eq!(config.command_url("/result"), "http://engine/api/result");
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        ClientConfig::load("/nonexistent/qaekwy.toml"),
        Err(ConfigError::Io(_))
    ));
}
