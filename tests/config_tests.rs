use std::io::Write;

use modsys_lib::config;
use modsys_lib::config::validation::validate_config;
use modsys_lib::types::ModsysConfig;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_with_environment_variables() {
    let config_content = r#"
general:
  request_timeout_secs: 5
endpoints:
  google_perspective: "http://localhost:8089"
credentials:
  google_perspective_api_key: "${TEST_MODSYS_PERSPECTIVE_KEY}"
  sightengine_api_key: "${TEST_MODSYS_SIGHTENGINE_SECRET}"
  sightengine_api_user: "12345"
"#;
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(config_content.as_bytes()).unwrap();

    let config = temp_env::with_vars(
        [
            ("TEST_MODSYS_PERSPECTIVE_KEY", Some("pk-123")),
            ("TEST_MODSYS_SIGHTENGINE_SECRET", Some("se-456")),
        ],
        || config::load_config(temp_file.path().to_str().unwrap()).unwrap(),
    );

    assert_eq!(config.general.request_timeout_secs, 5);
    assert_eq!(config.endpoints.google_perspective, "http://localhost:8089");
    assert_eq!(config.endpoints.openai, "https://api.openai.com");
    assert_eq!(
        config.credentials.google_perspective_api_key.as_deref(),
        Some("pk-123")
    );
    assert_eq!(config.credentials.sightengine_api_key.as_deref(), Some("se-456"));
    assert_eq!(config.credentials.sightengine_api_user.as_deref(), Some("12345"));
    assert!(config.credentials.apollo_token.is_none());
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_missing_environment_variable_fails() {
    let result = temp_env::with_var_unset("TEST_MODSYS_UNSET_KEY", || {
        config::parse_config("credentials:\n  openai_api_key: \"${TEST_MODSYS_UNSET_KEY}\"\n")
    });
    let err = result.unwrap_err();
    assert!(err.to_string().contains("TEST_MODSYS_UNSET_KEY"));
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = temp_env::with_var_unset("MODSYS_REQUEST_TIMEOUT_SECS", || {
        config::parse_config("{}").unwrap()
    });
    assert_eq!(config, ModsysConfig::default());
    assert_eq!(config.general.request_timeout_secs, 30);
}

#[test]
fn test_invalid_config_reports_errors() {
    let config = config::parse_config(
        r#"
general:
  request_timeout_secs: 0
endpoints:
  apollo: "apollo.internal"
"#,
    )
    .unwrap();
    let errors = validate_config(&config).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| e.contains("'apollo' must be an http(s) URL")));
}

#[test]
fn test_missing_file() {
    assert!(config::load_config("/nonexistent/modsys.yaml").is_err());
}
