use crate::types::ModsysConfig;

/// Validates the logical consistency of a ModsysConfig.
/// Returns Ok(()) if valid, or Err(Vec<String>) with a list of error messages if invalid.
pub fn validate_config(config: &ModsysConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let endpoints = [
        ("openai", &config.endpoints.openai),
        ("google_perspective", &config.endpoints.google_perspective),
        ("sightengine", &config.endpoints.sightengine),
        ("scam_advisor", &config.endpoints.scam_advisor),
        ("apollo", &config.endpoints.apollo),
    ];
    for (name, url) in endpoints {
        if url.trim().is_empty() {
            errors.push(format!("Endpoint '{name}' is empty."));
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!(
                "Endpoint '{name}' must be an http(s) URL, got '{url}'."
            ));
        }
    }

    if config.general.request_timeout_secs == 0 {
        errors.push("general.request_timeout_secs must be greater than zero.".to_string());
    }

    if config.credentials.sightengine_api_key.is_some()
        != config.credentials.sightengine_api_user.is_some()
    {
        errors.push(
            "Sightengine credentials need both sightengine_api_key and sightengine_api_user."
                .to_string(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
