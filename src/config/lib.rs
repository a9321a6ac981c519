use regex::{Captures, Regex};

use crate::types::ModsysConfig;

pub fn load_config(path: &str) -> Result<ModsysConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a YAML config after substituting `${VAR}` references from the environment.
pub fn parse_config(contents: &str) -> Result<ModsysConfig, Box<dyn std::error::Error>> {
    let expanded = expand_env_vars(contents)?;
    let config: ModsysConfig = serde_yaml::from_str(&expanded)?;
    Ok(config)
}

fn expand_env_vars(contents: &str) -> Result<String, Box<dyn std::error::Error>> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")?;
    let mut missing = Vec::new();
    let expanded = re.replace_all(contents, |caps: &Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| {
            missing.push(caps[1].to_string());
            String::new()
        })
    });
    if !missing.is_empty() {
        return Err(format!("Environment variables not set: {}", missing.join(", ")).into());
    }
    Ok(expanded.into_owned())
}
