use std::path::Path;

use anyhow::{Context, anyhow, bail};
use modsys_lib::config;
use modsys_lib::evaluation::TestVector;
use modsys_lib::providers::{ReportRequest, TextRequest};
use modsys_lib::types::ModsysConfig;
use modsys_lib::{Session, serde_json};
use tracing::{Level, error, info};

const DEFAULT_CONFIG_PATH: &str = "modsys.yaml";

const USAGE: &str = "usage: modsys <descriptor> <command> [args]

commands:
  detect-text key=value...          e.g. prompt=\"you suck\" category=TOXICITY
  detect-image <url>
  evaluate <vars.json> <community_id>
  report <report.json>";

fn load_initial_config() -> anyhow::Result<ModsysConfig> {
    let explicit = std::env::var("CONFIG_FILE_PATH").ok();
    let config_path = explicit
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    if explicit.is_none() && !Path::new(&config_path).exists() {
        info!("No configuration file found, using defaults.");
        return Ok(ModsysConfig::default());
    }

    info!("Loading configuration from {}", config_path);
    let config = config::load_config(&config_path).map_err(|e| {
        anyhow!("Failed to load YAML configuration from {}: {}", config_path, e)
    })?;

    if let Err(val_errors) = config::validation::validate_config(&config) {
        error!(
            "Configuration from {} is invalid: {:?}. Halting.",
            config_path, val_errors
        );
        return Err(anyhow!("Invalid config: {:?}", val_errors));
    }
    info!("Configuration validated successfully.");
    Ok(config)
}

fn parse_text_request(args: &[String]) -> anyhow::Result<TextRequest> {
    let mut fields = serde_json::Map::new();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got '{arg}'"))?;
        let value = match key {
            "threshold" | "score" => serde_json::Value::from(
                value
                    .parse::<f64>()
                    .with_context(|| format!("{key} must be a number"))?,
            ),
            _ => serde_json::Value::from(value),
        };
        fields.insert(key.to_string(), value);
    }
    Ok(serde_json::from_value(serde_json::Value::Object(fields))?)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {path}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!(USAGE);
    }
    let (descriptor, command, rest) = (&args[0], args[1].as_str(), &args[2..]);

    let config = load_initial_config()?;
    let mut session = Session::from_config(&config)?;
    session.use_provider(descriptor, &config.credentials)?;

    let output = match (command, rest) {
        ("detect-text", fields) => session.detect_text(&parse_text_request(fields)?).await?,
        ("detect-image", [url]) => session.detect_image(url).await?,
        ("evaluate", [vars_path, community_id]) => {
            let vars: Vec<TestVector> = read_json(vars_path)?;
            let results = session.evaluate(vars, community_id).await?;
            serde_json::to_value(results)?
        }
        ("report", [request_path]) => {
            let request: ReportRequest = read_json(request_path)?;
            serde_json::to_value(session.report(&request).await?)?
        }
        _ => bail!(USAGE),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
