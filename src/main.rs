//! Evaluates a scenario file and prints the workflow's decisions as JSON.
//!
//! ```text
//! medexam-workflow scenarios/driving.yaml
//! ```

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medexam_workflow::application::{evaluate, Scenario};
use medexam_workflow::config::{AppConfig, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .context("invalid log filter")?;
    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate()?;
    init_tracing(&config.logging)?;

    let Some(path) = std::env::args().nth(1) else {
        anyhow::bail!("usage: medexam-workflow <scenario.yaml>");
    };

    let scenario = Scenario::from_path(&path)?;
    let report = evaluate(&scenario, &config.requirement_policy());
    tracing::info!(
        exam_type = %scenario.draft.exam_type,
        requirement = ?report.requirement,
        "scenario evaluated"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
