mod greeting_log;
mod telemetry;

use std::env;

use chrono::Utc;
use dtimelog_core::Greeter;
use dtimelog_util::{load_env_file, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    let config = AppConfig::from_env()?;

    telemetry::init_tracing(&config)?;

    let greeter = Greeter::new(config.greeting.as_str());
    let name = resolve_name(env::args().skip(1), &config);
    info!(
        stage = "app",
        env = %config.environment.as_str(),
        greeting = %greeter.greeting_text(),
        %name,
        "greeting"
    );

    greeter.greet(&name)?;

    if let Some(database_url) = config.database_url.as_deref() {
        let record = greeter.record(&name, Utc::now());
        let id = greeting_log::append(database_url, &record).await?;
        info!(stage = "app", %id, "greeting recorded");
    }

    Ok(())
}

/// Picks the first command line argument, falling back to the configured name.
fn resolve_name<I>(mut args: I, config: &AppConfig) -> String
where
    I: Iterator<Item = String>,
{
    args.next().unwrap_or_else(|| config.name.clone())
}
