mod cli;

use crate::cli::{Command, CLI};
use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, info};
use warren_core::{ClickContext, Location, SystemClock};
use warren_generator::RandomGenerator;
use warren_redirector::{Redirector, ResolutionEngine, Resolution};
use warren_registry::{AliasRegistry, Shortener, ShortenParams};
use warren_storage::{JsonFileStore, Table};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    warren_telemetry::init(config.log_format, warren_telemetry::DEFAULT_DIRECTIVE)?;

    let store = JsonFileStore::new(&config.data_dir, &config.namespace);
    info!(path = %store.path().display(), "using alias document");

    let table = Table::new(store);
    let registry = AliasRegistry::new(table.clone(), RandomGenerator::new(), SystemClock);
    let engine = ResolutionEngine::new(table, SystemClock);

    match config.command {
        Command::Shorten { url, token, expiry } => {
            let mut params = ShortenParams::new(url);
            params.custom_token = token;
            params.expiry_minutes = expiry;

            let record = registry.shorten(params).await?;
            println!("{}", record.shortcode().to_url(&config.short_base));
            println!("expires at {}", record.expiry_at());
        }
        Command::Open {
            code,
            referrer,
            region,
            city,
        } => {
            let context = ClickContext {
                referrer,
                location: Location { region, city },
            };
            match engine.resolve(&code, context).await? {
                Resolution::Valid(record) => println!("{}", record.long_url()),
                Resolution::NotFound => bail!("short code '{code}' not found"),
                Resolution::Expired => bail!("short code '{code}' has expired"),
            }
        }
        Command::List { filter } => {
            let dashboard = registry.dashboard(filter).await;
            debug!(rows = dashboard.rows.len(), %filter, "built dashboard");

            for row in &dashboard.rows {
                let record = &row.record;
                println!(
                    "{}\t{}\t{}\t{} clicks\t{}",
                    record.shortcode().to_url(&config.short_base),
                    row.status,
                    record.expiry_at(),
                    record.analytics().clicks(),
                    record.long_url(),
                );
            }
            println!(
                "{} total, {} active, {} expired",
                dashboard.total, dashboard.active, dashboard.expired
            );
        }
        Command::Show { code } => {
            let Some(record) = registry.get(&code).await else {
                bail!("short code '{code}' not found");
            };
            let json = serde_json::to_string_pretty(&record).context("failed to render record")?;
            println!("{json}");
        }
        Command::Delete { code } => {
            if registry.delete(&code).await? {
                println!("deleted {code}");
            } else {
                println!("{code} did not exist");
            }
        }
    }

    Ok(())
}
