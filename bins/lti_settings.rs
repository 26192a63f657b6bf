//! `lti-settings`: inspect and edit link-level settings from the command line.
//!
//! ```text
//! lti-settings [--custom name=value]... get <link_id> [key]
//! lti-settings [--custom name=value]... set <link_id> key=value...
//! lti-settings [--custom name=value]... set-all <link_id> '<json object>'
//! ```
//!
//! `--custom` supplies launch custom parameters (`custom_<name>`), which feed
//! the legacy defaults. Values in `key=value` are parsed as JSON when they can
//! be, otherwise kept as strings.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use migration::MigratorTrait;
use serde_json::Value;
use tracing::{error, info};

use service::settings::legacy::{normalize_custom_name, LaunchParameters};
use service::settings::repo::seaorm::SeaOrmLinkSettingsRepository;
use service::settings::session::LtiSession;
use service::settings::{LinkContext, LinkSettingsService, SettingsMap};

#[derive(Debug, Parser)]
#[command(name = "lti-settings", version, about = "Inspect and edit link-level LTI settings")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Args)]
struct GlobalArgs {
    /// Launch custom parameter, looked up as `custom_<name>` (repeatable)
    #[arg(long = "custom", global = true, value_name = "NAME=VALUE", value_parser = parse_pair)]
    custom: Vec<(String, String)>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the effective settings, or a single key
    Get { link_id: i64, key: Option<String> },
    /// Merge key=value pairs; writes only when something differs
    Set {
        link_id: i64,
        #[arg(required = true, value_name = "KEY=VALUE", value_parser = parse_pair)]
        pairs: Vec<(String, String)>,
    },
    /// Replace all settings with a JSON object
    SetAll {
        link_id: i64,
        #[arg(value_name = "JSON", value_parser = parse_object)]
        json: SettingsMap,
    },
}

impl Cli {
    fn launch(&self) -> LaunchParameters {
        let mut launch = LaunchParameters::new();
        for (name, value) in &self.global.custom {
            launch.insert(format!("custom_{}", normalize_custom_name(name)), value.as_str());
        }
        launch
    }
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

fn parse_object(raw: &str) -> Result<SettingsMap, String> {
    serde_json::from_str(raw).map_err(|e| format!("expected a JSON object: {e}"))
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn keyvals(pairs: &[(String, String)]) -> SettingsMap {
    pairs.iter().map(|(k, v)| (k.clone(), parse_value(v))).collect()
}

async fn run(cli: Cli, cfg: configs::AppConfig) -> Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!(event = "migrations_applied", "lti_link migrations applied");
    }

    let svc = LinkSettingsService::new(Arc::new(SeaOrmLinkSettingsRepository { db }), cfg.settings);
    let session = LtiSession::new();
    let launch = cli.launch();

    match cli.command {
        Command::Get { link_id, key } => {
            let link = LinkContext::new(link_id, &launch);
            let out = match key {
                Some(key) => match svc.get(&link, Some(&session), &key).await? {
                    Some(v) => v,
                    None => bail!("setting {key:?} not found for link {link_id}"),
                },
                None => Value::Object(svc.get_all(&link, Some(&session)).await?),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Set { link_id, pairs } => {
            let link = LinkContext::new(link_id, &launch);
            let wrote = svc.set(&link, Some(&session), keyvals(&pairs)).await?;
            println!("{}", if wrote { "updated" } else { "unchanged" });
        }
        Command::SetAll { link_id, json } => {
            let link = LinkContext::new(link_id, &launch);
            svc.set_all(&link, Some(&session), &json).await?;
            println!("replaced");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let cfg = match configs::AppConfig::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    common::utils::logging::init(cfg.logging.json);

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli, cfg)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(event = "run_failed", error = %e, "lti-settings failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
