//! Studio - Scripted design sessions for the print-on-demand customizer
//!
//! Replays a JSON script of canvas gestures, configuration changes, and cart
//! actions, then prints a JSON summary of the session to stdout.

mod commands;
mod state;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{run_script, StudioAction};
use design_model::Catalog;
use state::StudioSession;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use store::{load_catalog_sync, SettingsManager, StudioSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "studio")]
#[command(about = "Print-on-demand design studio")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the studio settings file
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Catalog file replacing the built-in catalog
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session script
    Run {
        /// JSON array of studio actions
        script: PathBuf,
    },

    /// Print the active catalog as JSON
    Catalog,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let settings = load_settings(cli.settings.as_deref())?;
    let catalog_path = cli.catalog.clone().or_else(|| settings.catalog_path.clone());
    let catalog = match catalog_path {
        Some(path) => load_catalog_sync(&path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::default(),
    };

    match cli.command {
        Commands::Catalog => {
            println!("{}", catalog.to_json_pretty()?);
        }
        Commands::Run { script } => {
            let json = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read script {}", script.display()))?;
            let actions: Vec<StudioAction> = serde_json::from_str(&json)
                .with_context(|| format!("Invalid script {}", script.display()))?;

            tracing::info!("Running {} actions from {}", actions.len(), script.display());
            let mut session = StudioSession::new(Arc::new(catalog), settings);
            let summary = run_script(&mut session, &actions);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<StudioSettings> {
    match path {
        Some(path) => {
            let mut manager = SettingsManager::from_path(path);
            let settings = manager
                .load_sync()
                .with_context(|| format!("Failed to read settings {}", path.display()))?;
            Ok(settings.clone())
        }
        None => Ok(StudioSettings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["studio", "run", "demo.json", "--settings", "s.json"]).unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("s.json")));
        assert!(matches!(cli.command, Commands::Run { .. }));
    }

    #[test]
    fn test_load_settings_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("studio.json");
        std::fs::write(&path, r#"{"checkout": {"tax_rate": 0.05}}"#).unwrap();

        let settings = load_settings(Some(path.as_path())).unwrap();
        assert_eq!(settings.checkout.tax_rate, 0.05);
        assert_eq!(load_settings(None).unwrap(), StudioSettings::default());
    }
}
