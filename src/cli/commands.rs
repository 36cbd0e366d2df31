//! CLI command implementations

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

use crate::api::{Credentials, RecordingApiClient, SearchOutcome};
use crate::catalog::RecordingCatalog;
use crate::cli::ConfigCommand;
use crate::config::Settings;

/// List the recordings of one calendar day
pub async fn list_recordings(settings: &Settings, date: Option<String>) -> Result<()> {
    let day = match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))?,
        None => Local::now().date_naive(),
    };

    let (api, credentials) = build_client(settings)?;

    match api.search(day, &credentials).await? {
        SearchOutcome::Empty => {
            // Distinct from a failure: the day simply had no calls.
            println!("No recordings found for {}.", day);
        }
        SearchOutcome::Records(records) => {
            let mut catalog = RecordingCatalog::new();
            catalog.populate(records);

            println!("{} recording(s) for {}:", catalog.len(), day);
            for r in catalog.iter() {
                println!(
                    "  {:>8}  {}  {:>5}s  {:<10}  {} -> {}{}",
                    r.id,
                    r.timestamp,
                    r.duration_secs,
                    r.call_type,
                    r.source.as_deref().unwrap_or("-"),
                    r.destination.as_deref().unwrap_or("-"),
                    if r.has_recording { "" } else { "  (no audio)" },
                );
            }
        }
    }

    Ok(())
}

/// Fetch a recording and write the wrapped WAV file to disk
pub async fn export_recording(
    settings: &Settings,
    id: i64,
    output: Option<PathBuf>,
) -> Result<()> {
    let (api, credentials) = build_client(settings)?;

    let wav = api
        .fetch_audio(id, &credentials)
        .await
        .with_context(|| format!("Failed to fetch audio for recording {}", id))?;

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.wav", id)));
    std::fs::write(&path, &wav)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote {} bytes to {}", wav.len(), path.display());
    Ok(())
}

/// Delete a recording server-side
pub async fn delete_recording(settings: &Settings, id: i64) -> Result<()> {
    let (api, credentials) = build_client(settings)?;

    api.delete(id, &credentials)
        .await
        .with_context(|| format!("Failed to delete recording {}", id))?;

    println!("Recording {} deleted.", id);
    Ok(())
}

/// Handle configuration commands
pub fn config_command(settings: &Settings, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let content = toml::to_string_pretty(settings)?;
            println!("{}", content);
        }
        ConfigCommand::Path => {
            println!("{}", Settings::config_path()?.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}

fn build_client(settings: &Settings) -> Result<(RecordingApiClient, Credentials)> {
    let store = crate::secrets::MemorySecretStore::from_env();
    let credentials = Credentials::from_store(&store).context(
        "Missing API credentials. Set CALLBOX_API_TOKEN and CALLBOX_API_SECRET.",
    )?;

    let api = RecordingApiClient::new(settings.api.base_url.clone(), settings.api_timeout())?;
    Ok((api, credentials))
}
