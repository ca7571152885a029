use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use serde::Serialize;
use std::path::Path;

/// The linked ledger sheet.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Link {
    pub sheet_url: String,
    pub sheet_name: String,
    pub spreadsheet_id: String,
    /// Downloads the ledger tab as CSV, ready for `--file`.
    pub csv_export_url: String,
}

impl Link {
    fn of(config: &Config) -> Result<Self> {
        Ok(Self {
            sheet_url: config.sheet_url().to_string(),
            sheet_name: config.sheet_name().to_string(),
            spreadsheet_id: config.spreadsheet_id().to_string(),
            csv_export_url: config.csv_export_url()?.to_string(),
        })
    }
}

/// Creates the home directory and an initial `config.json` that links `sheet_url`.
///
/// # Arguments
/// - `telexpense_home` - The directory that will be the home directory, e.g. `$HOME/telexpense`
/// - `sheet_url` - The URL of the Google Sheet that holds the ledger.
///   e.g.https://docs.google.com/spreadsheets/d/1a7Km9FxQwRbPt82JvN4LzYpH5OcGnWsT6iDuE3VhMjX
/// - `sheet_name` - The tab of the sheet that holds the ledger, `Transactions` when `None`.
///
/// # Errors
/// - Returns an error if the URL is not a sheet link or any file operation fails.
pub async fn init(
    telexpense_home: &Path,
    sheet_url: &str,
    sheet_name: Option<&str>,
) -> Result<Out<Link>> {
    let config = Config::create(telexpense_home, sheet_url, sheet_name)
        .await
        .context("Unable to create the telexpense directory and config")?;
    Ok(Out::new(
        format!(
            "Successfully created the telexpense config at {}",
            config.config_path().display()
        ),
        Link::of(&config)?,
    ))
}

/// Shows the linked sheet and the link that exports its ledger tab as CSV.
pub async fn link(config: &Config) -> Result<Out<Link>> {
    let link = Link::of(config)?;
    Ok(Out::new(
        format!(
            "Download the ledger with {} and pass the file to --file",
            link.csv_export_url
        ),
        link,
    ))
}
