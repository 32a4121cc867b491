// src/export.rs

use reqwest::Client;
use tracing::{info, instrument};

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::fetch::fetch_body;
use crate::names::{parse_records, sorted_names, NameList};
use crate::write::write_names;

/// fetch → extract → sort → serialize → write. Nothing touches the output
/// file until the names are in hand.
#[instrument(level = "info", skip(client, config), fields(url = %config.url, output = %config.output.display()))]
pub async fn export(client: &Client, config: &ExportConfig) -> Result<NameList> {
    let body = fetch_body(client, &config.url).await?;
    info!(bytes = body.len(), "fetched countries");

    let records = parse_records(&body).map_err(|source| ExportError::Parse {
        url: config.url.clone(),
        source,
    })?;
    let names = sorted_names(records);
    info!(count = names.len(), "sorted country names");

    write_names(&config.output, &names, config.escape_non_ascii)?;
    info!(path = %config.output.display(), count = names.len(), "wrote country names");

    Ok(names)
}
