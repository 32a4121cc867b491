// src/fetch.rs

use reqwest::Client;
use tracing::debug;

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};

/// Build the client for one run. Only sets a timeout when one is configured.
pub fn build_client(config: &ExportConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(ExportError::Client)
}

/// GET `url` and return the raw body. Any non-2xx status is an error.
pub async fn fetch_body(client: &Client, url: &str) -> Result<Vec<u8>> {
    debug!(%url, "requesting countries");
    let network = |source| ExportError::Network {
        url: url.to_string(),
        source,
    };

    let resp = client.get(url).send().await.map_err(network)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ExportError::Status {
            url: url.to_string(),
            status,
        });
    }

    let bytes = resp.bytes().await.map_err(network)?;
    debug!(%url, %status, len = bytes.len(), "received body");
    Ok(bytes.to_vec())
}
