use anyhow::Result;
use clap::Parser;
use country_names::{
    config::{DEFAULT_OUTPUT, DEFAULT_URL},
    export, fetch, ExportConfig,
};
use std::{path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Download country names, sort them, and write them as a JSON array.
#[derive(Parser, Debug)]
#[command(name = "country-names", version)]
struct Args {
    /// Countries endpoint
    #[arg(long, env = "COUNTRY_NAMES_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Output file; its directory must already exist
    #[arg(long, env = "COUNTRY_NAMES_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Request timeout in seconds (none by default)
    #[arg(long, env = "COUNTRY_NAMES_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Write raw UTF-8 instead of \uXXXX escapes
    #[arg(long)]
    utf8: bool,
}

impl From<Args> for ExportConfig {
    fn from(args: Args) -> Self {
        ExportConfig {
            url: args.url,
            output: args.output,
            timeout: args.timeout_secs.map(Duration::from_secs),
            escape_non_ascii: !args.utf8,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // logs go to stderr so stdout stays clean
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = ExportConfig::from(Args::parse());
    info!(?config, "startup");

    let client = fetch::build_client(&config)?;
    let names = export(&client, &config).await?;

    info!(count = names.len(), "done");
    Ok(())
}
