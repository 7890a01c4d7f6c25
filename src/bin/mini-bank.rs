use std::fs::File;

use anyhow::{Context, Result};
use mini_bank::bin_utils::{OperationError, Service};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let filename = args
        .next()
        .context("Expected a file name as the first argument")?;
    let bank_name = args.next().unwrap_or_else(|| "Bank".to_owned());
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        bank_name,
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| match err {
            OperationError::AccountErr(_) | OperationError::TransferErr(_) => {
                // rejected operations are expected, not input errors
                warn!(line, "{err}")
            }
            err => eprintln!("Error at line {line}: {err}"),
        }),
    };
    service.run()
}
