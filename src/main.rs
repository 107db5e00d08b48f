// Batch mode: transactions.txt → purchase listing on stdout

use anyhow::{Context, Result};
use std::fs;
use std::io;

use fun_purchases::{run_batch, Config, ReferenceData, TransactionExtractor, TRANSACTIONS_FILE};

fn main() -> Result<()> {
    fun_purchases::init_logging();

    let config = Config::from_env()?;

    let extractor = TransactionExtractor::new()
        .with_timezone(config.timezone)
        .with_reference_data(ReferenceData::load_from_dir("."));

    let content = fs::read_to_string(TRANSACTIONS_FILE)
        .with_context(|| format!("Failed to read {}", TRANSACTIONS_FILE))?;

    run_batch(&config, &extractor, &content, &mut io::stdout().lock())?;

    Ok(())
}
