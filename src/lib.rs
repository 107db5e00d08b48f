// Fun Purchases - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod classifier;
pub mod config;
pub mod errors;
pub mod extractor;
pub mod models;
pub mod payment;
pub mod reference;
pub mod timestamp;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use classifier::{is_fun_purchase, FunClassifier, DEFAULT_FUN_KEYWORDS};
pub use config::{Config, PURCHASES_FILE, TRANSACTIONS_FILE};
pub use errors::{ExtractError, ExtractResult};
pub use extractor::{extract_purchases, ExtractionReport, TransactionExtractor, TransactionOutcome};
pub use models::{
    Merchant, PaymentMethod, Price, Product, PurchaseSummary, Transaction, TransactionDocument,
    SUMMARY_DIVIDER,
};
pub use payment::{format_payment, UNKNOWN_PAYMENT_METHOD};
pub use reference::{ReferenceData, ReferenceKind, ReferenceTable};
pub use timestamp::{local_purchase_time, DEFAULT_TIMEZONE};

use log::{debug, warn};
use std::io::Write;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize env_logger, defaulting to `info` when RUST_LOG is unset
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Render summaries the way the CLI prints them, divider after each
pub fn render_purchases(purchases: &[PurchaseSummary]) -> String {
    purchases
        .iter()
        .map(|p| format!("{}\n{}\n", p, SUMMARY_DIVIDER))
        .collect()
}

/// Batch mode: extract from `content` and write the listing to `out`
///
/// Only a failed write is an error. An unusable keywords file is logged and
/// the built-in keywords are used for the fun count instead.
pub fn run_batch<W: Write>(
    config: &Config,
    extractor: &TransactionExtractor,
    content: &str,
    out: &mut W,
) -> anyhow::Result<Vec<PurchaseSummary>> {
    let purchases = extractor.extract_purchases(content);
    out.write_all(render_purchases(&purchases).as_bytes())?;
    out.flush()?;

    let classifier = config.fun_classifier().unwrap_or_else(|e| {
        warn!("{:#}. Using built-in fun keywords.", e);
        FunClassifier::default()
    });
    let fun = classifier.fun_only(&purchases);
    debug!("{} purchases, {} look like fun", purchases.len(), fun.len());

    Ok(purchases)
}
