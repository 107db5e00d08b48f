// 🔎 Transaction Extractor
// Flattens merchant × transaction × product into PurchaseSummary rows
//
// Failure policy:
// - Document level (bad JSON, not an object, no merchant name) → nothing
//   is extracted; `extract_purchases` logs and returns an empty Vec.
// - Transaction level (missing field, bad timestamp) → that transaction
//   contributes nothing, siblings are unaffected.

use crate::errors::{ExtractError, ExtractResult};
use crate::models::{Merchant, PurchaseSummary, Transaction};
use crate::payment::format_payment;
use crate::reference::ReferenceData;
use crate::timestamp::{local_purchase_time, DEFAULT_TIMEZONE};
use chrono_tz::Tz;
use log::{debug, error, warn};
use serde_json::Value;

// ============================================================================
// REPORT TYPES
// ============================================================================

/// What happened to one transaction, by position in the document
#[derive(Debug)]
pub struct TransactionOutcome {
    pub index: usize,
    pub result: ExtractResult<Vec<PurchaseSummary>>,
}

impl TransactionOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-transaction results for a whole document, in document order
#[derive(Debug)]
pub struct ExtractionReport {
    pub merchant: String,
    pub outcomes: Vec<TransactionOutcome>,
}

impl ExtractionReport {
    /// Summaries from every successful transaction, in order
    pub fn purchases(&self) -> Vec<PurchaseSummary> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .flatten()
            .cloned()
            .collect()
    }

    pub fn into_purchases(self) -> Vec<PurchaseSummary> {
        self.outcomes
            .into_iter()
            .filter_map(|o| o.result.ok())
            .flatten()
            .collect()
    }

    /// (transaction index, error) for each failed transaction
    pub fn failures(&self) -> impl Iterator<Item = (usize, &ExtractError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.index, e)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

// ============================================================================
// EXTRACTOR
// ============================================================================

#[derive(Debug, Clone)]
pub struct TransactionExtractor {
    timezone: Tz,
    reference: ReferenceData,
}

impl TransactionExtractor {
    /// America/New_York, no reference data
    pub fn new() -> Self {
        TransactionExtractor {
            timezone: DEFAULT_TIMEZONE,
            reference: ReferenceData::empty(),
        }
    }

    /// Builder pattern: report purchase times in another zone
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Builder pattern: attach lookup tables
    pub fn with_reference_data(mut self, reference: ReferenceData) -> Self {
        self.reference = reference;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn reference_data(&self) -> &ReferenceData {
        &self.reference
    }

    /// Extract with per-transaction outcomes
    ///
    /// Errors only for document-level problems.
    pub fn extract_report(&self, document_text: &str) -> ExtractResult<ExtractionReport> {
        let root: Value = serde_json::from_str(document_text)?;
        let root = root.as_object().ok_or(ExtractError::NotAnObject)?;

        let merchant = Merchant::from_document(root)?;

        let transactions = match root.get("transactions") {
            None | Some(Value::Null) => &[][..],
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => return Err(ExtractError::invalid("transactions", "expected an array")),
        };

        let outcomes = transactions
            .iter()
            .enumerate()
            .map(|(index, value)| TransactionOutcome {
                index,
                result: Transaction::from_json(value)
                    .and_then(|tx| self.summarize_transaction(&merchant.name, &tx)),
            })
            .collect();

        Ok(ExtractionReport {
            merchant: merchant.name,
            outcomes,
        })
    }

    /// Extract every purchase that can be extracted
    ///
    /// Never fails: document-level problems are logged and yield an empty
    /// Vec, broken transactions are logged and skipped.
    pub fn extract_purchases(&self, document_text: &str) -> Vec<PurchaseSummary> {
        let report = match self.extract_report(document_text) {
            Ok(report) => report,
            Err(e) => {
                error!("Error: {}", e);
                return Vec::new();
            }
        };

        for (index, e) in report.failures() {
            warn!("Skipping transaction {}: {}", index, e);
        }

        let purchases = report.into_purchases();
        debug!("Extracted {} purchases", purchases.len());
        purchases
    }

    /// One summary per product; merchant, time and payment are shared
    pub fn summarize_transaction(
        &self,
        merchant: &str,
        transaction: &Transaction,
    ) -> ExtractResult<Vec<PurchaseSummary>> {
        let purchase_time = local_purchase_time(&transaction.datetime, self.timezone)?;
        let payment_method = format_payment(&transaction.payment_methods);

        Ok(transaction
            .products
            .iter()
            .map(|product| PurchaseSummary {
                merchant: merchant.to_string(),
                product_name: product.name.clone(),
                price: product.price.total,
                purchase_time: purchase_time.clone(),
                payment_method: payment_method.clone(),
                url: product.url.clone(),
            })
            .collect())
    }
}

impl Default for TransactionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract with the default zone and no reference data
pub fn extract_purchases(document_text: &str) -> Vec<PurchaseSummary> {
    TransactionExtractor::new().extract_purchases(document_text)
}

// ============================================================================
// TESTS
// ============================================================================
