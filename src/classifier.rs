// 🎉 Fun-Purchase Classifier - Keywords as Data
// Case-insensitive substring matching of product names against a keyword set

use crate::models::PurchaseSummary;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Built-in discretionary-spending keywords
pub const DEFAULT_FUN_KEYWORDS: [&str; 12] = [
    "snack",
    "candy",
    "game",
    "toy",
    "entertainment",
    "pizza",
    "burger",
    "ice cream",
    "chocolate",
    "energy drink",
    "red bull",
    "monster",
];

// ============================================================================
// CLASSIFIER
// ============================================================================

#[derive(Debug, Clone)]
pub struct FunClassifier {
    /// Stored lowercased
    keywords: Vec<String>,
}

impl FunClassifier {
    /// Build from any keyword list; blanks are dropped
    pub fn from_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        FunClassifier { keywords }
    }

    /// Load keywords from a JSON array of strings
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read keywords file: {:?}", path.as_ref()))?;

        let keywords: Vec<String> = serde_json::from_str(&content)
            .context("Failed to parse keywords JSON (expected an array of strings)")?;

        Ok(FunClassifier::from_keywords(keywords))
    }

    pub fn is_fun_purchase(&self, product_name: &str) -> bool {
        let name = product_name.to_lowercase();
        self.keywords.iter().any(|k| name.contains(k.as_str()))
    }

    /// Keep only the summaries whose product name matches
    pub fn fun_only<'a, I>(&self, summaries: I) -> Vec<PurchaseSummary>
    where
        I: IntoIterator<Item = &'a PurchaseSummary>,
    {
        summaries
            .into_iter()
            .filter(|s| self.is_fun_purchase(&s.product_name))
            .cloned()
            .collect()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for FunClassifier {
    fn default() -> Self {
        FunClassifier::from_keywords(DEFAULT_FUN_KEYWORDS)
    }
}

/// Classify with the built-in keyword set
pub fn is_fun_purchase(product_name: &str) -> bool {
    FunClassifier::default().is_fun_purchase(product_name)
}

// ============================================================================
// TESTS
// ============================================================================
