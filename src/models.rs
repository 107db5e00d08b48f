// 🧾 Data Model - Transaction documents in, purchase summaries out
//
// Input shape (one merchant, many transactions, many products each):
// {
//   "merchant": { "name": "QuickMart" },
//   "transactions": [
//     {
//       "datetime": "2024-01-01T12:00:00Z",
//       "payment_methods": [{ "brand": "Visa", "last_four": "4242" }],
//       "products": [{ "name": "Candy Bar", "price": { "total": 2.50 }, "url": "..." }]
//     }
//   ]
// }

use crate::errors::{ExtractError, ExtractResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// INPUT TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Merchant {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethod {
    pub brand: String,
    pub last_four: String,
}

impl PaymentMethod {
    pub fn new(brand: &str, last_four: &str) -> Self {
        PaymentMethod {
            brand: brand.to_string(),
            last_four: last_four.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub price: Price,
    pub url: String,
}

/// One checkout: a timestamp, how it was paid, and what was bought
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Raw ISO-8601 string, converted to local time during extraction
    pub datetime: String,
    pub payment_methods: Vec<PaymentMethod>,
    pub products: Vec<Product>,
}

/// Top-level parsed input
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDocument {
    pub merchant: Merchant,
    pub transactions: Vec<Transaction>,
}

// ============================================================================
// OUTPUT TYPE
// ============================================================================

/// PurchaseSummary - one product within one transaction, flattened
///
/// Merchant and payment method are broadcast from the transaction to every
/// product it contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseSummary {
    pub merchant: String,
    pub product_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Local 12-hour clock, e.g. "02:05 PM"
    pub purchase_time: String,
    pub payment_method: String,
    pub url: String,
}

/// Divider printed after each summary in batch mode
pub const SUMMARY_DIVIDER: &str = "---";

impl fmt::Display for PurchaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🛍️ Fun Purchase at {}:", self.merchant)?;
        writeln!(f, "   Item: {}", self.product_name)?;
        writeln!(f, "   Price: ${}", self.price)?;
        writeln!(f, "   Time: {}", self.purchase_time)?;
        write!(f, "   Paid with: {}", self.payment_method)
    }
}

// ============================================================================
// JSON FIELD ACCESS
// ============================================================================
// Walks serde_json::Value by hand so a missing field reports its full path
// ("products[1].price.total") instead of aborting the whole document.

fn field<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> ExtractResult<&'a Value> {
    match obj.get(key) {
        Some(Value::Null) | None => Err(ExtractError::missing(path)),
        Some(value) => Ok(value),
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> ExtractResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ExtractError::invalid(path, "expected an object"))
}

fn require_str(obj: &Map<String, Value>, key: &str, path: &str) -> ExtractResult<String> {
    field(obj, key, path)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ExtractError::invalid(path, "expected a string"))
}

fn require_array<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> ExtractResult<&'a Vec<Value>> {
    field(obj, key, path)?
        .as_array()
        .ok_or_else(|| ExtractError::invalid(path, "expected an array"))
}

/// Strings pass through; numbers are rendered as written
fn require_scalar(obj: &Map<String, Value>, key: &str, path: &str) -> ExtractResult<String> {
    match field(obj, key, path)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(ExtractError::invalid(path, "expected a string or number")),
    }
}

fn require_decimal(obj: &Map<String, Value>, key: &str, path: &str) -> ExtractResult<Decimal> {
    let parsed = match field(obj, key, path)? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string())),
        Value::String(s) => Decimal::from_str(s.trim()),
        _ => return Err(ExtractError::invalid(path, "expected a number")),
    };

    parsed.map_err(|e| ExtractError::invalid(path, e.to_string()))
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl Merchant {
    /// Read `merchant.name` from the document root
    pub fn from_document(root: &Map<String, Value>) -> ExtractResult<Self> {
        let merchant = as_object(field(root, "merchant", "merchant.name")?, "merchant")?;
        Ok(Merchant {
            name: require_str(merchant, "name", "merchant.name")?,
        })
    }
}

impl PaymentMethod {
    pub fn from_json(value: &Value, path: &str) -> ExtractResult<Self> {
        let obj = as_object(value, path)?;
        Ok(PaymentMethod {
            brand: require_str(obj, "brand", &format!("{path}.brand"))?,
            last_four: require_scalar(obj, "last_four", &format!("{path}.last_four"))?,
        })
    }
}

impl Product {
    pub fn from_json(value: &Value, path: &str) -> ExtractResult<Self> {
        let obj = as_object(value, path)?;
        let price_path = format!("{path}.price");
        let price = as_object(field(obj, "price", &format!("{price_path}.total"))?, &price_path)?;

        Ok(Product {
            name: require_str(obj, "name", &format!("{path}.name"))?,
            price: Price {
                total: require_decimal(price, "total", &format!("{price_path}.total"))?,
            },
            url: require_str(obj, "url", &format!("{path}.url"))?,
        })
    }
}

impl Transaction {
    /// Read one transaction; field paths are relative to the transaction
    ///
    /// Only the first payment method must be well formed; later entries are
    /// kept up to the first malformed one. `"payment_methods": null` counts
    /// as an empty list.
    pub fn from_json(value: &Value) -> ExtractResult<Self> {
        let obj = as_object(value, "transaction")?;

        let datetime = require_str(obj, "datetime", "datetime")?;

        // present but null reads as "no methods"; absent is still an error
        let raw_methods: &[Value] = match obj.get("payment_methods") {
            Some(Value::Null) => &[],
            _ => require_array(obj, "payment_methods", "payment_methods")?.as_slice(),
        };
        let mut payment_methods = Vec::with_capacity(raw_methods.len());
        for (idx, method) in raw_methods.iter().enumerate() {
            match PaymentMethod::from_json(method, &format!("payment_methods[{idx}]")) {
                Ok(m) => payment_methods.push(m),
                Err(e) if idx == 0 => return Err(e),
                Err(_) => break,
            }
        }

        let products = require_array(obj, "products", "products")?
            .iter()
            .enumerate()
            .map(|(idx, p)| Product::from_json(p, &format!("products[{idx}]")))
            .collect::<ExtractResult<Vec<_>>>()?;

        Ok(Transaction {
            datetime,
            payment_methods,
            products,
        })
    }
}

impl TransactionDocument {
    /// Strict parse: the first broken transaction fails the whole document
    ///
    /// `TransactionExtractor::extract_report` is the lenient counterpart.
    pub fn parse(document_text: &str) -> ExtractResult<Self> {
        let root: Value = serde_json::from_str(document_text)?;
        let root = root.as_object().ok_or(ExtractError::NotAnObject)?;

        let merchant = Merchant::from_document(root)?;

        let transactions = match root.get("transactions") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(idx, tx)| {
                    Transaction::from_json(tx).map_err(|e| match e {
                        ExtractError::MissingField { field } => {
                            ExtractError::missing(format!("transactions[{idx}].{field}"))
                        }
                        ExtractError::InvalidField { field, reason } => {
                            ExtractError::invalid(format!("transactions[{idx}].{field}"), reason)
                        }
                        other => other,
                    })
                })
                .collect::<ExtractResult<Vec<_>>>()?,
            Some(_) => return Err(ExtractError::invalid("transactions", "expected an array")),
        };

        Ok(TransactionDocument {
            merchant,
            transactions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_from_json() {
        let value = json!({
            "datetime": "2024-03-15T18:30:00Z",
            "payment_methods": [{ "brand": "Visa", "last_four": "4242" }],
            "products": [
                { "name": "Candy Bar", "price": { "total": 2.5 }, "url": "http://x/1" },
                { "name": "Soda", "price": { "total": "1.25" }, "url": "http://x/2" }
            ]
        });

        let tx = Transaction::from_json(&value).unwrap();
        assert_eq!(tx.datetime, "2024-03-15T18:30:00Z");
        assert_eq!(tx.payment_methods, vec![PaymentMethod::new("Visa", "4242")]);
        assert_eq!(tx.products.len(), 2);
        assert_eq!(tx.products[0].price.total, Decimal::from_str("2.50").unwrap());
        assert_eq!(tx.products[1].price.total, Decimal::from_str("1.25").unwrap());
    }

    #[test]
    fn test_missing_datetime() {
        let value = json!({ "payment_methods": [], "products": [] });
        let err = Transaction::from_json(&value).unwrap_err();
        assert_eq!(err.to_string(), "missing field: datetime");
    }

    #[test]
    fn test_null_counts_as_missing() {
        let value = json!({ "datetime": null, "payment_methods": [], "products": [] });
        let err = Transaction::from_json(&value).unwrap_err();
        assert_eq!(err.field(), Some("datetime"));
    }

    #[test]
    fn test_missing_price_total_reports_path() {
        let value = json!({
            "datetime": "2024-03-15T18:30:00Z",
            "payment_methods": [],
            "products": [
                { "name": "A", "price": { "total": 1 }, "url": "u" },
                { "name": "B", "price": {}, "url": "u" }
            ]
        });

        let err = Transaction::from_json(&value).unwrap_err();
        assert_eq!(err.to_string(), "missing field: products[1].price.total");
    }

    #[test]
    fn test_wrong_type_is_invalid_field() {
        let value = json!({ "datetime": "x", "payment_methods": {}, "products": [] });
        let err = Transaction::from_json(&value).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidField { .. }));
        assert_eq!(err.field(), Some("payment_methods"));
    }

    #[test]
    fn test_numeric_last_four() {
        let method = PaymentMethod::from_json(&json!({ "brand": "Amex", "last_four": 1005 }), "pm").unwrap();
        assert_eq!(method.last_four, "1005");
    }

    #[test]
    fn test_broken_second_payment_method_is_ignored() {
        let value = json!({
            "datetime": "2024-03-15T18:30:00Z",
            "payment_methods": [{ "brand": "Visa", "last_four": "4242" }, { "brand": "Amex" }],
            "products": []
        });

        let tx = Transaction::from_json(&value).unwrap();
        assert_eq!(tx.payment_methods.len(), 1);
    }

    #[test]
    fn test_merchant_from_document() {
        let root = json!({ "merchant": { "name": "QuickMart" } });
        let merchant = Merchant::from_document(root.as_object().unwrap()).unwrap();
        assert_eq!(merchant.name, "QuickMart");

        let root = json!({ "merchant": {} });
        let err = Merchant::from_document(root.as_object().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "missing field: merchant.name");
    }

    #[test]
    fn test_document_parse() {
        let doc = TransactionDocument::parse(
            &json!({
                "merchant": { "name": "QuickMart" },
                "transactions": [{
                    "datetime": "2024-01-01T12:00:00Z",
                    "payment_methods": [],
                    "products": [{ "name": "Candy Bar", "price": { "total": 2.5 }, "url": "http://x/1" }]
                }]
            })
            .to_string(),
        )
        .unwrap();

        assert_eq!(doc.merchant.name, "QuickMart");
        assert_eq!(doc.transactions[0].products[0].price.total, Decimal::new(25, 1));

        let empty = TransactionDocument::parse(r#"{"merchant": {"name": "M"}}"#).unwrap();
        assert!(empty.transactions.is_empty());
    }

    #[test]
    fn test_document_parse_is_strict() {
        let text = json!({
            "merchant": { "name": "QuickMart" },
            "transactions": [
                { "datetime": "2024-01-01T12:00:00Z", "payment_methods": [], "products": [] },
                { "datetime": "2024-01-01T12:00:00Z", "products": [] }
            ]
        })
        .to_string();

        let err = TransactionDocument::parse(&text).unwrap_err();
        assert_eq!(err.to_string(), "missing field: transactions[1].payment_methods");

        assert!(matches!(
            TransactionDocument::parse("[]").unwrap_err(),
            ExtractError::NotAnObject
        ));
    }

    #[test]
    fn test_null_payment_methods_is_empty() {
        let value = json!({
            "datetime": "2024-03-15T18:30:00Z",
            "payment_methods": null,
            "products": [{ "name": "A", "price": { "total": 1 }, "url": "u" }]
        });

        let tx = Transaction::from_json(&value).unwrap();
        assert!(tx.payment_methods.is_empty());
        assert_eq!(tx.products.len(), 1);

        let value = json!({ "datetime": "2024-03-15T18:30:00Z", "products": [] });
        let err = Transaction::from_json(&value).unwrap_err();
        assert_eq!(err.to_string(), "missing field: payment_methods");
    }

    #[test]
    fn test_summary_display() {
        let summary = PurchaseSummary {
            merchant: "QuickMart".to_string(),
            product_name: "Candy Bar".to_string(),
            price: Decimal::from_str("2.50").unwrap(),
            purchase_time: "07:00 AM".to_string(),
            payment_method: "Visa ending in 4242".to_string(),
            url: "http://x/1".to_string(),
        };

        let rendered = summary.to_string();
        assert!(rendered.starts_with("🛍️ Fun Purchase at QuickMart:"));
        assert!(rendered.contains("   Item: Candy Bar\n"));
        assert!(rendered.contains("   Price: $2.50\n"));
        assert!(rendered.contains("   Time: 07:00 AM\n"));
        assert!(rendered.ends_with("   Paid with: Visa ending in 4242"));
    }

    #[test]
    fn test_summary_serializes_price_as_number() {
        let summary = PurchaseSummary {
            merchant: "M".to_string(),
            product_name: "P".to_string(),
            price: Decimal::from_str("2.5").unwrap(),
            purchase_time: "07:00 AM".to_string(),
            payment_method: "Unknown payment method".to_string(),
            url: "u".to_string(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["price"], json!(2.5));
        assert_eq!(json["product_name"], "P");
    }
}
