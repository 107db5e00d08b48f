// 📚 Reference Data - Auxiliary lookup tables
// products.json, nutrition.json, vitamins.json, allergies.json
//
// Loaded at startup, tolerated when absent. Extraction does not consult them
// yet; they are carried by the extractor for richer classification later.

use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const PRODUCTS_FILE: &str = "products.json";
pub const NUTRITION_FILE: &str = "nutrition.json";
pub const VITAMINS_FILE: &str = "vitamins.json";
pub const ALLERGIES_FILE: &str = "allergies.json";

/// String identifier → arbitrary metadata
pub type ReferenceTable = HashMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Products,
    Nutrition,
    Vitamins,
    Allergies,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 4] = [
        ReferenceKind::Products,
        ReferenceKind::Nutrition,
        ReferenceKind::Vitamins,
        ReferenceKind::Allergies,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ReferenceKind::Products => PRODUCTS_FILE,
            ReferenceKind::Nutrition => NUTRITION_FILE,
            ReferenceKind::Vitamins => VITAMINS_FILE,
            ReferenceKind::Allergies => ALLERGIES_FILE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    products: ReferenceTable,
    nutrition: ReferenceTable,
    vitamins: ReferenceTable,
    allergies: ReferenceTable,
}

impl ReferenceData {
    /// No tables at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every table from `dir`, substituting empty tables on failure
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let mut data = ReferenceData::empty();
        for kind in ReferenceKind::ALL {
            data.set_table(kind, load_table(dir.join(kind.file_name())));
        }
        data
    }

    /// Builder pattern: inject a single table
    pub fn with_table(mut self, kind: ReferenceKind, table: ReferenceTable) -> Self {
        self.set_table(kind, table);
        self
    }

    fn set_table(&mut self, kind: ReferenceKind, table: ReferenceTable) {
        match kind {
            ReferenceKind::Products => self.products = table,
            ReferenceKind::Nutrition => self.nutrition = table,
            ReferenceKind::Vitamins => self.vitamins = table,
            ReferenceKind::Allergies => self.allergies = table,
        }
    }

    pub fn table(&self, kind: ReferenceKind) -> &ReferenceTable {
        match kind {
            ReferenceKind::Products => &self.products,
            ReferenceKind::Nutrition => &self.nutrition,
            ReferenceKind::Vitamins => &self.vitamins,
            ReferenceKind::Allergies => &self.allergies,
        }
    }

    pub fn lookup(&self, kind: ReferenceKind, key: &str) -> Option<&Value> {
        self.table(kind).get(key)
    }

    pub fn product(&self, key: &str) -> Option<&Value> {
        self.lookup(ReferenceKind::Products, key)
    }

    pub fn nutrition(&self, key: &str) -> Option<&Value> {
        self.lookup(ReferenceKind::Nutrition, key)
    }

    pub fn vitamins(&self, key: &str) -> Option<&Value> {
        self.lookup(ReferenceKind::Vitamins, key)
    }

    pub fn allergies(&self, key: &str) -> Option<&Value> {
        self.lookup(ReferenceKind::Allergies, key)
    }

    pub fn is_empty(&self) -> bool {
        ReferenceKind::ALL.iter().all(|k| self.table(*k).is_empty())
    }
}

/// Read one JSON object file; any failure yields an empty table and a warning
pub fn load_table<P: AsRef<Path>>(path: P) -> ReferenceTable {
    let path = path.as_ref();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} not found. Using empty table.", path.display());
            return ReferenceTable::new();
        }
        Err(e) => {
            warn!("Could not read {}: {}. Using empty table.", path.display(), e);
            return ReferenceTable::new();
        }
    };

    match serde_json::from_str::<Map<String, Value>>(&content) {
        Ok(map) => {
            debug!("Loaded {} entries from {}", map.len(), path.display());
            map.into_iter().collect()
        }
        Err(e) => {
            warn!("{} is not a JSON object ({}). Using empty table.", path.display(), e);
            ReferenceTable::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_dir_gives_empty_tables() {
        let dir = TempDir::new().unwrap();
        let data = ReferenceData::load_from_dir(dir.path());
        assert!(data.is_empty());
        assert!(data.product("anything").is_none());
    }

    #[test]
    fn test_load_present_and_absent_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PRODUCTS_FILE),
            r#"{"candy-bar": {"category": "snack"}}"#,
        )
        .unwrap();
        fs::write(dir.path().join(ALLERGIES_FILE), r#"{"candy-bar": ["peanuts"]}"#).unwrap();

        let data = ReferenceData::load_from_dir(dir.path());
        assert!(!data.is_empty());
        assert_eq!(data.product("candy-bar"), Some(&json!({"category": "snack"})));
        assert_eq!(data.allergies("candy-bar"), Some(&json!(["peanuts"])));
        assert!(data.nutrition("candy-bar").is_none());
        assert!(data.vitamins("candy-bar").is_none());
    }

    #[test]
    fn test_non_object_file_is_tolerated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(NUTRITION_FILE);
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(load_table(&path).is_empty());

        fs::write(&path, "{ not json").unwrap();
        assert!(load_table(&path).is_empty());
    }

    #[test]
    fn test_with_table() {
        let mut table = ReferenceTable::new();
        table.insert("apple".to_string(), json!({"vitamin_c": "14%"}));

        let data = ReferenceData::empty().with_table(ReferenceKind::Vitamins, table);
        assert_eq!(data.vitamins("apple"), Some(&json!({"vitamin_c": "14%"})));
        assert!(data.table(ReferenceKind::Products).is_empty());
    }

    #[test]
    fn test_file_names() {
        let names: Vec<&str> = ReferenceKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(
            names,
            vec!["products.json", "nutrition.json", "vitamins.json", "allergies.json"]
        );
    }
}
