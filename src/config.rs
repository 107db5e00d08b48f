use crate::classifier::FunClassifier;
use crate::timestamp::{parse_zone, DEFAULT_TIMEZONE};
use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const TIMEZONE_VAR: &str = "FUN_PURCHASES_TIMEZONE";
pub const BIND_VAR: &str = "FUN_PURCHASES_BIND";
pub const KEYWORDS_VAR: &str = "FUN_PURCHASES_KEYWORDS";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Fixed file names, resolved against the working directory
pub const TRANSACTIONS_FILE: &str = "transactions.txt";
pub const PURCHASES_FILE: &str = "purchases.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub timezone: Tz,
    pub bind_addr: SocketAddr,
    pub keywords_file: Option<PathBuf>,
}

impl Config {
    /// Read `.env` (if any), then the process environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let timezone = match vars.get(TIMEZONE_VAR) {
            Some(name) => parse_zone(name)
                .ok_or_else(|| anyhow!("{} is not a known time zone: {:?}", TIMEZONE_VAR, name))?,
            None => DEFAULT_TIMEZONE,
        };

        let bind_addr = vars
            .get(BIND_VAR)
            .map(String::as_str)
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .with_context(|| format!("{} must be a socket address like {}", BIND_VAR, DEFAULT_BIND_ADDR))?;

        let keywords_file = vars
            .get(KEYWORDS_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config {
            timezone,
            bind_addr,
            keywords_file,
        })
    }

    /// Built-in keywords unless a keywords file is configured
    pub fn fun_classifier(&self) -> Result<FunClassifier> {
        match &self.keywords_file {
            Some(path) => FunClassifier::from_file(path),
            None => Ok(FunClassifier::default()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timezone: DEFAULT_TIMEZONE,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            keywords_file: None,
        }
    }
}
