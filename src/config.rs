//! Service configuration from the environment

use crate::state_machine::{DialogPolicy, MissingSlotPolicy};
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_TABLE: &str = "orders";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentConfig {
    /// Table holding order records
    pub orders_table: String,
    pub db_path: PathBuf,
    pub port: u16,
    pub policy: DialogPolicy,
    /// Orders to load at startup, if any
    pub seed_file: Option<PathBuf>,
}

impl FulfillmentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset and empty variables take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let orders_table = get("ORDERS_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let db_path = get("SWIFTLINE_DB_PATH").map_or_else(
            || {
                let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(format!("{home}/.swiftline/orders.db"))
            },
            PathBuf::from,
        );

        let port = match get("SWIFTLINE_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    var: "SWIFTLINE_PORT",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_PORT,
        };

        let missing_slot = match get("MISSING_SLOT_POLICY") {
            Some(raw) => raw
                .parse::<MissingSlotPolicy>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "MISSING_SLOT_POLICY",
                    value: raw.clone(),
                    reason,
                })?,
            None => MissingSlotPolicy::default(),
        };

        let defaults = DialogPolicy::default();
        let include_order_items = parse_flag(
            "INCLUDE_ORDER_ITEMS",
            get("INCLUDE_ORDER_ITEMS"),
            defaults.include_order_items,
        )?;
        let follow_up_card =
            parse_flag("FOLLOW_UP_CARD", get("FOLLOW_UP_CARD"), defaults.follow_up_card)?;

        Ok(Self {
            orders_table,
            db_path,
            port,
            policy: DialogPolicy {
                missing_slot,
                include_order_items,
                follow_up_card,
            },
            seed_file: get("SWIFTLINE_SEED_FILE").map(PathBuf::from),
        })
    }
}

fn parse_flag(var: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: raw,
            reason: "expected true or false".to_string(),
        }),
    }
}
