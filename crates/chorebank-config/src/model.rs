use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Application-level preferences for the points ledger.
///
/// Per-family settings (conversion rate, auto-approval, stretch budget) live
/// on the `Family` record in the ledger store; this file only carries the
/// process defaults and filesystem layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for ledger snapshots. Defaults to the
    /// platform data dir under `chorebank`.
    pub data_dir: Option<PathBuf>,
    /// Rate applied to new families that do not configure their own.
    #[serde(default = "Config::default_rate")]
    pub default_points_to_money_rate: Decimal,
    /// Whether new families start with review-free submissions.
    #[serde(default)]
    pub auto_approve_default: bool,
    /// Snapshot backups kept per ledger file.
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_points_to_money_rate: Self::default_rate(),
            auto_approve_default: false,
            backup_retention: Self::default_backup_retention(),
        }
    }
}

impl Config {
    pub fn default_rate() -> Decimal {
        // One point banks to ten cents.
        Decimal::new(10, 2)
    }

    pub fn default_backup_retention() -> usize {
        5
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("chorebank")
    }
}
