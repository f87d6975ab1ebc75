//! JSON file store for the ticker list and pulled statement histories.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use vantage_traits::{StatementBook, Symbol};

const TICKERS_FILE: &str = "watchlist.json";
const STATEMENTS_FILE: &str = "financial-statements.json";

/// Statement histories as of one `pull`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StatementSnapshot {
    /// When the histories were fetched.
    pub(crate) pulled_at: DateTime<Utc>,
    /// Oldest-first history per ticker.
    pub(crate) histories: StatementBook,
}

/// Files under a data directory.
#[derive(Debug, Clone)]
pub(crate) struct Store {
    dir: PathBuf,
}

impl Store {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub(crate) fn tickers_path(&self) -> PathBuf {
        self.dir.join(TICKERS_FILE)
    }

    pub(crate) fn statements_path(&self) -> PathBuf {
        self.dir.join(STATEMENTS_FILE)
    }

    /// The stored ticker list; empty if nothing has been imported yet.
    pub(crate) fn load_tickers(&self) -> Result<Vec<Symbol>> {
        let path = self.tickers_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        read_json(&path)
    }

    /// Replace the stored ticker list.
    pub(crate) fn save_tickers(&self, tickers: &[Symbol]) -> Result<()> {
        write_json(&self.tickers_path(), tickers)
    }

    /// The stored statement snapshot.
    ///
    /// Fails if `pull` has never been run.
    pub(crate) fn load_statements(&self) -> Result<StatementSnapshot> {
        let path = self.statements_path();
        if !path.exists() {
            bail!(
                "no statement histories at {} (run `vantage pull` first)",
                path.display()
            );
        }
        read_json(&path)
    }

    /// Replace the stored statement snapshot.
    pub(crate) fn save_statements(&self, snapshot: &StatementSnapshot) -> Result<()> {
        write_json(&self.statements_path(), snapshot)
    }
}

/// Read a JSON array of ticker symbols.
///
/// Symbols are trimmed and upper-cased; blanks and repeats are dropped.
pub(crate) fn read_ticker_file(path: &Path) -> Result<Vec<Symbol>> {
    let raw: Vec<String> = read_json(path)?;
    Ok(normalize_tickers(raw))
}

fn normalize_tickers(raw: Vec<String>) -> Vec<Symbol> {
    let mut seen = BTreeSet::new();
    raw.into_iter()
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Write through a sibling temp file so a failed write keeps the old contents.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vantage_traits::{Metric, QuarterlyStatement, StatementHistory};

    #[test]
    fn test_tickers_default_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        assert!(store.load_tickers().unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_ticker_list() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());

        store
            .save_tickers(&["NET".to_string(), "DDOG".to_string()])
            .unwrap();
        store.save_tickers(&["ZS".to_string()]).unwrap();

        assert_eq!(store.load_tickers().unwrap(), vec!["ZS".to_string()]);
    }

    #[test]
    fn test_read_ticker_file_normalizes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tickers.json");
        fs::write(&path, r#"[" net", "DDOG", "", "Net", "zs "]"#).unwrap();

        let tickers = read_ticker_file(&path).unwrap();
        assert_eq!(tickers, vec!["NET", "DDOG", "ZS"]);
    }

    #[test]
    fn test_read_ticker_file_rejects_non_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tickers.json");
        fs::write(&path, r#"{"tickers": ["NET"]}"#).unwrap();

        let err = read_ticker_file(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_missing_statements_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        let err = store.load_statements().unwrap_err();
        assert!(err.to_string().contains("vantage pull"));
    }

    #[test]
    fn test_statement_snapshot_persists() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("nested"));

        let history: StatementHistory = [100.0, 110.0, 120.0]
            .iter()
            .map(|&revenue| QuarterlyStatement {
                revenue,
                net_income: 12.5,
                ..Default::default()
            })
            .collect();
        let mut histories = StatementBook::new();
        histories.insert("NET".to_string(), history);
        histories.insert("EMPTY".to_string(), StatementHistory::default());

        let snapshot = StatementSnapshot {
            pulled_at: Utc::now(),
            histories,
        };
        store.save_statements(&snapshot).unwrap();

        let loaded = store.load_statements().unwrap();
        assert_eq!(loaded, snapshot);
        assert_eq!(
            loaded.histories["NET"].select(Metric::Revenue),
            vec![100.0, 110.0, 120.0]
        );
        assert!(loaded.histories["EMPTY"].is_empty());
        assert!(!store.statements_path().with_extension("json.tmp").exists());
    }
}
