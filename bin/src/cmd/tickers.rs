//! Ticker list commands.

use crate::store::{Store, read_ticker_file};
use anyhow::Result;
use std::path::Path;

/// Replace the stored ticker list with the symbols in `file`.
pub(crate) fn import(store: &Store, file: &Path) -> Result<()> {
    let tickers = read_ticker_file(file)?;
    store.save_tickers(&tickers)?;

    tracing::info!(
        count = tickers.len(),
        path = %store.tickers_path().display(),
        "ticker list replaced"
    );
    println!("Imported {} ticker(s)", tickers.len());
    Ok(())
}

/// Print the stored ticker list, one symbol per line.
pub(crate) fn list(store: &Store) -> Result<()> {
    let tickers = store.load_tickers()?;
    if tickers.is_empty() {
        println!("No tickers stored. Run `vantage tickers import <file>` first.");
        return Ok(());
    }
    for ticker in &tickers {
        println!("{ticker}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_import_replaces_previous_list() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        store.save_tickers(&["OLD".to_string()]).unwrap();

        let file = dir.path().join("tickers.json");
        fs::write(&file, r#"["net", "ddog"]"#).unwrap();
        import(&store, &file).unwrap();

        assert_eq!(store.load_tickers().unwrap(), vec!["NET", "DDOG"]);
    }

    #[test]
    fn test_import_missing_file_fails_without_touching_store() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        store.save_tickers(&["KEEP".to_string()]).unwrap();

        assert!(import(&store, &dir.path().join("absent.json")).is_err());
        assert_eq!(store.load_tickers().unwrap(), vec!["KEEP"]);
    }
}
