//! SQLite-backed trade storage
//!
//! The store holds only the database path. Every operation opens its own
//! connection and releases it before returning, so no handle outlives a
//! single call and the file can sit on any local path the user picks.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use thiserror::Error;
use tracing::{debug, info};

use crate::portfolio::types::Trade;

/// Errors from the trade store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to the portfolio database
#[derive(Debug, Clone)]
pub struct TradeStore {
    db_path: PathBuf,
}

impl TradeStore {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Create the portfolio table if it does not exist yet
    ///
    /// Idempotent; called on every startup before the menu loop runs.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let conn = self.open()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS portfolio (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ticker TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                buy_price REAL NOT NULL
            )",
            [],
        )?;
        debug!(path = %self.db_path.display(), "Trade store ready");
        Ok(())
    }

    /// Insert a trade and return the stored record with its assigned id
    ///
    /// The ticker is uppercased here so the database only ever holds
    /// canonical symbols. Value validation (non-empty ticker, positive
    /// quantity and price) happens at the input boundary.
    pub fn add(&self, ticker: &str, quantity: u32, buy_price: f64) -> Result<Trade, StoreError> {
        let ticker = ticker.to_uppercase();
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO portfolio (ticker, quantity, buy_price) VALUES (?1, ?2, ?3)",
            rusqlite::params![ticker, quantity, buy_price],
        )?;
        let id = conn.last_insert_rowid();
        info!(id, %ticker, quantity, buy_price, "Trade recorded");
        Ok(Trade {
            id,
            ticker,
            quantity,
            buy_price,
        })
    }

    /// All trades in insertion order
    pub fn list_all(&self) -> Result<Vec<Trade>, StoreError> {
        let conn = self.open()?;
        let mut stmt =
            conn.prepare("SELECT id, ticker, quantity, buy_price FROM portfolio ORDER BY id")?;

        let trades = stmt
            .query_map([], |row| {
                Ok(Trade {
                    id: row.get(0)?,
                    ticker: row.get(1)?,
                    quantity: row.get(2)?,
                    buy_price: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(trades)
    }

    fn open(&self) -> Result<Connection, StoreError> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Connection::open(&self.db_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, TradeStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = TradeStore::new(temp_dir.path().join("portfolio.db"));
        store.initialize().unwrap();
        (temp_dir, store)
    }

    #[test]
    fn add_then_list_roundtrip() {
        let (_dir, store) = temp_store();

        let first = store.add("AAPL", 10, 150.5).unwrap();
        let second = store.add("MSFT", 5, 300.0).unwrap();

        let trades = store.list_all().unwrap();
        assert_eq!(trades, vec![first, second]);
    }

    #[test]
    fn tickers_are_uppercased_at_write_time() {
        let (_dir, store) = temp_store();

        store.add("aapl", 1, 100.0).unwrap();

        let trades = store.list_all().unwrap();
        assert_eq!(trades[0].ticker, "AAPL");
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let (_dir, store) = temp_store();

        let a = store.add("AAPL", 1, 1.0).unwrap();
        let b = store.add("GOOGL", 1, 1.0).unwrap();
        let c = store.add("MSFT", 1, 1.0).unwrap();

        assert!(a.id < b.id);
        assert!(b.id < c.id);
    }

    #[test]
    fn initialize_is_idempotent() {
        let (_dir, store) = temp_store();

        store.add("AAPL", 10, 150.0).unwrap();
        store.initialize().unwrap();

        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn empty_table_lists_no_trades() {
        let (_dir, store) = temp_store();

        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn trades_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("portfolio.db");

        {
            let store = TradeStore::new(&path);
            store.initialize().unwrap();
            store.add("NVDA", 3, 400.0).unwrap();
        }

        let reopened = TradeStore::new(&path);
        reopened.initialize().unwrap();
        let trades = reopened.list_all().unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].ticker, "NVDA");
    }
}
