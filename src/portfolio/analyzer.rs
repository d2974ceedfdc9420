//! Joins stored trades with live prices and classifies each position

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::prices::{PriceProvider, PriceSource};
use crate::store::TradeStore;

use super::types::{PortfolioReport, PricedPosition};

pub struct RiskAnalyzer<'a, P: PriceProvider> {
    store: &'a TradeStore,
    prices: &'a PriceSource<P>,
}

impl<'a, P: PriceProvider> RiskAnalyzer<'a, P> {
    pub fn new(store: &'a TradeStore, prices: &'a PriceSource<P>) -> Self {
        Self { store, prices }
    }

    /// Run one full analysis pass
    ///
    /// Trades are priced one at a time in insertion order; a failed
    /// fetch marks that position instead of aborting the pass. Only a
    /// store read failure is an error here. Nothing is cached; every
    /// call recomputes from live data.
    pub async fn analyze(&self) -> Result<PortfolioReport> {
        let trades = self
            .store
            .list_all()
            .context("Failed to read trades from the portfolio database")?;

        debug!(count = trades.len(), "Pricing portfolio");

        let mut positions = Vec::with_capacity(trades.len());
        for trade in trades {
            let live_price = self.prices.latest_close(&trade.ticker).await;
            positions.push(PricedPosition::new(trade, live_price));
        }

        let report = PortfolioReport::from_positions(positions);
        info!(
            positions = report.positions.len(),
            unpriced = report.unpriced_count(),
            "Portfolio analysis complete"
        );
        Ok(report)
    }
}
