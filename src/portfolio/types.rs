//! Portfolio type definitions with strong typing

use serde::{Deserialize, Serialize};

/// A recorded purchase of an equity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    pub ticker: String,
    pub quantity: u32,
    pub buy_price: f64,
}

impl Trade {
    /// Calculate capital spent on this trade at purchase time
    pub fn invested(&self) -> f64 {
        self.buy_price * self.quantity as f64
    }
}

/// Risk tier assigned to a position after price lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskStatus {
    Safe,
    Loss,
    CriticalDrop,
    FetchError,
}

impl RiskStatus {
    /// Classify a position by its PnL percentage
    ///
    /// Thresholds run in order: below -5% is a critical drop, below zero
    /// is a loss, everything else is safe. Exactly -5% lands in Loss.
    pub fn classify(pnl_percent: f64) -> Self {
        if pnl_percent < -5.0 {
            RiskStatus::CriticalDrop
        } else if pnl_percent < 0.0 {
            RiskStatus::Loss
        } else {
            RiskStatus::Safe
        }
    }

    /// Display label for the terminal table
    pub fn label(&self) -> &'static str {
        match self {
            RiskStatus::Safe => "SAFE",
            RiskStatus::Loss => "LOSS",
            RiskStatus::CriticalDrop => "CRITICAL DROP",
            RiskStatus::FetchError => "FETCH ERROR",
        }
    }
}

/// A trade joined with its live market valuation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedPosition {
    pub trade: Trade,
    pub live_price: Option<f64>,
    pub pnl: Option<f64>,
    pub pnl_percent: Option<f64>,
    pub status: RiskStatus,
}

impl PricedPosition {
    /// Build a position from a trade and the outcome of its price fetch
    ///
    /// A missing price marks the position FetchError with the PnL fields
    /// absent rather than zeroed.
    pub fn new(trade: Trade, live_price: Option<f64>) -> Self {
        match live_price {
            Some(price) => {
                let invested = trade.invested();
                let current = price * trade.quantity as f64;
                let pnl = current - invested;
                let pnl_percent = pnl / invested * 100.0;
                Self {
                    trade,
                    live_price: Some(price),
                    pnl: Some(pnl),
                    pnl_percent: Some(pnl_percent),
                    status: RiskStatus::classify(pnl_percent),
                }
            }
            None => Self {
                trade,
                live_price: None,
                pnl: None,
                pnl_percent: None,
                status: RiskStatus::FetchError,
            },
        }
    }

    /// Calculate current value of the position
    pub fn current_value(&self) -> Option<f64> {
        self.live_price.map(|price| price * self.trade.quantity as f64)
    }
}

/// Outcome of one full portfolio analysis pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub positions: Vec<PricedPosition>,
    pub total_invested: f64,
    pub total_current_value: f64,
}

impl PortfolioReport {
    /// Aggregate positions into a report
    ///
    /// Totals cover only positions whose fetch succeeded, so both sides
    /// of the PnL subtraction describe the same subset.
    pub fn from_positions(positions: Vec<PricedPosition>) -> Self {
        let mut total_invested = 0.0;
        let mut total_current_value = 0.0;
        for position in &positions {
            if let Some(current) = position.current_value() {
                total_invested += position.trade.invested();
                total_current_value += current;
            }
        }
        Self {
            positions,
            total_invested,
            total_current_value,
        }
    }

    /// Calculate total P&L over the priced subset
    pub fn total_pnl(&self) -> f64 {
        self.total_current_value - self.total_invested
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions left out of the totals because no price was available
    pub fn unpriced_count(&self) -> usize {
        self.positions
            .iter()
            .filter(|position| position.live_price.is_none())
            .count()
    }
}
