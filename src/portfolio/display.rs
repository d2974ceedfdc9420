//! Portfolio display utilities and formatters
//!
//! Renders an analysis pass for the terminal: a position table plus the
//! totals block printed underneath it.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;

use crate::portfolio::types::{PortfolioReport, PricedPosition, RiskStatus};

/// Format a portfolio report for display
pub struct ReportFormatter<'a> {
    pub report: &'a PortfolioReport,
}

impl<'a> ReportFormatter<'a> {
    pub fn new(report: &'a PortfolioReport) -> Self {
        Self { report }
    }

    /// Format the position table, one row per trade
    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                "Ticker",
                "Qty",
                "Buy Price",
                "Live Price",
                "PnL ($)",
                "PnL (%)",
                "Risk Status",
            ]);

        for position in &self.report.positions {
            table.add_row(position_row(position));
        }

        table.to_string()
    }

    /// Format the totals block shown under the table
    pub fn format_summary(&self) -> String {
        let mut lines = vec![
            format!(
                "💰 Total Portfolio Value: ${:.2}",
                self.report.total_current_value
            ),
            format!("📉 Total PnL: ${:.2}", self.report.total_pnl()),
        ];

        let unpriced = self.report.unpriced_count();
        if unpriced > 0 {
            lines.push(format!(
                "⚠️  {} position(s) excluded from totals (price unavailable)",
                unpriced
            ));
        }

        lines.join("\n")
    }
}

fn position_row(position: &PricedPosition) -> Vec<String> {
    let trade = &position.trade;

    let live_display = match position.live_price {
        Some(price) => format!("${:.2}", price),
        None => "ERROR".bright_red().to_string(),
    };

    let pnl_display = position
        .pnl
        .map(|pnl| format!("${:.2}", pnl))
        .unwrap_or_else(|| "N/A".to_string());

    let pnl_percent_display = position
        .pnl_percent
        .map(|pct| format!("{:.2}%", pct))
        .unwrap_or_else(|| "N/A".to_string());

    let status_display = match position.status {
        RiskStatus::Safe => position.status.label().bright_green().to_string(),
        RiskStatus::Loss => position.status.label().bright_yellow().to_string(),
        RiskStatus::CriticalDrop => position.status.label().bright_red().to_string(),
        RiskStatus::FetchError => position.status.label().bright_black().to_string(),
    };

    vec![
        trade.ticker.clone(),
        trade.quantity.to_string(),
        format!("${:.2}", trade.buy_price),
        live_display,
        pnl_display,
        pnl_percent_display,
        status_display,
    ]
}
