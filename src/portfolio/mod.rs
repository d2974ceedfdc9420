//! Portfolio analysis
//!
//! Domain types for trades and priced positions, the analyzer that joins
//! stored trades with live prices, and the terminal renderer.

pub mod analyzer;
pub mod display;
pub mod types;

pub use analyzer::RiskAnalyzer;
pub use display::ReportFormatter;
pub use types::{PortfolioReport, PricedPosition, RiskStatus, Trade};
