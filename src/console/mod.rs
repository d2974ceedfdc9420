//! Interactive menu loop
//!
//! The whole operation surface lives here: print the menu, read one
//! line, dispatch, repeat. Handled errors print a message and the loop
//! keeps going; only a broken stdin or stdout ends it early.

use anyhow::Result;
use owo_colors::OwoColorize;
use tracing::{info, warn};

use crate::portfolio::analyzer::RiskAnalyzer;
use crate::portfolio::display::ReportFormatter;
use crate::prices::{PriceProvider, PriceSource};
use crate::store::TradeStore;

pub mod input;

use input::{parse_price, parse_quantity, parse_ticker, prompt_line, InputError};

/// One of the menu commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddTrade,
    ViewPortfolio,
    Exit,
}

impl MenuChoice {
    /// Map a raw menu line to a command
    ///
    /// Whitespace around the digit is tolerated; anything else is None.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(MenuChoice::AddTrade),
            "2" => Some(MenuChoice::ViewPortfolio),
            "3" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// The interactive application over the store and price source
pub struct App<P: PriceProvider> {
    store: TradeStore,
    prices: PriceSource<P>,
}

impl<P: PriceProvider> App<P> {
    pub fn new(store: TradeStore, prices: PriceSource<P>) -> Self {
        Self { store, prices }
    }

    /// Run the menu loop until the operator exits
    pub async fn run(&self) -> Result<()> {
        loop {
            print_menu();

            let line = match prompt_line("Select Option: ")? {
                Some(line) => line,
                None => {
                    // stdin closed; leave as if Exit was chosen
                    println!();
                    break;
                }
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::AddTrade) => self.add_trade()?,
                Some(MenuChoice::ViewPortfolio) => self.view_portfolio().await,
                Some(MenuChoice::Exit) => break,
                None => println!("{}", "Invalid option".bright_red()),
            }
        }

        println!("Exiting...");
        info!("Menu loop ended");
        Ok(())
    }

    /// Prompt for one trade and record it
    ///
    /// The first field that fails to parse rejects the whole entry and
    /// returns to the menu; nothing is written unless all three parse.
    fn add_trade(&self) -> Result<()> {
        let raw = match prompt_line("Ticker (e.g., AAPL, GOOGL, MSFT): ")? {
            Some(line) => line,
            None => return Ok(()),
        };
        let ticker = match parse_ticker(&raw) {
            Ok(ticker) => ticker,
            Err(e) => return reject_input(e),
        };

        let raw = match prompt_line("Quantity: ")? {
            Some(line) => line,
            None => return Ok(()),
        };
        let quantity = match parse_quantity(&raw) {
            Ok(quantity) => quantity,
            Err(e) => return reject_input(e),
        };

        let raw = match prompt_line("Buy Price: ")? {
            Some(line) => line,
            None => return Ok(()),
        };
        let buy_price = match parse_price(&raw) {
            Ok(price) => price,
            Err(e) => return reject_input(e),
        };

        match self.store.add(&ticker, quantity, buy_price) {
            Ok(trade) => {
                println!(
                    "{}",
                    format!(
                        "✅ Trade Logged: Bought {} of {} at ${:.2}",
                        trade.quantity, trade.ticker, trade.buy_price
                    )
                    .bright_green()
                );
            }
            Err(e) => {
                warn!(error = %e, "Trade insert failed");
                println!("{}", format!("❌ Could not save trade: {}", e).bright_red());
            }
        }

        Ok(())
    }

    /// Price the portfolio and render the risk table
    async fn view_portfolio(&self) {
        println!("\n🔍 FETCHING REAL-TIME DATA...");

        let analyzer = RiskAnalyzer::new(&self.store, &self.prices);
        let report = match analyzer.analyze().await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Portfolio analysis failed");
                println!("{}", format!("❌ Analysis failed: {:#}", e).bright_red());
                return;
            }
        };

        if report.is_empty() {
            println!("Portfolio is empty.");
            return;
        }

        let formatter = ReportFormatter::new(&report);
        println!("{}", formatter.format_table());
        println!("{}", formatter.format_summary());
    }
}

fn print_menu() {
    println!();
    println!("{}", "=== EQUITY RISK MONITOR ===".bold());
    println!("1. Add Trade");
    println!("2. View Portfolio & Risk Analysis");
    println!("3. Exit");
}

fn reject_input(e: InputError) -> Result<()> {
    println!("{}", format!("❌ {}", e).bright_red());
    Ok(())
}
