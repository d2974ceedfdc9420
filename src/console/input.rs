//! Input parsing for the menu prompts
//!
//! Raw lines from stdin cross into typed values here. A parse failure is
//! a value, not a crash: the caller prints the message and returns to the
//! menu without touching the store.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Errors from operator input
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Ticker must not be empty")]
    EmptyTicker,

    #[error("'{0}' is not a valid quantity (expected a whole number greater than zero)")]
    InvalidQuantity(String),

    #[error("'{0}' is not a valid price (expected a number greater than zero)")]
    InvalidPrice(String),
}

/// Parse a ticker symbol
///
/// Only trims and rejects empty input; case is normalized by the store
/// at write time.
pub fn parse_ticker(raw: &str) -> Result<String, InputError> {
    let ticker = raw.trim();
    if ticker.is_empty() {
        return Err(InputError::EmptyTicker);
    }
    Ok(ticker.to_string())
}

/// Parse a share count (positive whole number)
pub fn parse_quantity(raw: &str) -> Result<u32, InputError> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(InputError::InvalidQuantity(trimmed.to_string())),
    }
}

/// Parse a purchase price (finite number greater than zero)
pub fn parse_price(raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(price) if price > 0.0 && price.is_finite() => Ok(price),
        _ => Err(InputError::InvalidPrice(trimmed.to_string())),
    }
}

/// Print a prompt and read one line from stdin
///
/// Returns None at end of input so a closed stdin unwinds the menu loop
/// instead of spinning on empty reads.
pub fn prompt_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes_read = io::stdin().lock().read_line(&mut line)?;
    if bytes_read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_is_trimmed() {
        assert_eq!(parse_ticker("  aapl \n").unwrap(), "aapl");
    }

    #[test]
    fn empty_ticker_is_rejected() {
        assert_eq!(parse_ticker("   \n"), Err(InputError::EmptyTicker));
        assert_eq!(parse_ticker(""), Err(InputError::EmptyTicker));
    }

    #[test]
    fn valid_quantity_parses() {
        assert_eq!(parse_quantity("10\n").unwrap(), 10);
        assert_eq!(parse_quantity(" 1 ").unwrap(), 1);
    }

    #[test]
    fn bad_quantities_are_rejected() {
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-3").is_err());
        assert!(parse_quantity("ten").is_err());
        assert!(parse_quantity("1.5").is_err());
        assert!(parse_quantity("").is_err());
    }

    #[test]
    fn valid_price_parses() {
        assert_eq!(parse_price("150.5\n").unwrap(), 150.5);
        assert_eq!(parse_price("1e2").unwrap(), 100.0);
    }

    #[test]
    fn bad_prices_are_rejected() {
        assert!(parse_price("0").is_err());
        assert!(parse_price("-1.5").is_err());
        assert!(parse_price("free").is_err());
        assert!(parse_price("NaN").is_err());
        assert!(parse_price("inf").is_err());
    }
}
