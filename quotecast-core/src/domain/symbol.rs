//! Ticker symbol normalization for user input.

use thiserror::Error;

/// Longest symbol accepted from user input.
pub const MAX_SYMBOL_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("symbol is empty")]
    Empty,

    #[error("symbol '{0}' is longer than {MAX_SYMBOL_LEN} characters")]
    TooLong(String),

    #[error("symbol '{symbol}' contains invalid character '{ch}'")]
    InvalidChar { symbol: String, ch: char },
}

/// Trim and upper-case a ticker, rejecting anything a quote API would not accept.
///
/// Allowed characters: ASCII letters and digits plus `.`, `^`, `=`, `-`
/// (class shares, indices, currency pairs).
pub fn normalize_symbol(raw: &str) -> Result<String, SymbolError> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(SymbolError::Empty);
    }
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(SymbolError::TooLong(symbol));
    }
    if let Some(ch) = symbol
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-')))
    {
        return Err(SymbolError::InvalidChar { symbol, ch });
    }
    Ok(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_and_trims() {
        assert_eq!(normalize_symbol("  aapl ").unwrap(), "AAPL");
    }

    #[test]
    fn accepts_index_and_class_shares() {
        assert_eq!(normalize_symbol("^gspc").unwrap(), "^GSPC");
        assert_eq!(normalize_symbol("brk.b").unwrap(), "BRK.B");
        assert_eq!(normalize_symbol("eurusd=x").unwrap(), "EURUSD=X");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(normalize_symbol("   "), Err(SymbolError::Empty));
    }

    #[test]
    fn rejects_long() {
        assert!(matches!(
            normalize_symbol("ABCDEFGHIJKLM"),
            Err(SymbolError::TooLong(_))
        ));
    }

    #[test]
    fn rejects_spaces_inside() {
        assert_eq!(
            normalize_symbol("AA PL"),
            Err(SymbolError::InvalidChar {
                symbol: "AA PL".into(),
                ch: ' '
            })
        );
    }
}
