use std::str::FromStr;

use fractic_server_error::ServerError;
use regex::Regex;

use crate::errors::InvalidManualAmount;

/// Amount typed in by the user, ex. "1500000", "$ 1,500,000" or "250.75".
#[derive(Debug)]
pub(crate) struct ManualAmountModel(pub f64);
impl FromStr for ManualAmountModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pattern = Regex::new(r"^\$?\s*(\d{1,3}(,\d{3})+|\d+)(\.\d+)?$")
            .expect("hardcoded regex should be valid");
        let raw = s.trim();
        if !pattern.is_match(raw) {
            return Err(InvalidManualAmount::new(s));
        }
        let numeric_part: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        let amount = numeric_part
            .parse::<f64>()
            .map_err(|e| InvalidManualAmount::with_debug(s, &e))?;
        if amount <= 0.0 {
            return Err(InvalidManualAmount::new(s));
        }
        Ok(ManualAmountModel(amount))
    }
}

impl Into<f64> for ManualAmountModel {
    fn into(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Option<f64> {
        ManualAmountModel::from_str(s).ok().map(Into::into)
    }

    #[test]
    fn accepts_plain_and_formatted_amounts() {
        assert_eq!(parse("1500000"), Some(1_500_000.0));
        assert_eq!(parse("$ 1,500,000"), Some(1_500_000.0));
        assert_eq!(parse("$250.75"), Some(250.75));
        assert_eq!(parse("  42 "), Some(42.0));
    }

    #[test]
    fn rejects_non_positive_and_malformed_input() {
        assert_eq!(parse("0"), None);
        assert_eq!(parse("-100"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("abc"), None);
        assert_eq!(parse("1,50"), None);
        assert_eq!(parse("1.2.3"), None);
    }
}
