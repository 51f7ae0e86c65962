use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

/// Standard number decimal places for the given currency
/// (ex. JPY = 0, USD = 2).
fn decimal_places(currency: Currency) -> u32 {
    currency.exponent().unwrap_or(0) as u32
}

/// Format cash amount with currency symbol, correct number of decimal places
/// and proper thousands separators (ex. -$1,500,000.50).
///
/// For consistency, uses en locale ('.' as decimal mark, i.e. 1,000.00)
/// regardless of user's locale or currency.
pub(crate) fn format_amount(amount: f64, currency: Currency) -> String {
    let decimal_places = decimal_places(currency);
    let scale = 10_i64.pow(decimal_places);
    let minor_units = (amount.abs() * scale as f64).round() as i64;
    let sign = if amount < 0.0 && minor_units != 0 { "-" } else { "" };
    let integer_part = (minor_units / scale).to_formatted_string(&Locale::en);
    if decimal_places == 0 {
        format!("{}{}{}", sign, currency.symbol(), integer_part)
    } else {
        format!(
            "{}{}{}.{:0width$}",
            sign,
            currency.symbol(),
            integer_part,
            minor_units % scale,
            width = decimal_places as usize,
        )
    }
}

/// Shortest plain rendering of an amount, without grouping or trailing
/// zeros (ex. 300000, 1500000.5).
pub(crate) fn format_plain(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        (amount as i64).to_string()
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn amounts_with_grouping_and_sign() {
        assert_eq!(format_amount(1_500_000.5, Currency::USD), "$1,500,000.50");
        assert_eq!(format_amount(-400.0, Currency::USD), "-$400.00");
        assert_eq!(format_amount(0.999, Currency::USD), "$1.00");
        assert_eq!(format_amount(-0.001, Currency::USD), "$0.00");
    }

    #[test]
    fn plain_amounts() {
        assert_eq!(format_plain(300_000.0), "300000");
        assert_eq!(format_plain(1_500_000.5), "1500000.5");
        assert_eq!(format_plain(-0.0), "0");
        assert_eq!(format_plain(-12.0), "-12");
    }
}
