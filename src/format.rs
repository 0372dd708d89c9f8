//! Display formatting for amounts and dates (Brazilian Portuguese style).

use num_format::{Locale, ToFormattedString as _};

use crate::models::{NaiveDate, TransactionType};

/// Currency symbol prefixed to every amount.
const SYMBOL: &str = "R$";

/// Formats an amount as currency with two decimals and `.` grouping,
/// e.g. `R$ 1.234,56` or `-R$ 50,00`.
#[inline]
#[must_use]
pub fn currency(value: f64) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "parsed amounts are capped far below i64::MAX cents"
    )]
    let cents = (value.abs() * 100.0_f64).round() as i64;
    let whole = cents.div_euclid(100).to_formatted_string(&Locale::pt);
    let fraction = cents.rem_euclid(100);
    let sign = if value.is_sign_negative() && cents != 0 {
        "-"
    } else {
        ""
    };
    format!("{sign}{SYMBOL} {whole},{fraction:02}")
}

/// Formats an amount with the sign of its transaction type,
/// e.g. `+ R$ 10,00` or `- R$ 10,00`.
#[inline]
#[must_use]
pub fn signed_currency(kind: TransactionType, amount: f64) -> String {
    format!("{} {}", kind.sign(), currency(amount))
}

/// Formats a calendar date as `dd/mm/yyyy`.
#[inline]
#[must_use]
pub fn date(value: NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Formats an inclusive date range as `dd/mm/yyyy a dd/mm/yyyy`.
#[inline]
#[must_use]
pub fn date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} a {}", date(start), date(end))
}
