//! Transaction model and the entry form that produces it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{TransactionId, TransactionType};
use crate::error::{FinControlError, Result};

/// A single dated income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Category name (should match a catalog entry).
    pub category: String,
    /// Amount (>= 0).
    pub amount: f64,
    /// Calendar date (yyyy-MM-dd).
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
}

impl Transaction {
    /// Returns the amount with its sign applied: positive for income,
    /// negative for expenses.
    #[inline]
    #[must_use]
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// A validated transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Income or expense.
    pub kind: TransactionType,
    /// Category name.
    pub category: String,
    /// Amount (>= 0).
    pub amount: f64,
    /// Calendar date.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
}

impl NewTransaction {
    /// Attaches an id, producing a storable [`Transaction`].
    #[inline]
    #[must_use]
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            category: self.category,
            amount: self.amount,
            date: self.date,
            description: self.description,
        }
    }
}

/// Raw transaction entry as typed by the user.
///
/// Every text field is required. [`TransactionDraft::parse`] turns the
/// draft into a [`NewTransaction`] or reports the first problem found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    /// Income or expense.
    pub kind: TransactionType,
    /// Amount text, e.g. `"150.00"` or `"150,00"`.
    pub amount: String,
    /// Category name.
    pub category: String,
    /// Date text in `YYYY-MM-DD` form.
    pub date: String,
    /// Free-text description.
    pub description: String,
}

impl TransactionDraft {
    /// Validates the draft.
    ///
    /// # Errors
    ///
    /// Returns [`FinControlError::MissingField`] for the first empty field
    /// (checked in the order amount, category, date, description),
    /// [`FinControlError::InvalidAmount`] or [`FinControlError::InvalidDate`]
    /// when a field is present but malformed.
    #[inline]
    pub fn parse(&self) -> Result<NewTransaction> {
        let amount = required("amount", &self.amount)?;
        let category = required("category", &self.category)?;
        let date = required("date", &self.date)?;
        let description = required("description", &self.description)?;

        Ok(NewTransaction {
            kind: self.kind,
            category: category.to_owned(),
            amount: parse_amount(amount)?,
            date: parse_date(date)?,
            description: description.to_owned(),
        })
    }
}

/// Returns the trimmed value, or a [`FinControlError::MissingField`] when
/// nothing is left.
fn required<'input>(field: &'static str, value: &'input str) -> Result<&'input str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FinControlError::MissingField { field });
    }
    Ok(trimmed)
}

/// Largest amount accepted from user input.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0_f64;

/// Parses a non-negative amount, accepting a comma as decimal separator.
///
/// # Errors
///
/// Returns [`FinControlError::InvalidAmount`] if the input is not a number
/// in `0..=MAX_AMOUNT`.
#[inline]
pub fn parse_amount(input: &str) -> Result<f64> {
    let normalized = input.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if (0.0_f64..=MAX_AMOUNT).contains(&value) => Ok(value),
        _ => Err(FinControlError::InvalidAmount {
            input: input.to_owned(),
        }),
    }
}

/// Parses an ISO `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns [`FinControlError::InvalidDate`] if the input does not match.
#[inline]
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_err| {
        FinControlError::InvalidDate {
            input: input.to_owned(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TransactionDraft {
        TransactionDraft {
            kind: TransactionType::Expense,
            amount: "42,50".to_owned(),
            category: "Alimentação".to_owned(),
            date: "2024-01-15".to_owned(),
            description: "Mercado".to_owned(),
        }
    }

    #[test]
    fn deserialize_transaction_with_type_key() {
        let json = r#"{
            "id": "1704067200000",
            "type": "income",
            "category": "Salário",
            "amount": 1000,
            "date": "2024-01-01",
            "description": "Pagamento"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionType::Income);
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!((tx.amount - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn serialize_uses_type_key() {
        let tx = draft()
            .parse()
            .unwrap()
            .with_id(TransactionId::new("t-1".to_owned()));
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2024-01-15");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn signed_amount_follows_type() {
        let mut tx = draft()
            .parse()
            .unwrap()
            .with_id(TransactionId::new("t-1".to_owned()));
        assert!((tx.signed_amount() + 42.5).abs() < f64::EPSILON);
        tx.kind = TransactionType::Income;
        assert!((tx.signed_amount() - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_valid_draft() {
        let parsed = draft().parse().unwrap();
        assert!((parsed.amount - 42.5).abs() < f64::EPSILON);
        assert_eq!(parsed.category, "Alimentação");
        assert_eq!(parsed.description, "Mercado");
    }

    #[test]
    fn parse_reports_first_missing_field() {
        let mut d = draft();
        d.amount = String::new();
        d.description = String::new();
        let err = d.parse().unwrap_err();
        assert!(matches!(err, FinControlError::MissingField { field: "amount" }));
    }

    #[test]
    fn parse_treats_whitespace_as_missing() {
        let mut d = draft();
        d.description = "   ".to_owned();
        let err = d.parse().unwrap_err();
        assert!(matches!(
            err,
            FinControlError::MissingField {
                field: "description"
            }
        ));
    }

    #[test]
    fn parse_rejects_negative_and_garbage_amounts() {
        assert!(matches!(
            parse_amount("-5"),
            Err(FinControlError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_amount("abc"),
            Err(FinControlError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_amount("inf"),
            Err(FinControlError::InvalidAmount { .. })
        ));
        assert!((parse_amount(" 0 ").unwrap()).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_caps_amount_at_maximum() {
        assert!(matches!(
            parse_amount("1e300"),
            Err(FinControlError::InvalidAmount { .. })
        ));
        assert!(parse_amount("1000000000000,01").is_err());
        let max = parse_amount("1000000000000").unwrap();
        assert!((max - MAX_AMOUNT).abs() < f64::EPSILON);
        assert_eq!(crate::format::currency(max), "R$ 1.000.000.000.000,00");
    }

    #[test]
    fn parse_rejects_bad_date() {
        let mut d = draft();
        d.date = "15/01/2024".to_owned();
        assert!(matches!(
            d.parse(),
            Err(FinControlError::InvalidDate { .. })
        ));
    }
}
