//! Bill reminder model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::BillId;

/// A payable obligation with a due date.
///
/// `paid` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Unique identifier.
    pub id: BillId,
    /// Display name.
    pub name: String,
    /// Amount due (>= 0).
    pub amount: f64,
    /// Due date (yyyy-MM-dd).
    pub due_date: NaiveDate,
    /// Whether the bill has been paid.
    pub paid: bool,
}

/// A bill that has not been assigned an id yet. New bills start unpaid.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    /// Display name.
    pub name: String,
    /// Amount due (>= 0).
    pub amount: f64,
    /// Due date.
    pub due_date: NaiveDate,
}

impl NewBill {
    /// Attaches an id, producing an unpaid [`Bill`].
    #[inline]
    #[must_use]
    pub fn with_id(self, id: BillId) -> Bill {
        Bill {
            id,
            name: self.name,
            amount: self.amount,
            due_date: self.due_date,
            paid: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_bill() {
        let json = r#"{
            "id": "bill-1",
            "name": "Aluguel",
            "amount": 1500,
            "dueDate": "2024-02-10",
            "paid": false
        }"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.due_date, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        assert!(!bill.paid);
    }

    #[test]
    fn new_bill_starts_unpaid() {
        let bill = NewBill {
            name: "Internet".to_owned(),
            amount: 99.9,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        }
        .with_id(BillId::new("bill-2".to_owned()));
        assert!(!bill.paid);
        assert_eq!(bill.name, "Internet");
    }
}
