//! Notification deriver: pending bills, overdue flags and the badge count.

use chrono::Local;

use crate::models::{Bill, BillId, NaiveDate};

/// An unpaid bill tagged with its overdue state.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBill {
    /// The unpaid bill.
    pub bill: Bill,
    /// Whether the due date is strictly before today.
    pub overdue: bool,
}

/// Returns the current calendar day in local time.
#[inline]
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A bill is overdue when its due date is strictly before `today`. A bill
/// due today is not overdue.
#[inline]
#[must_use]
pub fn is_overdue(due_date: NaiveDate, today: NaiveDate) -> bool {
    due_date < today
}

/// Returns the unpaid bills sorted by ascending due date, each tagged with
/// its overdue state relative to `today`.
///
/// Bills sharing a due date keep their stored order.
#[inline]
#[must_use]
pub fn pending_bills(bills: &[Bill], today: NaiveDate) -> Vec<PendingBill> {
    let mut pending: Vec<PendingBill> = bills
        .iter()
        .filter(|bill| !bill.paid)
        .map(|bill| PendingBill {
            bill: bill.clone(),
            overdue: is_overdue(bill.due_date, today),
        })
        .collect();
    pending.sort_by_key(|item| item.bill.due_date);
    pending
}

/// Counts unpaid bills.
#[inline]
#[must_use]
pub fn pending_count(bills: &[Bill]) -> usize {
    bills.iter().filter(|bill| !bill.paid).count()
}

/// Badge value for the notification bell: `None` when notifications are
/// disabled or nothing is pending.
#[inline]
#[must_use]
pub fn badge(bills: &[Bill], enabled: bool) -> Option<usize> {
    let count = pending_count(bills);
    (enabled && count > 0).then_some(count)
}

/// Marks the bill with the given id as paid.
///
/// Returns `true` if an unpaid bill was found and flipped. An unknown id or
/// an already paid bill leaves the list untouched and returns `false`.
#[inline]
pub fn mark_paid(bills: &mut [Bill], id: &BillId) -> bool {
    match bills.iter_mut().find(|bill| bill.id == *id) {
        Some(bill) if !bill.paid => {
            bill.paid = true;
            true
        }
        Some(_) | None => false,
    }
}
