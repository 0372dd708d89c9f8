//! Report generator: date-range filtering, range totals and document output.
//!
//! Generation happens in three steps:
//!
//! 1. [`Report::build`] keeps the transactions inside an inclusive
//!    [`DateRange`] and computes their [`Totals`].
//! 2. [`Report::document`] lays the data out as a [`ReportDocument`]: a
//!    title, the formatted period, a totals section and one row per
//!    transaction, each value tagged with a [`Tone`].
//! 3. A [`DocumentRenderer`] turns the document into bytes. A
//!    [`ReportGenerator`] drives the whole pipeline and refuses to start a
//!    second generation while one is running.

use core::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::aggregate::{Totals, totals};
use crate::error::{FinControlError, Result};
use crate::format;
use crate::models::{NaiveDate, Transaction, TransactionType};

/// Title printed at the top of every report.
const TITLE: &str = "Relatório Financeiro";

/// Prefix of generated file names.
const FILE_PREFIX: &str = "relatorio";

/// Inclusive range of calendar dates.
///
/// An inverted range (`start > end`) is allowed and simply contains no
/// dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from its two ends.
    #[inline]
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns the smallest range covering every transaction, or `None`
    /// for an empty list.
    #[inline]
    #[must_use]
    pub fn spanning(transactions: &[Transaction]) -> Option<Self> {
        let start = transactions.iter().map(|tx| tx.date).min()?;
        let end = transactions.iter().map(|tx| tx.date).max()?;
        Some(Self { start, end })
    }

    /// Returns `true` if `date` lies within the range, ends included.
    #[inline]
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Returns the transactions dated within `range`, in store order.
#[inline]
#[must_use]
pub fn filter_by_range(transactions: &[Transaction], range: DateRange) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| range.contains(tx.date))
        .cloned()
        .collect()
}

/// Color/sign cue attached to a rendered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Income or a non-negative balance.
    Positive,
    /// Expenses or a negative balance.
    Negative,
}

impl Tone {
    /// Tone matching a transaction type.
    #[inline]
    #[must_use]
    pub const fn of(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Income => Self::Positive,
            TransactionType::Expense => Self::Negative,
        }
    }
}

/// One labelled line of the totals section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalLine {
    /// Line label.
    pub label: String,
    /// Formatted amount.
    pub value: String,
    /// Cue for the renderer.
    pub tone: Tone,
}

/// One transaction row of the report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Formatted date.
    pub date: String,
    /// Transaction description.
    pub description: String,
    /// Category name.
    pub category: String,
    /// Signed, formatted amount.
    pub amount: String,
    /// Cue for the renderer.
    pub tone: Tone,
}

/// Structured report content handed to a [`DocumentRenderer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    /// Document title.
    pub title: String,
    /// Formatted date range.
    pub period: String,
    /// Column headers of the transaction table.
    pub columns: [&'static str; 4],
    /// Income, expenses and balance lines.
    pub totals: Vec<TotalLine>,
    /// One row per transaction.
    pub rows: Vec<ReportRow>,
}

/// Transactions of a date range together with their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Range the report covers.
    pub range: DateRange,
    /// Totals over the filtered transactions.
    pub totals: Totals,
    /// Transactions inside the range, in store order.
    pub transactions: Vec<Transaction>,
}

impl Report {
    /// Filters `transactions` to `range` and totals the result.
    #[inline]
    #[must_use]
    pub fn build(transactions: &[Transaction], range: DateRange) -> Self {
        let filtered = filter_by_range(transactions, range);
        Self {
            range,
            totals: totals(&filtered),
            transactions: filtered,
        }
    }

    /// File name stem encoding the range, e.g.
    /// `relatorio_2024-01-01_2024-01-31`.
    #[inline]
    #[must_use]
    pub fn file_stem(&self) -> String {
        format!(
            "{FILE_PREFIX}_{}_{}",
            self.range.start.format("%Y-%m-%d"),
            self.range.end.format("%Y-%m-%d")
        )
    }

    /// Lays the report out for rendering.
    #[inline]
    #[must_use]
    pub fn document(&self) -> ReportDocument {
        let balance_tone = if self.totals.balance >= 0.0_f64 {
            Tone::Positive
        } else {
            Tone::Negative
        };
        let totals = vec![
            TotalLine {
                label: "Receitas".to_owned(),
                value: format::currency(self.totals.income),
                tone: Tone::Positive,
            },
            TotalLine {
                label: "Despesas".to_owned(),
                value: format::currency(self.totals.expenses),
                tone: Tone::Negative,
            },
            TotalLine {
                label: "Saldo".to_owned(),
                value: format::currency(self.totals.balance),
                tone: balance_tone,
            },
        ];
        let rows = self
            .transactions
            .iter()
            .map(|tx| ReportRow {
                date: format::date(tx.date),
                description: tx.description.clone(),
                category: tx.category.clone(),
                amount: format::signed_currency(tx.kind, tx.amount),
                tone: Tone::of(tx.kind),
            })
            .collect();
        ReportDocument {
            title: TITLE.to_owned(),
            period: format::date_range(self.range.start, self.range.end),
            columns: ["Data", "Descrição", "Categoria", "Valor"],
            totals,
            rows,
        }
    }
}

/// Turns a [`ReportDocument`] into a downloadable artifact.
pub trait DocumentRenderer: core::fmt::Debug {
    /// File extension of the produced artifact, without the dot.
    fn extension(&self) -> &'static str;

    /// Renders the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be encoded.
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>>;
}

/// Renders the document as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    #[inline]
    fn extension(&self) -> &'static str {
        "json"
    }

    #[inline]
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(document)?)
    }
}

/// Renders the document as plain-text tables.
#[cfg(feature = "table")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer;

#[cfg(feature = "table")]
impl DocumentRenderer for TableRenderer {
    #[inline]
    fn extension(&self) -> &'static str {
        "txt"
    }

    #[inline]
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>> {
        use comfy_table::presets::UTF8_FULL;
        use comfy_table::{CellAlignment, Table};

        let mut totals = Table::new();
        _ = totals.load_preset(UTF8_FULL).force_no_tty();
        for line in &document.totals {
            _ = totals.add_row(vec![line.label.as_str(), line.value.as_str()]);
        }

        let mut rows = Table::new();
        _ = rows
            .load_preset(UTF8_FULL)
            .force_no_tty()
            .set_header(document.columns.to_vec());
        for row in &document.rows {
            _ = rows.add_row(vec![
                row.date.as_str(),
                row.description.as_str(),
                row.category.as_str(),
                row.amount.as_str(),
            ]);
        }
        if let Some(column) = rows.column_mut(3) {
            _ = column.set_cell_alignment(CellAlignment::Right);
        }

        let text = format!(
            "{}\n{}\n\n{totals}\n\n{rows}\n",
            document.title, document.period
        );
        Ok(text.into_bytes())
    }
}

/// Output of a completed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReport {
    /// Suggested file name, including the extension.
    pub file_name: String,
    /// Rendered bytes.
    pub bytes: Vec<u8>,
    /// Totals over the reported range.
    pub totals: Totals,
    /// Number of transaction rows.
    pub row_count: usize,
}

/// Drives report generation through a renderer, one generation at a time.
///
/// While a generation runs, [`ReportGenerator::is_busy`] returns `true` and
/// a second [`ReportGenerator::generate`] call fails with
/// [`FinControlError::ReportInProgress`].
#[derive(Debug, Default)]
pub struct ReportGenerator<R> {
    /// Renderer producing the artifact.
    renderer: R,
    /// Set for the duration of a generation.
    busy: AtomicBool,
}

impl<R: DocumentRenderer> ReportGenerator<R> {
    /// Creates an idle generator around `renderer`.
    #[inline]
    #[must_use]
    pub const fn new(renderer: R) -> Self {
        Self {
            renderer,
            busy: AtomicBool::new(false),
        }
    }

    /// Returns `true` while a generation is running.
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Builds, lays out and renders the report for `range`.
    ///
    /// # Errors
    ///
    /// Returns [`FinControlError::ReportInProgress`] if a generation is
    /// already running, or the renderer's error.
    #[inline]
    #[tracing::instrument(skip_all, fields(start = %range.start, end = %range.end))]
    pub fn generate(&self, transactions: &[Transaction], range: DateRange) -> Result<GeneratedReport> {
        let _busy = self.begin()?;
        let report = Report::build(transactions, range);
        let bytes = self.renderer.render(&report.document())?;
        let file_name = format!("{}.{}", report.file_stem(), self.renderer.extension());
        tracing::debug!(
            rows = report.transactions.len(),
            bytes = bytes.len(),
            file = %file_name,
            "report generated"
        );
        Ok(GeneratedReport {
            file_name,
            bytes,
            totals: report.totals,
            row_count: report.transactions.len(),
        })
    }

    /// Marks the generator busy, failing if it already is.
    fn begin(&self) -> Result<BusyGuard<'_>> {
        let _was_idle = self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_was_busy: bool| FinControlError::ReportInProgress)?;
        Ok(BusyGuard { flag: &self.busy })
    }
}

/// Clears the busy flag when dropped, including on early error returns.
#[derive(Debug)]
struct BusyGuard<'generator> {
    /// Flag owned by the generator.
    flag: &'generator AtomicBool,
}

impl Drop for BusyGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
