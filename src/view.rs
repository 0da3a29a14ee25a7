//! Sortable, policy-aware projection of one table for grid front ends.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::csv::{
    self,
    Row,
};
use crate::policy::ColumnPolicy;

/// Current sort of a [`TableView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub ascending: bool,
}

#[derive(Debug, Clone)]
pub struct TableView {
    /// Table name, used as the translation table key
    name: String,
    header: Row,
    /// Data rows in display order
    rows: Vec<Row>,
    /// Columns whose cells can be translated
    editable: BTreeSet<usize>,
    sort: Option<SortState>,
}

impl TableView {
    /// Build a view of the CSV text of table `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, csv_text: &str, policy: &ColumnPolicy) -> Self {
        let mut rows = csv::decode(csv_text).into_rows().into_iter();
        let header = rows.next().unwrap_or_default();
        let editable = policy.eligible_columns(&header);

        Self { name: name.into(), header, rows: rows.collect(), editable, sort: None }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub const fn editable_columns(&self) -> &BTreeSet<usize> {
        &self.editable
    }

    /// Whether the cell at `column` opens the translation editor.
    #[must_use]
    pub fn is_editable(&self, column: usize) -> bool {
        self.editable.contains(&column)
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    #[must_use]
    pub const fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    /// Header index of the column called `name`.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    /// Sort rows by `column`.
    ///
    /// Sorting by the column already sorted on flips the direction; any other
    /// column starts ascending. Missing cells sort as empty text.
    pub fn sort_by(&mut self, column: usize) {
        let ascending = match self.sort {
            Some(state) if state.column == column => !state.ascending,
            _ => true,
        };

        self.rows.sort_by(|a, b| {
            let a = a.get(column).map_or("", String::as_str);
            let b = b.get(column).map_or("", String::as_str);
            let ordering = natural_cmp(a, b);
            if ascending { ordering } else { ordering.reverse() }
        });
        self.sort = Some(SortState { column, ascending });
    }

    /// Header and rows in display order, as CSV.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.push(self.header.clone());
        rows.extend(self.rows.iter().cloned());
        csv::encode_rows(&rows)
    }
}

/// Compare text with digit runs ordered by numeric value.
///
/// Non-digit runs compare case-insensitively; exact ties fall back to plain
/// string order so the result is total.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for (l, r) in left.iter().zip(&right) {
        let ordering = if is_number(l) && is_number(r) {
            cmp_digits(l, r)
        } else {
            l.to_lowercase().cmp(&r.to_lowercase())
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

/// Split into alternating runs of ASCII digits and everything else.
fn chunks(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut previous: Option<bool> = None;

    for (index, c) in text.char_indices() {
        let digit = c.is_ascii_digit();
        if previous.is_some_and(|was_digit| was_digit != digit) {
            if let Some(chunk) = text.get(start..index) {
                out.push(chunk);
            }
            start = index;
        }
        previous = Some(digit);
    }
    if let Some(chunk) = text.get(start..).filter(|chunk| !chunk.is_empty()) {
        out.push(chunk);
    }

    out
}

fn is_number(chunk: &str) -> bool {
    !chunk.is_empty() && chunk.bytes().all(|b| b.is_ascii_digit())
}

/// Numeric comparison of two digit runs of any length.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
