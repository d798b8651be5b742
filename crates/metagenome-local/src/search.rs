//! Query filtering, sorting and paging over indexed rows.

use std::cmp::Ordering;

use metagenome_core::error::InvalidInputError;
use metagenome_core::{ColumnSorting, Result};
use serde_json::Value;

/// One column value of an index row.
#[derive(Debug, Clone)]
pub(crate) enum Cell {
    /// Compared case-insensitively.
    Text(String),
    /// Compared numerically; absent values sort first.
    Number { value: Option<f64>, text: String },
}

impl Cell {
    pub(crate) fn text(value: &str) -> Self {
        Cell::Text(value.to_string())
    }

    /// A numeric cell; its text is the JSON form, so `7.0` stays `7.0`.
    pub(crate) fn number(value: Option<Value>) -> Self {
        match value {
            Some(value) => Cell::Number {
                value: value.as_f64(),
                text: value.to_string(),
            },
            None => Cell::Number {
                value: None,
                text: String::new(),
            },
        }
    }

    fn as_text(&self) -> &str {
        match self {
            Cell::Text(text) | Cell::Number { text, .. } => text,
        }
    }

    fn compare(&self, other: &Cell) -> Ordering {
        match (self, other) {
            (Cell::Text(a), Cell::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Cell::Number { value: a, .. }, Cell::Number { value: b, .. }) => match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(b),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            _ => self.as_text().cmp(other.as_text()),
        }
    }
}

/// An item together with its searchable columns.
#[derive(Debug, Clone)]
pub(crate) struct Row<T> {
    item: T,
    cells: Vec<Cell>,
    line: String,
}

impl<T> Row<T> {
    pub(crate) fn new(item: T, cells: Vec<Cell>) -> Self {
        let line = cells
            .iter()
            .map(Cell::as_text)
            .collect::<Vec<_>>()
            .join("\t")
            .to_lowercase();
        Self { item, cells, line }
    }

    pub(crate) fn item(&self) -> &T {
        &self.item
    }

    fn matches(&self, words: &[String]) -> bool {
        words.iter().all(|word| self.line.contains(word.as_str()))
    }
}

/// Split a query into lower-cased words.
///
/// Whitespace and commas separate words.
pub(crate) fn query_words(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .replace(|c: char| matches!(c, '\n' | '\r' | '\t' | ','), " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// A resolved sort key: column position and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SortKey {
    column: usize,
    ascending: bool,
}

/// Resolve sort columns against the column names of an index.
pub(crate) fn sort_keys(
    sort_by: Option<&[ColumnSorting]>,
    columns: &'static [&'static str],
) -> Result<Vec<SortKey>> {
    sort_by
        .unwrap_or_default()
        .iter()
        .map(|sorting| {
            columns
                .iter()
                .position(|c| *c == sorting.column)
                .map(|column| SortKey {
                    column,
                    ascending: sorting.ascending,
                })
                .ok_or_else(|| {
                    metagenome_core::Error::from(InvalidInputError::UnknownSortColumn {
                        column: sorting.column.clone(),
                        allowed: columns,
                    })
                })
        })
        .collect()
}

/// Which slice of the filtered rows to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    pub(crate) start: i64,
    pub(crate) limit: i64,
    /// Total from an earlier page; lets the scan stop once the page is full.
    pub(crate) known_total: Option<i64>,
}

/// Filter, sort and page `rows`.
///
/// Rows equal on every sort key are ordered by their lower-cased line.
///
/// Returns the page items and the number of matches. When
/// `known_total` is set the scan stops after the page is filled and the
/// known total is reported instead of a full count, raised to the number
/// of rows already seen if it is smaller.
pub(crate) fn run<T: Clone>(
    rows: &[Row<T>],
    words: &[String],
    keys: &[SortKey],
    page: PageRequest,
) -> (Vec<T>, i64) {
    let mut ordered: Vec<&Row<T>> = rows.iter().collect();
    if !keys.is_empty() {
        ordered.sort_by(|a, b| {
            keys.iter()
                .map(|key| {
                    let ord = a.cells[key.column].compare(&b.cells[key.column]);
                    if key.ascending { ord } else { ord.reverse() }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or_else(|| a.line.cmp(&b.line))
        });
    }

    let end = page.start.saturating_add(page.limit);
    let mut found: i64 = 0;
    let mut items = Vec::new();

    for row in ordered.into_iter().filter(|row| row.matches(words)) {
        if found >= page.start && found < end {
            items.push(row.item.clone());
        }
        found += 1;
        if let Some(total) = page.known_total {
            if found >= end {
                found = total.max(found);
                break;
            }
        }
    }

    (items, found)
}
