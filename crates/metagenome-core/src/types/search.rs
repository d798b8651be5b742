//! Search request records.

use serde_json::Value;

use crate::codec::{FieldType, as_flag, mismatch};
use crate::error::{CodecError, InvalidInputError};
use crate::schema::{FieldDescriptor, ValueKind};

/// Columns a bin search can be sorted by.
pub const BIN_SORT_COLUMNS: &[&str] = &["bin_id", "n_contigs", "sum_contig_len", "gc", "cov"];

/// Columns a contig search can be sorted by.
pub const CONTIG_SORT_COLUMNS: &[&str] = &["id", "len", "gc", "cov"];

static COLUMN_SORTING: ValueKind = ValueKind::Tuple(&[ValueKind::String, ValueKind::Flag]);

/// One sort key: a column name and its direction.
///
/// On the wire this is the pair `[column, ascending]`, where `ascending`
/// is a boolean or `0`/`1`. It is always written back as `0`/`1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSorting {
    pub column: String,
    pub ascending: bool,
}

impl ColumnSorting {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }
}

impl FieldType for ColumnSorting {
    fn from_json(value: Value, path: &str) -> Result<Self, CodecError> {
        if let Value::Array(items) = &value {
            if let [Value::String(column), flag] = items.as_slice() {
                if let Some(ascending) = as_flag(flag) {
                    return Ok(Self {
                        column: column.clone(),
                        ascending,
                    });
                }
            }
        }
        Err(mismatch(path.to_string(), COLUMN_SORTING, &value))
    }

    fn to_json(&self) -> Value {
        Value::Array(vec![
            Value::String(self.column.clone()),
            Value::from(u8::from(self.ascending)),
        ])
    }
}

open_record! {
    /// Options for a bin search.
    ///
    /// `num_found` may be passed back from an earlier page so the service
    /// can skip a full count. Never set it to a guessed value.
    pub struct BinSearchOptions in BIN_SEARCH_OPTIONS as "BinSearchOptions" {
        /// Reference to the binned-contigs object.
        reference / set_reference / with_reference: String
            => FieldDescriptor::new("ref", ValueKind::String),
        /// Whitespace or comma separated words; every word must match.
        query / set_query / with_query: String
            => FieldDescriptor::new("query", ValueKind::String),
        sort_by / set_sort_by / with_sort_by: Vec<ColumnSorting>
            => FieldDescriptor::new("sort_by", ValueKind::List(&COLUMN_SORTING)),
        start / set_start / with_start: i64
            => FieldDescriptor::new("start", ValueKind::Integer),
        limit / set_limit / with_limit: i64
            => FieldDescriptor::new("limit", ValueKind::Integer),
        num_found / set_num_found / with_num_found: i64
            => FieldDescriptor::new("num_found", ValueKind::Integer),
    }
}

open_record! {
    /// Options for a contig search within one bin.
    pub struct ContigSearchOptions in CONTIG_SEARCH_OPTIONS as "ContigSearchOptions" {
        /// Reference to the binned-contigs object.
        reference / set_reference / with_reference: String
            => FieldDescriptor::new("ref", ValueKind::String),
        bin_id / set_bin_id / with_bin_id: String
            => FieldDescriptor::new("bin_id", ValueKind::String),
        query / set_query / with_query: String
            => FieldDescriptor::new("query", ValueKind::String),
        sort_by / set_sort_by / with_sort_by: Vec<ColumnSorting>
            => FieldDescriptor::new("sort_by", ValueKind::List(&COLUMN_SORTING)),
        start / set_start / with_start: i64
            => FieldDescriptor::new("start", ValueKind::Integer),
        limit / set_limit / with_limit: i64
            => FieldDescriptor::new("limit", ValueKind::Integer),
        num_found / set_num_found / with_num_found: i64
            => FieldDescriptor::new("num_found", ValueKind::Integer),
    }
}

impl BinSearchOptions {
    /// Options searching `reference` with an empty query.
    pub fn for_ref(reference: impl Into<String>) -> Self {
        Self::new().with_reference(reference)
    }

    /// Append a sort key.
    pub fn sort(mut self, sorting: ColumnSorting) -> Self {
        self.sort_by.get_or_insert_with(Vec::new).push(sorting);
        self
    }

    /// Check every sort column against [`BIN_SORT_COLUMNS`].
    pub fn validate_sort(&self) -> Result<(), InvalidInputError> {
        check_columns(self.sort_by.as_deref(), BIN_SORT_COLUMNS)
    }
}

impl ContigSearchOptions {
    /// Options searching the contigs of `bin_id` in `reference`.
    pub fn for_bin(reference: impl Into<String>, bin_id: impl Into<String>) -> Self {
        Self::new().with_reference(reference).with_bin_id(bin_id)
    }

    /// Append a sort key.
    pub fn sort(mut self, sorting: ColumnSorting) -> Self {
        self.sort_by.get_or_insert_with(Vec::new).push(sorting);
        self
    }

    /// Check every sort column against [`CONTIG_SORT_COLUMNS`].
    pub fn validate_sort(&self) -> Result<(), InvalidInputError> {
        check_columns(self.sort_by.as_deref(), CONTIG_SORT_COLUMNS)
    }
}

fn check_columns(
    sort_by: Option<&[ColumnSorting]>,
    allowed: &'static [&'static str],
) -> Result<(), InvalidInputError> {
    for sorting in sort_by.unwrap_or_default() {
        if !allowed.contains(&sorting.column.as_str()) {
            return Err(InvalidInputError::UnknownSortColumn {
                column: sorting.column.clone(),
                allowed,
            });
        }
    }
    Ok(())
}
