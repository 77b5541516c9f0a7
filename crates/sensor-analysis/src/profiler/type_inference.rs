//! Type inference logic for raw text columns.

use crate::config::AnalyzerConfig;
use crate::table::Table;
use crate::utils::is_numeric_cell;
use serde::{Deserialize, Serialize};

/// Inferred kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// At least one cell parses as a number.
    Numeric,
    /// Excluded by name (quality flags, timestamps, record numbers).
    Excluded,
    /// Categorical or identifier data: no cell parses as a number.
    Categorical,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Excluded => "excluded",
            Self::Categorical => "categorical",
        }
    }
}

/// Infer the kind of a single column.
///
/// Exclusion rules are applied before any cell is inspected. Otherwise a
/// column is numeric as soon as one present, non-empty cell parses; absent
/// cells, empty cells and unparseable text never count.
pub(crate) fn infer_column_kind(
    table: &Table,
    header: &str,
    config: &AnalyzerConfig,
) -> ColumnKind {
    if config.is_excluded(header) {
        return ColumnKind::Excluded;
    }

    let numeric = match table.cells(header) {
        Ok(mut cells) => {
            cells.any(|cell| cell.is_some_and(|c| !c.is_empty() && is_numeric_cell(c)))
        }
        Err(_) => false,
    };

    if numeric {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}
