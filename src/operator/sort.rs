//! Stable sorting by a record field.

use serde::{Deserialize, Serialize};

use crate::notebook::Notebook;
use crate::record::compare_values;

use super::operator::{BoxedOperator, Operator};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl Order {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }

    /// Parses a direction; any spelling other than `"desc"` maps to
    /// ascending
    pub fn parse(s: &str) -> Self {
        match s {
            "desc" => Order::Desc,
            _ => Order::Asc,
        }
    }
}

impl From<&str> for Order {
    fn from(s: &str) -> Self {
        Order::parse(s)
    }
}

/// Immediate operator applying a stable sort by one field
pub struct SortBy {
    field: String,
    order: Order,
}

/// Creates a sorting operator.
///
/// The sort is stable: records with equal field values retain their
/// pre-sort relative order. Comparison is the three-way value ordering
/// from the record module, so numeric and string fields both sort
/// correctly; records lacking the field sort before records owning it.
pub fn sort_by(field: impl Into<String>, order: Order) -> BoxedOperator {
    Box::new(SortBy {
        field: field.into(),
        order,
    })
}

impl Operator for SortBy {
    fn apply(&self, mut notebook: Notebook) -> Notebook {
        let field = &self.field;
        let order = self.order;
        notebook.sort_working_by(|a, b| {
            let ordering = compare_values(a.get(field), b.get(field));
            match order {
                Order::Asc => ordering,
                Order::Desc => ordering.reverse(),
            }
        });
        notebook
    }

    fn name(&self) -> &'static str {
        "sort_by"
    }
}
