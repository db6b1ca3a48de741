//! Membership filtering.
//!
//! Filters records strictly: exact value equality, no type coercion,
//! missing field means no match.

use serde_json::Value;

use crate::notebook::Notebook;

use super::operator::{BoxedOperator, Operator};

/// Immediate operator keeping records whose field value is in a value set
pub struct FilterIn {
    field: String,
    values: Vec<Value>,
}

/// Creates a membership-filter operator.
///
/// Keeps exactly the records that own `field` and whose value equals one
/// of `values`. Records lacking the field are always excluded. Relative
/// order of surviving records is preserved.
pub fn filter_in(field: impl Into<String>, values: impl IntoIterator<Item = Value>) -> BoxedOperator {
    Box::new(FilterIn {
        field: field.into(),
        values: values.into_iter().collect(),
    })
}

impl Operator for FilterIn {
    fn apply(&self, mut notebook: Notebook) -> Notebook {
        notebook.retain(|record| match record.get(&self.field) {
            Some(value) => self.values.contains(value),
            None => false,
        });
        notebook
    }

    fn name(&self) -> &'static str {
        "filter_in"
    }
}
