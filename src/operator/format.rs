//! Deferred field formatting.

use std::rc::Rc;

use serde_json::Value;

use crate::notebook::{DeferredOp, Formatter, Notebook};

use super::operator::{BoxedOperator, Operator};

/// Operator enqueuing a deferred field rewrite
pub struct Format {
    field: String,
    formatter: Formatter,
}

/// Creates a formatting operator.
///
/// The rewrite is deferred: it runs after every immediate operator and
/// after field projection. Each record owning `field` is replaced by a
/// fresh record with the field's value passed through `formatter`;
/// records without the field pass through untouched. Because projection
/// runs first, formatting a field that `select` dropped has no effect.
///
/// The formatter must return a primitive value; a non-primitive result is
/// discarded and the record kept as-is.
pub fn format<F>(field: impl Into<String>, formatter: F) -> BoxedOperator
where
    F: Fn(&Value) -> Value + 'static,
{
    Box::new(Format {
        field: field.into(),
        formatter: Rc::new(formatter),
    })
}

impl Operator for Format {
    fn apply(&self, mut notebook: Notebook) -> Notebook {
        notebook.defer(DeferredOp::Format {
            field: self.field.clone(),
            formatter: Rc::clone(&self.formatter),
        });
        notebook
    }

    fn name(&self) -> &'static str {
        "format"
    }
}
