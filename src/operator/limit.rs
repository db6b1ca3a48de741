//! Deferred result truncation.

use crate::notebook::{DeferredOp, Notebook};

use super::operator::{BoxedOperator, Operator};

/// Operator enqueuing a deferred truncation
pub struct Limit {
    count: usize,
}

/// Creates a limiting operator.
///
/// The truncation is deferred: it runs after field projection, keeping at
/// most `count` leading records in order. A count beyond the collection
/// length is a no-op; zero empties the result.
pub fn limit(count: usize) -> BoxedOperator {
    Box::new(Limit { count })
}

impl Operator for Limit {
    fn apply(&self, mut notebook: Notebook) -> Notebook {
        notebook.defer(DeferredOp::Limit { count: self.count });
        notebook
    }

    fn name(&self) -> &'static str {
        "limit"
    }
}
