//! Boolean composition of filter operators.
//!
//! `or` is set union over branch results, deduplicated by record
//! identity; `and` is intersection by left-to-right composition. Both
//! change only the working collection: branch effects on the field
//! selection or the deferred queue are discarded.

use std::collections::HashSet;

use tracing::trace;

use crate::notebook::{Notebook, RecordId};

use super::operator::{BoxedOperator, Operator};

/// Union combinator over filter operators
pub struct Or {
    branches: Vec<BoxedOperator>,
}

/// Creates a union operator.
///
/// Every branch is applied to its own copy of the incoming collection, so
/// branches never see each other's effects. Surviving records are
/// accumulated by identity — two structurally equal but distinct records
/// are not merged — and the result is the incoming collection filtered
/// down to union members, so output order always matches input order no
/// matter how many branches accept a record.
///
/// With no branches, `or` is the identity operator.
pub fn or(operators: impl IntoIterator<Item = BoxedOperator>) -> BoxedOperator {
    Box::new(Or {
        branches: operators.into_iter().collect(),
    })
}

impl Operator for Or {
    fn apply(&self, notebook: Notebook) -> Notebook {
        if self.branches.is_empty() {
            return notebook;
        }

        let baseline_fields = notebook.clone_fields();
        let baseline_deferred = notebook.clone_deferred();
        let snapshot = notebook.snapshot_working();

        let mut notebook = notebook;
        let mut union: HashSet<RecordId> = HashSet::new();
        for branch in &self.branches {
            // Every branch starts from the shared baseline, never from a
            // sibling's side effects
            notebook.set_working(snapshot.clone());
            notebook.set_fields(baseline_fields.clone());
            notebook.set_deferred(baseline_deferred.clone());
            notebook = branch.apply(notebook);
            union.extend(notebook.working().iter().copied());
        }
        trace!(branches = self.branches.len(), matched = union.len(), "union complete");

        // Output order is the incoming order, not branch discovery order
        notebook.set_working(snapshot.into_iter().filter(|id| union.contains(id)).collect());
        notebook.set_fields(baseline_fields);
        notebook.set_deferred(baseline_deferred);
        notebook
    }

    fn name(&self) -> &'static str {
        "or"
    }
}

/// Intersection combinator over filter operators
pub struct And {
    branches: Vec<BoxedOperator>,
}

/// Creates an intersection operator.
///
/// Branches compose left to right: each sees the previous branch's
/// result, so pure filters can only narrow further. With no branches,
/// `and` is the identity operator.
pub fn and(operators: impl IntoIterator<Item = BoxedOperator>) -> BoxedOperator {
    Box::new(And {
        branches: operators.into_iter().collect(),
    })
}

impl Operator for And {
    fn apply(&self, notebook: Notebook) -> Notebook {
        if self.branches.is_empty() {
            return notebook;
        }

        let baseline_fields = notebook.clone_fields();
        let baseline_deferred = notebook.clone_deferred();

        let mut notebook = notebook;
        for branch in &self.branches {
            notebook = branch.apply(notebook);
        }
        trace!(branches = self.branches.len(), matched = notebook.len(), "intersection complete");

        notebook.set_fields(baseline_fields);
        notebook.set_deferred(baseline_deferred);
        notebook
    }

    fn name(&self) -> &'static str {
        "and"
    }
}
