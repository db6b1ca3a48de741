//! The query driver.
//!
//! Owns the notebook lifecycle: build, immediate phase, projection,
//! deferred phase, extraction.

use tracing::{debug, trace};

use crate::notebook::Notebook;
use crate::operator::BoxedOperator;
use crate::record::{Collection, Record};

/// Evaluates a chain of operators against a collection.
///
/// Execution runs in three phases, in strict order:
///
/// 1. **immediate** — every supplied operator folds over the notebook,
///    left to right, in call order
/// 2. **projection** — if any `select` narrowed the field set, each
///    working record is reduced to the selected keys, exactly once
/// 3. **deferred** — queued steps (`format`, `limit`) apply in enqueue
///    order, which equals call order
///
/// The input collection is consumed; the result is a new collection and
/// no record the caller retains is ever mutated. Evaluation is
/// deterministic: same collection and operators, same result. There are
/// no error conditions — a record lacking a referenced field is simply
/// passed over by the operator in question.
pub fn query<C, O>(collection: C, operators: O) -> Collection
where
    C: IntoIterator<Item = Record>,
    O: IntoIterator<Item = BoxedOperator>,
{
    let mut notebook = Notebook::new(collection);
    debug!(records = notebook.len(), "query started");

    for operator in operators {
        trace!(operator = operator.name(), "applying immediate operator");
        notebook = operator.apply(notebook);
    }
    debug!(records = notebook.len(), deferred = notebook.deferred().len(), "immediate phase complete");

    notebook.project_fields();

    for step in notebook.take_deferred() {
        trace!(step = step.name(), "applying deferred step");
        step.apply(&mut notebook);
    }
    debug!(records = notebook.len(), "query complete");

    notebook.into_collection()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::{filter_in, format, limit, select, sort_by, Order};
    use serde_json::{json, Value};

    fn make_collection(values: Vec<Value>) -> Collection {
        values
            .into_iter()
            .map(|v| Record::try_from(v).unwrap())
            .collect()
    }

    fn field_values(collection: &Collection, field: &str) -> Vec<Value> {
        collection
            .iter()
            .map(|record| record.get(field).cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_no_operators_returns_input_unchanged() {
        let collection = make_collection(vec![json!({"a": 1}), json!({"a": 2})]);
        let expected = collection.clone();

        let result = query(collection, Vec::new());

        assert_eq!(result, expected);
    }

    #[test]
    fn test_select_filter_sort_chain() {
        let collection = make_collection(vec![
            json!({"a": 1, "g": "x", "extra": true}),
            json!({"a": 2, "g": "y", "extra": true}),
            json!({"a": 3, "g": "x", "extra": true}),
        ]);

        let result = query(
            collection,
            [
                select(["a", "g"]),
                filter_in("g", [json!("x")]),
                sort_by("a", Order::Desc),
            ],
        );

        assert_eq!(field_values(&result, "a"), vec![json!(3), json!(1)]);
        assert!(result.iter().all(|r| !r.contains_field("extra")));
    }

    #[test]
    fn test_format_runs_before_limit_in_call_order() {
        let collection = make_collection(vec![json!({"a": 1}), json!({"a": 2})]);

        let result = query(
            collection,
            [format("a", |v| json!(v.as_i64().unwrap() * 10)), limit(1)],
        );

        assert_eq!(field_values(&result, "a"), vec![json!(10)]);
    }

    #[test]
    fn test_limit_before_format_still_truncates_first() {
        let collection = make_collection(vec![json!({"a": 1}), json!({"a": 2})]);

        let result = query(
            collection,
            [limit(1), format("a", |v| json!(v.as_i64().unwrap() + 100))],
        );

        assert_eq!(field_values(&result, "a"), vec![json!(101)]);
    }

    #[test]
    fn test_projection_runs_before_deferred_steps() {
        let collection = make_collection(vec![json!({"a": 1, "b": 2})]);

        // "b" is dropped by projection before the format step runs, so
        // the rewrite has no observable effect
        let result = query(
            collection,
            [select(["a"]), format("b", |_| json!(999))],
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].get("a"), Some(&json!(1)));
        assert!(!result[0].contains_field("b"));
    }

    #[test]
    fn test_format_on_unselected_collection_applies_to_all() {
        let collection = make_collection(vec![json!({"b": 1})]);

        let result = query(collection, [format("b", |v| json!(v.as_i64().unwrap() * 2))]);

        assert_eq!(result[0].get("b"), Some(&json!(2)));
    }

    #[test]
    fn test_operator_call_order_drives_both_phases() {
        let collection = make_collection(vec![json!({"a": 2}), json!({"a": 1}), json!({"a": 3})]);

        // sort runs immediately even though it is written after format;
        // the two deferred steps run in their call order afterward
        let result = query(
            collection,
            [
                format("a", |v| json!(v.as_i64().unwrap() * 10)),
                sort_by("a", Order::Asc),
                limit(2),
            ],
        );

        assert_eq!(field_values(&result, "a"), vec![json!(10), json!(20)]);
    }

    #[test]
    fn test_closure_operator_composes() {
        let collection = make_collection(vec![json!({"a": 1}), json!({"a": 2})]);

        // A plain closure is an operator: keep only the first record
        let first_only: crate::operator::BoxedOperator = Box::new(|mut notebook: Notebook| {
            let head: Vec<_> = notebook.working().iter().take(1).copied().collect();
            notebook.set_working(head);
            notebook
        });

        let result = query(collection, [first_only]);

        assert_eq!(field_values(&result, "a"), vec![json!(1)]);
    }
}
