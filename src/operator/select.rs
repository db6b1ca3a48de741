//! Field selection.

use crate::notebook::Notebook;

use super::operator::{BoxedOperator, Operator};

/// Immediate operator narrowing the notebook's field selection
pub struct Select {
    fields: Vec<String>,
}

/// Creates a field-selection operator.
///
/// Narrows the accumulated selection to the intersection of the current
/// selection (all fields, on the first call) and `fields`. Once a field
/// has been excluded by any `select`, no later call can bring it back.
/// The removal of non-selected fields itself happens once, after every
/// immediate operator has run.
pub fn select<I, S>(fields: I) -> BoxedOperator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Box::new(Select {
        fields: fields.into_iter().map(Into::into).collect(),
    })
}

impl Operator for Select {
    fn apply(&self, mut notebook: Notebook) -> Notebook {
        notebook.narrow_fields(&self.fields);
        notebook
    }

    fn name(&self) -> &'static str {
        "select"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::json;

    fn empty_notebook() -> Notebook {
        Notebook::new(std::iter::empty::<Record>())
    }

    #[test]
    fn test_first_select_sets_selection() {
        let notebook = select(["a", "b"]).apply(empty_notebook());
        assert_eq!(
            notebook.fields(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn test_chained_selects_intersect() {
        let mut notebook = empty_notebook();
        notebook = select(["a", "b", "c"]).apply(notebook);
        notebook = select(["c", "a", "z"]).apply(notebook);
        notebook = select(["a", "b"]).apply(notebook);

        // Intersection of all three argument lists, first-seen order
        assert_eq!(notebook.fields(), Some(&["a".to_string()][..]));
    }

    #[test]
    fn test_select_does_not_touch_records() {
        let record = Record::try_from(json!({"a": 1, "b": 2})).unwrap();
        let notebook = select(["a"]).apply(Notebook::new([record]));

        // Selection is bookkeeping only until projection runs
        let id = notebook.working()[0];
        assert_eq!(notebook.record(id).len(), 2);
    }
}
