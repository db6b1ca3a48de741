//! Pipeline state threaded through a single query invocation.
//!
//! Exactly one notebook flows through a `query` call: operators take it
//! by value and return it, possibly replaced. It never escapes the call.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use tracing::warn;

use crate::record::{is_primitive, Collection, Record};

/// Identity of a record within one pipeline run.
///
/// Identity is positional: operators move ids between working sets and
/// never compare record values, so two structurally equal records at
/// different ids stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(usize);

/// A field-rewriting function applied by [`DeferredOp::Format`]
pub type Formatter = Rc<dyn Fn(&Value) -> Value>;

/// A deferred pipeline step.
///
/// Deferred steps are enqueued during the immediate phase and applied
/// after field projection, in enqueue order.
#[derive(Clone)]
pub enum DeferredOp {
    /// Rewrite `field` on every record that owns it
    Format {
        /// Field to rewrite
        field: String,
        /// Rewriting function
        formatter: Formatter,
    },
    /// Truncate the working collection to the leading `count` records
    Limit {
        /// Maximum number of records to keep
        count: usize,
    },
}

impl DeferredOp {
    /// Returns the step name (for log events)
    pub fn name(&self) -> &'static str {
        match self {
            DeferredOp::Format { .. } => "format",
            DeferredOp::Limit { .. } => "limit",
        }
    }

    /// Applies this step to the notebook's working collection
    pub(crate) fn apply(&self, notebook: &mut Notebook) {
        match self {
            DeferredOp::Format { field, formatter } => {
                for slot in 0..notebook.working.len() {
                    let id = notebook.working[slot];
                    let rewritten = match notebook.arena[id.0].get(field) {
                        Some(current) => formatter(current),
                        // Records without the field pass through untouched
                        None => continue,
                    };
                    if !is_primitive(&rewritten) {
                        warn!(field = %field, "formatter returned a non-primitive value, keeping original");
                        continue;
                    }
                    let record = notebook.arena[id.0].with_field(field, rewritten);
                    let fresh = notebook.intern(record);
                    notebook.working[slot] = fresh;
                }
            }
            DeferredOp::Limit { count } => notebook.working.truncate(*count),
        }
    }
}

impl fmt::Debug for DeferredOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeferredOp::Format { field, .. } => {
                f.debug_struct("Format").field("field", field).finish()
            }
            DeferredOp::Limit { count } => f.debug_struct("Limit").field("count", count).finish(),
        }
    }
}

/// The pipeline state: working collection, accumulated field selection,
/// and deferred-operator queue.
///
/// The arena owns every record the pipeline has seen; the working set is
/// an ordered list of arena ids. Filtering, sorting, and the boolean
/// combinators only rearrange ids — fresh records are appended by
/// projection and `format` alone.
pub struct Notebook {
    arena: Vec<Record>,
    working: Vec<RecordId>,
    fields: Option<Vec<String>>,
    deferred: Vec<DeferredOp>,
}

impl Notebook {
    /// Ingests a collection: every record gets an arena id, and the
    /// working set starts as the full collection in input order.
    pub(crate) fn new(collection: impl IntoIterator<Item = Record>) -> Self {
        let arena: Vec<Record> = collection.into_iter().collect();
        let working = (0..arena.len()).map(RecordId).collect();
        Self {
            arena,
            working,
            fields: None,
            deferred: Vec::new(),
        }
    }

    /// Returns the record behind an id
    pub fn record(&self, id: RecordId) -> &Record {
        &self.arena[id.0]
    }

    /// Returns the working collection as ordered ids
    pub fn working(&self) -> &[RecordId] {
        &self.working
    }

    /// Replaces the working collection
    pub fn set_working(&mut self, working: Vec<RecordId>) {
        self.working = working;
    }

    /// Returns an owned copy of the working collection
    pub fn snapshot_working(&self) -> Vec<RecordId> {
        self.working.clone()
    }

    /// Returns the number of records in the working collection
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// Returns true if the working collection is empty
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Returns the accumulated field selection; `None` means all fields
    /// are selected
    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    /// Narrows the field selection to the intersection of the current
    /// selection and `names`.
    ///
    /// Pure narrowing: once a field has been excluded it cannot reappear,
    /// regardless of later calls.
    pub fn narrow_fields(&mut self, names: &[String]) {
        match &mut self.fields {
            None => self.fields = Some(names.to_vec()),
            Some(current) => current.retain(|field| names.contains(field)),
        }
    }

    /// Keeps only the working records matching the predicate, preserving
    /// order and identity
    pub fn retain(&mut self, mut predicate: impl FnMut(&Record) -> bool) {
        let arena = &self.arena;
        self.working.retain(|id| predicate(&arena[id.0]));
    }

    /// Stable-sorts the working collection by a record comparator.
    ///
    /// Records with equal keys retain their pre-sort relative order.
    pub fn sort_working_by(&mut self, mut compare: impl FnMut(&Record, &Record) -> Ordering) {
        let arena = &self.arena;
        self.working.sort_by(|a, b| compare(&arena[a.0], &arena[b.0]));
    }

    /// Enqueues a deferred step
    pub fn defer(&mut self, op: DeferredOp) {
        self.deferred.push(op);
    }

    /// Returns the deferred queue, in enqueue order
    pub fn deferred(&self) -> &[DeferredOp] {
        &self.deferred
    }

    pub(crate) fn clone_fields(&self) -> Option<Vec<String>> {
        self.fields.clone()
    }

    pub(crate) fn set_fields(&mut self, fields: Option<Vec<String>>) {
        self.fields = fields;
    }

    pub(crate) fn clone_deferred(&self) -> Vec<DeferredOp> {
        self.deferred.clone()
    }

    pub(crate) fn set_deferred(&mut self, deferred: Vec<DeferredOp>) {
        self.deferred = deferred;
    }

    /// Appends a fresh record to the arena and returns its id
    fn intern(&mut self, record: Record) -> RecordId {
        let id = RecordId(self.arena.len());
        self.arena.push(record);
        id
    }

    /// Applies the accumulated field selection, replacing every working
    /// record with a fresh one reduced to the selected keys.
    ///
    /// Runs exactly once per query, between the immediate phase and the
    /// deferred phase. With no selection it is a no-op.
    pub(crate) fn project_fields(&mut self) {
        let Some(selected) = self.fields.take() else {
            return;
        };
        for slot in 0..self.working.len() {
            let id = self.working[slot];
            let reduced = self.arena[id.0].project(&selected);
            let fresh = self.intern(reduced);
            self.working[slot] = fresh;
        }
    }

    /// Drains the deferred queue for the final phase
    pub(crate) fn take_deferred(&mut self) -> Vec<DeferredOp> {
        std::mem::take(&mut self.deferred)
    }

    /// Extracts the final collection and discards the notebook
    pub(crate) fn into_collection(self) -> Collection {
        let arena = self.arena;
        self.working.iter().map(|id| arena[id.0].clone()).collect()
    }
}
