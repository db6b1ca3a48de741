//! Notebook subsystem for riffle
//!
//! The pipeline-internal state bundling the working collection, the
//! accumulated field selection, and the deferred-operator queue.
//!
//! # Phase contract
//!
//! - field projection is applied exactly once, after all immediate
//!   operators and before any deferred step
//! - record identity is positional ([`RecordId`]): filtering, sorting,
//!   and the boolean combinators rearrange ids without creating records;
//!   only projection and `format` append fresh ones
//! - deferred steps apply in enqueue order, which equals call order

mod notebook;

pub use notebook::{DeferredOp, Formatter, Notebook, RecordId};
