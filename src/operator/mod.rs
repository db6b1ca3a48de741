//! Operator subsystem for riffle
//!
//! Every factory here produces a [`BoxedOperator`]: a function from
//! notebook to notebook. Immediate operators ([`select`], [`filter_in`],
//! [`sort_by`], and the combinators [`or`] / [`and`]) act when the driver
//! reaches them in the call chain; deferred operators ([`format`],
//! [`limit`]) enqueue a step that runs after field projection.
//!
//! The [`Operator`] trait is the extension point: any notebook-to-notebook
//! closure composes with the built-ins.

mod combine;
mod filter;
mod format;
mod limit;
mod operator;
mod select;
mod sort;

pub use combine::{and, or, And, Or};
pub use filter::{filter_in, FilterIn};
pub use format::{format, Format};
pub use limit::{limit, Limit};
pub use operator::{BoxedOperator, Operator};
pub use select::{select, Select};
pub use sort::{sort_by, Order, SortBy};
