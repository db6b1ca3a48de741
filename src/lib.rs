//! riffle - A deterministic, in-memory query pipeline over flat records
//!
//! Compose a [`query`] from independent operators — [`select`],
//! [`filter_in`], [`sort_by`], [`format`], [`limit`], and the boolean
//! combinators [`or`] / [`and`] — and evaluate them against a collection
//! in one pass. The input records are never mutated; the result is a new
//! collection, in a deterministic order.
//!
//! ```
//! use riffle::{filter_in, query, select, sort_by, Order, Record};
//! use serde_json::json;
//!
//! let records = [
//!     json!({"name": "ramen", "price": 210, "spicy": true}),
//!     json!({"name": "udon", "price": 180, "spicy": false}),
//!     json!({"name": "soba", "price": 220, "spicy": true}),
//! ]
//! .into_iter()
//! .map(|value| Record::try_from(value).unwrap());
//!
//! let result = query(
//!     records,
//!     [
//!         select(["name", "price"]),
//!         filter_in("spicy", [json!(true)]),
//!         sort_by("price", Order::Desc),
//!     ],
//! );
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].get("name"), Some(&json!("soba")));
//! assert!(!result[0].contains_field("spicy"));
//! ```

pub mod notebook;
pub mod operator;
pub mod pipeline;
pub mod record;

pub use notebook::{DeferredOp, Formatter, Notebook, RecordId};
pub use operator::{
    and, filter_in, format, limit, or, select, sort_by, BoxedOperator, Operator, Order,
};
pub use pipeline::query;
pub use record::{compare_values, Collection, Record, RecordError, RecordResult};
