//! Inventory query & normalization engine.
//!
//! `query` builds the filter/sort/paginate SQL, `projection` turns raw rows
//! into the external product shape, `resolver` keeps the lookup dimensions
//! consistent, `writer` runs the transactional write path, and `reads`
//! executes the read path against the pool.

pub mod catalog;
pub mod projection;
pub mod query;
pub mod reads;
pub mod resolver;
pub mod writer;
