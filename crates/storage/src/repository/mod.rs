//! SQL access, one repository per aggregate.
//!
//! Repositories borrow a single connection. Services hand them either a
//! pooled connection or an open transaction, so several repositories can
//! take part in one unit of work.

pub mod audit;
pub mod comment;
pub mod download;
pub mod session;
pub mod stats;
pub mod strategy;
pub mod submission;
pub mod user;
