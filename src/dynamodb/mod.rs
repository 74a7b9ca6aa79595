//! # DynamoDB Module
//!
//! Thin wrapper over the AWS SDK exposing the single-item operations the
//! handlers need: get, put, update (returning all new attributes), delete,
//! and a paginated scan with an optional equality filter.
//!
//! Table names are injected per deployment (see [`crate::config::Config`]);
//! this module never creates or describes tables.

mod client;

pub use client::{Attributes, DynamoDb};
