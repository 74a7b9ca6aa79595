//! One async function per API operation. Each validates its input, issues a
//! single storage call, and builds the response; faults surface as
//! [`crate::error::ApiError`] and are mapped at the router boundary.

pub mod books;
pub mod reading_lists;
