//! Domains module containing business logic organized by bounded contexts.
//!
//! - **resources**: the document registry clients list and read
//! - **uploads**: the workflow that turns uploaded files into resources

pub mod resources;
pub mod uploads;
