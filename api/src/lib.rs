//! HTTP clients for the vending machine backend.
//!
//! Two surfaces are consumed: the generic `/api/{type}/{id}` record
//! endpoints ([`RecordClient`]) and the page-specific endpoints with their
//! per-endpoint response shapes ([`ApiClient`]).
//!
//! Both clients share the same failure contract: a single request per call,
//! no retry, and every failure logged and flattened to `None` (or `false`
//! for deletes). Callers cannot tell a missing record from a network fault.

pub mod endpoints;
pub mod error;
pub mod models;
pub mod records;

pub use endpoints::ApiClient;
pub use records::RecordClient;
