//! HTTP surface of the attendance back end.
//!
//! [`routes::routes`] builds the `/api` router; the `api` binary wraps it with logging,
//! CORS and connection info and serves it.

pub mod auth;
pub mod response;
pub mod routes;
