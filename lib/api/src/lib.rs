//! # subx API
//!
//! HTTP serving layer over the substitution engine. Requests are answered
//! with `503` until the storage layer reports the resources as ready.

pub mod rest;

pub use rest::{ApiSettings, AppState, RestApi};
