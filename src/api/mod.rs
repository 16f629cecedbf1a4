//! High-level client for the cielo24 API.
//!
//! [`CieloClient`] ties configuration, session state and transport together
//! and exposes one method per endpoint. Each method validates its required
//! parameters, applies endpoint defaults and performs a single round trip.
//!
//! Account methods live in `account`, job methods in `job`.

mod account;
mod client;
mod job;

pub use client::CieloClient;
