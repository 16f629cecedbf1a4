//! Authentication state for the cielo24 API SDK.
//!
//! cielo24 authenticates every call with an `api_token` query parameter.
//! That value is either a short-lived token returned by `account/login` or
//! a long-lived secure key generated for the account; the token wins when
//! both are present.
//!
//! - [`Session`]: The mutable credential holder owned by a client

mod session;

pub use session::Session;
