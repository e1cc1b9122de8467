//! Typed client for the Authorize.Net JSON API.
//!
//! Every gateway operation is an explicit request type paired with a typed
//! reply, wrapped in the gateway's single-key request/response envelopes.
//! The [`client::GatewayClient`] owns transport and decoding; the
//! [`outcome`] module turns a payment submission reply into a typed
//! approved/declined/failed outcome.

pub mod client;
pub mod credentials;
pub mod objects;
pub mod outcome;

pub use client::{GatewayClient, GatewayError};
pub use credentials::{Credentials, Environment};
pub use outcome::{FailureKind, Outcome, classify};
