//! Wire schema types for the gateway API.
//!
//! The gateway speaks a loosely-typed JSON dialect; these modules pin it
//! down with one explicit request type per operation and a decoded reply
//! struct with optional fields exactly where the gateway may omit them.

pub mod envelope;
pub mod merchant;
pub mod payment;
pub mod reporting;
pub mod vault;

/// Binds a request type to its envelope keys and typed reply.
///
/// Every gateway request is wrapped as `{"<op>Request": {...}}` and every
/// reply arrives as `{"<op>Response": {...}}`; the two key literals differ
/// per operation and drive both encoding and decoding.
pub trait GatewayOperation: serde::Serialize {
    const REQUEST_KEY: &'static str;
    const RESPONSE_KEY: &'static str;
    type Reply: serde::de::DeserializeOwned;
}
