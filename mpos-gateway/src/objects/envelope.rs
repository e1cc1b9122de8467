//! Shared envelope pieces: the authentication block and the gateway's
//! result-status header.

use serde::{Deserialize, Serialize};

/// The `merchantAuthentication` block sent with every request.
///
/// Borrowed from the live credentials so the secret is never copied into
/// long-lived request state.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantAuthentication<'a> {
    pub name: &'a str,
    pub transaction_key: &'a str,
}

/// The `messages` status header present on every reply envelope.
///
/// `resultCode` is `"Ok"` or `"Error"`; on error the `message` list carries
/// the human-readable explanation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyStatus {
    pub result_code: String,
    #[serde(default)]
    pub message: Vec<StatusMessage>,
}

/// One entry of the envelope-level `message` list (`code` + `text`).
#[derive(Debug, Clone, Deserialize)]
pub struct StatusMessage {
    pub code: Option<String>,
    pub text: Option<String>,
}

impl ReplyStatus {
    const RESULT_ERROR: &'static str = "Error";

    pub fn is_error(&self) -> bool {
        self.result_code == Self::RESULT_ERROR
    }

    /// The first message's text, the way the gateway intends it to be shown.
    pub fn first_text(&self) -> Option<&str> {
        self.message.first().and_then(|m| m.text.as_deref())
    }

    /// The first message's gateway code (e.g. `E00007`).
    pub fn first_code(&self) -> Option<&str> {
        self.message.first().and_then(|m| m.code.as_deref())
    }
}
