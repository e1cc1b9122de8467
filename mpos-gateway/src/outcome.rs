//! Classification of a payment submission reply into a typed outcome.

use crate::client::GatewayError;
use crate::objects::payment::TransactionReply;

/// Response code the gateway uses for an approved transaction.
const CODE_APPROVED: &str = "1";
/// Declined by the issuer.
const CODE_DECLINED: &str = "2";
/// Held for review; the charge was processed but not approved.
const CODE_HELD: &str = "4";

/// Fallback explanation when the reply carries no message at all.
const GENERIC_FAILURE_TEXT: &str = "Transaction failed";

/// The terminal result of a payment submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The gateway approved the charge.
    Approved {
        transaction_id: Option<String>,
        auth_code: Option<String>,
    },
    /// The gateway processed the request and refused the charge.
    Declined { reason: String },
    /// The request itself failed; nothing was charged.
    Failed { kind: FailureKind, message: String },
}

/// What class of failure produced a [`Outcome::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Credentials rejected by the gateway.
    Authentication,
    /// The call never completed (connection, TLS, non-2xx status).
    Transport,
    /// The gateway reported an application-level error.
    Gateway,
    /// The reply could not be decoded.
    Decode,
}

impl Outcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, Outcome::Approved { .. })
    }

    /// Map a failed gateway call onto a terminal outcome, preserving the
    /// error's display message.
    pub fn from_error(err: &GatewayError) -> Self {
        let kind = match err {
            GatewayError::Authentication { .. } => FailureKind::Authentication,
            GatewayError::Http(_) | GatewayError::Status { .. } => FailureKind::Transport,
            GatewayError::Application { .. } => FailureKind::Gateway,
            GatewayError::MissingEnvelope(_) | GatewayError::Json(_) => FailureKind::Decode,
        };
        Outcome::Failed {
            kind,
            message: err.to_string(),
        }
    }
}

/// Classify a submission reply.
///
/// Approved iff the response code equals `"1"`. For anything else the
/// explanation is taken from the reply's `messages` list first and its
/// `errors` list second; when neither exists the result is a generic
/// failure. Codes `"2"` and `"4"` are declines (the gateway processed the
/// request and withheld approval); every other code is a failure.
pub fn classify(reply: &TransactionReply) -> Outcome {
    let code = reply.response_code();

    if code == CODE_APPROVED {
        return Outcome::Approved {
            transaction_id: reply.trans_id.clone(),
            auth_code: reply.auth_code.clone(),
        };
    }

    let explanation = first_message(reply).or_else(|| first_error(reply));

    match (code, explanation) {
        (CODE_DECLINED | CODE_HELD, Some(reason)) => Outcome::Declined { reason },
        (CODE_DECLINED | CODE_HELD, None) => Outcome::Declined {
            reason: GENERIC_FAILURE_TEXT.to_owned(),
        },
        (_, explanation) => Outcome::Failed {
            kind: FailureKind::Gateway,
            message: explanation.unwrap_or_else(|| GENERIC_FAILURE_TEXT.to_owned()),
        },
    }
}

fn first_message(reply: &TransactionReply) -> Option<String> {
    let first = reply.messages.as_ref()?.first()?;
    first.description.clone().or_else(|| first.code.clone())
}

fn first_error(reply: &TransactionReply) -> Option<String> {
    let first = reply.errors.as_ref()?.first()?;
    first.error_text.clone().or_else(|| first.error_code.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(json: &str) -> TransactionReply {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn code_one_is_approved() {
        let outcome = classify(&reply(
            r#"{"responseCode": "1", "transId": "60123", "authCode": "ABC123"}"#,
        ));
        assert_eq!(
            outcome,
            Outcome::Approved {
                transaction_id: Some("60123".to_owned()),
                auth_code: Some("ABC123".to_owned()),
            }
        );
    }

    #[test]
    fn approved_tolerates_missing_transaction_id() {
        let outcome = classify(&reply(r#"{"responseCode": "1"}"#));
        assert_eq!(
            outcome,
            Outcome::Approved {
                transaction_id: None,
                auth_code: None,
            }
        );
    }

    #[test]
    fn code_two_with_message_is_declined() {
        let outcome = classify(&reply(
            r#"{"responseCode": "2", "messages": [{"code": "2", "description": "Declined"}]}"#,
        ));
        assert_eq!(
            outcome,
            Outcome::Declined {
                reason: "Declined".to_owned(),
            }
        );
    }

    #[test]
    fn messages_take_precedence_over_errors() {
        let outcome = classify(&reply(
            r#"{
                "responseCode": "2",
                "messages": [{"code": "2", "description": "From messages"}],
                "errors": [{"errorCode": "2", "errorText": "From errors"}]
            }"#,
        ));
        assert_eq!(
            outcome,
            Outcome::Declined {
                reason: "From messages".to_owned(),
            }
        );
    }

    #[test]
    fn errors_list_is_the_fallback_explanation() {
        let outcome = classify(&reply(
            r#"{"responseCode": "3", "errors": [{"errorCode": "6", "errorText": "Invalid card number."}]}"#,
        ));
        assert_eq!(
            outcome,
            Outcome::Failed {
                kind: FailureKind::Gateway,
                message: "Invalid card number.".to_owned(),
            }
        );
    }

    #[test]
    fn no_explanation_is_a_generic_failure() {
        let outcome = classify(&reply(r#"{"responseCode": "3"}"#));
        assert_eq!(
            outcome,
            Outcome::Failed {
                kind: FailureKind::Gateway,
                message: "Transaction failed".to_owned(),
            }
        );
    }

    #[test]
    fn missing_response_code_is_never_approved() {
        let outcome = classify(&reply(r#"{"transId": "60123"}"#));
        assert!(!outcome.is_approved());
    }

    #[test]
    fn held_for_review_is_a_decline() {
        let outcome = classify(&reply(
            r#"{"responseCode": "4", "messages": [{"code": "252", "description": "Held for review"}]}"#,
        ));
        assert_eq!(
            outcome,
            Outcome::Declined {
                reason: "Held for review".to_owned(),
            }
        );
    }

    #[test]
    fn transport_error_maps_to_failed_transport() {
        let err = GatewayError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
        };
        match Outcome::from_error(&err) {
            Outcome::Failed { kind, message } => {
                assert_eq!(kind, FailureKind::Transport);
                assert!(message.contains("502"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
