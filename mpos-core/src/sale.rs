//! The guided sale workflow: amount → card → customer → submit.
//!
//! Each step gates forward progress on its own validation, backward
//! navigation never loses entered fields, and exactly one submission can
//! be in flight per draft. A terminal outcome finishes the workflow; the
//! draft is dropped with it and a new sale starts fresh.

use mpos_gateway::objects::payment::{
    BillTo, CreditCard, Payment, Tax, TransactionRequest,
};
use mpos_gateway::outcome::{FailureKind, Outcome, classify};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::gateway::PaymentGateway;
use crate::money;
use crate::session::MerchantSettings;

/// Line-item name the gateway shows for the computed tax.
const TAX_LINE_NAME: &str = "Sales Tax";

/// Shown when a submission reply carries no transaction result at all.
const MISSING_RESULT_TEXT: &str = "Failed to process server response";

/// Where the workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleStep {
    Amount,
    Card,
    Customer,
    Submitting,
    Complete,
}

/// Which draft field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Amount,
    CardNumber,
    ExpirationMonth,
    ExpirationYear,
    Cvv,
    FirstName,
    LastName,
    Email,
    Address,
    City,
    State,
    Zip,
    Country,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Amount => "amount",
            Field::CardNumber => "card number",
            Field::ExpirationMonth => "expiration month",
            Field::ExpirationYear => "expiration year",
            Field::Cvv => "security code",
            Field::FirstName => "first name",
            Field::LastName => "last name",
            Field::Email => "email",
            Field::Address => "street address",
            Field::City => "city",
            Field::State => "state",
            Field::Zip => "zip",
            Field::Country => "country",
        };
        f.write_str(name)
    }
}

/// Local workflow errors; never sent to the network.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("{field} is missing or invalid")]
    Validation { field: Field },

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("this sale already finished")]
    Completed,
}

/// Mutable wizard state. Card number is held digits-only; everything else
/// is kept exactly as entered.
#[derive(Debug, Clone, Default)]
pub struct SaleDraft {
    pub amount_minor: i64,
    pub card_number: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub cvv: String,
    pub customer: CustomerDetails,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// The immutable, fully-validated projection of a draft, built only at
/// submission time.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub amount_minor: i64,
    pub tax_minor: i64,
    pub total_minor: i64,
    pub card_number: String,
    /// `MM/YY` as the gateway expects it.
    pub expiration: String,
    pub cvv: String,
    pub customer: CustomerDetails,
}

impl PaymentRequest {
    /// The wire transaction this request submits.
    fn wire(&self) -> TransactionRequest {
        TransactionRequest {
            transaction_type: TransactionRequest::AUTH_CAPTURE.to_owned(),
            amount: money::wire_amount(self.total_minor),
            payment: Payment {
                credit_card: CreditCard {
                    card_number: self.card_number.clone(),
                    expiration_date: self.expiration.clone(),
                    card_code: self.cvv.clone(),
                },
            },
            tax: Tax {
                amount: money::wire_amount(self.tax_minor),
                name: TAX_LINE_NAME.to_owned(),
            },
            bill_to: BillTo {
                first_name: self.customer.first_name.clone(),
                last_name: self.customer.last_name.clone(),
                address: self.customer.address.clone(),
                city: self.customer.city.clone(),
                state: self.customer.state.clone(),
                zip: self.customer.zip.clone(),
                country: self.customer.country.clone(),
                email: self.customer.email.clone(),
            },
        }
    }
}

/// One guided sale against one gateway.
pub struct SaleWorkflow<G> {
    gateway: G,
    draft: SaleDraft,
    tax_rate_percent: Decimal,
    currency: String,
    step: SaleStep,
    outcome: Option<Outcome>,
}

impl<G: PaymentGateway> SaleWorkflow<G> {
    /// Open a fresh draft using the session's current tax and currency
    /// configuration.
    pub fn new(gateway: G, settings: &MerchantSettings) -> Self {
        Self {
            gateway,
            draft: SaleDraft::default(),
            tax_rate_percent: settings.tax_rate_percent,
            currency: settings.currency.clone(),
            step: SaleStep::Amount,
            outcome: None,
        }
    }

    pub fn step(&self) -> SaleStep {
        self.step
    }

    pub fn draft(&self) -> &SaleDraft {
        &self.draft
    }

    /// The terminal outcome, once the workflow completed.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn set_amount_minor(&mut self, amount_minor: i64) {
        self.draft.amount_minor = amount_minor;
    }

    /// Set the card fields, keeping only digits of the card number
    /// (`"4111 1111 1111 1111"` becomes 16 digits).
    pub fn set_card(&mut self, number: &str, month: &str, year: &str, cvv: &str) {
        self.draft.card_number = number.chars().filter(char::is_ascii_digit).collect();
        self.draft.expiration_month = month.to_owned();
        self.draft.expiration_year = year.to_owned();
        self.draft.cvv = cvv.to_owned();
    }

    pub fn set_customer(&mut self, customer: CustomerDetails) {
        self.draft.customer = customer;
    }

    /// Tax derived from the current amount; recomputed on every read so
    /// amount edits are always reflected.
    pub fn tax_minor(&self) -> i64 {
        money::tax_minor(self.draft.amount_minor, self.tax_rate_percent)
    }

    pub fn total_minor(&self) -> i64 {
        self.draft.amount_minor + self.tax_minor()
    }

    /// Validate the current step and move forward. From the customer step
    /// this only re-validates; [`submit`](Self::submit) is the forward
    /// edge there.
    pub fn advance(&mut self) -> Result<SaleStep, WorkflowError> {
        match self.step {
            SaleStep::Amount => {
                self.validate_amount()?;
                self.step = SaleStep::Card;
            }
            SaleStep::Card => {
                self.validate_card()?;
                self.step = SaleStep::Customer;
            }
            SaleStep::Customer => {
                self.validate_customer()?;
            }
            SaleStep::Submitting => return Err(WorkflowError::SubmissionInFlight),
            SaleStep::Complete => return Err(WorkflowError::Completed),
        }
        Ok(self.step)
    }

    /// Step backward without clearing any entered fields. Rejected while a
    /// submission is in flight or after completion.
    pub fn back(&mut self) -> Result<SaleStep, WorkflowError> {
        match self.step {
            SaleStep::Amount => {}
            SaleStep::Card => self.step = SaleStep::Amount,
            SaleStep::Customer => self.step = SaleStep::Card,
            SaleStep::Submitting => return Err(WorkflowError::SubmissionInFlight),
            SaleStep::Complete => return Err(WorkflowError::Completed),
        }
        Ok(self.step)
    }

    /// Validate the whole draft, build the immutable payment request, and
    /// submit it. Exactly one submission can be in flight; the result
    /// (approved, declined, or failed) is terminal either way.
    pub async fn submit(&mut self) -> Result<Outcome, WorkflowError> {
        let request = self.begin_submission()?;

        info!(
            total = %money::format_amount(request.total_minor, &self.currency),
            "submitting sale"
        );

        let outcome = match self.gateway.create_transaction(request.wire()).await {
            Ok(reply) => match reply.transaction_response {
                Some(tx) => classify(&tx),
                None => Outcome::Failed {
                    kind: FailureKind::Decode,
                    message: MISSING_RESULT_TEXT.to_owned(),
                },
            },
            Err(err) => {
                warn!(error = %err, "sale submission failed");
                Outcome::from_error(&err)
            }
        };

        self.step = SaleStep::Complete;
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Gate into the submitting state: re-validates every step and builds
    /// the immutable request. Fails without side effects.
    fn begin_submission(&mut self) -> Result<PaymentRequest, WorkflowError> {
        match self.step {
            SaleStep::Submitting => return Err(WorkflowError::SubmissionInFlight),
            SaleStep::Complete => return Err(WorkflowError::Completed),
            _ => {}
        }
        self.validate_amount()?;
        self.validate_card()?;
        self.validate_customer()?;

        let request = PaymentRequest {
            amount_minor: self.draft.amount_minor,
            tax_minor: self.tax_minor(),
            total_minor: self.total_minor(),
            card_number: self.draft.card_number.clone(),
            expiration: format!(
                "{}/{}",
                self.draft.expiration_month, self.draft.expiration_year
            ),
            cvv: self.draft.cvv.clone(),
            customer: self.draft.customer.clone(),
        };
        self.step = SaleStep::Submitting;
        Ok(request)
    }

    fn validate_amount(&self) -> Result<(), WorkflowError> {
        if self.draft.amount_minor <= 0 {
            return Err(invalid(Field::Amount));
        }
        Ok(())
    }

    fn validate_card(&self) -> Result<(), WorkflowError> {
        let number = &self.draft.card_number;
        if !(13..=19).contains(&number.len()) || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(Field::CardNumber));
        }
        match self.draft.expiration_month.parse::<u8>() {
            Ok(1..=12) => {}
            _ => return Err(invalid(Field::ExpirationMonth)),
        }
        let year = &self.draft.expiration_year;
        if !(year.len() == 2 || year.len() == 4) || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(Field::ExpirationYear));
        }
        let cvv = &self.draft.cvv;
        if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(Field::Cvv));
        }
        Ok(())
    }

    fn validate_customer(&self) -> Result<(), WorkflowError> {
        let customer = &self.draft.customer;
        let required = [
            (&customer.first_name, Field::FirstName),
            (&customer.last_name, Field::LastName),
            (&customer.email, Field::Email),
            (&customer.address, Field::Address),
            (&customer.city, Field::City),
            (&customer.state, Field::State),
            (&customer.zip, Field::Zip),
            (&customer.country, Field::Country),
        ];
        for (value, field) in required {
            if value.trim().is_empty() {
                return Err(invalid(field));
            }
        }
        Ok(())
    }
}

fn invalid(field: Field) -> WorkflowError {
    WorkflowError::Validation { field }
}
