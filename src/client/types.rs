use serde::{Deserialize, Serialize};

/// Envelope returned by the serverless functions
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct FunctionResponse<T> {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct CheckoutData {
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ChargeData {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub tx_ref: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct VerifyPaymentRequest<'a> {
    pub transaction_id: &'a str,
}

/// Checkout page the customer must visit to pay
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaymentLink {
    pub link: String,
}

/// Outcome of a payment verification
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentVerification {
    pub transaction_id: String,
    pub verified: bool,
    pub amount: Option<f64>,
    pub tx_ref: Option<String>,
    pub message: Option<String>,
}
