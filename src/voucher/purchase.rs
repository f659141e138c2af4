use crate::error::{Result, UnilinkError};
use crate::voucher::types::PRICE_PER_DAY;
use crate::voucher::validation::{
    normalize_phone, sanitize_input, validate_days, validate_email, validate_phone,
};
use serde::{Deserialize, Serialize};

/// Total price for `days` of access
pub fn total_price(days: u32) -> u32 {
    days.saturating_mul(PRICE_PER_DAY)
}

/// Body of the payment-initiation call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub amount: u32,
    pub days: u32,
    pub device_id: String,
}

/// Builder for PurchaseRequest that validates and sanitizes customer input
#[derive(Clone, Debug)]
pub struct PurchaseRequestBuilder {
    name: String,
    phone: String,
    email: Option<String>,
    days: u32,
}

impl PurchaseRequestBuilder {
    /// Create a new builder with the required customer fields, for one day
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
            days: 1,
        }
    }

    /// Set the number of days
    pub fn days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Set an optional contact email; blank means none
    pub fn email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.email = if email.trim().is_empty() {
            None
        } else {
            Some(email)
        };
        self
    }

    /// Check the customer input without building anything
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.phone.trim().is_empty() {
            return Err(UnilinkError::invalid_purchase(
                "Please fill in your name and phone number",
            ));
        }

        validate_days(self.days)?;

        if let Some(email) = &self.email {
            validate_email(email)?;
        }

        validate_phone(&self.phone)
    }

    /// Validate the input and attach the device identifier
    pub fn build(self, device_id: impl Into<String>) -> Result<PurchaseRequest> {
        self.validate()?;

        Ok(PurchaseRequest {
            name: sanitize_input(&self.name),
            email: self.email.as_deref().map(sanitize_input),
            phone: normalize_phone(&self.phone),
            amount: total_price(self.days),
            days: self.days,
            device_id: device_id.into(),
        })
    }
}
