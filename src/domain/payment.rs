use super::invoice::Invoice;
use super::money::Money;
use crate::error::{HotelError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

/// Opaque reference to the booking a payment settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookingRef(pub u32);

impl fmt::Display for BookingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Cash,
    MobileWallet,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Cash,
        PaymentMethod::MobileWallet,
        PaymentMethod::BankTransfer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::MobileWallet => "Mobile Wallet",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }

    fn accepted() -> String {
        Self::ALL
            .iter()
            .map(|method| method.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s.trim())
            .ok_or_else(|| HotelError::InvalidPaymentMethod {
                given: s.to_string(),
                accepted: Self::accepted(),
            })
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = HotelError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.as_str().to_string()
    }
}

/// Settlement state of a payment.
///
/// The processing timestamp only exists once the payment has succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Successful { at: DateTime<Utc> },
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => f.write_str("Pending"),
            PaymentStatus::Successful { .. } => f.write_str("Successful"),
        }
    }
}

/// A payment recorded against a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    payment_id: String,
    booking: BookingRef,
    amount: Money,
    payment_method: PaymentMethod,
    status: PaymentStatus,
    payment_details: BTreeMap<String, String>,
}

impl Payment {
    /// Creates a pending payment.
    ///
    /// Fails if `payment_method` is not one of [`PaymentMethod::ALL`] or the
    /// amount is negative.
    pub fn new(booking: BookingRef, amount: Decimal, payment_method: &str) -> Result<Self> {
        let payment_method = payment_method.parse::<PaymentMethod>()?;
        let amount = Money::new(amount)?;
        let mut payment_id = Uuid::new_v4().simple().to_string();
        payment_id.truncate(8);

        Ok(Self {
            payment_id,
            booking,
            amount,
            payment_method,
            status: PaymentStatus::Pending,
            payment_details: BTreeMap::new(),
        })
    }

    pub fn with_details(mut self, details: BTreeMap<String, String>) -> Self {
        self.payment_details = details;
        self
    }

    pub fn payment_id(&self) -> &str {
        &self.payment_id
    }

    pub fn booking(&self) -> BookingRef {
        self.booking
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn is_successful(&self) -> bool {
        matches!(self.status, PaymentStatus::Successful { .. })
    }

    pub fn transaction_date(&self) -> Option<DateTime<Utc>> {
        match self.status {
            PaymentStatus::Successful { at } => Some(at),
            PaymentStatus::Pending => None,
        }
    }

    pub fn payment_details(&self) -> &BTreeMap<String, String> {
        &self.payment_details
    }

    /// Marks the payment as settled now.
    ///
    /// Processing never fails. Calling it again re-stamps the transaction date.
    pub fn process_payment(&mut self) -> bool {
        info!(
            payment_id = %self.payment_id,
            amount = %self.amount,
            method = %self.payment_method,
            "processing payment"
        );
        self.status = PaymentStatus::Successful { at: Utc::now() };
        true
    }

    pub fn generate_invoice(&self) -> Result<Invoice> {
        if !self.is_successful() {
            return Err(HotelError::PaymentNotProcessed(self.payment_id.clone()));
        }

        let invoice = Invoice::new(
            &self.payment_id,
            self.booking,
            self.amount,
            self.payment_method,
        );
        info!(payment_id = %self.payment_id, "invoice generated");
        Ok(invoice)
    }

    /// Subtracts `discount_amount` from the amount and returns what is left.
    pub fn apply_discount(&mut self, discount_amount: Decimal) -> Result<Money> {
        if discount_amount < Decimal::ZERO {
            return Err(HotelError::InvalidDiscount(
                "Discount amount cannot be negative".to_string(),
            ));
        }
        let discount = Money::new(discount_amount)?;
        self.amount = self.amount.checked_sub(discount).ok_or_else(|| {
            HotelError::InvalidDiscount("Discount amount cannot exceed payment amount".to_string())
        })?;

        info!(
            payment_id = %self.payment_id,
            %discount,
            amount = %self.amount,
            "discount applied"
        );
        Ok(self.amount)
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .transaction_date()
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "N/A".to_string());
        write!(
            f,
            "Payment ID: {}, Amount: {}, Method: {}, Date: {}, Status: {}",
            self.payment_id, self.amount, self.payment_method, date, self.status
        )
    }
}
