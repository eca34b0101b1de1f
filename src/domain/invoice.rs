use super::money::Money;
use super::payment::{BookingRef, PaymentMethod};
use crate::error::{HotelError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub description: String,
    pub amount: Money,
}

/// Invoice issued for a successfully processed payment.
///
/// Hotel payments are settled immediately, so the due date equals the issue
/// date. The running total always equals the sum of the line items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    invoice_id: String,
    payment_id: String,
    booking: BookingRef,
    amount: Money,
    payment_method: PaymentMethod,
    issue_date: DateTime<Utc>,
    due_date: DateTime<Utc>,
    items: Vec<LineItem>,
    total: Money,
}

impl Invoice {
    pub fn new(
        payment_id: &str,
        booking: BookingRef,
        amount: Money,
        payment_method: PaymentMethod,
    ) -> Self {
        let issue_date = Utc::now();
        Self {
            invoice_id: payment_id.to_string(),
            payment_id: payment_id.to_string(),
            booking,
            amount,
            payment_method,
            issue_date,
            due_date: issue_date,
            items: vec![LineItem {
                description: format!("Booking {booking} ({payment_method})"),
                amount,
            }],
            total: amount,
        }
    }

    pub fn invoice_id(&self) -> &str {
        &self.invoice_id
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

    pub fn issue_date(&self) -> DateTime<Utc> {
        self.issue_date
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Appends a line item, rejecting it if the total would overflow.
    pub fn add_item(&mut self, description: impl Into<String>, amount: Money) -> Result<()> {
        let description = description.into();
        self.total = self.total.checked_add(amount).ok_or_else(|| {
            HotelError::InvalidAmount(format!("invoice total overflows adding '{description}'"))
        })?;
        info!(invoice_id = %self.invoice_id, %description, %amount, "invoice item added");
        self.items.push(LineItem {
            description,
            amount,
        });
        Ok(())
    }

    pub fn calculate_total(&self) -> Money {
        self.total
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Invoice ID: {}", self.invoice_id)?;
        writeln!(f, "Issue Date: {}", self.issue_date.format("%Y-%m-%d"))?;
        writeln!(f, "Booking ID: {}", self.booking)?;
        writeln!(f, "Payment ID: {}", self.payment_id)?;
        writeln!(f)?;
        writeln!(f, "Items:")?;
        for item in &self.items {
            writeln!(f, "- {}: {}", item.description, item.amount)?;
        }
        writeln!(f)?;
        write!(f, "Total Amount: {}", self.calculate_total())
    }
}
