use super::invoice::Invoice;
use super::loyalty::LoyaltyProgram;
use super::payment::{BookingRef, Payment};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn store(&self, member: LoyaltyProgram) -> Result<()>;
    async fn get(&self, member_id: u32) -> Result<Option<LoyaltyProgram>>;
    async fn get_all(&self) -> Result<Vec<LoyaltyProgram>>;
}

/// Payments are keyed by booking: a booking is settled by a single payment.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn store(&self, payment: Payment) -> Result<()>;
    async fn get(&self, booking: BookingRef) -> Result<Option<Payment>>;
    async fn exists(&self, booking: BookingRef) -> Result<bool>;
    async fn get_all(&self) -> Result<Vec<Payment>>;
    async fn store_invoice(&self, invoice: Invoice) -> Result<()>;
    async fn invoices(&self) -> Result<Vec<Invoice>>;
}

pub type MemberStoreBox = Box<dyn MemberStore>;
pub type PaymentStoreBox = Box<dyn PaymentStore>;
