use crate::domain::invoice::Invoice;
use crate::domain::loyalty::LoyaltyProgram;
use crate::domain::payment::{BookingRef, Payment};
use crate::domain::ports::{MemberStore, PaymentStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for loyalty members.
///
/// Uses `Arc<RwLock<HashMap<u32, LoyaltyProgram>>>` to allow shared concurrent access.
#[derive(Default, Clone)]
pub struct InMemoryMemberStore {
    members: Arc<RwLock<HashMap<u32, LoyaltyProgram>>>,
}

impl InMemoryMemberStore {
    /// Creates a new, empty in-memory member store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn store(&self, member: LoyaltyProgram) -> Result<()> {
        let mut members = self.members.write().await;
        members.insert(member.member_id(), member);
        Ok(())
    }

    async fn get(&self, member_id: u32) -> Result<Option<LoyaltyProgram>> {
        let members = self.members.read().await;
        Ok(members.get(&member_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<LoyaltyProgram>> {
        let members = self.members.read().await;
        let mut all: Vec<_> = members.values().cloned().collect();
        all.sort_by_key(LoyaltyProgram::member_id);
        Ok(all)
    }
}

/// A thread-safe in-memory store for payments and issued invoices.
///
/// Payments are indexed by booking; invoices are kept in issue order.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<BookingRef, Payment>>>,
    invoices: Arc<RwLock<Vec<Invoice>>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn store(&self, payment: Payment) -> Result<()> {
        let mut payments = self.payments.write().await;
        payments.insert(payment.booking(), payment);
        Ok(())
    }

    async fn get(&self, booking: BookingRef) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.get(&booking).cloned())
    }

    async fn exists(&self, booking: BookingRef) -> Result<bool> {
        let payments = self.payments.read().await;
        Ok(payments.contains_key(&booking))
    }

    async fn get_all(&self) -> Result<Vec<Payment>> {
        let payments = self.payments.read().await;
        let mut all: Vec<_> = payments.values().cloned().collect();
        all.sort_by_key(Payment::booking);
        Ok(all)
    }

    async fn store_invoice(&self, invoice: Invoice) -> Result<()> {
        self.invoices.write().await.push(invoice);
        Ok(())
    }

    async fn invoices(&self) -> Result<Vec<Invoice>> {
        Ok(self.invoices.read().await.clone())
    }
}
