use crate::domain::invoice::Invoice;
use crate::domain::loyalty::{GuestRef, LoyaltyProgram};
use crate::domain::operation::{Operation, OperationType};
use crate::domain::payment::{BookingRef, Payment};
use crate::domain::ports::{MemberStoreBox, PaymentStoreBox};
use crate::error::{HotelError, Result};
use rust_decimal::Decimal;
use tracing::debug;

/// Final state collected from a [`HotelEngine`].
#[derive(Debug, Default)]
pub struct EngineResults {
    pub members: Vec<LoyaltyProgram>,
    pub payments: Vec<Payment>,
    pub invoices: Vec<Invoice>,
}

/// Applies hotel operations to loyalty memberships and booking payments.
///
/// Each operation loads the affected record, mutates it through the domain
/// type and writes it back before the next operation is accepted.
pub struct HotelEngine {
    member_store: MemberStoreBox,
    payment_store: PaymentStoreBox,
}

impl HotelEngine {
    /// Creates a new `HotelEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `member_store` - The store for loyalty memberships.
    /// * `payment_store` - The store for booking payments and invoices.
    pub fn new(member_store: MemberStoreBox, payment_store: PaymentStoreBox) -> Self {
        Self {
            member_store,
            payment_store,
        }
    }

    /// Applies a single operation.
    ///
    /// Domain failures (insufficient points, invalid discount, ...) are
    /// returned and leave the stored record unchanged.
    pub async fn process_operation(&self, op: Operation) -> Result<()> {
        match op.r#type {
            OperationType::Earn => {
                let member_id = required(op.member, "earn", "member")?;
                let stay_value = required(op.amount, "earn", "amount")?;
                let mut member = self
                    .member_store
                    .get(member_id)
                    .await?
                    .unwrap_or_else(|| LoyaltyProgram::new(member_id, GuestRef(member_id)));
                member.earn_points(stay_value)?;
                self.member_store.store(member).await?;
            }
            OperationType::Redeem => {
                let member_id = required(op.member, "redeem", "member")?;
                let points = required(op.points, "redeem", "points")?;
                let mut member = self
                    .member_store
                    .get(member_id)
                    .await?
                    .ok_or_else(|| HotelError::NotFound(format!("member {member_id}")))?;
                member.redeem_points(points)?;
                self.member_store.store(member).await?;
            }
            OperationType::Pay => {
                let booking = BookingRef(required(op.booking, "pay", "booking")?);
                let amount = required(op.amount, "pay", "amount")?;
                let method = required(op.method, "pay", "method")?;
                // A booking is settled once; later payments for it are ignored
                if self.payment_store.exists(booking).await? {
                    debug!(%booking, "payment already recorded for booking");
                    return Ok(());
                }
                let payment = Payment::new(booking, amount, &method)?;
                self.payment_store.store(payment).await?;
            }
            OperationType::Discount => {
                let mut payment = self.payment_for(op.booking, "discount").await?;
                let discount: Decimal = required(op.amount, "discount", "amount")?;
                payment.apply_discount(discount)?;
                self.payment_store.store(payment).await?;
            }
            OperationType::Process => {
                let mut payment = self.payment_for(op.booking, "process").await?;
                payment.process_payment();
                self.payment_store.store(payment).await?;
            }
            OperationType::Invoice => {
                let payment = self.payment_for(op.booking, "invoice").await?;
                let invoice = payment.generate_invoice()?;
                self.payment_store.store_invoice(invoice).await?;
            }
        }

        Ok(())
    }

    async fn payment_for(&self, booking: Option<u32>, op: &str) -> Result<Payment> {
        let booking = BookingRef(required(booking, op, "booking")?);
        self.payment_store
            .get(booking)
            .await?
            .ok_or_else(|| HotelError::NotFound(format!("payment for booking {booking}")))
    }

    /// Consumes the engine and returns the final state of all records.
    pub async fn into_results(self) -> Result<EngineResults> {
        Ok(EngineResults {
            members: self.member_store.get_all().await?,
            payments: self.payment_store.get_all().await?,
            invoices: self.payment_store.invoices().await?,
        })
    }
}

fn required<T>(value: Option<T>, op: &str, field: &str) -> Result<T> {
    value.ok_or_else(|| HotelError::InvalidOperation(format!("{op} requires {field}")))
}
