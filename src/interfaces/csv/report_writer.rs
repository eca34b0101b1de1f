use crate::application::engine::EngineResults;
use crate::domain::loyalty::{LoyaltyProgram, Tier};
use crate::domain::payment::{Payment, PaymentMethod};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct MemberRow {
    member: u32,
    points: u64,
    tier: Tier,
}

impl From<&LoyaltyProgram> for MemberRow {
    fn from(member: &LoyaltyProgram) -> Self {
        Self {
            member: member.member_id(),
            points: member.points(),
            tier: member.tier(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PaymentRow<'a> {
    payment: &'a str,
    booking: u32,
    amount: Decimal,
    method: PaymentMethod,
    status: String,
}

impl<'a> From<&'a Payment> for PaymentRow<'a> {
    fn from(payment: &'a Payment) -> Self {
        Self {
            payment: payment.payment_id(),
            booking: payment.booking().0,
            amount: payment.amount().rounded(),
            method: payment.payment_method(),
            status: payment.status().to_string(),
        }
    }
}

/// Writes the final engine state to a CSV sink.
///
/// Members are written first under a `member,points,tier` header, followed by
/// payments under `payment,booking,amount,method,status`.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_results(&mut self, results: &EngineResults) -> Result<()> {
        self.writer.write_record(["member", "points", "tier"])?;
        for member in &results.members {
            self.writer.serialize(MemberRow::from(member))?;
        }

        self.writer
            .write_record(["payment", "booking", "amount", "method", "status"])?;
        for payment in &results.payments {
            self.writer.serialize(PaymentRow::from(payment))?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    members: Vec<MemberRow>,
    payments: Vec<PaymentRow<'a>>,
    invoices: Vec<&'a str>,
}

/// Writes the final engine state as a single JSON document.
pub fn write_json<W: Write>(sink: W, results: &EngineResults) -> Result<()> {
    let report = JsonReport {
        members: results.members.iter().map(MemberRow::from).collect(),
        payments: results.payments.iter().map(PaymentRow::from).collect(),
        invoices: results
            .invoices
            .iter()
            .map(|invoice| invoice.invoice_id())
            .collect(),
    };
    serde_json::to_writer_pretty(sink, &report)?;
    Ok(())
}
