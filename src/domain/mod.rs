//! Hotel domain model: loyalty memberships, payments and the invoices they
//! produce, plus the storage ports the application layer depends on.

pub mod invoice;
pub mod loyalty;
pub mod money;
pub mod operation;
pub mod payment;
pub mod ports;
