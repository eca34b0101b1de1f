use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotelError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Insufficient points for redemption: requested {requested}, available {available}")]
    InsufficientPoints { requested: u64, available: u64 },
    #[error("Stay value cannot be negative: {0}")]
    InvalidStayValue(Decimal),
    #[error("Invalid payment method '{given}'. Choose from: {accepted}")]
    InvalidPaymentMethod { given: String, accepted: String },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),
    #[error("Cannot generate invoice for unsuccessful payment {0}")]
    PaymentNotProcessed(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, HotelError>;
