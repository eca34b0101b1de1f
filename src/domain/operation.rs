use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Earn,
    Redeem,
    Pay,
    Discount,
    Process,
    Invoice,
}

/// One row of hotel activity.
///
/// Loyalty operations use `member`, payment operations use `booking`; the
/// remaining columns are only read by the operation types that need them.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Operation {
    pub r#type: OperationType,
    pub member: Option<u32>,
    pub booking: Option<u32>,
    pub amount: Option<Decimal>,
    pub points: Option<u64>,
    pub method: Option<String>,
}
