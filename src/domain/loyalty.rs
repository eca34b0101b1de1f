use super::money::Money;
use crate::error::{HotelError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Monetary value of a single loyalty point.
pub const POINT_VALUE: Decimal = dec!(0.10);

/// Opaque reference to the guest owning a loyalty membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuestRef(pub u32);

/// Membership tier, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// All tiers, highest first.
    pub const DESCENDING: [Tier; 4] = [Tier::Platinum, Tier::Gold, Tier::Silver, Tier::Bronze];

    /// Minimum balance required to hold this tier.
    pub fn threshold(self) -> u64 {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => 500,
            Tier::Gold => 2_000,
            Tier::Platinum => 10_000,
        }
    }

    /// Highest tier whose threshold does not exceed `points`.
    pub fn for_points(points: u64) -> Self {
        Self::DESCENDING
            .into_iter()
            .find(|tier| points >= tier.threshold())
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::DESCENDING
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| HotelError::InvalidOperation(format!("unknown tier '{s}'")))
    }
}

/// Loyalty membership of a single guest.
///
/// Points accrue at one per currency unit spent and are redeemed at
/// [`POINT_VALUE`] each. The tier always reflects the current balance, so a
/// deserialized membership has its tier recomputed from its points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MemberRecord")]
pub struct LoyaltyProgram {
    member_id: u32,
    points: u64,
    tier: Tier,
    guest: GuestRef,
}

#[derive(Deserialize)]
struct MemberRecord {
    member_id: u32,
    points: u64,
    guest: GuestRef,
}

impl From<MemberRecord> for LoyaltyProgram {
    fn from(record: MemberRecord) -> Self {
        Self {
            member_id: record.member_id,
            points: record.points,
            tier: Tier::for_points(record.points),
            guest: record.guest,
        }
    }
}

impl LoyaltyProgram {
    pub fn new(member_id: u32, guest: GuestRef) -> Self {
        Self {
            member_id,
            points: 0,
            tier: Tier::Bronze,
            guest,
        }
    }

    pub fn member_id(&self) -> u32 {
        self.member_id
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn guest(&self) -> GuestRef {
        self.guest
    }

    /// Earns one point per whole currency unit of `stay_value`.
    ///
    /// Fractional points are truncated. Negative stay values, and stays that
    /// would overflow the balance, are rejected and leave it untouched.
    pub fn earn_points(&mut self, stay_value: Decimal) -> Result<u64> {
        if stay_value < Decimal::ZERO {
            return Err(HotelError::InvalidStayValue(stay_value));
        }
        let earned = stay_value.trunc().to_u64().ok_or_else(|| {
            HotelError::InvalidOperation(format!("stay value out of range: {stay_value}"))
        })?;

        self.points = self.points.checked_add(earned).ok_or_else(|| {
            HotelError::InvalidOperation(format!(
                "earning {earned} points overflows balance {}",
                self.points
            ))
        })?;
        self.update_tier();

        info!(
            member_id = self.member_id,
            earned,
            balance = self.points,
            "points earned"
        );
        Ok(earned)
    }

    /// Redeems `points_to_redeem` points and returns their monetary value.
    pub fn redeem_points(&mut self, points_to_redeem: u64) -> Result<Money> {
        if points_to_redeem > self.points {
            return Err(HotelError::InsufficientPoints {
                requested: points_to_redeem,
                available: self.points,
            });
        }

        let value = Money::new(Decimal::from(points_to_redeem) * POINT_VALUE)?;
        self.points -= points_to_redeem;
        self.update_tier();

        info!(
            member_id = self.member_id,
            redeemed = points_to_redeem,
            %value,
            balance = self.points,
            "points redeemed"
        );
        Ok(value)
    }

    pub fn check_balance(&self) -> u64 {
        debug!(
            member_id = self.member_id,
            balance = self.points,
            tier = %self.tier,
            "balance checked"
        );
        self.points
    }

    fn update_tier(&mut self) {
        let tier = Tier::for_points(self.points);
        if tier != self.tier {
            self.tier = tier;
            info!(member_id = self.member_id, %tier, "tier changed");
        }
    }
}

impl fmt::Display for LoyaltyProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loyalty Program - Member ID: {}, Points: {}, Tier: {}",
            self.member_id, self.points, self.tier
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> LoyaltyProgram {
        LoyaltyProgram::new(1, GuestRef(42))
    }

    #[test]
    fn test_new_member_starts_at_bronze() {
        let program = member();
        assert_eq!(program.points(), 0);
        assert_eq!(program.tier(), Tier::Bronze);
        assert_eq!(program.guest(), GuestRef(42));
    }

    #[test]
    fn test_earn_points_truncates_fraction() {
        let mut program = member();
        assert_eq!(program.earn_points(dec!(199.99)).unwrap(), 199);
        assert_eq!(program.points(), 199);
        assert_eq!(program.earn_points(dec!(0.5)).unwrap(), 0);
        assert_eq!(program.check_balance(), 199);
    }

    #[test]
    fn test_earn_points_rejects_negative_stay() {
        let mut program = member();
        program.earn_points(dec!(100)).unwrap();

        let result = program.earn_points(dec!(-50));
        assert!(matches!(result, Err(HotelError::InvalidStayValue(_))));
        assert_eq!(program.points(), 100);
    }

    #[test]
    fn test_earn_points_rejects_balance_overflow() {
        let mut program = member();
        program.earn_points(Decimal::from(u64::MAX)).unwrap();
        assert_eq!(program.tier(), Tier::Platinum);

        let result = program.earn_points(dec!(5));
        assert!(matches!(result, Err(HotelError::InvalidOperation(_))));
        assert_eq!(program.points(), u64::MAX);
    }

    #[test]
    fn test_earn_points_rejects_out_of_range_stay() {
        let mut program = member();
        program.earn_points(dec!(10)).unwrap();

        let result = program.earn_points(Decimal::MAX);
        assert!(matches!(result, Err(HotelError::InvalidOperation(_))));
        assert_eq!(program.points(), 10);
    }

    #[test]
    fn test_deserialize_recomputes_tier() {
        let json = r#"{"member_id":1,"points":0,"tier":"Platinum","guest":1}"#;
        let program: LoyaltyProgram = serde_json::from_str(json).unwrap();
        assert_eq!(program.tier(), Tier::Bronze);

        let json = r#"{"member_id":2,"points":2500,"guest":7}"#;
        let program: LoyaltyProgram = serde_json::from_str(json).unwrap();
        assert_eq!(program.tier(), Tier::Gold);
        assert_eq!(program.guest(), GuestRef(7));
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Tier::for_points(0), Tier::Bronze);
        assert_eq!(Tier::for_points(499), Tier::Bronze);
        assert_eq!(Tier::for_points(500), Tier::Silver);
        assert_eq!(Tier::for_points(1_999), Tier::Silver);
        assert_eq!(Tier::for_points(2_000), Tier::Gold);
        assert_eq!(Tier::for_points(9_999), Tier::Gold);
        assert_eq!(Tier::for_points(10_000), Tier::Platinum);
    }

    #[test]
    fn test_earning_promotes_tier() {
        let mut program = member();
        program.earn_points(dec!(500)).unwrap();
        assert_eq!(program.tier(), Tier::Silver);
        program.earn_points(dec!(1499)).unwrap();
        assert_eq!(program.tier(), Tier::Silver);
        program.earn_points(dec!(1)).unwrap();
        assert_eq!(program.tier(), Tier::Gold);
        program.earn_points(dec!(8000)).unwrap();
        assert_eq!(program.tier(), Tier::Platinum);
    }

    #[test]
    fn test_redeem_points_value() {
        let mut program = member();
        program.earn_points(dec!(750)).unwrap();

        let value = program.redeem_points(250).unwrap();
        assert_eq!(value, Money::new(dec!(25.0)).unwrap());
        assert_eq!(program.points(), 500);
    }

    #[test]
    fn test_redeem_insufficient_points() {
        let mut program = member();
        program.earn_points(dec!(100)).unwrap();

        let result = program.redeem_points(101);
        assert!(matches!(
            result,
            Err(HotelError::InsufficientPoints {
                requested: 101,
                available: 100
            })
        ));
        assert_eq!(program.points(), 100);
    }

    #[test]
    fn test_tier_follows_balance_after_redemption() {
        let mut program = member();
        program.earn_points(dec!(2000)).unwrap();
        assert_eq!(program.tier(), Tier::Gold);

        program.redeem_points(1).unwrap();
        assert_eq!(program.tier(), Tier::Silver);
    }

    #[test]
    fn test_tier_parse_and_display() {
        assert_eq!("gold".parse::<Tier>().unwrap(), Tier::Gold);
        assert_eq!(Tier::Platinum.to_string(), "Platinum");
        assert!("Diamond".parse::<Tier>().is_err());
    }

    #[test]
    fn test_display() {
        let mut program = member();
        program.earn_points(dec!(600)).unwrap();
        assert_eq!(
            program.to_string(),
            "Loyalty Program - Member ID: 1, Points: 600, Tier: Silver"
        );
    }
}
