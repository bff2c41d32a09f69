/// How often a subscriber wants to hear from their pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum CadenceTier {
    Daily,
    Weekly,
    Monthly,
}

/// Every tier the scheduler has to consider, in no meaningful order.
pub const ALL_TIERS: [CadenceTier; 3] =
    [CadenceTier::Daily, CadenceTier::Weekly, CadenceTier::Monthly];

impl CadenceTier {
    pub fn parse(tier: String) -> Result<CadenceTier, String> {
        match tier.as_str() {
            "daily" => Ok(CadenceTier::Daily),
            "weekly" => Ok(CadenceTier::Weekly),
            "monthly" => Ok(CadenceTier::Monthly),
            _ => Err(format!("{} is not a valid cadence tier", tier)),
        }
    }
}

impl AsRef<str> for CadenceTier {
    fn as_ref(&self) -> &str {
        match self {
            CadenceTier::Daily => "daily",
            CadenceTier::Weekly => "weekly",
            CadenceTier::Monthly => "monthly",
        }
    }
}
