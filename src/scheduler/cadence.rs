use chrono::{DateTime, Duration, Utc};

use crate::domain::cadence_tier::CadenceTier;

/// Decides whether a subscription is due for its next letter.
///
/// The monthly threshold is a fixed 30-day duration, not a calendar month.
/// That is a deliberate simplification carried over from the product.
#[derive(Debug, Clone, Copy)]
pub struct CadencePolicy {
    daily: Duration,
    weekly: Duration,
    monthly: Duration,
}

impl Default for CadencePolicy {
    fn default() -> CadencePolicy {
        CadencePolicy {
            daily: Duration::days(1),
            weekly: Duration::days(7),
            monthly: Duration::days(30),
        }
    }
}

impl CadencePolicy {
    pub fn new(daily: Duration, weekly: Duration, monthly: Duration) -> CadencePolicy {
        CadencePolicy {
            daily,
            weekly,
            monthly,
        }
    }

    pub fn threshold(&self, tier: CadenceTier) -> Duration {
        match tier {
            CadenceTier::Daily => self.daily,
            CadenceTier::Weekly => self.weekly,
            CadenceTier::Monthly => self.monthly,
        }
    }

    /// A subscription becomes due at the exact threshold instant, not
    /// strictly after it.
    pub fn is_due(
        &self,
        tier: CadenceTier,
        last_sent_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> bool {
        now - last_sent_at >= self.threshold(tier)
    }

    /// Oldest last-sent timestamp that is still *not* due on `tier`, minus
    /// one instant. Candidates are rows with `last_sent_at <= cutoff`.
    pub fn cutoff(&self, tier: CadenceTier, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.threshold(tier)
    }
}
