use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::cadence_tier::CadenceTier;
use crate::domain::pet_name::PetName;
use crate::domain::portrait_url::PortraitUrl;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::toy_preference::ToyPreference;

/// One memorial-update subscription, unique per (email, pet name) pair.
///
/// `last_sent_at` is stamped at creation because the welcome email goes out
/// immediately; from then on it only ever moves forward.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Subscription {
    pub id: Uuid,
    pub email: SubscriberEmail,
    pub pet_name: PetName,
    pub cadence: CadenceTier,
    pub portrait_url: PortraitUrl,
    pub toy: ToyPreference,
    pub memory: String,
    pub created_at: DateTime<Utc>,
    pub last_sent_at: DateTime<Utc>,
}
