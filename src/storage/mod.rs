pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::cadence_tier::CadenceTier;
use crate::domain::new_subscription::NewSubscription;
use crate::domain::subscription::Subscription;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("A subscription for this email and pet name already exists.")]
    DuplicateSubscription,
    #[error("No subscription with id {0} exists.")]
    MissingSubscription(Uuid),
    #[error("Failed to talk to the subscription store.")]
    Database(#[from] sqlx::Error),
}

/// Contract the scheduler expects from whatever holds the subscriptions.
///
/// `PgSubscriptionStore` is the production implementation;
/// `InMemorySubscriptionStore` backs the tests and satisfies the same
/// contract by filtering the whole set.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Subscriptions on `tier` whose last send is at or before `cutoff`.
    /// The cadence tier is read fresh on every call, never cached, so an
    /// admin-side tier change takes effect on the very next pass.
    async fn due_candidates(
        &self,
        tier: CadenceTier,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Subscription>, StoreError>;

    /// Moves the last-sent timestamp forward. Never moves it backwards, even
    /// if `sent_at` is older than the stored value.
    async fn advance_last_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Persists a new subscription with `last_sent_at` stamped to `now`
    /// (the welcome email goes out at creation time). Rejects a duplicate
    /// (email, pet name) pair.
    async fn create(
        &self,
        new_subscription: &NewSubscription,
        now: DateTime<Utc>,
    ) -> Result<Subscription, StoreError>;
}
