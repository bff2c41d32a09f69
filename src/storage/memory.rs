use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::cadence_tier::CadenceTier;
use crate::domain::new_subscription::NewSubscription;
use crate::domain::subscription::Subscription;
use crate::storage::{StoreError, SubscriptionStore};

/// Filter-the-whole-set implementation of the store contract. Used by the
/// test suite and good enough for local runs without Postgres.
#[derive(Default)]
pub struct InMemorySubscriptionStore {
    subscriptions: Mutex<HashMap<Uuid, Subscription>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> InMemorySubscriptionStore {
        InMemorySubscriptionStore::default()
    }

    /// Seeds a subscription directly, bypassing intake. Test convenience.
    pub fn insert(&self, subscription: Subscription) {
        self.subscriptions
            .lock()
            .unwrap()
            .insert(subscription.id, subscription);
    }

    pub fn get(&self, id: Uuid) -> Option<Subscription> {
        self.subscriptions.lock().unwrap().get(&id).cloned()
    }

    pub fn count(&self) -> usize {
        self.subscriptions.lock().unwrap().len()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn due_candidates(
        &self,
        tier: CadenceTier,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Subscription>, StoreError> {
        let subscriptions = self.subscriptions.lock().unwrap();

        Ok(subscriptions
            .values()
            .filter(|subscription| {
                subscription.cadence == tier && subscription.last_sent_at <= cutoff
            })
            .cloned()
            .collect())
    }

    async fn advance_last_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        let subscription = subscriptions
            .get_mut(&id)
            .ok_or(StoreError::MissingSubscription(id))?;

        // Monotonic, same rule as the Postgres store.
        if sent_at > subscription.last_sent_at {
            subscription.last_sent_at = sent_at;
        }

        Ok(())
    }

    async fn create(
        &self,
        new_subscription: &NewSubscription,
        now: DateTime<Utc>,
    ) -> Result<Subscription, StoreError> {
        let mut subscriptions = self.subscriptions.lock().unwrap();

        let is_duplicate = subscriptions.values().any(|existing| {
            existing.email.as_ref() == new_subscription.email.as_ref()
                && existing.pet_name.as_ref() == new_subscription.pet_name.as_ref()
        });

        if is_duplicate {
            return Err(StoreError::DuplicateSubscription);
        }

        let subscription = Subscription {
            id: Uuid::new_v4(),
            email: new_subscription.email.clone(),
            pet_name: new_subscription.pet_name.clone(),
            cadence: new_subscription.cadence,
            portrait_url: new_subscription.portrait_url.clone(),
            toy: new_subscription.toy,
            memory: new_subscription.memory.clone(),
            created_at: now,
            last_sent_at: now,
        };

        subscriptions.insert(subscription.id, subscription.clone());

        Ok(subscription)
    }
}
