use chrono::{DateTime, Utc};

use crate::domain::cadence_tier::ALL_TIERS;
use crate::domain::subscription::Subscription;
use crate::scheduler::cadence::CadencePolicy;
use crate::storage::{StoreError, SubscriptionStore};

/// Collects every subscription that is due at `now`, batched per cadence
/// tier so a queryable store only loads plausible candidates. The final
/// word on due-ness stays with the cadence policy, whatever the store
/// returned. Order of the result carries no meaning.
#[tracing::instrument(name = "Resolve the due set", skip(store, policy))]
pub async fn resolve_due(
    store: &dyn SubscriptionStore,
    policy: &CadencePolicy,
    now: DateTime<Utc>,
) -> Result<Vec<Subscription>, StoreError> {
    let mut due = Vec::new();

    for tier in ALL_TIERS {
        let candidates = store.due_candidates(tier, policy.cutoff(tier, now)).await?;

        due.extend(
            candidates
                .into_iter()
                .filter(|subscription| {
                    policy.is_due(subscription.cadence, subscription.last_sent_at, now)
                }),
        );
    }

    tracing::info!("{} subscriptions due", due.len());

    Ok(due)
}
