use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::cadence_tier::CadenceTier;
use crate::domain::new_subscription::NewSubscription;
use crate::domain::pet_name::PetName;
use crate::domain::portrait_url::PortraitUrl;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscription::Subscription;
use crate::domain::toy_preference::ToyPreference;
use crate::storage::{StoreError, SubscriptionStore};

const UNIQUE_VIOLATION_CODE: &str = "23505";

pub struct PgSubscriptionStore {
    db_pool: PgPool,
}

impl PgSubscriptionStore {
    pub fn new(db_pool: PgPool) -> PgSubscriptionStore {
        PgSubscriptionStore { db_pool }
    }
}

/// Rehydrates one row into the domain type. A row that no longer satisfies
/// the domain invariants (say, an unknown cadence tier written by hand) is a
/// data-integrity defect and surfaces as an error here.
fn subscription_from_row(row: &PgRow) -> Result<Subscription, String> {
    Ok(Subscription {
        id: row.get("id"),
        email: SubscriberEmail::parse(row.get("email"))?,
        pet_name: PetName::parse(row.get("pet_name"))?,
        cadence: CadenceTier::parse(row.get("cadence"))?,
        portrait_url: PortraitUrl::parse(row.get("portrait_url"))?,
        toy: ToyPreference::parse(row.get("toy"))?,
        memory: row.get("memory"),
        created_at: row.get("created_at"),
        last_sent_at: row.get("last_sent_at"),
    })
}

#[async_trait]
impl SubscriptionStore for PgSubscriptionStore {
    #[tracing::instrument(
        name = "Query due candidates from Postgres",
        skip(self),
        fields(cadence = %tier.as_ref(), cutoff = %cutoff)
    )]
    async fn due_candidates(
        &self,
        tier: CadenceTier,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Subscription>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, pet_name, cadence, portrait_url, toy, memory, created_at, last_sent_at
            FROM subscriptions
            WHERE cadence = $1 AND last_sent_at <= $2
            "#,
        )
        .bind(tier.as_ref())
        .bind(cutoff)
        .fetch_all(&self.db_pool)
        .await?;

        // Malformed rows are logged and skipped for this run rather than
        // poisoning the whole batch.
        let subscriptions = rows
            .iter()
            .filter_map(|row| match subscription_from_row(row) {
                Ok(subscription) => Some(subscription),
                Err(err) => {
                    tracing::error!("Skipping subscription row that failed validation: {}", err);
                    None
                }
            })
            .collect();

        Ok(subscriptions)
    }

    #[tracing::instrument(name = "Advance last-sent timestamp in Postgres", skip(self))]
    async fn advance_last_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> Result<(), StoreError> {
        // GREATEST keeps the timestamp monotonic no matter what we are handed.
        let result = sqlx::query(
            r#"
            UPDATE subscriptions
            SET last_sent_at = GREATEST(last_sent_at, $2)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(sent_at)
        .execute(&self.db_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::MissingSubscription(id));
        }

        Ok(())
    }

    #[tracing::instrument(
        name = "Insert a new subscription into Postgres",
        skip(self, new_subscription),
        fields(
            subscriber_email = %new_subscription.email.as_ref(),
            pet_name = %new_subscription.pet_name.as_ref()
        )
    )]
    async fn create(
        &self,
        new_subscription: &NewSubscription,
        now: DateTime<Utc>,
    ) -> Result<Subscription, StoreError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO subscriptions (id, email, pet_name, cadence, portrait_url, toy, memory, created_at, last_sent_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            "#,
        )
        .bind(id)
        .bind(new_subscription.email.as_ref())
        .bind(new_subscription.pet_name.as_ref())
        .bind(new_subscription.cadence.as_ref())
        .bind(new_subscription.portrait_url.as_ref())
        .bind(new_subscription.toy.as_ref())
        .bind(new_subscription.memory.as_str())
        .bind(now)
        .execute(&self.db_pool)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(db_err) = &err {
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION_CODE) {
                    return StoreError::DuplicateSubscription;
                }
            }

            tracing::error!("Failed to execute query: {:?}", err);
            StoreError::Database(err)
        })?;

        Ok(Subscription {
            id,
            email: new_subscription.email.clone(),
            pet_name: new_subscription.pet_name.clone(),
            cadence: new_subscription.cadence,
            portrait_url: new_subscription.portrait_url.clone(),
            toy: new_subscription.toy,
            memory: new_subscription.memory.clone(),
            created_at: now,
            last_sent_at: now,
        })
    }
}
