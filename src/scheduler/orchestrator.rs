use std::sync::Arc;
use std::time;

use chrono::{DateTime, Utc};
use futures::{stream, StreamExt};

use crate::content::composer::compose;
use crate::content::selector::ContentSelector;
use crate::domain::subscription::Subscription;
use crate::email_client::{SendUpdateRequest, UpdateSender};
use crate::scheduler::cadence::CadencePolicy;
use crate::scheduler::resolver::resolve_due;
use crate::storage::{StoreError, SubscriptionStore};

/// What one scheduler pass did, counted by outcome class. Failures never
/// escape the per-subscription boundary; this summary is the only thing a
/// pass reports.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RunSummary {
    pub selected: usize,
    pub sent: usize,
    pub recorded: usize,
    pub transient_send_failures: usize,
    pub inconsistent_state_failures: usize,
}

enum DeliveryOutcome {
    Recorded,
    SendFailed,
    /// The send went out but the timestamp advance failed. The subscriber
    /// may get a duplicate letter on the next pass.
    RecordFailed,
}

/// Runs one batch pass over the due set: compose, send, record, one
/// subscription at a time, fanned out up to `concurrency_limit` at once.
pub struct DeliveryOrchestrator {
    store: Arc<dyn SubscriptionStore>,
    sender: Arc<dyn UpdateSender>,
    selector: ContentSelector,
    policy: CadencePolicy,
    concurrency_limit: usize,
    send_timeout: time::Duration,
}

impl DeliveryOrchestrator {
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        sender: Arc<dyn UpdateSender>,
        selector: ContentSelector,
        policy: CadencePolicy,
        concurrency_limit: usize,
        send_timeout: time::Duration,
    ) -> DeliveryOrchestrator {
        DeliveryOrchestrator {
            store,
            sender,
            selector,
            policy,
            // A limit of zero would stall the whole pass.
            concurrency_limit: concurrency_limit.max(1),
            send_timeout,
        }
    }

    #[tracing::instrument(name = "Run a scheduler pass", skip(self))]
    pub async fn run_pass(&self, now: DateTime<Utc>) -> Result<RunSummary, StoreError> {
        let due = resolve_due(self.store.as_ref(), &self.policy, now).await?;

        let mut summary = RunSummary {
            selected: due.len(),
            ..RunSummary::default()
        };

        let outcomes: Vec<DeliveryOutcome> = stream::iter(due)
            .map(|subscription| self.deliver(subscription, now))
            .buffer_unordered(self.concurrency_limit)
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                DeliveryOutcome::Recorded => {
                    summary.sent += 1;
                    summary.recorded += 1;
                }
                DeliveryOutcome::SendFailed => summary.transient_send_failures += 1,
                DeliveryOutcome::RecordFailed => {
                    summary.sent += 1;
                    summary.inconsistent_state_failures += 1;
                }
            }
        }

        tracing::info!(
            "Pass finished: {} selected, {} sent, {} recorded, {} transient failures, {} inconsistent",
            summary.selected,
            summary.sent,
            summary.recorded,
            summary.transient_send_failures,
            summary.inconsistent_state_failures
        );

        Ok(summary)
    }

    async fn deliver(&self, subscription: Subscription, now: DateTime<Utc>) -> DeliveryOutcome {
        let variant = self.selector.select(
            subscription.toy,
            now.date_naive(),
            false,
            subscription.pet_name.as_ref(),
        );
        let message = compose(&subscription, &variant);
        let request = SendUpdateRequest::for_subscription(&subscription, message);

        let send_result =
            tokio::time::timeout(self.send_timeout, self.sender.send_update(&request)).await;

        match send_result {
            Err(_) => {
                tracing::warn!(
                    "Send to {} timed out after {:?}; subscription stays due",
                    subscription.email.as_ref(),
                    self.send_timeout
                );
                DeliveryOutcome::SendFailed
            }
            Ok(Err(err)) => {
                tracing::warn!(
                    "Send to {} failed: {:?}; subscription stays due",
                    subscription.email.as_ref(),
                    err
                );
                DeliveryOutcome::SendFailed
            }
            Ok(Ok(())) => match self.store.advance_last_sent(subscription.id, now).await {
                Ok(()) => DeliveryOutcome::Recorded,
                Err(err) => {
                    // The one at-least-once risk: the letter went out but the
                    // store did not record it. Elevated severity, own class.
                    tracing::error!(
                        "Sent to {} but failed to advance last-sent timestamp: {:?}",
                        subscription.email.as_ref(),
                        err
                    );
                    DeliveryOutcome::RecordFailed
                }
            },
        }
    }
}
