use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;

use crate::content::composer::compose;
use crate::content::selector::ContentSelector;
use crate::domain::new_subscription::{NewSubscription, NewSubscriptionBody};
use crate::domain::subscription::Subscription;
use crate::email_client::{SendUpdateRequest, UpdateSender};
use crate::storage::{StoreError, SubscriptionStore};

#[tracing::instrument(
    name = "Creating a new subscription handler",
    skip(body, store, sender, selector),
    fields(
        subscriber_email = %body.email,
        pet_name = %body.pet_name
    )
)]
pub async fn handle_create_subscription(
    body: web::Json<NewSubscriptionBody>,
    store: web::Data<dyn SubscriptionStore>,
    sender: web::Data<dyn UpdateSender>,
    selector: web::Data<ContentSelector>,
) -> impl Responder {
    let new_subscription: NewSubscription = match body.try_into() {
        Ok(subscription) => subscription,
        Err(err) => {
            tracing::error!("Validation error: {:?}", err);
            return HttpResponse::BadRequest().finish();
        }
    };

    let subscription = match store.create(&new_subscription, Utc::now()).await {
        Ok(subscription) => subscription,
        Err(StoreError::DuplicateSubscription) => {
            tracing::warn!("Subscription already exists for this email and pet name");
            return HttpResponse::Conflict().finish();
        }
        Err(err) => {
            tracing::error!("Failed to insert new subscription: {:?}", err);
            return HttpResponse::InternalServerError().finish();
        }
    };

    // The welcome letter goes out right away; a send failure is the
    // sender's problem to retry, the subscription itself is already saved.
    if let Err(err) = send_welcome_letter(sender.get_ref(), selector.get_ref(), &subscription).await
    {
        tracing::error!(
            "Failed to send the welcome letter to {}: {:?}",
            subscription.email.as_ref(),
            err
        );
    }

    HttpResponse::Created().finish()
}

#[tracing::instrument(
    name = "Send the welcome letter to a new subscription",
    skip(sender, selector, subscription)
)]
async fn send_welcome_letter(
    sender: &dyn UpdateSender,
    selector: &ContentSelector,
    subscription: &Subscription,
) -> Result<(), crate::email_client::SendUpdateError> {
    let variant = selector.select(
        subscription.toy,
        Utc::now().date_naive(),
        true,
        subscription.pet_name.as_ref(),
    );
    let message = compose(subscription, &variant);
    let request = SendUpdateRequest::for_subscription(subscription, message);

    sender.send_update(&request).await
}
