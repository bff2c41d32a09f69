use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::message::Message;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscription::Subscription;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);
const RECIPIENT_DISPLAY_NAME: &str = "Friend";

/// Everything the mail template needs for one letter.
#[derive(Debug, Clone)]
pub struct SendUpdateRequest {
    pub to_email: SubscriberEmail,
    pub to_name: String,
    pub subject: String,
    pub body: String,
    pub pet_name: String,
    pub portrait_url: String,
    pub cadence_label: String,
}

impl SendUpdateRequest {
    pub fn for_subscription(subscription: &Subscription, message: Message) -> SendUpdateRequest {
        SendUpdateRequest {
            to_email: subscription.email.clone(),
            to_name: String::from(RECIPIENT_DISPLAY_NAME),
            subject: message.subject,
            body: message.body,
            pet_name: String::from(subscription.pet_name.as_ref()),
            portrait_url: String::from(subscription.portrait_url.as_ref()),
            cadence_label: String::from(subscription.cadence.as_ref()),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SendUpdateError {
    #[error("The notification sender rejected the request.")]
    Transport(#[from] reqwest::Error),
}

/// Opaque notification-sender collaborator. Retries, if any, are its
/// concern, not the scheduler's.
#[async_trait]
pub trait UpdateSender: Send + Sync {
    async fn send_update(&self, request: &SendUpdateRequest) -> Result<(), SendUpdateError>;
}

pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: SubscriberEmail,
    sender_name: String,
    api_key: Secret<String>,
}

#[derive(serde::Serialize)]
pub struct SendEmailBody {
    personalizations: Vec<SengridPersonalization>,
    from: SengridEmail,
    subject: String,
    content: Vec<SengridContent>,
}

#[derive(serde::Serialize)]
struct SengridEmail {
    email: String,
    name: String,
}

#[derive(serde::Serialize)]
struct SengridPersonalization {
    to: Vec<SengridEmail>,
    dynamic_template_data: SengridTemplateData,
}

#[derive(serde::Serialize)]
struct SengridTemplateData {
    to_name: String,
    pet_name: String,
    story: String,
    portrait_url: String,
    frequency: String,
}

#[derive(serde::Serialize)]
struct SengridContent {
    content_type: String,
    value: String,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: SubscriberEmail,
        sender_name: String,
        api_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> EmailClient {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()
            .unwrap();

        EmailClient {
            http_client,
            base_url,
            sender,
            sender_name,
            api_key,
        }
    }
}

#[async_trait]
impl UpdateSender for EmailClient {
    async fn send_update(&self, request: &SendUpdateRequest) -> Result<(), SendUpdateError> {
        let url = format!("{}/mail/send", self.base_url);
        let body = SendEmailBody {
            from: SengridEmail {
                email: String::from(self.sender.as_ref()),
                name: self.sender_name.clone(),
            },
            personalizations: vec![SengridPersonalization {
                to: vec![SengridEmail {
                    email: String::from(request.to_email.as_ref()),
                    name: request.to_name.clone(),
                }],
                dynamic_template_data: SengridTemplateData {
                    to_name: request.to_name.clone(),
                    pet_name: request.pet_name.clone(),
                    story: request.body.clone(),
                    portrait_url: request.portrait_url.clone(),
                    frequency: request.cadence_label.clone(),
                },
            }],
            subject: request.subject.clone(),
            content: vec![SengridContent {
                content_type: String::from("text/plain"),
                value: request.body.clone(),
            }],
        };

        self.http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?; // return an error when server response status code is 4xx or 5xx

        Ok(())
    }
}
