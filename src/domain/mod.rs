pub mod cadence_tier;
pub mod message;
pub mod new_subscription;
pub mod pet_name;
pub mod portrait_url;
pub mod subscriber_email;
pub mod subscription;
pub mod toy_preference;
