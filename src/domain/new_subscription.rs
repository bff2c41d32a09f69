use actix_web::web;
use serde::Deserialize;

use crate::domain::cadence_tier::CadenceTier;
use crate::domain::pet_name::PetName;
use crate::domain::portrait_url::PortraitUrl;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::toy_preference::ToyPreference;

pub struct NewSubscription {
    pub email: SubscriberEmail,
    pub pet_name: PetName,
    pub cadence: CadenceTier,
    pub portrait_url: PortraitUrl,
    pub toy: ToyPreference,
    pub memory: String,
}

#[derive(Deserialize)]
pub struct NewSubscriptionBody {
    pub email: String,
    pub pet_name: String,
    pub cadence: String,
    pub portrait_url: String,
    pub toy: String,
    #[serde(default)]
    pub memory: String,
}

impl TryFrom<web::Json<NewSubscriptionBody>> for NewSubscription {
    type Error = String;

    fn try_from(body: web::Json<NewSubscriptionBody>) -> Result<Self, Self::Error> {
        let email = SubscriberEmail::parse(body.email.clone())?;
        let pet_name = PetName::parse(body.pet_name.clone())?;
        let cadence = CadenceTier::parse(body.cadence.clone())?;
        let portrait_url = PortraitUrl::parse(body.portrait_url.clone())?;
        let toy = ToyPreference::parse(body.toy.clone())?;

        Ok(NewSubscription {
            email,
            pet_name,
            cadence,
            portrait_url,
            toy,
            memory: body.memory.clone(),
        })
    }
}
