use crate::content::selector::ContentVariant;
use crate::domain::message::Message;
use crate::domain::subscription::Subscription;

/// Fills the narrative skeleton with the subscriber's details. Plain text
/// interpolation only: the memory text goes in verbatim, untouched. Escaping
/// for the transport medium is the sender's job.
pub fn compose(subscription: &Subscription, variant: &ContentVariant) -> Message {
    let pet_name = subscription.pet_name.as_ref();
    let memory = subscription.memory.as_str();

    match variant {
        ContentVariant::Welcome {
            subject,
            toy_activity,
        } => Message {
            subject: subject.clone(),
            body: format!(
                "Dear friend,\n\n\
                 I've settled into my new home on Meow Memory Lane! The Victorian mansion is \
                 beautiful, with lots of sunny spots for napping and tall windows for bird \
                 watching. Today I spent some time {toy_activity}, which reminded me of our \
                 special times together.\n\n\
                 I wanted to share that memory of when {memory}. Those moments will always be \
                 precious to me.\n\n\
                 I'm making new friends here but will never forget you. I'll write again soon \
                 to tell you about my adventures!\n\n\
                 Purrs and headbutts,\n\
                 {pet_name}"
            ),
        },
        ContentVariant::Update {
            subject,
            toy_activity,
            theme,
            activity,
        } => Message {
            subject: subject.clone(),
            body: format!(
                "Dear friend,\n\n\
                 {scenery} here in my furever home. Lately I {activity}, and I've spent plenty \
                 of time {toy_activity}.\n\n\
                 It always makes me think of you and that wonderful memory of when {memory}.\n\n\
                 Even with all the seasonal excitement, I still find time to look at your photo \
                 and remember our wonderful times together.\n\n\
                 With love from Meow Memory Lane,\n\
                 {pet_name}",
                scenery = theme.scenery(),
            ),
        },
    }
}
