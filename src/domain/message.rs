/// The finished letter. Never persisted, composed fresh per delivery attempt
/// and discarded once handed to the sender.
#[derive(Debug, Clone)]
pub struct Message {
    pub subject: String,
    pub body: String,
}
