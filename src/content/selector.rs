use chrono::NaiveDate;
use rand::Rng;

use crate::content::theme::Theme;
use crate::domain::toy_preference::ToyPreference;

/// Things the cat got up to since the last letter. One is picked per repeat
/// message; the welcome letter never uses them.
pub const ACTIVITY_CATALOG: [&str; 5] = [
    "made friends with a neighborhood squirrel who visits the window daily",
    "discovered a perfect sunbeam spot in the library that appears at exactly 2pm",
    "helped the neighborhood birds build their nests by watching very carefully",
    "learned to open the treat cabinet and have been enjoying midnight snacks",
    "claimed the softest armchair in the house as my exclusive napping throne",
];

/// Subject templates for the very first letter. `{pet}` is replaced with the
/// pet name.
pub const FIRST_SUBJECT_CATALOG: [&str; 4] = [
    "A letter from {pet} in their furever home",
    "{pet}'s first update from Meow Memory Lane",
    "Greetings from {pet}!",
    "{pet} is settling in nicely",
];

/// Subject templates for every letter after the first.
pub const REPEAT_SUBJECT_CATALOG: [&str; 6] = [
    "{pet} has news from Meow Memory Lane",
    "{pet} misses you and wants to say hello",
    "A purr-fect update from {pet}",
    "{pet}'s latest adventures",
    "Whiskers and wonders: {pet}'s latest letter",
    "Meow from Memory Lane: {pet} writes again",
];

const GENERIC_TOY_ACTIVITY: &str = "playing with their favorite toy";

/// One fixed phrase per toy in the intake catalog. Anything the catalog does
/// not recognize gets the generic phrase instead of an error.
pub fn toy_activity(toy: &str) -> &'static str {
    match toy {
        "yarn" => "playing with their favorite blue yarn ball",
        "laser" => "chasing the mysterious red dot around",
        "mouse" => "batting around their squeaky mouse toy",
        "treats" => "enjoying some tasty treats",
        "cattree" => "relaxing in their cozy cat tree",
        _ => GENERIC_TOY_ACTIVITY,
    }
}

/// Strategy for picking one phrase out of a catalog. Production uses the
/// thread-local RNG; tests inject a fixed picker so selection is repeatable.
pub trait PhrasePicker: Send + Sync {
    /// Returns an index in `0..len`. `len` is always at least 1.
    fn pick_index(&self, len: usize) -> usize;
}

pub struct RandomPicker;

impl PhrasePicker for RandomPicker {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always picks the same slot. Test double, also handy for previewing.
pub struct FixedPicker(pub usize);

impl PhrasePicker for FixedPicker {
    fn pick_index(&self, len: usize) -> usize {
        self.0 % len
    }
}

/// Everything the composer needs to write one letter.
#[derive(Debug, Clone)]
pub enum ContentVariant {
    /// The deterministic welcome letter: no theme, no randomized activity.
    Welcome {
        subject: String,
        toy_activity: &'static str,
    },
    Update {
        subject: String,
        toy_activity: &'static str,
        theme: Theme,
        activity: &'static str,
    },
}

impl ContentVariant {
    pub fn subject(&self) -> &str {
        match self {
            ContentVariant::Welcome { subject, .. } => subject,
            ContentVariant::Update { subject, .. } => subject,
        }
    }
}

pub struct ContentSelector {
    picker: Box<dyn PhrasePicker>,
}

impl ContentSelector {
    pub fn new(picker: Box<dyn PhrasePicker>) -> ContentSelector {
        ContentSelector { picker }
    }

    pub fn with_thread_rng() -> ContentSelector {
        ContentSelector::new(Box::new(RandomPicker))
    }

    /// Picks the template variant for one letter. The first letter always
    /// takes the welcome branch; everything else gets a theme from the
    /// calendar date and one activity from the catalog.
    pub fn select(
        &self,
        toy: ToyPreference,
        date: NaiveDate,
        is_first_message: bool,
        pet_name: &str,
    ) -> ContentVariant {
        let toy_activity = toy_activity(toy.as_ref());

        if is_first_message {
            let template =
                FIRST_SUBJECT_CATALOG[self.picker.pick_index(FIRST_SUBJECT_CATALOG.len())];

            return ContentVariant::Welcome {
                subject: template.replace("{pet}", pet_name),
                toy_activity,
            };
        }

        let template = REPEAT_SUBJECT_CATALOG[self.picker.pick_index(REPEAT_SUBJECT_CATALOG.len())];
        let activity = ACTIVITY_CATALOG[self.picker.pick_index(ACTIVITY_CATALOG.len())];

        ContentVariant::Update {
            subject: template.replace("{pet}", pet_name),
            toy_activity,
            theme: Theme::for_date(date),
            activity,
        }
    }
}
