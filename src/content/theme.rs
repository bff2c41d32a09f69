use chrono::{Datelike, NaiveDate};

/// Seasonal or holiday framing for a letter, picked from the calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Spring,
    Summer,
    Fall,
    Winter,
    Halloween,
    Christmas,
}

impl Theme {
    /// Maps a calendar date to its theme. Months follow the plain seasons,
    /// with two holiday overrides: after October 15th the theme is halloween,
    /// and after December 5th it is christmas.
    pub fn for_date(date: NaiveDate) -> Theme {
        let day = date.day();

        match date.month() {
            10 if day > 15 => Theme::Halloween,
            12 if day > 5 => Theme::Christmas,
            12 | 1 | 2 => Theme::Winter,
            3 | 4 | 5 => Theme::Spring,
            6 | 7 | 8 => Theme::Summer,
            _ => Theme::Fall,
        }
    }

    /// What the neighborhood looks like this time of year.
    pub fn scenery(&self) -> &'static str {
        match self {
            Theme::Spring => "The flowers are blooming and the birds are singing",
            Theme::Summer => {
                "The days are long and warm, perfect for sunbathing in the windows"
            }
            Theme::Fall => "The trees are turning beautiful shades of orange and red",
            Theme::Winter => "Snow has blanketed Meow Memory Lane in a peaceful white glow",
            Theme::Halloween => "The house is decorated with pumpkins and spooky decorations",
            Theme::Christmas => {
                "Meow Memory Lane is decorated with twinkling lights and festive garlands"
            }
        }
    }

    /// What the cat has been up to this time of year.
    pub fn pastime(&self) -> &'static str {
        match self {
            Theme::Spring => "chasing butterflies in the garden",
            Theme::Summer => "napping in the cool shade of the big oak tree",
            Theme::Fall => "playing in the pile of colorful leaves",
            Theme::Winter => "curling up by the fireplace",
            Theme::Halloween => "watching the neighborhood trick-or-treaters from the window",
            Theme::Christmas => "batting at ornaments on the Christmas tree",
        }
    }
}
