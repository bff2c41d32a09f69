/// The toy the subscriber picked from the intake catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ToyPreference {
    Yarn,
    Laser,
    Mouse,
    Treats,
    CatTree,
}

impl ToyPreference {
    pub fn parse(toy: String) -> Result<ToyPreference, String> {
        match toy.as_str() {
            "yarn" => Ok(ToyPreference::Yarn),
            "laser" => Ok(ToyPreference::Laser),
            "mouse" => Ok(ToyPreference::Mouse),
            "treats" => Ok(ToyPreference::Treats),
            "cattree" => Ok(ToyPreference::CatTree),
            _ => Err(format!("{} is not a toy from the catalog", toy)),
        }
    }
}

impl AsRef<str> for ToyPreference {
    fn as_ref(&self) -> &str {
        match self {
            ToyPreference::Yarn => "yarn",
            ToyPreference::Laser => "laser",
            ToyPreference::Mouse => "mouse",
            ToyPreference::Treats => "treats",
            ToyPreference::CatTree => "cattree",
        }
    }
}
