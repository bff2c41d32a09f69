pub mod composer;
pub mod selector;
pub mod theme;
