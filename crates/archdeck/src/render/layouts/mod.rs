pub mod content;
pub mod section;
pub mod title;
