pub mod image;
pub mod person;
pub mod search;
pub mod title;
