pub mod keys;
pub mod metadata;
