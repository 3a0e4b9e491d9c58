pub mod capability;
pub mod client;
