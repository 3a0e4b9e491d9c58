pub mod b2_client;
pub mod cache;
pub mod config;
pub mod error;
pub mod mappers;
pub mod routes;
pub mod services;
pub mod state;
pub mod tmdb_client;
pub mod types;
