pub mod b2;
pub mod catalog;
pub mod tmdb;
