// Job Board Bot - Core
//
// Routes scraped job postings to categorized Discord channels and remembers
// what was already announced so each job goes out once.
//
// Domains live in domains/*; outbound messaging sits behind kernel traits.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
