//! Stemfit CLI library.

pub mod cli;
pub mod points;
