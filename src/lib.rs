pub mod config;
pub mod converter;
pub mod document;
pub mod errors;
pub mod extraction;
pub mod formatter;
pub mod projection;
pub mod types;
