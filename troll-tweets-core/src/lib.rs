pub mod config;
pub mod entity;
pub mod error;
