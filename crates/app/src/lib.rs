#![warn(clippy::pedantic)]

pub mod config;
pub mod log;
pub mod service;

pub use config::Config;
pub use service::Service;
