#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod exercise;
mod name;
mod profile;
mod service;
mod set;
mod statistics;
mod workout;

pub use error::*;
pub use exercise::*;
pub use name::*;
pub use profile::*;
pub use service::*;
pub use set::*;
pub use statistics::*;
pub use workout::*;
