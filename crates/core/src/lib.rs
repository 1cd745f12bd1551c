#![forbid(unsafe_code)]

pub mod error;
pub mod gate;
pub mod model;
pub mod parser;
pub mod time;

pub use error::Error;
pub use time::Clock;
