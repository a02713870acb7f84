#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod model;
pub mod scoring;
pub mod sequencer;
pub mod time;
pub mod timer;

pub use error::Error;
pub use time::Clock;
