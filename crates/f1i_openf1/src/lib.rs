pub mod client;
pub mod report;

pub use client::OpenF1Client;

pub mod prelude {
    pub use super::client::OpenF1Client;
    pub use f1i_core::{Driver, DriverResult, RaceSession, Result};
}
