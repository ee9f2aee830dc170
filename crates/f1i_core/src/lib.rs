pub mod error;
pub mod models;
pub mod types;

pub use error::Error;
pub use models::InferenceModel;
pub use types::{
    AnalysisResult, Article, Driver, DriverResult, PerformancePoint, RaceEvent, RaceSession,
    Sentiment,
};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::error::Error;
    pub use super::models::InferenceModel;
    pub use super::types::{AnalysisResult, Article, Driver, Sentiment};
    pub use super::Result;
}
