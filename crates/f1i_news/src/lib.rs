pub mod jsonld;
pub mod manager;
pub mod scrapers;

pub use manager::NewsManager;
pub use scrapers::Scraper;

pub mod prelude {
    pub use super::manager::NewsManager;
    pub use super::scrapers::Scraper;
    pub use f1i_core::{Article, Error, Result};
}
