pub mod config;
pub mod episode;
pub mod error;
pub mod interactive;
pub mod loader;
pub mod metadata;
pub mod report;
pub mod search;
pub mod subtitle;

pub use config::Config;
pub use error::{Result, SceneFinderError};
pub use search::{SearchResult, SearchSession};
