pub mod app_config;
pub mod business;
pub mod category;
pub mod config;
pub mod constants;
pub mod error;
pub mod favorites;
pub mod form;
pub mod paging;
pub mod session;
pub mod sort;

pub use app_config::{AppConfig, Environment};
pub use business::{Business, BusinessCategory, Location, ResultBatch};
pub use category::{normalize_title, Category, CategoryIndex, CategoryRecord};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{AppError, FATAL_NOTICE};
pub use favorites::{FavoriteRecord, FavoritesSet};
pub use form::{accepts_zip_input, compute_zip_final, meters_to_miles, miles_to_meters};
pub use paging::{compute_page_offset, page_links, PageLinks};
pub use session::{FetchMode, PagerSummary, RequestTicket, SearchParams, SearchSession};
pub use sort::{sort_results, SortDir, SortField};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
