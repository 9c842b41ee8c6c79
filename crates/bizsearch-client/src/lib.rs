pub mod client;
pub mod error;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::QueryClient;
pub use error::ClientError;
pub use query::{favorites_query, search_query, QueryObject};
