pub mod http_client;
pub mod index;

pub use http_client::{HttpClient, MeiliHttpError, MeiliHttpErrorKind};
pub use index::{MeilisearchEngine, MeilisearchIndex};
