pub mod error;
pub mod flixpatrol;
pub mod http;
pub mod trakt;

pub use error::TraktError;
pub use http::create_http_client;
pub use trakt::TraktClient;
