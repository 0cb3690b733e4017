pub mod catalog;
pub mod list;
pub mod media;
pub mod service;
pub mod titles;

pub use catalog::CatalogItem;
pub use list::ListSnapshot;
pub use media::MediaType;
pub use service::StreamingService;
pub use titles::ScrapedTitles;
