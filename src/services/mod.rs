pub mod cache_service;
pub mod catalog_service;
pub mod search_service;
pub mod upstream_service;

pub use cache_service::*;
pub use catalog_service::*;
pub use search_service::*;
pub use upstream_service::*;
