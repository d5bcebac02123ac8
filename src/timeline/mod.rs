pub mod allocator;
pub mod config;
pub mod locator;
pub mod paginate;
pub mod query;
