pub mod traits;

// API client implementations
pub mod http_api;
