pub mod analytics_service;
pub mod chart_service;
pub mod list_view;
pub mod record_service;
pub mod validation_service;
