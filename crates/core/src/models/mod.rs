pub mod analytics;
pub mod chart;
pub mod listing;
pub mod record;
pub mod settings;
