pub mod app;
pub mod calendar;
pub mod dashboard;
pub mod errors;
pub mod fetch;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod state;
pub mod ui;

pub use app::router;
pub use fetch::UpstreamConfig;
pub use state::AppState;
