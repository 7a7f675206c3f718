pub mod app;
pub mod booking;
pub mod charts;
pub mod chrome;
pub mod content;
pub mod dom;
pub mod errors;
pub mod handlers;
pub mod modal;
pub mod models;
pub mod page;
pub mod schedule;
pub mod state;
pub mod stats;
pub mod storage;
pub mod timers;
pub mod ui;

pub use app::router;
pub use page::{Page, PageConfig, PageHandle};
pub use state::AppState;
pub use storage::{load_stats, resolve_stats_path};
