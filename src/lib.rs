pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use client::ApiClient;
pub use config::Config;
pub use controller::SessionViewController;
pub use errors::ApiError;
pub use storage::TokenStore;
pub use ui::{TerminalView, View};
