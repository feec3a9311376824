//! Spreadsheet upload service: ingests the first sheet of a workbook, infers
//! column types, and derives chart series and summary statistics for a chosen
//! pair of columns.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use services::store::Store;

// Application state
pub struct AppState {
    pub config: config::Config,
    pub store: Store,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self {
            config,
            store: Store::new(),
        }
    }
}
