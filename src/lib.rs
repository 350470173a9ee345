use axum::extract::FromRef;
use reqwest::Client;
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod geocode;
pub mod inventory;
pub mod models;
pub mod query;
pub mod routes;
pub mod upstream;

use crate::config::Settings;
use crate::inventory::InventoryHandle;

// Shared application state handed to every handler
#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub http_client: Arc<Client>,
    pub inventory: InventoryHandle,
}
