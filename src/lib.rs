pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::registry_service::RegistryService;

/// State of the remote record service.
#[derive(Clone, Default)]
pub struct AppState {
    pub registry_service: RegistryService,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            registry_service: RegistryService::new(),
        }
    }
}
