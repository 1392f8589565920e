//! REST API server — the `/scrape` route, DTOs, error mapping, and configuration.

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;
