//! Letterboxd-backed film list API with background TMDb list sync.

pub mod config;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod services;
pub mod state;
