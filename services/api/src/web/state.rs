//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use story_hub_core::ports::{DatabaseService, PasswordService, SessionService};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub passwords: Arc<dyn PasswordService>,
    pub sessions: Arc<dyn SessionService>,
    pub config: Arc<Config>,
}
