pub mod health;
pub mod warnings;

use actix_web::{web, Scope};

use crate::{config::FilterConfig, state::SnapshotStore};

/// Shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: SnapshotStore,
    pub filter: FilterConfig,
}

pub fn routes() -> Scope {
    web::scope("/api").service(warnings::routes())
}
