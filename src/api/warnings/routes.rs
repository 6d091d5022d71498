use super::handlers;
use actix_web::{web, Scope};

pub fn routes() -> Scope {
    // /count must be registered before /{index}
    web::scope("/warnings")
        .service(handlers::get_warnings)
        .service(handlers::get_count)
        .service(handlers::get_warning)
}
