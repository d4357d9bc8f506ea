pub mod health;
pub mod todos;
pub mod users;

use actix_web::{error, web, HttpRequest};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Registers every route plus extractor settings.
///
/// Callers supply `web::Data<dyn Store>` and `web::Data<AuthConfig>` as app data.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(health::health)
        .service(
            web::scope("/user")
                .service(users::signup)
                .service(users::login)
                .service(users::search),
        )
        .service(
            web::scope("/todo")
                .wrap(AuthMiddleware)
                .service(todos::create_todo)
                // `/user` must be registered ahead of `/{id}`.
                .service(todos::get_user_todos)
                .service(todos::get_todo)
                .service(todos::edit_todo)
                .service(todos::delete_todo),
        );
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid query string: {}", err)).into()
}
