pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Mounts the full HTTP surface. Login and registration stay outside the
/// guarded scopes; everything else requires a bearer token.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(auth::issue_token)
        .service(users::register)
        .service(
            web::scope("/users/me")
                .wrap(AuthMiddleware)
                .service(users::me),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::create_task)
                .service(tasks::list_tasks)
                .service(tasks::complete_task)
                .service(tasks::incomplete_task)
                .service(tasks::delete_task),
        );
}
