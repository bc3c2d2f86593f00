//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::insert_post))
                    .route("", web::get().to(posts::get_posts))
                    .route("/author/{author}", web::get().to(posts::get_posts_by_author)),
            ),
    );
}
