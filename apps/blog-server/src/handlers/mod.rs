//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod comments;
mod health;
mod posts;
mod profile;

use actix_web::http::header;
use actix_web::{HttpResponse, web};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Posts and their comments
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::index))
                    .route("", web::post().to(posts::create))
                    .route("/{post_id}", web::get().to(posts::detail))
                    .route("/{post_id}", web::put().to(posts::update))
                    .route("/{post_id}/delete", web::post().to(posts::delete))
                    .route("/{post_id}/comments", web::post().to(comments::create)),
            )
            .service(
                web::scope("/comments")
                    .route("/{comment_id}", web::put().to(comments::update))
                    .route("/{comment_id}/delete", web::post().to(comments::delete)),
            )
            // Category listings
            .service(
                web::scope("/categories")
                    .route("/{slug}", web::get().to(categories::posts_by_category)),
            )
            // Profiles
            .service(
                web::scope("/profile")
                    .route("/edit", web::put().to(profile::edit))
                    .route("/{username}", web::get().to(profile::view)),
            ),
    );
}

/// 303 redirect. Every write endpoint resolves to one of these, whether the
/// operation was applied or silently denied.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub(crate) fn post_detail_path(post_id: uuid::Uuid) -> String {
    format!("/api/posts/{}", post_id)
}

pub(crate) fn profile_path(username: &str) -> String {
    format!("/api/profile/{}", username)
}
