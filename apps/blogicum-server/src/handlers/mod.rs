//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod feed;
mod forms;
mod health;
mod posts;
mod views;

use actix_web::{HttpRequest, HttpResponse, web};

use blogicum_core::domain::ownership::Owned;
use blogicum_shared::ErrorResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::flash::Flash;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .route("/", web::get().to(feed::index))
    .route("/category/{slug}/", web::get().to(feed::category_posts))
    .route("/profile/{username}/", web::get().to(feed::profile))
    .service(
        web::scope("/posts")
            // `new` before `{id}` so it is not read as an id
            .service(
                web::resource("/new/")
                    .route(web::get().to(posts::new_form))
                    .route(web::post().to(posts::create)),
            )
            .route("/{id}/", web::get().to(posts::detail))
            .service(
                web::resource("/{id}/edit/")
                    .route(web::get().to(posts::edit_form))
                    .route(web::post().to(posts::update)),
            )
            .service(
                web::resource("/{id}/delete/")
                    .route(web::get().to(posts::delete_form))
                    .route(web::post().to(posts::delete)),
            )
            .route("/{id}/comment/", web::post().to(comments::create))
            .service(
                web::resource("/{id}/comment/{comment_id}/edit/")
                    .route(web::get().to(comments::edit_form))
                    .route(web::post().to(comments::update)),
            )
            .service(
                web::resource("/{id}/comment/{comment_id}/delete/")
                    .route(web::get().to(comments::edit_form))
                    .route(web::post().to(comments::delete)),
            ),
    )
    .service(
        web::scope("/auth")
            .route("/registration/", web::post().to(auth::register))
            .route("/login/", web::post().to(auth::login))
            .route("/logout/", web::post().to(auth::logout))
            .route("/me/", web::get().to(auth::me)),
    )
    .route("/health/", web::get().to(health::health_check))
    .default_service(web::to(not_found));
}

/// Fallback for unknown routes.
async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::not_found(format!(
        "No route for {}",
        req.path()
    )))
}

/// The ownership rule in front of every post and comment mutation.
///
/// A mismatch redirects to the post page with a flash message; nothing is
/// changed.
fn authorize(
    record: &impl Owned,
    identity: &Identity,
    post_id: i64,
    flash: Flash,
) -> AppResult<()> {
    record.authorize(identity.user_id).map_err(|denied| {
        tracing::warn!(
            requester_id = denied.requester_id,
            owner_id = denied.owner_id,
            post_id,
            "Ownership check failed"
        );
        AppError::Denied {
            location: views::post_url(post_id),
            flash,
        }
    })
}
