/// HTTP handlers for the social content API
///
/// This module contains handlers for:
/// - Trends: latest hashtag trend snapshot
/// - Posts: create, read, update, delete, like and search posts
/// - Comments: comments on posts
/// - Stories: create, list, view and delete ephemeral stories
/// - Users: profile lookups
pub mod comments;
pub mod posts;
pub mod stories;
pub mod trends;
pub mod users;

use actix_web::{web, HttpResponse};

pub use trends::TrendsHandlerState;

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "social-content-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Register every API route. Services are expected as app data:
/// `PostService`, `CommentService`, `StoriesService`, `UserService` and
/// `TrendsHandlerState`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(crate::metrics::serve_metrics))
        .route("/api/v1/health", web::get().to(health))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/trends")
                        .route("", web::get().to(trends::get_trends))
                        .route("/refresh", web::post().to(trends::refresh_trends)),
                )
                .service(
                    web::scope("/posts")
                        .service(
                            web::resource("")
                                .route(web::get().to(posts::list_posts))
                                .route(web::post().to(posts::create_post)),
                        )
                        .route("/search", web::get().to(posts::search_posts))
                        .route("/user/{user_id}", web::get().to(posts::get_user_posts))
                        .service(
                            web::resource("/{post_id}")
                                .route(web::get().to(posts::get_post))
                                .route(web::patch().to(posts::update_post))
                                .route(web::delete().to(posts::delete_post)),
                        )
                        .route("/{post_id}/like", web::post().to(posts::like_post))
                        .service(
                            web::resource("/{post_id}/comments")
                                .route(web::get().to(comments::get_post_comments))
                                .route(web::post().to(comments::create_comment)),
                        ),
                )
                .service(
                    web::scope("/comments")
                        .service(
                            web::resource("/{comment_id}")
                                .route(web::get().to(comments::get_comment))
                                .route(web::patch().to(comments::update_comment))
                                .route(web::delete().to(comments::delete_comment)),
                        )
                        .route("/{comment_id}/like", web::post().to(comments::like_comment)),
                )
                .service(
                    web::scope("/stories")
                        .service(
                            web::resource("")
                                .route(web::get().to(stories::list_stories))
                                .route(web::post().to(stories::create_story)),
                        )
                        .route("/user/{user_id}", web::get().to(stories::get_user_stories))
                        .service(
                            web::resource("/{story_id}")
                                .route(web::get().to(stories::get_story))
                                .route(web::delete().to(stories::delete_story)),
                        )
                        .route("/{story_id}/views", web::post().to(stories::track_story_view))
                        .route("/{story_id}/open", web::post().to(stories::open_story)),
                )
                .service(
                    web::scope("/users")
                        .route("", web::get().to(users::list_users))
                        .route("/search", web::get().to(users::search_users))
                        .route(
                            "/by-username/{username}",
                            web::get().to(users::get_user_by_username),
                        )
                        .route("/{user_id}", web::get().to(users::get_user)),
                ),
        );
}
