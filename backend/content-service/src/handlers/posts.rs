/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::services::{CommentService, PostService};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub user_id: i64,
    #[serde(default)]
    pub content: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Create a new post
pub async fn create_post(
    service: web::Data<PostService>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let post = service
        .create_post(
            req.user_id,
            &req.content,
            req.image_url.as_deref(),
            Utc::now(),
        )
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// All posts, newest first
pub async fn list_posts(service: web::Data<PostService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.list_posts().await?))
}

/// Get a post
pub async fn get_post(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.get_post(*post_id).await?))
}

/// Update post content
pub async fn update_post(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let post = service
        .update_post(*post_id, req.content.as_deref(), req.image_url.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post along with its comments
pub async fn delete_post(
    service: web::Data<PostService>,
    comments: web::Data<CommentService>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    service.delete_post(*post_id).await?;
    comments.delete_post_comments(*post_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Like a post
pub async fn like_post(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.like_post(*post_id).await?))
}

/// Get user's posts
pub async fn get_user_posts(
    service: web::Data<PostService>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.get_user_posts(*user_id).await?))
}

/// Search posts by content or hashtag
pub async fn search_posts(
    service: web::Data<PostService>,
    query: web::Query<SearchParams>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.search_posts(&query.q).await?))
}
