/// Comment handlers - HTTP endpoints for comment operations
use crate::error::Result;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

/// Request body for creating a comment
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub user_id: i64,
    pub content: String,
}

/// Request body for updating a comment
#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

/// Create a new comment
pub async fn create_comment(
    service: web::Data<CommentService>,
    post_id: web::Path<i64>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let comment = service
        .create_comment(*post_id, req.user_id, &req.content, Utc::now())
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Get comments for a post
pub async fn get_post_comments(
    service: web::Data<CommentService>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.get_post_comments(*post_id).await?))
}

/// Get a single comment
pub async fn get_comment(
    service: web::Data<CommentService>,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.get_comment(*comment_id).await?))
}

/// Update a comment
pub async fn update_comment(
    service: web::Data<CommentService>,
    comment_id: web::Path<i64>,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    let comment = service.update_comment(*comment_id, &req.content).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// Delete a comment
pub async fn delete_comment(
    service: web::Data<CommentService>,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    service.delete_comment(*comment_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Like a comment
pub async fn like_comment(
    service: web::Data<CommentService>,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.like_comment(*comment_id).await?))
}
