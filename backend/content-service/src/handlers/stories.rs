/// Story handlers - HTTP endpoints for story operations
use crate::error::Result;
use crate::models::Story;
use crate::services::StoriesService;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateStoryRequest {
    pub user_id: i64,
    pub content: Option<String>,
    pub media_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ViewerRequest {
    pub viewer_id: i64,
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    #[serde(flatten)]
    pub story: Story,
    pub time_remaining: String,
}

/// Create a new story; the response carries the author's profile
pub async fn create_story(
    service: web::Data<StoriesService>,
    req: web::Json<CreateStoryRequest>,
) -> Result<HttpResponse> {
    let story = service
        .create(
            req.user_id,
            req.content.as_deref(),
            req.media_url.as_deref(),
            Utc::now(),
        )
        .await?;

    Ok(HttpResponse::Created().json(service.with_author(story).await))
}

/// Active stories with their authors, newest first
pub async fn list_stories(service: web::Data<StoriesService>) -> Result<HttpResponse> {
    let stories = service.list_active_with_authors(Utc::now()).await?;
    Ok(HttpResponse::Ok().json(stories))
}

/// Get user's stories
pub async fn get_user_stories(
    service: web::Data<StoriesService>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let stories = service.list_by_user(*user_id, Utc::now()).await?;
    Ok(HttpResponse::Ok().json(stories))
}

/// Get a story
pub async fn get_story(
    service: web::Data<StoriesService>,
    story_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let now = Utc::now();
    let story = service.get_by_id(*story_id, now).await?;
    let time_remaining = StoriesService::time_remaining(&story, now).to_string();

    Ok(HttpResponse::Ok().json(StoryResponse {
        story,
        time_remaining,
    }))
}

/// Track story view
pub async fn track_story_view(
    service: web::Data<StoriesService>,
    story_id: web::Path<i64>,
    req: web::Json<ViewerRequest>,
) -> Result<HttpResponse> {
    let story = service
        .mark_viewed(*story_id, req.viewer_id, Utc::now())
        .await?;
    Ok(HttpResponse::Ok().json(story))
}

/// Open a story; views by the author are not recorded
pub async fn open_story(
    service: web::Data<StoriesService>,
    story_id: web::Path<i64>,
    req: web::Json<ViewerRequest>,
) -> Result<HttpResponse> {
    let story = service.open(*story_id, req.viewer_id, Utc::now()).await?;
    Ok(HttpResponse::Ok().json(story))
}

/// Delete a story
pub async fn delete_story(
    service: web::Data<StoriesService>,
    story_id: web::Path<i64>,
) -> Result<HttpResponse> {
    service.remove(*story_id, Utc::now()).await?;
    Ok(HttpResponse::NoContent().finish())
}
