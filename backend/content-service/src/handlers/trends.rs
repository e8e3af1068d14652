/// Trend handlers - hashtag trend snapshot endpoints
use crate::cache::TrendsCache;
use crate::error::Result;
use crate::jobs::TrendsRefreshJob;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use std::sync::Arc;

/// Shared state for trend endpoints
pub struct TrendsHandlerState {
    pub cache: Arc<TrendsCache>,
    pub job: TrendsRefreshJob,
}

/// Latest trend snapshot, computed on demand when none is cached yet
pub async fn get_trends(state: web::Data<TrendsHandlerState>) -> Result<HttpResponse> {
    let snapshot = match state.cache.latest().await {
        Some(snapshot) => snapshot,
        None => state.job.refresh_once(Utc::now()).await?,
    };
    Ok(HttpResponse::Ok().json(snapshot))
}

/// Recompute trends now
pub async fn refresh_trends(state: web::Data<TrendsHandlerState>) -> Result<HttpResponse> {
    let snapshot = state.job.refresh_once(Utc::now()).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}
