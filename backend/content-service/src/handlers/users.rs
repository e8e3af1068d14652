/// User handlers - read-only profile lookups
use crate::error::Result;
use crate::services::UserService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

pub async fn list_users(service: web::Data<UserService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.list_users().await?))
}

pub async fn get_user(
    service: web::Data<UserService>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.get_user(*user_id).await?))
}

pub async fn get_user_by_username(
    service: web::Data<UserService>,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.get_by_username(&username).await?))
}

pub async fn search_users(
    service: web::Data<UserService>,
    query: web::Query<SearchParams>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(service.search_users(&query.q).await?))
}
