/// User directory lookups used by the story and profile views
use std::sync::Arc;

use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::UserProfile;

pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserProfile> {
        self.store
            .find(user_id)
            .await?
            .ok_or_else(|| AppError::user_not_found(user_id))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<UserProfile> {
        self.store
            .list()
            .await?
            .into_iter()
            .find(|u| u.username == username)
            .ok_or_else(|| AppError::user_not_found(username))
    }

    pub async fn list_users(&self) -> Result<Vec<UserProfile>> {
        self.store.list().await
    }

    /// Case-insensitive match on username or display name
    pub async fn search_users(&self, query: &str) -> Result<Vec<UserProfile>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.display_name.to_lowercase().contains(&needle)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryUserStore;

    fn user(id: i64, username: &str, display_name: &str) -> UserProfile {
        UserProfile {
            id,
            username: username.into(),
            display_name: display_name.into(),
            avatar_url: None,
            bio: None,
            followers: 0,
            following: 0,
        }
    }

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserStore::with_users(vec![
            user(2, "grace", "Grace Hopper"),
            user(1, "ada", "Ada Lovelace"),
        ])))
    }

    #[tokio::test]
    async fn test_lookup_by_id_and_username() {
        let svc = service();
        assert_eq!(svc.get_user(1).await.unwrap().username, "ada");
        assert_eq!(svc.get_by_username("grace").await.unwrap().id, 2);
        assert!(matches!(
            svc.get_user(3).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            svc.get_by_username("Ada").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_search_matches_display_name() {
        let svc = service();
        let found = svc.search_users("HOPPER").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);

        let ids: Vec<i64> = svc.list_users().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
