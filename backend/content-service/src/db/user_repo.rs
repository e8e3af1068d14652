use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserStore;
use crate::error::Result;
use crate::models::UserProfile;

/// User directory held in process memory, kept in id order.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<UserProfile>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(mut users: Vec<UserProfile>) -> Self {
        users.sort_by_key(|u| u.id);
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find(&self, id: i64) -> Result<Option<UserProfile>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<UserProfile>> {
        Ok(self.users.read().await.clone())
    }

    async fn insert(&self, user: UserProfile) -> Result<()> {
        let mut users = self.users.write().await;
        let index = users.partition_point(|u| u.id < user.id);
        users.insert(index, user);
        Ok(())
    }
}
