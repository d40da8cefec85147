use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self), fields(email = email))]
    async fn add(&self, name: &str, email: &str) -> Result<User> {
        trace!("Acquiring write lock for user storage");
        let mut storage = self.storage.write().await;
        let user = User {
            id: storage.len() as u32 + 1,
            name: name.to_string(),
            email: email.to_string(),
        };
        storage.push(user.clone());
        debug!(
            user_id = user.id,
            email = %user.email,
            "User saved to memory storage"
        );
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = id))]
    async fn find_by_id(&self, id: u32) -> Result<Option<User>> {
        trace!("Acquiring read lock for user storage");
        let storage = self.storage.read().await;
        let user = storage.iter().find(|u| u.id == id).cloned();
        match &user {
            Some(u) => debug!(user_id = u.id, email = %u.email, "User found in storage"),
            None => trace!(user_id = id, "User not found in storage"),
        }
        Ok(user)
    }
}
