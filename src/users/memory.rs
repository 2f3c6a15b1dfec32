use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::users::error::{UserError, UserResult};
use crate::users::repo::UserRepo;
use crate::users::repo_types::{DeleteAck, UpdateAck, User};

/// Insertion-ordered user store for tests. Clones share the same data.
#[derive(Debug, Default, Clone)]
pub struct MemoryUserRepo {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserRepo {
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn snapshot(&self) -> Vec<User> {
        self.users.read().await.clone()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn list_all(&self) -> UserResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_name(&self, pattern: &str) -> UserResult<Vec<User>> {
        let needle = pattern.to_lowercase();
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| u.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn create(&self, name: &str, email: &str, password_hash: &str) -> UserResult<User> {
        let user = User {
            id: ObjectId::new(),
            name: name.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
        };
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: ObjectId, name: &str, email: &str) -> UserResult<UpdateAck> {
        let mut users = self.users.write().await;
        let mut ack = UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
        };
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            ack.matched_count = 1;
            if u.name != name || u.email != email {
                u.name = name.to_string();
                u.email = email.to_string();
                ack.modified_count = 1;
            }
        }
        Ok(ack)
    }

    async fn change_password(&self, id: ObjectId, password_hash: &str) -> UserResult<UpdateAck> {
        let mut users = self.users.write().await;
        let mut ack = UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
        };
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            ack.matched_count = 1;
            if u.password != password_hash {
                u.password = password_hash.to_string();
                ack.modified_count = 1;
            }
        }
        Ok(ack)
    }

    async fn delete(&self, id: ObjectId) -> UserResult<DeleteAck> {
        let mut users = self.users.write().await;
        let before = users.len();
        if let Some(pos) = users.iter().position(|u| u.id == id) {
            users.remove(pos);
        }
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: (before - users.len()) as u64,
        })
    }
}

/// Store whose every call fails the way a dropped connection does.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingUserRepo;

impl FailingUserRepo {
    pub const CAUSE: &'static str = "connection reset by peer";

    pub fn error() -> UserError {
        UserError::Store(mongodb::error::Error::custom(Self::CAUSE.to_string()))
    }
}

#[async_trait]
impl UserRepo for FailingUserRepo {
    async fn list_all(&self) -> UserResult<Vec<User>> {
        Err(Self::error())
    }

    async fn get_by_id(&self, _id: ObjectId) -> UserResult<Option<User>> {
        Err(Self::error())
    }

    async fn get_by_email(&self, _email: &str) -> UserResult<Option<User>> {
        Err(Self::error())
    }

    async fn find_by_name(&self, _pattern: &str) -> UserResult<Vec<User>> {
        Err(Self::error())
    }

    async fn create(&self, _name: &str, _email: &str, _password_hash: &str) -> UserResult<User> {
        Err(Self::error())
    }

    async fn update(&self, _id: ObjectId, _name: &str, _email: &str) -> UserResult<UpdateAck> {
        Err(Self::error())
    }

    async fn change_password(&self, _id: ObjectId, _password_hash: &str) -> UserResult<UpdateAck> {
        Err(Self::error())
    }

    async fn delete(&self, _id: ObjectId) -> UserResult<DeleteAck> {
        Err(Self::error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> MemoryUserRepo {
        let repo = MemoryUserRepo::default();
        for (name, email) in [
            ("Ann", "ann@example.com"),
            ("Anna", "anna@example.com"),
            ("Bob", "bob@example.com"),
        ] {
            repo.create(name, email, "hash").await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn search_by_name_pages_matches_in_order() {
        let repo = seeded().await;
        let page = repo.search_by_name("an", 2, 1).await.unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_previous_page);
        assert!(!page.has_next_page);
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.users[0].name, "Anna");
    }

    #[tokio::test]
    async fn search_without_matches_is_empty() {
        let repo = seeded().await;
        let page = repo.search_by_name("zed", 3, 10).await.unwrap();
        assert_eq!(page.count, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_previous_page);
        assert!(!page.has_next_page);
        assert!(page.users.is_empty());
    }

    #[tokio::test]
    async fn list_page_covers_everything() {
        let repo = seeded().await;
        let page = repo.list_page(1, 2).await.unwrap();
        assert_eq!(page.count, 3);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next_page);
        assert_eq!(page.users.len(), 2);
    }

    #[tokio::test]
    async fn update_touches_name_and_email_only() {
        let repo = seeded().await;
        let bob = repo.get_by_email("bob@example.com").await.unwrap().unwrap();
        let ack = repo
            .update(bob.id, "Robert", "robert@example.com")
            .await
            .unwrap();
        assert_eq!(ack.matched_count, 1);
        assert_eq!(ack.modified_count, 1);

        let after = repo.get_by_id(bob.id).await.unwrap().unwrap();
        assert_eq!(after.name, "Robert");
        assert_eq!(after.email, "robert@example.com");
        assert_eq!(after.password, "hash");
    }

    #[tokio::test]
    async fn delete_unknown_id_reports_zero() {
        let repo = seeded().await;
        let ack = repo.delete(ObjectId::new()).await.unwrap();
        assert_eq!(ack.deleted_count, 0);
        assert_eq!(repo.len().await, 3);
    }

    #[tokio::test]
    async fn search_by_name_surfaces_store_errors() {
        let err = FailingUserRepo.search_by_name("an", 1, 10).await.unwrap_err();
        assert!(matches!(err, UserError::Store(_)));
        assert_eq!(err.to_string(), FailingUserRepo::error().to_string());
    }

    #[tokio::test]
    async fn list_page_surfaces_store_errors() {
        let err = FailingUserRepo.list_page(1, 10).await.unwrap_err();
        assert!(matches!(err, UserError::Store(_)));
        assert_eq!(err.to_string(), FailingUserRepo::error().to_string());
    }
}
