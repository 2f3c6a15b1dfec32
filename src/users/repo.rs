use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database,
};
use tracing::{debug, error, instrument};

use crate::users::error::UserResult;
use crate::users::pagination::{paginate, Page};
use crate::users::repo_types::{DeleteAck, UpdateAck, User};

/// Access to the user collection. Every call is a single store round trip;
/// uniqueness and format checks belong to the caller.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn list_all(&self) -> UserResult<Vec<User>>;

    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>>;

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// All users whose name contains `pattern`, ignoring case, in store order.
    async fn find_by_name(&self, pattern: &str) -> UserResult<Vec<User>>;

    async fn create(&self, name: &str, email: &str, password_hash: &str) -> UserResult<User>;

    /// Sets `name` and `email` only.
    async fn update(&self, id: ObjectId, name: &str, email: &str) -> UserResult<UpdateAck>;

    /// Sets `password` only.
    async fn change_password(&self, id: ObjectId, password_hash: &str) -> UserResult<UpdateAck>;

    async fn delete(&self, id: ObjectId) -> UserResult<DeleteAck>;

    async fn search_by_name(
        &self,
        pattern: &str,
        page_number: u64,
        page_size: u64,
    ) -> UserResult<Page<User>> {
        let users = self.find_by_name(pattern).await.inspect_err(|e| {
            error!(error = %e, pattern, "search users by name failed");
        })?;
        Ok(paginate(users, page_number, page_size))
    }

    async fn list_page(&self, page_number: u64, page_size: u64) -> UserResult<Page<User>> {
        let users = self.list_all().await.inspect_err(|e| {
            error!(error = %e, "list users failed");
        })?;
        Ok(paginate(users, page_number, page_size))
    }
}

pub struct MongoUserRepo {
    collection: Collection<User>,
}

impl MongoUserRepo {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<User>(collection_name),
        }
    }

    fn name_filter(pattern: &str) -> Document {
        doc! { "name": { "$regex": regex::escape(pattern), "$options": "i" } }
    }

    fn by_id(id: ObjectId) -> Document {
        doc! { "_id": id }
    }
}

#[async_trait]
impl UserRepo for MongoUserRepo {
    #[instrument(skip(self))]
    async fn list_all(&self) -> UserResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(Self::by_id(id)).await?)
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, pattern: &str) -> UserResult<Vec<User>> {
        let filter = Self::name_filter(pattern);
        debug!(?filter, "find users by name");
        let cursor = self.collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> UserResult<User> {
        let user = User {
            id: ObjectId::new(),
            name: name.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
        };
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: ObjectId, name: &str, email: &str) -> UserResult<UpdateAck> {
        let res = self
            .collection
            .update_one(
                Self::by_id(id),
                doc! { "$set": { "name": name, "email": email } },
            )
            .await?;
        Ok(res.into())
    }

    #[instrument(skip(self, password_hash))]
    async fn change_password(&self, id: ObjectId, password_hash: &str) -> UserResult<UpdateAck> {
        let res = self
            .collection
            .update_one(
                Self::by_id(id),
                doc! { "$set": { "password": password_hash } },
            )
            .await?;
        Ok(res.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> UserResult<DeleteAck> {
        let res = self.collection.delete_one(Self::by_id(id)).await?;
        Ok(res.into())
    }
}
