use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId, // assigned on insert, never changes
    pub name: String,
    pub email: String,
    pub password: String, // argon2 PHC string
}

/// Acknowledgment of a partial-field update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<mongodb::results::UpdateResult> for UpdateAck {
    fn from(r: mongodb::results::UpdateResult) -> Self {
        Self {
            acknowledged: true,
            matched_count: r.matched_count,
            modified_count: r.modified_count,
        }
    }
}

/// Acknowledgment of a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<mongodb::results::DeleteResult> for DeleteAck {
    fn from(r: mongodb::results::DeleteResult) -> Self {
        Self {
            acknowledged: true,
            deleted_count: r.deleted_count,
        }
    }
}
