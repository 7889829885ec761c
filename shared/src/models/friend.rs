//! Friend Model

use serde::{Deserialize, Serialize};

/// Confirmed friend entry in the social graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friend {
    #[serde(alias = "friendId", alias = "userId")]
    pub user_id: String,
    pub name: String,
    pub email: String,
}

/// Incoming friend request awaiting accept/decline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequest {
    #[serde(alias = "requestId")]
    pub request_id: i64,
    #[serde(alias = "fromUserId")]
    pub from_user_id: String,
    #[serde(alias = "fromName")]
    pub from_name: String,
    #[serde(alias = "fromEmail")]
    pub from_email: String,
}
