//! User Model

use serde::{Deserialize, Serialize};

/// Authenticated user as reported by the auth backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(alias = "userId")]
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default, alias = "phoneNumber")]
    pub phone_number: Option<String>,
}
