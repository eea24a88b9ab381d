//! Admin profile Model

use serde::{Deserialize, Serialize};

use super::user::UserId;

/// The signed-in admin, as returned by `/auth/profile` and login responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl AdminProfile {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}
