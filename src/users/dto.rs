use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// External view of a user. Never carries a credential.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// Request body for directory user creation.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response for directory user creation. `temporary_password` is only set when
/// the server generated the credential.
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub user: UserView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary_password: Option<String>,
}
