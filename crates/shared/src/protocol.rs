//! Response bodies of the GitHub REST endpoints the portal calls.

use serde::{Deserialize, Serialize};

use crate::domain::Permission;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadmeResponse {
    pub content: String,
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

fn default_encoding() -> String {
    "base64".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub login: String,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorPermissionResponse {
    pub permission: Permission,
    #[serde(default)]
    pub role_name: Option<String>,
}
