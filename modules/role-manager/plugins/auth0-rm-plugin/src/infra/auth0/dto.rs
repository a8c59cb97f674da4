//! Wire models of the Auth0 APIs used by the plugin.

use serde::{Deserialize, Serialize};

use crate::domain::{DirectoryGroup, DirectoryUser};

/// Client-credentials grant request body for `/oauth/token`.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub audience: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Management API user (`/api/v2/users`) or extension group member.
#[derive(Debug, Deserialize)]
pub struct UserDto {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Page returned by `/api/v2/users?include_totals=true`.
#[derive(Debug, Deserialize)]
pub struct UsersPage {
    pub users: Vec<UserDto>,
    #[serde(default)]
    pub total: Option<usize>,
}

/// Authorization Extension group.
#[derive(Debug, Deserialize)]
pub struct GroupDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of `GET /api/groups`.
#[derive(Debug, Deserialize)]
pub struct GroupsEnvelope {
    pub groups: Vec<GroupDto>,
}

/// Body of `GET /api/groups/{id}/members`.
#[derive(Debug, Deserialize)]
pub struct MembersEnvelope {
    pub users: Vec<UserDto>,
}

impl From<UserDto> for DirectoryUser {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.user_id,
            email: dto.email,
        }
    }
}

impl From<GroupDto> for DirectoryGroup {
    fn from(dto: GroupDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
        }
    }
}
