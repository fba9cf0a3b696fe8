use serde::{Deserialize, Deserializer, Serialize};

/// The identity fields the backend reports for a signed-in visitor.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    /// Identity providers may omit names; the backend then sends `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub organization_id: String,
}

impl UserRecord {
    /// "First Last", without stray whitespace when either part is missing.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Body of `GET /api/user`. A session refresh answers 200 with only a
/// `message`, so `user` may be missing.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserEnvelope {
    #[serde(default)]
    pub user: Option<UserRecord>,
}

/// Body of `GET /api/logout`. A missing `url` means "stay where you are".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LogoutResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
