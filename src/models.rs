use serde::{Deserialize, Deserializer, Serialize};

/// A task as served by the backend. The backend serializes `id` as a JSON
/// integer; older payloads used strings. Either form is accepted and the id
/// is treated as an opaque string from then on.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "id_from_int_or_string")]
    pub id: String,
    pub text: String,
    pub status: String,
    #[serde(default)]
    pub priority: Option<String>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }
}

fn id_from_int_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

/// Success body of `/login` and `/register`. The backend also sends
/// `token_type` and `user`; only the token is read.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub transcript: &'a str,
}

/// Aggregate completed/pending counts derived from one task snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChartSummary {
    pub completed: usize,
    pub pending: usize,
}
