use std::fmt;

/// Failure of one backend call, split the way the UI reacts to it.
#[derive(Debug)]
pub enum ApiError {
    /// No usable response: connection failure, or an undecodable body.
    Network(reqwest::Error),
    /// HTTP 401 on an authenticated call. Forces the logged-out transition.
    Unauthorized,
    /// Any other non-2xx response, body read once. `detail` is the backend's
    /// string `detail` field when the payload carries one.
    Server {
        status: u16,
        detail: Option<String>,
        body: String,
    },
}

impl ApiError {
    pub fn server(status: u16, body: String) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| value.get("detail").and_then(|d| d.as_str()).map(str::to_owned));
        Self::Server {
            status,
            detail,
            body,
        }
    }

    /// Message shown inline in the auth modal: the `detail` string verbatim
    /// when present, the raw payload otherwise, a fixed message when there
    /// was no response at all.
    pub fn inline_message(&self) -> String {
        match self {
            Self::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Server { body, .. } => body.clone(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::Network(_) => "Network error".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(err) => write!(f, "network error: {err}"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Server { status, body, .. } => write!(f, "server error {status}: {body}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err)
    }
}
