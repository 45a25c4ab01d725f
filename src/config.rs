use std::{env, path::PathBuf};

/// Runtime configuration, resolved once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub token_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let api_base = env::var("TASKBOARD_API_BASE")
            .unwrap_or_else(|_| "http://127.0.0.1:8001".to_string());
        let token_path = env::var("TASKBOARD_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/session.json"));
        Self::new(api_base, token_path)
    }

    pub fn new(api_base: impl Into<String>, token_path: PathBuf) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token_path,
        }
    }
}
