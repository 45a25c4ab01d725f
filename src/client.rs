use crate::errors::ApiError;
use crate::models::{GenerateRequest, LoginRequest, RegisterRequest, Task, TokenResponse};
use reqwest::{Client, Response, StatusCode};

/// HTTP client for the transcript-to-tasks backend, one method per
/// endpoint. Built without a request timeout, matching the service's
/// expectation that the UI rides out slow generation calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let response = check(response, false).await?;
        Ok(response.json::<TokenResponse>().await?.access_token)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/register"))
            .json(&RegisterRequest {
                email,
                password,
                name,
            })
            .send()
            .await?;
        let response = check(response, false).await?;
        Ok(response.json::<TokenResponse>().await?.access_token)
    }

    pub async fn tasks(&self, token: &str) -> Result<Vec<Task>, ApiError> {
        let response = self
            .http
            .get(self.url("/tasks"))
            .bearer_auth(token)
            .send()
            .await?;
        let response = check(response, true).await?;
        Ok(response.json().await?)
    }

    pub async fn generate_tasks(&self, token: &str, transcript: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/generate-tasks"))
            .bearer_auth(token)
            .json(&GenerateRequest { transcript })
            .send()
            .await?;
        check(response, true).await?;
        Ok(())
    }

    pub async fn complete_task(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/tasks/{id}/complete")))
            .bearer_auth(token)
            .send()
            .await?;
        check(response, true).await?;
        Ok(())
    }

    pub async fn delete_task(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/tasks/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        check(response, true).await?;
        Ok(())
    }
}

/// Maps a response to the error taxonomy. A 401 is `Unauthorized` only on
/// authenticated calls; on `/login` and `/register` it is an ordinary
/// server error carrying the credential `detail`.
async fn check(response: Response, authenticated: bool) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if authenticated && status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::server(status.as_u16(), body))
}
