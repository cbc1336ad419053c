//! REST client for the habit tracker endpoints, built on [`reqwest`].

use habitry_core::achievements::Insights;
use habitry_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{
    Category, CategoryPatch, DataEnvelope, Habit, HabitPatch, NewCategory, NewHabit,
};

/// HTTP client for one habit tracker server.
#[derive(Debug, Clone)]
pub struct HabitryApi {
    client: reqwest::Client,
    base_url: String,
}

impl HabitryApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- habits ----

    /// `GET /habits`, optionally filtered to one category.
    pub async fn list_habits(&self, category: Option<DbId>) -> Result<Vec<Habit>, ClientError> {
        let mut request = self.client.get(self.url("/habits"));
        if let Some(category) = category {
            request = request.query(&[("category", category.to_string())]);
        }
        Self::parse_data(request.send().await?).await
    }

    pub async fn get_habit(&self, id: DbId) -> Result<Habit, ClientError> {
        let response = self.client.get(self.url(&format!("/habits/{id}"))).send().await?;
        Self::parse_data(response).await
    }

    pub async fn create_habit(&self, habit: &NewHabit) -> Result<Habit, ClientError> {
        self.send_json(reqwest::Method::POST, "/habits".to_string(), habit)
            .await
    }

    pub async fn update_habit(&self, id: DbId, patch: &HabitPatch) -> Result<Habit, ClientError> {
        self.send_json(reqwest::Method::PATCH, format!("/habits/{id}"), patch)
            .await
    }

    /// Set a habit's completion. `true` extends the streak on the server.
    pub async fn set_completed(&self, id: DbId, completed: bool) -> Result<Habit, ClientError> {
        self.update_habit(id, &HabitPatch::completed(completed)).await
    }

    pub async fn delete_habit(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/habits/{id}")))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- categories ----

    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let response = self.client.get(self.url("/categories")).send().await?;
        Self::parse_data(response).await
    }

    pub async fn get_category(&self, id: DbId) -> Result<Category, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/categories/{id}")))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, ClientError> {
        self.send_json(reqwest::Method::POST, "/categories".to_string(), category)
            .await
    }

    pub async fn update_category(
        &self,
        id: DbId,
        patch: &CategoryPatch,
    ) -> Result<Category, ClientError> {
        self.send_json(reqwest::Method::PATCH, format!("/categories/{id}"), patch)
            .await
    }

    pub async fn delete_category(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/categories/{id}")))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- insights ----

    pub async fn insights(&self) -> Result<Insights, ClientError> {
        let response = self.client.get(self.url("/insights")).send().await?;
        Self::parse_data(response).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json<B, T>(
        &self,
        method: reqwest::Method,
        path: String,
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .request(method, self.url(&path))
            .json(body)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    /// Return the response unchanged on success, or a
    /// [`ClientError::Api`] parsed from the error envelope.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let err = ClientError::from_response_body(status.as_u16(), &body);
            tracing::debug!(status = status.as_u16(), error = %err, "API request failed");
            return Err(err);
        }
        Ok(response)
    }

    /// Parse a successful `{ "data": ... }` body.
    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let envelope: DataEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
