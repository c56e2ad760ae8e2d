use std::sync::atomic::{AtomicBool, Ordering};

use derive_more::{Display, Error};
use reqwest::{Method, StatusCode};
use serde_json::json;

use common::{
    auth::Auth,
    entities::letter::{CreatedLetter, Letter, LetterOverview},
    error::ServiceError,
};

use crate::session::SavePayload;

/// Title a fresh letter starts with, before the first edit.
pub const DEFAULT_TITLE: &str = "Untitled Post";

#[derive(Debug, Display, Error)]
pub enum ApiError {
    #[display(fmt = "Limit of 3 posts reached. Please upgrade to the PRO plan.")]
    PlanLimitReached,
    #[display(fmt = "Something went wrong. Your post was not created. Please try again.")]
    CreateFailed,
    #[display(fmt = "Something went wrong. Your letter was not saved. Please try again.")]
    SaveFailed,
    #[display(fmt = "A request is already in flight")]
    AlreadyInFlight,
    #[display(fmt = "Request failed with status {}", _0)]
    Status(#[error(not(source))] u16),
    Transport(reqwest::Error),
    Token(#[error(not(source))] ServiceError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Token(err)
    }
}

/// Client for the letters API, authorized as one user.
pub struct LettersApi {
    client: reqwest::Client,
    base_url: String,
    auth: Auth,
}

impl LettersApi {
    pub fn new(base_url: String, auth: Auth) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            auth,
        }
    }

    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, ApiError> {
        let token = self.auth.to_token()?;
        Ok(self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", token)))
    }

    pub async fn list(&self) -> Result<Vec<LetterOverview>, ApiError> {
        let response = self.request(Method::GET, "/api/letters")?.send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    pub async fn fetch(&self, id: &str) -> Result<Letter<String>, ApiError> {
        let response = self
            .request(Method::GET, &format!("/api/letters/{}", id))?
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    pub async fn create(&self, title: &str) -> Result<CreatedLetter, ApiError> {
        let response = self
            .request(Method::POST, "/api/letters")?
            .json(&json!({ "title": title }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(create_failure(response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn save(&self, id: &str, payload: &SavePayload) -> Result<(), ApiError> {
        let response = self
            .request(Method::PATCH, &format!("/api/letters/{}", id))?
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::SaveFailed);
        }
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, &format!("/api/letters/{}", id))?
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

// 402 carries the plan-limit message even though no endpoint emits it today.
fn create_failure(status: StatusCode) -> ApiError {
    if status == StatusCode::PAYMENT_REQUIRED {
        ApiError::PlanLimitReached
    } else {
        ApiError::CreateFailed
    }
}

/// The "Get started" action: creates a letter with the placeholder title
/// and yields its id for navigation into the editor. Disabled while a
/// request is pending.
pub struct CreateTrigger {
    api: LettersApi,
    in_flight: AtomicBool,
}

impl CreateTrigger {
    pub fn new(api: LettersApi) -> Self {
        Self {
            api,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub async fn trigger(&self) -> Result<String, ApiError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(ApiError::AlreadyInFlight);
        }

        let result = self.api.create(DEFAULT_TITLE).await;
        self.in_flight.store(false, Ordering::SeqCst);

        result.map(|created| created.id)
    }
}

#[cfg(test)]
mod test {
    use mongodb::bson::oid::ObjectId;
    use reqwest::StatusCode;

    use common::auth::Auth;

    use super::{create_failure, ApiError, CreateTrigger, LettersApi, DEFAULT_TITLE};

    #[test]
    fn plan_limit_has_its_own_message() {
        let err = create_failure(StatusCode::PAYMENT_REQUIRED);
        assert!(matches!(err, ApiError::PlanLimitReached));
        assert!(err.to_string().contains("Limit of 3 posts reached"));
    }

    #[test]
    fn other_create_failures_are_generic() {
        assert!(matches!(
            create_failure(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::CreateFailed
        ));
        assert!(matches!(
            create_failure(StatusCode::FORBIDDEN),
            ApiError::CreateFailed
        ));
    }

    #[test]
    fn placeholder_title_matches_the_button() {
        assert_eq!(DEFAULT_TITLE, "Untitled Post");
    }

    #[tokio::test]
    async fn trigger_rearms_after_a_failed_request() {
        std::env::set_var("JWT_SECRET", "editor-test-secret");

        // Nothing listens here; the request itself fails either way.
        let api = LettersApi::new(
            "http://127.0.0.1:9".to_string(),
            Auth::User(ObjectId::new()),
        );
        let trigger = CreateTrigger::new(api);

        assert!(trigger.trigger().await.is_err());
        assert!(!trigger.is_in_flight());

        // A second shot is not blocked by the guard.
        assert!(!matches!(
            trigger.trigger().await,
            Err(ApiError::AlreadyInFlight)
        ));
    }
}
