//! Account endpoints: sign-in, registration, profile and password recovery.

use quire_core::model::{Role, User};
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, json_at};
use crate::error::ApiError;
use crate::session::Session;

#[derive(Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthPayload {
    token: Option<String>,
    user: User,
}

impl ApiClient {
    /// `POST /auth/login`. On success the session begins and is persisted.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let resp = self.send(self.post("/auth/login").json(credentials)).await?;
        self.begin_session(resp).await
    }

    /// `POST /auth/register`. The service signs the new account in
    /// immediately, so this persists a session just like login.
    pub async fn register(&self, registration: &Registration) -> Result<Session, ApiError> {
        let resp = self
            .send(self.post("/auth/register").json(registration))
            .await?;
        self.begin_session(resp).await
    }

    async fn begin_session(&self, resp: reqwest::Response) -> Result<Session, ApiError> {
        let payload: AuthPayload = json_at(resp, &[]).await?;
        let token = payload
            .token
            .ok_or_else(|| ApiError::Decode("response did not include a token".into()))?;
        let session = Session::begin(token, payload.user)?;
        self.store().save(&session)?;
        Ok(session)
    }

    /// `GET /auth/me` — the profile as the server currently sees it.
    pub async fn me(&self) -> Result<User, ApiError> {
        let resp = self.send(self.get("/auth/me")).await?;
        json_at(resp, &["user"]).await
    }

    /// `PUT /auth/profile`. The cached session profile is refreshed on
    /// success.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let resp = self.send(self.put("/auth/profile").json(update)).await?;
        let user: User = json_at(resp, &["user"]).await?;

        let mut session = self.session();
        if session.is_authenticated() {
            session.user = Some(user.clone());
            self.store().save(&session)?;
        }
        Ok(user)
    }

    /// `POST /auth/forgot-password`.
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.send(
            self.post("/auth/forgot-password")
                .json(&serde_json::json!({ "email": email })),
        )
        .await?;
        Ok(())
    }

    /// `POST /auth/reset-password/:token`.
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), ApiError> {
        self.send(
            self.post(&format!("/auth/reset-password/{token}"))
                .json(&serde_json::json!({ "password": password })),
        )
        .await?;
        Ok(())
    }

    /// Tear down the local session. Purely local; the service keeps no
    /// server-side session to destroy.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.store().clear()?;
        Ok(())
    }
}
