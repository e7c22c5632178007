//! GoTrue client: password sign-in and sign-up, sign-out, password
//! recovery, and session persistence in `localStorage`.

use gloo_net::http::{Request, Response};
use gloo_utils::window;
use leptos::logging::{log, warn};
use leptos::{SignalGetUntracked, SignalSet};
use serde::Deserialize;
use serde_json::json;

use crate::error::AuthError;
use crate::store::{AuthProvider, AuthUser, Session, SignUpOutcome};

use super::Supabase;

const SESSION_STORAGE_KEY: &str = "rentscore.auth.session";

#[derive(Debug, Clone, Deserialize)]
struct UserPayload {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<serde_json::Value>,
}

impl UserPayload {
    fn into_user(self) -> AuthUser {
        let full_name = self
            .user_metadata
            .as_ref()
            .and_then(|meta| meta.get("full_name"))
            .and_then(|name| name.as_str())
            .map(str::to_string);
        AuthUser {
            id: self.id,
            email: self.email,
            full_name,
        }
    }
}

/// GoTrue answers `/token` with a full session, and `/signup` with either
/// a session or a bare user object when confirmation is pending. One
/// lenient shape covers all of them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SessionPayload {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<UserPayload>,
    id: Option<String>,
}

/// Tokens carried in the URL fragment of a password-recovery link.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Parses `#access_token=…&refresh_token=…&type=recovery` fragments.
/// Anything that is not a recovery fragment yields `None`.
pub fn parse_recovery_fragment(fragment: &str) -> Option<RecoveryTokens> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut access_token = None;
    let mut refresh_token = None;
    let mut kind = None;
    for pair in fragment.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(value)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| value.to_string());
        match key {
            "access_token" => access_token = Some(value),
            "refresh_token" => refresh_token = Some(value),
            "type" => kind = Some(value),
            _ => {}
        }
    }
    if kind.as_deref() != Some("recovery") {
        return None;
    }
    let access_token = access_token.filter(|token| !token.is_empty())?;
    Some(RecoveryTokens {
        access_token,
        refresh_token,
    })
}

fn classify_auth_message(message: &str) -> AuthError {
    let lower = message.to_lowercase();
    if lower.contains("invalid login credentials") || lower.contains("invalid_credentials") {
        AuthError::InvalidCredentials
    } else if lower.contains("email not confirmed") {
        AuthError::EmailNotConfirmed
    } else if lower.contains("already registered")
        || lower.contains("already been registered")
        || lower.contains("already in use")
    {
        AuthError::AlreadyRegistered
    } else if lower.contains("email address") && lower.contains("invalid") {
        AuthError::InvalidEmail
    } else {
        AuthError::Provider(message.to_string())
    }
}

/// GoTrue error bodies have changed shape over releases; look for the
/// message under all the keys it has lived at.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["error_description", "msg", "message", "error"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            if !message.is_empty() {
                return Some(message.to_string());
            }
        }
    }
    None
}

fn classify_auth_failure(status: u16, body: &str) -> AuthError {
    let message =
        extract_error_message(body).unwrap_or_else(|| format!("auth request failed with status {status}"));
    classify_auth_message(&message)
}

async fn failure_from(response: Response) -> AuthError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    classify_auth_failure(status, &body)
}

fn auth_network(err: gloo_net::Error) -> AuthError {
    AuthError::Network(err.to_string())
}

fn session_from_payload(payload: SessionPayload) -> Result<Session, AuthError> {
    match (payload.access_token, payload.user) {
        (Some(access_token), Some(user)) => Ok(Session {
            access_token,
            refresh_token: payload.refresh_token,
            user: user.into_user(),
        }),
        _ => Err(AuthError::Provider(
            "el servidor devolvió una sesión incompleta".to_string(),
        )),
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    window().local_storage().ok().flatten()
}

impl Supabase {
    /// Replaces the in-memory session and mirrors the change to
    /// `localStorage`. Only ever called from the browser.
    fn remember_session(&self, session: Option<Session>) {
        if let Some(storage) = local_storage() {
            let stored = match &session {
                Some(session) => serde_json::to_string(session)
                    .ok()
                    .and_then(|raw| storage.set_item(SESSION_STORAGE_KEY, &raw).ok()),
                None => storage.remove_item(SESSION_STORAGE_KEY).ok(),
            };
            if stored.is_none() {
                warn!("[AUTH] could not persist the session to localStorage");
            }
        }
        self.session.set(session);
    }

    /// Rehydrates the session from `localStorage`. Called from a
    /// client-side effect; the server never sees a session.
    pub fn restore_session(&self) {
        let Some(storage) = local_storage() else {
            return;
        };
        let Ok(Some(raw)) = storage.get_item(SESSION_STORAGE_KEY) else {
            return;
        };
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                log!("[AUTH] session restored for {}", session.user.id);
                self.session.set(Some(session));
            }
            Err(err) => {
                warn!("[AUTH] discarding unreadable stored session: {err}");
                let _ = storage.remove_item(SESSION_STORAGE_KEY);
            }
        }
    }

    /// Adopts the short-lived session a password-recovery link carries in
    /// its URL fragment, so the reset form can change the password.
    /// Returns whether a recovery session is now active.
    pub async fn adopt_recovery_session(&self) -> bool {
        let hash = window().location().hash().unwrap_or_default();
        let Some(tokens) = parse_recovery_fragment(&hash) else {
            return self.session.get_untracked().is_some();
        };
        match self.fetch_user(&tokens.access_token).await {
            Ok(user) => {
                log!("[AUTH] recovery session adopted for {}", user.id);
                self.remember_session(Some(Session {
                    access_token: tokens.access_token,
                    refresh_token: tokens.refresh_token,
                    user,
                }));
                true
            }
            Err(err) => {
                warn!("[AUTH] recovery token rejected: {err}");
                false
            }
        }
    }

    async fn fetch_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let url = format!("{}/user", self.config.auth_url());
        let response = Request::get(&url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(auth_network)?;
        if !response.ok() {
            return Err(failure_from(response).await);
        }
        let payload: UserPayload = response
            .json()
            .await
            .map_err(|err| AuthError::Provider(format!("could not decode user payload: {err}")))?;
        Ok(payload.into_user())
    }
}

impl AuthProvider for Supabase {
    fn current_session(&self) -> Option<Session> {
        self.session.get_untracked()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = format!("{}/token?grant_type=password", self.config.auth_url());
        let request = Request::post(&url)
            .header("apikey", &self.config.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .map_err(auth_network)?;
        let response = request.send().await.map_err(auth_network)?;
        if !response.ok() {
            return Err(failure_from(response).await);
        }
        let payload: SessionPayload = response
            .json()
            .await
            .map_err(|err| AuthError::Provider(format!("could not decode session: {err}")))?;
        let session = session_from_payload(payload)?;
        log!("[AUTH] signed in as {}", session.user.id);
        self.remember_session(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let url = format!("{}/signup", self.config.auth_url());
        let request = Request::post(&url)
            .header("apikey", &self.config.anon_key)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name },
            }))
            .map_err(auth_network)?;
        let response = request.send().await.map_err(auth_network)?;
        if !response.ok() {
            return Err(failure_from(response).await);
        }
        let payload: SessionPayload = response
            .json()
            .await
            .map_err(|err| AuthError::Provider(format!("could not decode signup reply: {err}")))?;

        let user_id = payload
            .user
            .as_ref()
            .map(|user| user.id.clone())
            .or_else(|| payload.id.clone());
        let mut outcome = SignUpOutcome {
            user_id,
            session: None,
        };
        if let (Some(access_token), Some(user)) = (payload.access_token, payload.user) {
            let session = Session {
                access_token,
                refresh_token: payload.refresh_token,
                user: user.into_user(),
            };
            log!("[AUTH] signed up and in as {}", session.user.id);
            self.remember_session(Some(session.clone()));
            outcome.session = Some(session);
        } else {
            log!("[AUTH] signup accepted, email confirmation pending");
        }
        Ok(outcome)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(session) = self.session.get_untracked() {
            let url = format!("{}/logout", self.config.auth_url());
            let result = Request::post(&url)
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {}", session.access_token))
                .send()
                .await;
            if let Err(err) = result {
                warn!("[AUTH] logout request failed, clearing the local session anyway: {err}");
            }
        }
        self.remember_session(None);
        log!("[AUTH] signed out");
        Ok(())
    }

    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), AuthError> {
        let url = format!(
            "{}/recover?redirect_to={}",
            self.config.auth_url(),
            urlencoding::encode(redirect_to)
        );
        let request = Request::post(&url)
            .header("apikey", &self.config.anon_key)
            .json(&json!({ "email": email }))
            .map_err(auth_network)?;
        let response = request.send().await.map_err(auth_network)?;
        if !response.ok() {
            return Err(failure_from(response).await);
        }
        log!("[AUTH] recovery email requested");
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> Result<(), AuthError> {
        let session = self.session.get_untracked().ok_or(AuthError::NotSignedIn)?;
        let url = format!("{}/user", self.config.auth_url());
        let request = Request::put(&url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {}", session.access_token))
            .json(&json!({ "password": new_password }))
            .map_err(auth_network)?;
        let response = request.send().await.map_err(auth_network)?;
        if !response.ok() {
            return Err(failure_from(response).await);
        }
        log!("[AUTH] password updated for {}", session.user.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_fragments_are_parsed() {
        let tokens = parse_recovery_fragment(
            "#access_token=abc123&expires_in=3600&refresh_token=def456&token_type=bearer&type=recovery",
        )
        .unwrap();
        assert_eq!(tokens.access_token, "abc123");
        assert_eq!(tokens.refresh_token.as_deref(), Some("def456"));
    }

    #[test]
    fn non_recovery_fragments_are_ignored() {
        assert_eq!(parse_recovery_fragment(""), None);
        assert_eq!(parse_recovery_fragment("#access_token=abc&type=signup"), None);
        assert_eq!(parse_recovery_fragment("#type=recovery"), None);
        assert_eq!(parse_recovery_fragment("#access_token=&type=recovery"), None);
    }

    #[test]
    fn fragment_values_are_percent_decoded() {
        let tokens = parse_recovery_fragment("#access_token=a%2Bb&type=recovery").unwrap();
        assert_eq!(tokens.access_token, "a+b");
    }

    #[test]
    fn credential_failures_are_classified() {
        assert_eq!(
            classify_auth_message("Invalid login credentials"),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            classify_auth_message("Email not confirmed"),
            AuthError::EmailNotConfirmed
        );
        assert_eq!(
            classify_auth_message("User already registered"),
            AuthError::AlreadyRegistered
        );
        assert_eq!(
            classify_auth_message("Email address \"a@b\" is invalid"),
            AuthError::InvalidEmail
        );
        assert_eq!(
            classify_auth_message("Database error"),
            AuthError::Provider("Database error".to_string())
        );
    }

    #[test]
    fn error_messages_are_found_under_old_and_new_keys() {
        assert_eq!(
            extract_error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
                .as_deref(),
            Some("Invalid login credentials")
        );
        assert_eq!(
            extract_error_message(r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#)
                .as_deref(),
            Some("Invalid login credentials")
        );
        assert_eq!(extract_error_message("not json"), None);
    }

    #[test]
    fn status_line_stands_in_for_unreadable_bodies() {
        assert_eq!(
            classify_auth_failure(502, "<html>bad gateway</html>"),
            AuthError::Provider("auth request failed with status 502".to_string())
        );
    }

    #[test]
    fn full_name_is_lifted_from_user_metadata() {
        let payload: UserPayload = serde_json::from_str(
            r#"{"id":"u1","email":"ana@example.com","user_metadata":{"full_name":"Ana Flores"}}"#,
        )
        .unwrap();
        let user = payload.into_user();
        assert_eq!(user.full_name.as_deref(), Some("Ana Flores"));
        assert_eq!(user.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn incomplete_session_payloads_are_rejected() {
        let payload: SessionPayload =
            serde_json::from_str(r#"{"id":"u1","email":"ana@example.com"}"#).unwrap();
        assert!(session_from_payload(payload).is_err());
    }
}
