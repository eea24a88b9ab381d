//! Auth slice
//!
//! Token and profile live in the [`Session`](admin_client::Session); the
//! slice only tracks request status for the login screen.

use admin_client::{ClientError, ClientResult, HttpClient, LogoutReason};
use shared::client::{ResetPasswordRequest, UpdateProfileRequest};
use shared::{AdminProfile, AuthPayload};

use super::Store;
use crate::error::{ConsoleError, ConsoleResult};
use crate::notice::Notice;
use crate::validation::{
    ChangePasswordForm, ForgotPasswordForm, LoginForm, ProfileForm, ResetPasswordForm,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub status: AuthStatus,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// Initial state when a persisted token was (or was not) found
    pub fn restored(has_token: bool) -> Self {
        Self {
            status: if has_token {
                AuthStatus::Succeeded
            } else {
                AuthStatus::Idle
            },
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub enum AuthAction {
    LoginPending,
    LoginFulfilled,
    LoginRejected { error: String },
    ProfilePending,
    ProfileFulfilled,
    ProfileRejected { error: String },
    LoggedOut,
    /// Any request answered 401
    SessionExpired,
    ClearError,
}

impl AuthState {
    pub fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::LoginPending | AuthAction::ProfilePending => {
                self.loading = true;
                self.status = AuthStatus::Loading;
                self.error = None;
            }
            AuthAction::LoginFulfilled | AuthAction::ProfileFulfilled => {
                self.loading = false;
                self.status = AuthStatus::Succeeded;
            }
            AuthAction::LoginRejected { error } | AuthAction::ProfileRejected { error } => {
                self.loading = false;
                self.status = AuthStatus::Failed;
                self.error = Some(error);
            }
            AuthAction::LoggedOut | AuthAction::SessionExpired => {
                *self = AuthState::default();
            }
            AuthAction::ClearError => self.error = None,
        }
    }
}

impl<C: HttpClient> Store<C> {
    /// Admin login with email + password
    pub async fn login(&self, form: &LoginForm) -> ConsoleResult<AdminProfile> {
        form.validate().map_err(ConsoleError::Invalid)?;
        self.dispatch_auth(AuthAction::LoginPending);
        let result = self
            .api()
            .auth()
            .login(form.email.trim(), &form.password)
            .await;
        self.finish_login(result, "Login failed").await
    }

    /// Sign in with a Google ID token
    pub async fn google_login(&self, id_token: &str) -> ConsoleResult<AdminProfile> {
        self.dispatch_auth(AuthAction::LoginPending);
        let result = self.api().auth().google(id_token).await;
        self.finish_login(result, "Google Login failed").await
    }

    async fn finish_login(
        &self,
        result: ClientResult<AuthPayload>,
        fallback: &str,
    ) -> ConsoleResult<AdminProfile> {
        let payload = match result {
            Ok(payload) => payload,
            Err(ClientError::Unauthorized(message)) => {
                // Wrong credentials, not an expired session
                self.notices().push(Notice::error(message.clone()));
                self.dispatch_auth(AuthAction::LoginRejected {
                    error: message.clone(),
                });
                return Err(ClientError::Unauthorized(message).into());
            }
            Err(e) => {
                let error = self.report(&e, fallback);
                self.dispatch_auth(AuthAction::LoginRejected { error });
                return Err(e.into());
            }
        };
        let Some(token) = payload.bearer_token().map(str::to_string) else {
            let err = ConsoleError::MissingToken;
            self.notices().push(Notice::error(err.to_string()));
            self.dispatch_auth(AuthAction::LoginRejected {
                error: err.to_string(),
            });
            return Err(err);
        };
        self.api().sign_in(token, payload.user.clone())?;

        let profile = match payload.user {
            Some(profile) => profile,
            None => match self.api().auth().profile().await {
                Ok(profile) => {
                    self.session().set_profile(profile.clone());
                    profile
                }
                Err(e) => {
                    let error = self.report(&e, "Failed to fetch profile");
                    self.dispatch_auth(AuthAction::LoginRejected { error });
                    return Err(e.into());
                }
            },
        };
        tracing::info!(admin = %profile.email, "Admin signed in");
        self.dispatch_auth(AuthAction::LoginFulfilled);
        Ok(profile)
    }

    /// Refresh the signed-in admin's profile
    pub async fn fetch_profile(&self) -> ConsoleResult<AdminProfile> {
        self.dispatch_auth(AuthAction::ProfilePending);
        match self.api().auth().profile().await {
            Ok(profile) => {
                self.session().set_profile(profile.clone());
                self.dispatch_auth(AuthAction::ProfileFulfilled);
                Ok(profile)
            }
            Err(e) => {
                let error = self.report(&e, "Failed to fetch profile");
                if !e.is_unauthorized() {
                    self.dispatch_auth(AuthAction::ProfileRejected { error });
                }
                Err(e.into())
            }
        }
    }

    /// Rename the signed-in admin (and optionally point at a new avatar),
    /// then refresh the session profile
    pub async fn update_profile(&self, form: &ProfileForm) -> ConsoleResult<AdminProfile> {
        form.validate().map_err(ConsoleError::Invalid)?;
        let req = UpdateProfileRequest {
            name: Some(form.name.trim().to_string()),
            email: None,
            profile_image: form.profile_image.clone(),
        };
        if let Err(e) = self.api().auth().update_profile(&req).await {
            self.report(&e, "Failed to update name");
            return Err(e.into());
        }
        let profile = self.fetch_profile().await?;
        tracing::info!(admin = %profile.email, "Admin profile updated");
        self.notices().push(Notice::success("Profile updated successfully"));
        Ok(profile)
    }

    /// Ask the backend to email a password reset code
    pub async fn forgot_password(&self, form: &ForgotPasswordForm) -> ConsoleResult<()> {
        form.validate().map_err(ConsoleError::Invalid)?;
        match self.api().auth().forgot_password(form.email.trim()).await {
            Ok(ack) => {
                let message = ack
                    .message
                    .unwrap_or_else(|| "Reset code sent to your email".to_string());
                self.notices().push(Notice::success(message));
                Ok(())
            }
            Err(e) => {
                self.report(&e, "Failed to send reset code");
                Err(e.into())
            }
        }
    }

    pub async fn reset_password(&self, form: &ResetPasswordForm) -> ConsoleResult<()> {
        form.validate().map_err(ConsoleError::Invalid)?;
        let req = ResetPasswordRequest {
            email: form.email.trim().to_string(),
            otp: form.otp.trim().to_string(),
            new_password: form.new_password.clone(),
        };
        match self.api().auth().reset_password(&req).await {
            Ok(ack) => {
                let message = ack
                    .message
                    .unwrap_or_else(|| "Password reset successfully".to_string());
                self.notices().push(Notice::success(message));
                Ok(())
            }
            Err(e) => {
                self.report(&e, "Failed to reset password");
                Err(e.into())
            }
        }
    }

    pub fn logout(&self) {
        self.session().logout(LogoutReason::UserRequested);
        self.api().cache().clear();
        self.dispatch_auth(AuthAction::LoggedOut);
    }

    pub async fn change_password(&self, form: &ChangePasswordForm) -> ConsoleResult<()> {
        form.validate().map_err(ConsoleError::Invalid)?;
        match self
            .api()
            .auth()
            .update_password(&form.current_password, &form.new_password)
            .await
        {
            Ok(ack) => {
                let message = ack
                    .message
                    .unwrap_or_else(|| "Password updated successfully".to_string());
                self.notices().push(Notice::success(message));
                Ok(())
            }
            Err(e) => {
                self.report(&e, "Failed to update password");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_lifecycle() {
        let mut state = AuthState::default();
        state.reduce(AuthAction::LoginPending);
        assert!(state.loading);
        assert_eq!(state.status, AuthStatus::Loading);

        state.reduce(AuthAction::LoginRejected {
            error: "Invalid credentials".into(),
        });
        assert!(!state.loading);
        assert_eq!(state.status, AuthStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));

        state.reduce(AuthAction::LoginPending);
        assert_eq!(state.error, None);
        state.reduce(AuthAction::LoginFulfilled);
        assert_eq!(state.status, AuthStatus::Succeeded);
    }

    #[test]
    fn test_session_expired_resets() {
        let mut state = AuthState::restored(true);
        assert_eq!(state.status, AuthStatus::Succeeded);
        state.reduce(AuthAction::SessionExpired);
        assert_eq!(state, AuthState::default());
    }
}
