//! `/auth/*` endpoints

use std::time::Duration;

use shared::client::{
    EmailRequest, GoogleAuthRequest, ResetPasswordRequest, UpdatePasswordRequest,
    UpdateProfileRequest,
};
use shared::{Ack, AdminProfile, AuthPayload, LoginRequest};

use super::AdminApi;
use crate::cache::{Tag, TagType};
use crate::http::HttpClient;
use crate::ClientResult;

pub struct AuthApi<'a, C> {
    api: &'a AdminApi<C>,
}

impl<'a, C: HttpClient> AuthApi<'a, C> {
    pub(super) fn new(api: &'a AdminApi<C>) -> Self {
        Self { api }
    }

    /// Admin login with email + password
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthPayload> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.api
            .mutate(
                &[TagType::Profile.into()],
                self.api.http.post("auth/admin/login", &req),
            )
            .await
    }

    /// Exchange a Google ID token for a backend session
    pub async fn google(&self, id_token: &str) -> ClientResult<AuthPayload> {
        let req = GoogleAuthRequest {
            id_token: id_token.to_string(),
        };
        self.api
            .mutate(
                &[TagType::Profile.into()],
                self.api.http.post("auth/google", &req),
            )
            .await
    }

    /// Current admin profile; never served from cache
    pub async fn profile(&self) -> ClientResult<AdminProfile> {
        self.api
            .query(
                "auth/profile".to_string(),
                vec![Tag::Type(TagType::Profile)],
                Some(Duration::ZERO),
                || self.api.http.get_fresh("auth/profile"),
            )
            .await
    }

    pub async fn update_profile(&self, req: &UpdateProfileRequest) -> ClientResult<Ack> {
        self.api
            .mutate(
                &[TagType::Profile.into()],
                self.api.http.put("auth/update-profile", req),
            )
            .await
    }

    pub async fn update_password(&self, current: &str, new: &str) -> ClientResult<Ack> {
        let req = UpdatePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        self.api.http.put("auth/update-password", &req).await
    }

    pub async fn forgot_password(&self, email: &str) -> ClientResult<Ack> {
        let req = EmailRequest {
            email: email.to_string(),
        };
        self.api.http.post("auth/forgot-password", &req).await
    }

    pub async fn reset_password(&self, req: &ResetPasswordRequest) -> ClientResult<Ack> {
        self.api.http.post("auth/reset-password", req).await
    }
}
