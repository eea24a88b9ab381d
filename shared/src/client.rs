//! Client-related request/response types
//!
//! Bodies sent to and received from the backend REST API.
//! Field names follow the backend's camelCase JSON.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AdminProfile, AffiliateTier, PlanTier, UserId};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Admin login request (`POST /auth/admin/login`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Google sign-in request (`POST /auth/google`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAuthRequest {
    pub id_token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthData {
    #[serde(default)]
    pub token: Option<String>,
}

/// Login / google-auth response
///
/// The backend is inconsistent about where it puts the token; the first of
/// `token`, `accessToken`, `data.token` wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub data: Option<AuthData>,
    #[serde(default)]
    pub user: Option<AdminProfile>,
}

impl AuthPayload {
    pub fn bearer_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .or(self.access_token.as_deref())
            .or_else(|| self.data.as_ref().and_then(|d| d.token.as_deref()))
            .filter(|t| !t.is_empty())
    }
}

/// `PUT /auth/update-password`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// `PUT /auth/update-profile`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// `POST /auth/forgot-password`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// `POST /auth/reset-password`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

// =============================================================================
// Admin API DTOs
// =============================================================================

/// `PUT /admin/update-tier`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTierRequest {
    pub user_id: UserId,
    pub tier: AffiliateTier,
}

/// `PUT /admin/users/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanTier>,
}

/// `PATCH /admin/users/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatusRequest {
    pub status: String,
}

/// `POST /admin/payout-confirm`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutConfirmRequest {
    pub user_id: UserId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

// =============================================================================
// Subscription API DTOs
// =============================================================================

/// Purchasable items of the subscription catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutItem {
    Basic,
    Pro,
    ProPlus,
    TopUp,
}

impl CheckoutItem {
    pub fn plan_type(&self) -> &'static str {
        match self {
            CheckoutItem::Basic => "basic",
            CheckoutItem::Pro => "pro",
            CheckoutItem::ProPlus => "pro_plus",
            CheckoutItem::TopUp => "top_up",
        }
    }

    /// Environment variable holding the Stripe price id of this item
    pub fn price_env_var(&self) -> &'static str {
        match self {
            CheckoutItem::Basic => "STRIPE_PRICE_BASIC",
            CheckoutItem::Pro => "STRIPE_PRICE_PRO",
            CheckoutItem::ProPlus => "STRIPE_PRICE_PRO_PLUS",
            CheckoutItem::TopUp => "STRIPE_PRICE_TOP_UP",
        }
    }
}

/// `POST /subscription/create-checkout-session`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
    pub plan_type: String,
}

/// Hosted Stripe page returned by the subscription endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUrl {
    pub url: String,
}
