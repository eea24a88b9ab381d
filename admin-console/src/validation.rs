//! Client-side form checks
//!
//! A form that fails any check is never submitted.

use std::fmt;

/// Minimum length of the login password
pub const MIN_LOGIN_PASSWORD_LEN: usize = 6;

/// Minimum length of a new password
pub const MIN_PASSWORD_LEN: usize = 8;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

const SPECIAL_CHARS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every failed check of one form, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// First message reported for `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// `local@domain.tld`, with a TLD of at least two letters
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".-".contains(c));
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
    local_ok && host_ok && tld_ok
}

/// Length, character-class and size rules of any new password
fn check_new_password(errors: &mut FieldErrors, field: &'static str, new: &str) {
    if new.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            field,
            format!("New password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    } else if new.len() > MAX_PASSWORD_LEN {
        errors.add(field, "New password is too long");
    } else if !new.chars().any(|c| c.is_ascii_uppercase()) {
        errors.add(field, "New password must contain at least 1 uppercase letter");
    } else if !new.chars().any(|c| c.is_ascii_lowercase()) {
        errors.add(field, "New password must contain at least 1 lowercase letter");
    } else if !new.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        errors.add(field, "New password must contain at least 1 special character");
    } else if !new.chars().any(|c| c.is_ascii_digit()) {
        errors.add(field, "New password must contain at least 1 digit");
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if email.len() > MAX_EMAIL_LEN || !is_valid_email(email) {
        errors.add("email", "Invalid email address");
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_LOGIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("Password must be at least {MIN_LOGIN_PASSWORD_LEN} characters"),
            );
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.current_password.chars().count() < MIN_PASSWORD_LEN {
            errors.add("currentPassword", "Enter current password");
        }

        check_new_password(&mut errors, "newPassword", &self.new_password);

        if self.new_password != self.confirm_password {
            errors.add("confirmPassword", "Passwords don't match");
        }
        errors.into_result()
    }
}

/// Display name edit of the signed-in admin
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub profile_image: Option<String>,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.add("name", "Name is required");
        }
        if let Some(url) = &self.profile_image {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.add("profileImage", "Profile image must be an http(s) URL");
            }
        }
        errors.into_result()
    }
}

/// Request a one-time code for a password reset
#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    pub email: String,
    pub otp: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        if self.otp.trim().is_empty() {
            errors.add("otp", "Verification code is required");
        }
        check_new_password(&mut errors, "newPassword", &self.new_password);
        if self.new_password != self.confirm_password {
            errors.add("confirmPassword", "Passwords don't match");
        }
        errors.into_result()
    }
}
