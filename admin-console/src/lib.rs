//! Admin console state layer
//!
//! Slices of client-side state (auth, users, payments) driven by async
//! thunks over [`admin_client::AdminApi`], plus the list controllers,
//! dialogs and formatting used by the `admin-console` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod logger;
pub mod notice;
pub mod store;
pub mod validation;
pub mod views;

// Re-exports
pub use config::ConsoleConfig;
pub use error::{ConsoleError, ConsoleResult};
pub use logger::init_logger;
pub use notice::{Notice, NoticeLevel, Notices};
pub use store::{
    AuthAction, AuthState, AuthStatus, InFlight, PaymentsAction, PaymentsState, RequestSeq, Store,
    UsersAction, UsersState,
};
pub use validation::{
    ChangePasswordForm, FieldError, FieldErrors, ForgotPasswordForm, LoginForm, ProfileForm,
    ResetPasswordForm,
};
