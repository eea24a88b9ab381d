// admin-console/tests/console_integration.rs
// Store, thunks and page controllers against an in-process mock backend

use std::sync::Arc;
use std::time::{Duration, Instant};

use admin_client::{AdminApi, ClientConfig, FileTokenStore, Session, TokenStore};
use admin_console::views::{PaymentsTable, PayoutDialog, PayoutsPanel, TableView, UsersTable};
use admin_console::{
    AuthState, AuthStatus, ConsoleError, ForgotPasswordForm, LoginForm, NoticeLevel,
    ProfileForm, ResetPasswordForm, Store, UsersAction,
};
use admin_mock::MockBackend;
use axum::http::{Method, StatusCode};
use serde_json::json;
use shared::{AffiliateTier, Decimal, Filter, PaymentStatus, PlanTier};
use tempfile::TempDir;

const QUIET: Duration = Duration::from_millis(500);

fn signed_in_store(mock: &MockBackend) -> Arc<Store> {
    let session = Arc::new(Session::in_memory());
    session.set_login("tok", None).unwrap();
    store_with(mock, session)
}

fn store_with(mock: &MockBackend, session: Arc<Session>) -> Arc<Store> {
    let api = AdminApi::connect(&ClientConfig::new(mock.base_url()), session).unwrap();
    Arc::new(Store::new(Arc::new(api)))
}

fn user_json(id: &str, name: &str, tier: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("{id}@example.com"),
        "plan": "pro",
        "affiliateTier": tier,
        "walletBalance": 0
    })
}

#[tokio::test]
async fn test_login_validation_blocks_request() {
    let mock = MockBackend::start().await.unwrap();
    let store = store_with(&mock, Arc::new(Session::in_memory()));

    let err = store
        .login(&LoginForm::new("not-an-email", "123"))
        .await
        .unwrap_err();
    match err {
        ConsoleError::Invalid(errors) => {
            assert_eq!(errors.get("email"), Some("Invalid email address"));
            assert_eq!(
                errors.get("password"),
                Some("Password must be at least 6 characters")
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(mock.requests().is_empty());
    assert_eq!(store.auth().status, AuthStatus::Idle);
}

#[tokio::test]
async fn test_login_persists_token_and_fetches_profile() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(Method::POST, "auth/admin/login", json!({ "token": "fresh" }));
    mock.ok(
        Method::GET,
        "auth/profile",
        json!({ "_id": "admin1", "name": "Root", "email": "root@x.com", "role": "admin" }),
    );

    let dir = TempDir::new().unwrap();
    let token_store = Arc::new(FileTokenStore::new(dir.path().join("token.json")));
    let session = Arc::new(Session::restore(token_store.clone()).unwrap());
    let store = store_with(&mock, session.clone());

    let profile = store
        .login(&LoginForm::new("root@x.com", "secret1"))
        .await
        .unwrap();
    assert_eq!(profile.name, "Root");
    assert_eq!(store.auth().status, AuthStatus::Succeeded);
    assert!(!store.auth().loading);
    assert_eq!(token_store.load().unwrap().as_deref(), Some("fresh"));
    assert_eq!(
        mock.last(Method::GET, "auth/profile").unwrap().authorization.as_deref(),
        Some("Bearer fresh")
    );
}

#[tokio::test]
async fn test_wrong_credentials_keep_backend_message() {
    let mock = MockBackend::start().await.unwrap();
    mock.route(
        Method::POST,
        "auth/admin/login",
        StatusCode::UNAUTHORIZED,
        json!({ "message": "Invalid credentials" }),
    );
    let store = store_with(&mock, Arc::new(Session::in_memory()));

    assert!(store
        .login(&LoginForm::new("root@x.com", "secret1"))
        .await
        .is_err());
    let auth = store.auth();
    assert_eq!(auth.status, AuthStatus::Failed);
    assert_eq!(auth.error.as_deref(), Some("Invalid credentials"));
    assert_eq!(store.notices().last().unwrap().message, "Invalid credentials");
}

#[tokio::test]
async fn test_unauthorized_resets_auth_slice() {
    let mock = MockBackend::start().await.unwrap();
    mock.route(
        Method::GET,
        "admin/users",
        StatusCode::UNAUTHORIZED,
        json!({ "message": "jwt expired" }),
    );
    let store = signed_in_store(&mock);
    assert_eq!(store.auth().status, AuthStatus::Succeeded);

    let mut table = UsersTable::new(store.clone(), QUIET);
    let err = table.tick(Instant::now()).await.unwrap_err();
    assert!(err.is_unauthorized());

    assert_eq!(store.auth(), AuthState::default());
    assert!(!store.session().is_authenticated());
    assert!(!store.users().loading);
    let notice = store.notices().last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_search_page_and_filter_scenario() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(
        Method::GET,
        "admin/users",
        json!({ "users": [user_json("u1", "John", "none")], "pages": 3 }),
    );
    let store = signed_in_store(&mock);
    let mut table = UsersTable::new(store.clone(), QUIET);
    let start = Instant::now();

    assert!(table.tick(start).await.unwrap());
    assert_eq!(
        mock.last(Method::GET, "admin/users").unwrap().query.as_deref(),
        Some("page=1&limit=10")
    );
    assert_eq!(table.pagination().summary(), "Page 1 of 3");

    table.set_page(2);
    assert!(table.tick(start).await.unwrap());
    assert_eq!(
        mock.last(Method::GET, "admin/users").unwrap().query.as_deref(),
        Some("page=2&limit=10")
    );

    // Typing does not fetch until the input settles
    table.set_search("john", start);
    assert!(!table.tick(start + Duration::from_millis(100)).await.unwrap());
    assert_eq!(mock.hits(Method::GET, "admin/users"), 2);

    assert!(table.tick(start + QUIET).await.unwrap());
    assert_eq!(
        mock.last(Method::GET, "admin/users").unwrap().query.as_deref(),
        Some("page=1&limit=10&search=john")
    );

    table.set_plan(Filter::Only(PlanTier::Pro));
    assert!(table.tick(start + QUIET).await.unwrap());
    assert_eq!(
        mock.last(Method::GET, "admin/users").unwrap().query.as_deref(),
        Some("page=1&limit=10&search=john&plan=pro")
    );

    // Nothing changed, nothing fetched
    assert!(!table.tick(start + QUIET * 2).await.unwrap());
    assert_eq!(mock.hits(Method::GET, "admin/users"), 4);
}

#[tokio::test]
async fn test_loading_and_empty_are_distinct() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(Method::GET, "admin/users", json!({ "users": [], "pages": 1 }));
    let store = signed_in_store(&mock);
    let mut table = UsersTable::new(store.clone(), QUIET);

    let seq = store.next_seq();
    store.dispatch_users(UsersAction::FetchPending { seq });
    assert!(table.with_table(|view| view.is_loading()));
    assert!(!table.with_table(|view| view.is_empty()));

    table.tick(Instant::now()).await.unwrap();
    assert!(table.with_table(|view| matches!(view, TableView::Empty)));
}

#[tokio::test]
async fn test_sequential_tier_updates_patch_both_rows() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(
        Method::GET,
        "admin/users",
        json!({ "users": [user_json("u1", "Ann", "none"), user_json("u2", "Bob", "none")], "pages": 1 }),
    );
    mock.ok(Method::PUT, "admin/update-tier", json!({ "success": true }));
    let store = signed_in_store(&mock);
    let mut table = UsersTable::new(store.clone(), QUIET);
    table.tick(Instant::now()).await.unwrap();

    table.update_tier("u1", AffiliateTier::Tier1).await.unwrap();
    table.update_tier("u2", AffiliateTier::Tier2).await.unwrap();

    let users = store.users();
    assert_eq!(users.find("u1").unwrap().affiliate_tier, AffiliateTier::Tier1);
    assert_eq!(users.find("u2").unwrap().affiliate_tier, AffiliateTier::Tier2);
    assert!(users.updating.is_empty());
    assert_eq!(mock.hits(Method::PUT, "admin/update-tier"), 2);

    let messages: Vec<String> = store
        .notices()
        .drain()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert_eq!(
        messages,
        vec!["User is now a Founding Partner!", "User is now an Affiliate."]
    );

    // Local patches mark the list stale; focus refetches
    assert!(table.focus(Instant::now()).await.unwrap());
    assert_eq!(mock.hits(Method::GET, "admin/users"), 2);
}

#[tokio::test]
async fn test_concurrent_tier_updates_track_each_row() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(
        Method::GET,
        "admin/users",
        json!({ "users": [user_json("u1", "Ann", "none"), user_json("u2", "Bob", "none")], "pages": 1 }),
    );
    mock.ok(Method::PUT, "admin/update-tier", json!({ "success": true }));
    let store = signed_in_store(&mock);
    let mut table = UsersTable::new(store.clone(), QUIET);
    table.tick(Instant::now()).await.unwrap();

    let (a, b) = tokio::join!(
        store.update_tier("u1", AffiliateTier::Tier2),
        store.update_tier("u2", AffiliateTier::Tier1),
    );
    a.unwrap();
    b.unwrap();
    assert!(!table.is_updating("u1"));
    assert!(!table.is_updating("u2"));
    assert_eq!(
        store.users().find("u2").unwrap().affiliate_tier,
        AffiliateTier::Tier1
    );
}

#[tokio::test]
async fn test_payout_confirm_removes_row_and_settles_total() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(
        Method::GET,
        "admin/payouts",
        json!([
            { "_id": "a1", "name": "Ann", "email": "ann@x.com", "affiliateTier": "tier1", "walletBalance": 150 },
            { "_id": "b2", "name": "Bob", "email": "bob@x.com", "affiliateTier": "tier2", "walletBalance": 20 }
        ]),
    );
    mock.ok(
        Method::GET,
        "admin/payment-stats",
        json!({ "totalRevenue": 1000, "monthlyRevenue": 200, "pendingPayouts": 170, "successRate": 97.5 }),
    );
    mock.ok(Method::POST, "admin/payout-confirm", json!({ "success": true }));

    let store = signed_in_store(&mock);
    store.fetch_payment_stats().await.unwrap();
    let mut panel = PayoutsPanel::new(store.clone());
    panel.activate().await.unwrap();

    panel.select("a1").unwrap();
    assert_eq!(
        panel.dialog().prompt().as_deref(),
        Some("Confirm payout of $150.00 to Ann?")
    );
    panel.confirm().await.unwrap();
    assert_eq!(panel.dialog(), &PayoutDialog::Closed);

    let payments = store.payments();
    assert_eq!(payments.payouts.len(), 1);
    assert_eq!(payments.payouts[0].user_id, "b2");
    assert_eq!(payments.stats.pending_payouts, Decimal::from(20));
    assert!(!panel.is_processing("a1"));

    let sent = mock.last(Method::POST, "admin/payout-confirm").unwrap();
    assert_eq!(sent.body.unwrap(), json!({ "userId": "a1", "amount": 150.0 }));
    assert_eq!(
        store.notices().last().unwrap().message,
        "Payout recorded successfully!"
    );
}

#[tokio::test]
async fn test_failed_payout_keeps_row_and_reopens_dialog() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(
        Method::GET,
        "admin/payouts",
        json!({ "payouts": [{ "_id": "a1", "name": "Ann", "walletBalance": 150 }] }),
    );
    mock.route(
        Method::POST,
        "admin/payout-confirm",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "message": "ledger locked" }),
    );

    let store = signed_in_store(&mock);
    let mut panel = PayoutsPanel::new(store.clone());
    panel.activate().await.unwrap();
    panel.select("a1").unwrap();

    assert!(panel.confirm().await.is_err());
    assert!(matches!(panel.dialog(), PayoutDialog::Open(entry) if entry.user_id == "a1"));
    assert_eq!(store.payments().payouts.len(), 1);
    assert!(!panel.is_processing("a1"));
    let notice = store.notices().last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Action failed");
    // A server error is not a logout
    assert!(store.session().is_authenticated());
}

fn transactions_body() -> serde_json::Value {
    json!({
        "transactions": [
            {
                "_id": "t1",
                "userId": { "_id": "u1", "name": "Doe, John", "email": "john@x.com" },
                "amount": 29.99,
                "status": "completed",
                "planType": "pro",
                "paymentMethod": "card",
                "createdAt": "2025-01-05T10:00:00.000Z"
            },
            { "_id": "t2", "userId": "u2", "amount": 9, "status": "pending" }
        ],
        "pages": 2
    })
}

#[tokio::test]
async fn test_payments_status_filter_and_refund() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(Method::GET, "admin/transactions", transactions_body());
    mock.ok(Method::GET, "admin/payment-stats", json!({}));
    mock.ok(Method::POST, "admin/payments/t1/refund", json!({ "success": true }));

    let store = signed_in_store(&mock);
    let mut table = PaymentsTable::new(store.clone(), QUIET);
    let now = Instant::now();
    assert!(table.activate(now).await.unwrap());
    assert_eq!(
        mock.last(Method::GET, "admin/transactions").unwrap().query.as_deref(),
        Some("page=1")
    );

    table.set_status(Filter::Only(PaymentStatus::Completed));
    assert!(table.tick(now).await.unwrap());
    assert_eq!(
        mock.last(Method::GET, "admin/transactions").unwrap().query.as_deref(),
        Some("page=1&status=completed")
    );

    table.open_refund("t1").unwrap();
    table.confirm_refund().await.unwrap();
    assert!(table.refund_dialog().is_none());
    let refunded = store.with_payments(|s| s.find_transaction("t1").map(|t| t.status));
    assert_eq!(refunded, Some(PaymentStatus::Refunded));
    assert_eq!(
        store.notices().last().unwrap().message,
        "Payment refunded successfully"
    );

    assert!(matches!(
        table.open_refund("missing"),
        Err(ConsoleError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_export_writes_loaded_rows() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(Method::GET, "admin/transactions", transactions_body());
    let store = signed_in_store(&mock);
    let mut table = PaymentsTable::new(store.clone(), QUIET);
    table.tick(Instant::now()).await.unwrap();

    let dir = TempDir::new().unwrap();
    let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    let path = table.export_csv(dir.path(), date).unwrap();
    assert_eq!(path.file_name().unwrap(), "payments-2025-01-06.csv");

    let csv = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ID,User,Email,Amount,Status,Plan Type,Payment Method,Date");
    assert!(lines[1].starts_with("t1,\"Doe, John\",john@x.com,29.99,completed,pro,card,"));
    assert!(lines[2].starts_with("t2,N/A,N/A,9,pending,"));
    assert_eq!(store.notices().last().unwrap().message, "Export completed");
}

#[tokio::test]
async fn test_export_with_no_rows_fails() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(Method::GET, "admin/transactions", json!({ "transactions": [] }));
    let store = signed_in_store(&mock);
    let mut table = PaymentsTable::new(store.clone(), QUIET);
    table.tick(Instant::now()).await.unwrap();

    let dir = TempDir::new().unwrap();
    let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    assert!(matches!(
        table.export_csv(dir.path(), date),
        Err(ConsoleError::NothingToExport)
    ));
    assert_eq!(store.notices().last().unwrap().message, "No data to export");
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_dashboard_loads_stats_and_revenue() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(
        Method::GET,
        "admin/dashboard/stats",
        json!({ "totalUsers": 1200, "totalRevenue": 9876.5, "activeSubscriptions": 310, "growthRate": 12.34 }),
    );
    mock.ok(
        Method::GET,
        "admin/analytics/revenue",
        json!({ "data": [{ "month": "Jan", "revenue": 100, "users": 4 }] }),
    );
    let store = signed_in_store(&mock);

    let summary = store.load_dashboard().await.unwrap();
    assert_eq!(summary.cards()[0].1, "1,200");
    assert_eq!(summary.revenue.len(), 1);
    assert_eq!(
        mock.last(Method::GET, "admin/analytics/revenue").unwrap().query.as_deref(),
        Some("period=7months")
    );
}

#[tokio::test]
async fn test_login_drops_lists_cached_for_previous_admin() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(
        Method::GET,
        "admin/users",
        json!({ "users": [user_json("u1", "Ann", "none")], "pages": 1 }),
    );
    mock.ok(Method::POST, "auth/admin/login", json!({ "token": "second" }));
    mock.ok(
        Method::GET,
        "auth/profile",
        json!({ "_id": "admin2", "name": "Other", "email": "other@x.com", "role": "admin" }),
    );
    let store = signed_in_store(&mock);
    UsersTable::new(store.clone(), QUIET)
        .tick(Instant::now())
        .await
        .unwrap();

    store
        .login(&LoginForm::new("other@x.com", "secret1"))
        .await
        .unwrap();
    UsersTable::new(store.clone(), QUIET)
        .tick(Instant::now())
        .await
        .unwrap();

    assert_eq!(mock.hits(Method::GET, "admin/users"), 2);
    assert_eq!(
        mock.last(Method::GET, "admin/users").unwrap().authorization.as_deref(),
        Some("Bearer second")
    );
}

#[tokio::test]
async fn test_update_profile_refreshes_session() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(Method::PUT, "auth/update-profile", json!({ "success": true }));
    mock.ok(
        Method::GET,
        "auth/profile",
        json!({ "_id": "admin1", "name": "New Name", "email": "root@x.com", "role": "admin" }),
    );
    let store = signed_in_store(&mock);

    let form = ProfileForm {
        name: "  New Name ".into(),
        profile_image: None,
    };
    let profile = store.update_profile(&form).await.unwrap();
    assert_eq!(profile.name, "New Name");
    assert_eq!(
        mock.last(Method::PUT, "auth/update-profile").unwrap().body,
        Some(json!({ "name": "New Name" }))
    );
    assert_eq!(store.session().profile().unwrap().name, "New Name");
    let notice = store.notices().last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Profile updated successfully");
}

#[tokio::test]
async fn test_update_profile_rejects_blank_name() {
    let mock = MockBackend::start().await.unwrap();
    let store = signed_in_store(&mock);

    let form = ProfileForm {
        name: "   ".into(),
        profile_image: None,
    };
    match store.update_profile(&form).await {
        Err(ConsoleError::Invalid(errors)) => {
            assert_eq!(errors.get("name"), Some("Name is required"))
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_forgot_then_reset_password() {
    let mock = MockBackend::start().await.unwrap();
    mock.ok(Method::POST, "auth/forgot-password", json!({ "success": true }));
    mock.ok(
        Method::POST,
        "auth/reset-password",
        json!({ "success": true, "message": "Password updated" }),
    );
    let store = store_with(&mock, Arc::new(Session::in_memory()));

    store
        .forgot_password(&ForgotPasswordForm {
            email: " root@x.com ".into(),
        })
        .await
        .unwrap();
    assert_eq!(
        mock.last(Method::POST, "auth/forgot-password").unwrap().body,
        Some(json!({ "email": "root@x.com" }))
    );
    assert_eq!(
        store.notices().last().unwrap().message,
        "Reset code sent to your email"
    );

    let mismatched = ResetPasswordForm {
        email: "root@x.com".into(),
        otp: "123456".into(),
        new_password: "Fresh-pass1".into(),
        confirm_password: "Other-pass1".into(),
    };
    assert!(matches!(
        store.reset_password(&mismatched).await,
        Err(ConsoleError::Invalid(_))
    ));
    assert_eq!(mock.hits(Method::POST, "auth/reset-password"), 0);

    let form = ResetPasswordForm {
        confirm_password: "Fresh-pass1".into(),
        ..mismatched
    };
    store.reset_password(&form).await.unwrap();
    assert_eq!(
        mock.last(Method::POST, "auth/reset-password").unwrap().body,
        Some(json!({ "email": "root@x.com", "otp": "123456", "newPassword": "Fresh-pass1" }))
    );
    assert_eq!(store.notices().last().unwrap().message, "Password updated");
}
