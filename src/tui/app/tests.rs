use super::*;
use crate::testing::MockServer;
use crate::tui::handle_key_event;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use tokio::time::{timeout_at, Instant};

fn app_at(server: &MockServer, session: &SessionStore, start: Route) -> (App, UpdateReceiver) {
    let mut config = server.config();
    config.countdown_secs = 1;
    config.reset_redirect_ms = 50;
    App::new(
        config,
        server.client(),
        session.clone(),
        LogBuffer::new(),
        start,
    )
}

fn authed() -> SessionStore {
    let session = SessionStore::in_memory();
    session.login("tok");
    session
}

fn press(app: &mut App, code: KeyCode) {
    handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Apply background updates until `done` holds
async fn pump_until(app: &mut App, rx: &mut UpdateReceiver, done: impl Fn(&App) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done(app) {
        let update = timeout_at(deadline, rx.recv())
            .await
            .expect("timed out waiting for app state")
            .expect("update channel closed");
        update(app);
    }
}

/// Apply whatever arrives within `window`
async fn drain_for(app: &mut App, rx: &mut UpdateReceiver, window: Duration) {
    let deadline = Instant::now() + window;
    while let Ok(Some(update)) = timeout_at(deadline, rx.recv()).await {
        update(app);
    }
}

fn serve_dashboard(server: &MockServer) {
    server
        .on("GET", "/categories", 200, json!([{"role": "Buyer", "category": "Shoes", "product": "Boots"}]))
        .on("GET", "/locations", 200, json!({"data": []}))
        .on("GET", "/policy", 200, json!([]))
        .on("GET", "/ratings", 200, json!({"positive": 80, "negative": 20}))
        .on("GET", "/profile", 200, json!({"user": {"name": "Asha"}}));
}

#[tokio::test]
async fn test_protected_start_without_session_lands_on_login() {
    let server = MockServer::start().await;
    let session = SessionStore::in_memory();
    let (mut app, mut rx) = app_at(&server, &session, Route::Categories);

    assert_eq!(*app.route(), Route::Login);
    assert_eq!(app.nav.trail(), &[Route::Login]);

    drain_for(&mut app, &mut rx, Duration::from_millis(100)).await;
    assert!(server.hits().is_empty());
}

#[tokio::test]
async fn test_dashboard_and_profile_load_on_start() {
    let server = MockServer::start().await;
    serve_dashboard(&server);
    let session = authed();
    let (mut app, mut rx) = app_at(&server, &session, Route::Dashboard);

    pump_until(&mut app, &mut rx, |a| {
        a.dashboard.state() == crate::controller::DashboardState::Ready
            && a.profile.profile().is_some()
    })
    .await;

    let data = app.dashboard.data().unwrap();
    assert_eq!(data.categories[0].category, "Shoes");
    assert_eq!(data.rating_stats.positive, 80.0);
    assert_eq!(app.profile.display_name(), "Asha");
    assert_eq!(app.profile.avatar_letter(), 'A');
    assert_eq!(server.count("GET", "/profile"), 1);
}

#[tokio::test]
async fn test_countdown_expiry_navigates_to_login_once() {
    let server = MockServer::start().await;
    serve_dashboard(&server);
    let session = authed();
    let (mut app, mut rx) = app_at(&server, &session, Route::Dashboard);

    handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT));
    assert_eq!(app.modal, Some(Modal::Logout { remaining: 1 }));

    // A second request while the popup runs changes nothing
    handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT));

    pump_until(&mut app, &mut rx, |a| *a.route() == Route::Login).await;
    drain_for(&mut app, &mut rx, Duration::from_millis(1500)).await;

    assert!(!session.is_authenticated());
    assert_eq!(app.nav.visits(&Route::Login), 1);
    assert_eq!(*app.route(), Route::Login);
    assert!(app.modal.is_none());
    assert!(app.countdown.is_none());
}

#[tokio::test]
async fn test_closing_countdown_keeps_session() {
    let server = MockServer::start().await;
    serve_dashboard(&server);
    let session = authed();
    let (mut app, mut rx) = app_at(&server, &session, Route::Dashboard);

    handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT));
    press(&mut app, KeyCode::Esc);
    assert!(app.modal.is_none());

    drain_for(&mut app, &mut rx, Duration::from_millis(1500)).await;
    assert!(session.is_authenticated());
    assert_eq!(*app.route(), Route::Dashboard);
}

#[tokio::test]
async fn test_immediate_logout_redirects() {
    let server = MockServer::start().await;
    serve_dashboard(&server);
    let session = authed();
    let (mut app, mut rx) = app_at(&server, &session, Route::Dashboard);

    press(&mut app, KeyCode::Char('o'));
    pump_until(&mut app, &mut rx, |a| *a.route() == Route::Login).await;

    assert!(!session.is_authenticated());
    assert_eq!(app.profile.display_name(), "Loading...");
}

#[tokio::test]
async fn test_profile_menu_logout() {
    let server = MockServer::start().await;
    serve_dashboard(&server);
    let session = authed();
    let (mut app, mut rx) = app_at(&server, &session, Route::Dashboard);

    press(&mut app, KeyCode::Char('p'));
    assert_eq!(app.modal, Some(Modal::ProfileMenu));
    assert!(app.profile.menu_open);

    press(&mut app, KeyCode::Enter);
    pump_until(&mut app, &mut rx, |a| *a.route() == Route::Login).await;
    assert!(app.modal.is_none());
    assert!(!app.profile.menu_open);
}

#[tokio::test]
async fn test_number_keys_switch_pages_and_load() {
    let server = MockServer::start().await;
    serve_dashboard(&server);
    server.on("GET", "/reports", 200, json!([{"role": "Seller", "title": "Spam", "desc": "x"}]));
    let session = authed();
    let (mut app, mut rx) = app_at(&server, &session, Route::Dashboard);

    press(&mut app, KeyCode::Char('5'));
    assert_eq!(*app.route(), Route::Reports);
    pump_until(&mut app, &mut rx, |a| a.reports.state() == LoadState::Ready).await;
    assert_eq!(app.reports.items()[0].title, "Spam");

    press(&mut app, KeyCode::Esc);
    assert_eq!(*app.route(), Route::Dashboard);
}

#[tokio::test]
async fn test_search_and_role_keys_filter_rows() {
    let server = MockServer::start().await;
    server.on(
        "GET",
        "/categories",
        200,
        json!([
            {"role": "Buyer", "category": "Shoes", "product": "Boots"},
            {"role": "Seller", "category": "Shoes", "product": "Sandals"},
            {"role": "Buyer", "category": "Books", "product": "Novel"}
        ]),
    );
    let session = authed();
    let (mut app, mut rx) = app_at(&server, &session, Route::Categories);
    pump_until(&mut app, &mut rx, |a| a.categories.state() == LoadState::Ready).await;

    press(&mut app, KeyCode::Char('/'));
    assert!(app.searching);
    type_text(&mut app, "shoe");
    press(&mut app, KeyCode::Enter);
    assert!(!app.searching);
    assert_eq!(app.categories.visible().len(), 2);

    // All -> Buyer
    press(&mut app, KeyCode::Char('r'));
    let visible = app.categories.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].product, "Boots");
}

#[tokio::test]
async fn test_add_category_through_modal() {
    let server = MockServer::start().await;
    server
        .on("GET", "/categories", 200, json!([]))
        .on("POST", "/categories", 201, json!({"ok": true}));
    let session = authed();
    let (mut app, mut rx) = app_at(&server, &session, Route::Categories);
    pump_until(&mut app, &mut rx, |a| a.categories.state() == LoadState::Ready).await;

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.modal, Some(Modal::AddRecord));

    press(&mut app, KeyCode::Right);
    type_text(&mut app, "Toys");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Kite");
    press(&mut app, KeyCode::Enter);

    pump_until(&mut app, &mut rx, |a| {
        a.modal.is_none() && a.categories.state() == LoadState::Ready
    })
    .await;
    pump_until(&mut app, &mut rx, |_| server.count("GET", "/categories") == 2).await;

    let post = server
        .hits()
        .into_iter()
        .find(|h| h.method == "POST")
        .unwrap();
    let body: serde_json::Value = serde_json::from_str(&post.body).unwrap();
    assert_eq!(body, json!({"role": "Seller", "category": "Toys", "product": "Kite"}));
    assert_eq!(post.auth.as_deref(), Some("Bearer tok"));
    assert!(app.toast.is_some());
}

#[tokio::test]
async fn test_rejected_add_keeps_modal_open() {
    let server = MockServer::start().await;
    server
        .on("GET", "/categories", 200, json!([]))
        .on("POST", "/categories", 409, json!({"message": "Category exists"}));
    let session = authed();
    let (mut app, mut rx) = app_at(&server, &session, Route::Categories);
    pump_until(&mut app, &mut rx, |a| a.categories.state() == LoadState::Ready).await;

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Toys");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Kite");
    press(&mut app, KeyCode::Enter);

    pump_until(&mut app, &mut rx, |a| {
        a.categories
            .form()
            .is_some_and(|f| f.error.as_deref() == Some("Category exists"))
    })
    .await;
    assert_eq!(app.modal, Some(Modal::AddRecord));
    assert_eq!(server.count("GET", "/categories"), 1);
}

#[tokio::test]
async fn test_blank_add_never_posts() {
    let server = MockServer::start().await;
    server.on("GET", "/locations", 200, json!([]));
    let session = authed();
    let (mut app, mut rx) = app_at(&server, &session, Route::Location);
    pump_until(&mut app, &mut rx, |a| a.locations.state() == LoadState::Ready).await;

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Pune");
    press(&mut app, KeyCode::Enter);

    assert_eq!(
        app.locations.form().and_then(|f| f.error.as_deref()),
        Some(crate::controller::REQUIRED_MESSAGE)
    );
    drain_for(&mut app, &mut rx, Duration::from_millis(100)).await;
    assert_eq!(server.count("POST", "/locations"), 0);
}

#[tokio::test]
async fn test_policy_enter_expands_one_entry() {
    let server = MockServer::start().await;
    server.on(
        "GET",
        "/policy",
        200,
        json!([{"title": "Privacy", "desc": "a"}, {"title": "Terms", "desc": "b"}]),
    );
    let session = authed();
    let (mut app, mut rx) = app_at(&server, &session, Route::LegalPolicy);
    pump_until(&mut app, &mut rx, |a| a.policy.state() == LoadState::Ready).await;

    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Enter);

    let open: Vec<bool> = app.policy.items().iter().map(|p| p.open).collect();
    assert_eq!(open, vec![false, true]);
}

#[tokio::test]
async fn test_login_replaces_history_with_dashboard() {
    let server = MockServer::start().await;
    serve_dashboard(&server);
    server.on("POST", "/login", 200, json!({"token": "fresh"}));
    let session = SessionStore::in_memory();
    let (mut app, mut rx) = app_at(&server, &session, Route::Login);

    type_text(&mut app, "admin@searchkro.com");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "secret");
    press(&mut app, KeyCode::Enter);

    pump_until(&mut app, &mut rx, |a| *a.route() == Route::Dashboard).await;
    assert_eq!(session.token().as_deref(), Some("fresh"));
    assert_eq!(app.nav.depth(), 1);

    pump_until(&mut app, &mut rx, |a| a.profile.profile().is_some()).await;
    assert_eq!(app.profile.display_name(), "Asha");
}

#[tokio::test]
async fn test_auth_screen_keys_switch_forms() {
    let server = MockServer::start().await;
    let session = SessionStore::in_memory();
    let (mut app, _rx) = app_at(&server, &session, Route::Login);

    // Letters are input on auth screens, not shortcuts
    type_text(&mut app, "q1");
    assert_eq!(*app.route(), Route::Login);
    assert_eq!(app.login.form.fields.value(0), "q1");

    press(&mut app, KeyCode::F(3));
    assert_eq!(*app.route(), Route::Register);
    press(&mut app, KeyCode::F(4));
    assert_eq!(*app.route(), Route::Forgot);
    press(&mut app, KeyCode::Esc);
    assert_eq!(*app.route(), Route::Register);
}

#[tokio::test]
async fn test_reset_success_returns_to_login() {
    let server = MockServer::start().await;
    server.on("POST", "/auth/reset-password/abc", 200, json!({"message": "ok"}));
    let session = SessionStore::in_memory();
    let (mut app, mut rx) = app_at(&server, &session, Route::ResetPassword("abc".into()));

    type_text(&mut app, "pw1");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "pw1");
    press(&mut app, KeyCode::Enter);

    pump_until(&mut app, &mut rx, |a| *a.route() == Route::Login).await;
    assert!(app.reset.is_none());
    assert_eq!(server.count("POST", "/auth/reset-password/abc"), 1);
}

#[tokio::test]
async fn test_ctrl_c_quits_from_a_modal() {
    let server = MockServer::start().await;
    serve_dashboard(&server);
    let session = authed();
    let (mut app, _rx) = app_at(&server, &session, Route::Dashboard);

    press(&mut app, KeyCode::Char('?'));
    assert_eq!(app.modal, Some(Modal::Help));
    handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
}
