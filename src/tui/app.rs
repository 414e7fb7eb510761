// Application state for the TUI
//
// App owns every page controller plus navigation, the modal and the logout
// countdown. Network work runs on spawned tasks; each task finishes by sending
// an `Update` (a boxed closure over App) back to the event loop, which applies
// it between frames. Controllers reject stale completions on their own.

use crate::api::ApiClient;
use crate::config::Config;
use crate::controller::auth_forms::{
    AuthForm, AuthOutcome, ForgotForm, LoginForm, ResetForm, SignupForm,
};
use crate::controller::{
    Creatable, DashboardController, LoadState, PageController, ProfileController, ProfileTicket,
    RatingsController, Resource, SubmitOutcome,
};
use crate::countdown::{CountdownEvent, LogoutCountdown};
use crate::logging::LogBuffer;
use crate::models::{CategoryRecord, LocationRecord, PolicyRecord, RatingRecord, ReportRecord};
use crate::router::{guard, Navigator, Route};
use crate::session::SessionStore;
use crate::tui::components::Toast;
use crate::tui::modal::{FormEdit, Modal};
use crate::tui::theme::Theme;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A state change produced by a background task
pub type Update = Box<dyn FnOnce(&mut App) + Send>;

pub type UpdateReceiver = mpsc::UnboundedReceiver<Update>;

pub fn update(f: impl FnOnce(&mut App) + Send + 'static) -> Update {
    Box::new(f)
}

/// A list resource with a home in App
pub trait ListSlot: Resource {
    const ROUTE: Route;

    fn slot(app: &App) -> &PageController<Self>;
    fn slot_mut(app: &mut App) -> &mut PageController<Self>;
}

impl ListSlot for CategoryRecord {
    const ROUTE: Route = Route::Categories;
    fn slot(app: &App) -> &PageController<Self> {
        &app.categories
    }
    fn slot_mut(app: &mut App) -> &mut PageController<Self> {
        &mut app.categories
    }
}

impl ListSlot for LocationRecord {
    const ROUTE: Route = Route::Location;
    fn slot(app: &App) -> &PageController<Self> {
        &app.locations
    }
    fn slot_mut(app: &mut App) -> &mut PageController<Self> {
        &mut app.locations
    }
}

impl ListSlot for PolicyRecord {
    const ROUTE: Route = Route::LegalPolicy;
    fn slot(app: &App) -> &PageController<Self> {
        &app.policy
    }
    fn slot_mut(app: &mut App) -> &mut PageController<Self> {
        &mut app.policy
    }
}

impl ListSlot for ReportRecord {
    const ROUTE: Route = Route::Reports;
    fn slot(app: &App) -> &PageController<Self> {
        &app.reports
    }
    fn slot_mut(app: &mut App) -> &mut PageController<Self> {
        &mut app.reports
    }
}

impl ListSlot for RatingRecord {
    const ROUTE: Route = Route::Rating;
    fn slot(app: &App) -> &PageController<Self> {
        &app.ratings.page
    }
    fn slot_mut(app: &mut App) -> &mut PageController<Self> {
        &mut app.ratings.page
    }
}

/// Keys that act on the current list page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKey {
    Next,
    Prev,
    CycleRole,
    SearchChar(char),
    SearchBackspace,
}

pub struct App {
    pub config: Config,
    pub api: ApiClient,
    pub session: SessionStore,
    pub log_buffer: LogBuffer,
    pub theme: Theme,
    pub nav: Navigator,

    // Pages
    pub dashboard: DashboardController,
    pub categories: PageController<CategoryRecord>,
    pub locations: PageController<LocationRecord>,
    pub policy: PageController<PolicyRecord>,
    pub reports: PageController<ReportRecord>,
    pub ratings: RatingsController,
    pub profile: ProfileController,

    // Auth screens
    pub login: LoginForm,
    pub signup: SignupForm,
    pub forgot: ForgotForm,
    pub reset: Option<ResetForm>,

    // Overlays
    pub modal: Option<Modal>,
    pub countdown: Option<LogoutCountdown>,
    pub toast: Option<Toast>,

    /// Typing goes to the search box
    pub searching: bool,
    pub should_quit: bool,

    updates: mpsc::UnboundedSender<Update>,
    session_watch: JoinHandle<()>,
}

impl App {
    /// Build the app at `start` (guarded) and kick off its first loads.
    ///
    /// Must run inside a Tokio runtime.
    pub fn new(
        config: Config,
        api: ApiClient,
        session: SessionStore,
        log_buffer: LogBuffer,
        start: Route,
    ) -> (Self, UpdateReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session_watch = spawn_session_watch(&session, tx.clone());

        let start = guard(&start, session.is_authenticated()).unwrap_or(start);
        let theme = Theme::by_name(&config.theme);

        let mut app = Self {
            config,
            api,
            session,
            log_buffer,
            theme,
            nav: Navigator::new(start),
            dashboard: DashboardController::new(),
            categories: PageController::new(),
            locations: PageController::new(),
            policy: PageController::new(),
            reports: PageController::new(),
            ratings: RatingsController::new(),
            profile: ProfileController::new(),
            login: LoginForm::default(),
            signup: SignupForm::default(),
            forgot: ForgotForm::default(),
            reset: None,
            modal: None,
            countdown: None,
            toast: None,
            searching: false,
            should_quit: false,
            updates: tx,
            session_watch,
        };

        let token = app.session.token();
        if let Some(ticket) = app.profile.sync(token) {
            app.fetch_profile(ticket);
        }
        app.mount();
        (app, rx)
    }

    pub fn route(&self) -> &Route {
        self.nav.current()
    }

    /// Run `task` in the background and apply the update it yields
    fn spawn<Fut>(&self, task: Fut)
    where
        Fut: Future<Output = Update> + Send + 'static,
    {
        let tx = self.updates.clone();
        tokio::spawn(async move {
            let update = task.await;
            // A closed channel means the UI already exited
            let _ = tx.send(update);
        });
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────

    /// Go to `route`, keeping history
    pub fn navigate(&mut self, route: Route) {
        self.go(route, false);
    }

    /// Go to `route`, replacing the current history entry
    pub fn redirect(&mut self, route: Route) {
        self.go(route, true);
    }

    fn go(&mut self, route: Route, replace: bool) {
        let target = guard(&route, self.session.is_authenticated()).unwrap_or(route);
        if target == *self.nav.current() {
            return;
        }

        self.unmount();
        if replace {
            self.nav.replace(target);
        } else {
            self.nav.push(target);
        }
        self.mount();
    }

    pub fn back(&mut self) {
        self.unmount();
        if self.nav.back() {
            let current = self.nav.current().clone();
            if let Some(redirect) = guard(&current, self.session.is_authenticated()) {
                self.nav.replace(redirect);
            }
        }
        self.mount();
    }

    /// Re-run the current page's load
    pub fn reload(&mut self) {
        self.unmount();
        self.mount();
    }

    fn mount(&mut self) {
        self.searching = false;
        let route = self.nav.current().clone();
        tracing::debug!("Entering {}", route);

        match route {
            Route::Dashboard => self.load_dashboard(),
            Route::Categories => self.load_page::<CategoryRecord>(),
            Route::Location => self.load_page::<LocationRecord>(),
            Route::LegalPolicy => self.load_page::<PolicyRecord>(),
            Route::Reports => self.load_page::<ReportRecord>(),
            Route::Rating => self.load_ratings(),
            Route::ResetPassword(token) => {
                let delay = Duration::from_millis(self.config.reset_redirect_ms);
                self.reset = Some(ResetForm::new(token, delay));
            }
            Route::Login | Route::Register | Route::Forgot => {}
        }
    }

    fn unmount(&mut self) {
        if self.modal == Some(Modal::AddRecord) {
            self.modal = None;
        }
        match self.nav.current() {
            Route::Dashboard => self.dashboard.unmount(),
            Route::Categories => self.categories.unmount(),
            Route::Location => self.locations.unmount(),
            Route::LegalPolicy => self.policy.unmount(),
            Route::Reports => self.reports.unmount(),
            Route::Rating => self.ratings.unmount(),
            Route::ResetPassword(_) => self.reset = None,
            Route::Login | Route::Register | Route::Forgot => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Loads
    // ─────────────────────────────────────────────────────────────────────

    fn load_page<R: ListSlot>(&mut self) {
        let token = self.session.token();
        let Some(ticket) = R::slot_mut(self).begin_load(token) else {
            return;
        };
        let api = self.api.clone();
        self.spawn(async move {
            let result = PageController::<R>::fetch(&api, &ticket.token).await;
            update(move |app| {
                R::slot_mut(app).finish_load(&ticket, result);
            })
        });
    }

    fn load_ratings(&mut self) {
        let Some(ticket) = self.ratings.begin_load(self.session.token()) else {
            return;
        };
        let api = self.api.clone();
        self.spawn(async move {
            let result = RatingsController::fetch(&api, &ticket.token).await;
            update(move |app| {
                app.ratings.finish_load(&ticket, result);
            })
        });
    }

    fn load_dashboard(&mut self) {
        let Some(ticket) = self.dashboard.begin_load(self.session.token()) else {
            return;
        };
        let api = self.api.clone();
        self.spawn(async move {
            let result = DashboardController::fetch(&api, &ticket.token).await;
            update(move |app| {
                app.dashboard.finish_load(&ticket, result);
            })
        });
    }

    fn fetch_profile(&mut self, ticket: ProfileTicket) {
        let api = self.api.clone();
        self.spawn(async move {
            let result = ProfileController::fetch(&api, &ticket.token).await;
            update(move |app| {
                app.profile.finish(&ticket, result);
            })
        });
    }

    /// Load state of the current page, if it is a list page
    pub fn page_state(&self) -> Option<LoadState> {
        match self.nav.current() {
            Route::Categories => Some(self.categories.state()),
            Route::Location => Some(self.locations.state()),
            Route::LegalPolicy => Some(self.policy.state()),
            Route::Reports => Some(self.reports.state()),
            Route::Rating => Some(self.ratings.state()),
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // List pages
    // ─────────────────────────────────────────────────────────────────────

    pub fn list_key(&mut self, key: ListKey) {
        match self.nav.current().clone() {
            Route::Categories => self.apply_list_key::<CategoryRecord>(key),
            Route::Location => self.apply_list_key::<LocationRecord>(key),
            Route::LegalPolicy => self.apply_list_key::<PolicyRecord>(key),
            Route::Reports => self.apply_list_key::<ReportRecord>(key),
            Route::Rating => self.apply_list_key::<RatingRecord>(key),
            _ => {}
        }
    }

    fn apply_list_key<R: ListSlot>(&mut self, key: ListKey) {
        let page = R::slot_mut(self);
        match key {
            ListKey::Next => page.select_next(),
            ListKey::Prev => page.select_prev(),
            ListKey::CycleRole => page.cycle_role(),
            ListKey::SearchChar(c) => page.push_search(c),
            ListKey::SearchBackspace => page.pop_search(),
        }
    }

    pub fn is_list_page(&self) -> bool {
        self.page_state().is_some()
    }

    /// Open the add modal on pages that have one
    pub fn open_add_form(&mut self) {
        match self.nav.current() {
            Route::Categories => self.categories.open_form(),
            Route::Location => self.locations.open_form(),
            Route::LegalPolicy => self.policy.open_form(),
            Route::Reports => self.reports.open_form(),
            _ => return,
        }
        self.modal = Some(Modal::AddRecord);
    }

    pub fn close_add_form(&mut self) {
        match self.nav.current() {
            Route::Categories => self.categories.close_form(),
            Route::Location => self.locations.close_form(),
            Route::LegalPolicy => self.policy.close_form(),
            Route::Reports => self.reports.close_form(),
            _ => {}
        }
    }

    pub fn edit_form(&mut self, edit: FormEdit) {
        match self.nav.current().clone() {
            Route::Categories => self.apply_form_edit::<CategoryRecord>(edit),
            Route::Location => self.apply_form_edit::<LocationRecord>(edit),
            Route::LegalPolicy => self.apply_form_edit::<PolicyRecord>(edit),
            Route::Reports => self.apply_form_edit::<ReportRecord>(edit),
            _ => {}
        }
    }

    fn apply_form_edit<R: ListSlot + Creatable>(&mut self, edit: FormEdit) {
        let form = R::slot_mut(self).form_mut();
        if form.saving {
            return;
        }
        match edit {
            FormEdit::Char(c) => form.fields.push_char(c),
            FormEdit::Backspace => form.fields.pop_char(),
            FormEdit::NextField => form.fields.focus_next(),
            FormEdit::PrevField => form.fields.focus_prev(),
            FormEdit::ToggleRole => form.cycle_role(),
        }
    }

    pub fn submit_form(&mut self) {
        match self.nav.current().clone() {
            Route::Categories => self.submit::<CategoryRecord>(),
            Route::Location => self.submit::<LocationRecord>(),
            Route::LegalPolicy => self.submit::<PolicyRecord>(),
            Route::Reports => self.submit::<ReportRecord>(),
            _ => {}
        }
    }

    fn submit<R: ListSlot + Creatable>(&mut self) {
        let Some(token) = self.session.token() else {
            return;
        };
        let Some(draft) = R::slot_mut(self).begin_submit() else {
            return;
        };
        let api = self.api.clone();
        self.spawn(async move {
            let result = PageController::<R>::post(&api, &token, &draft).await;
            update(move |app| {
                let outcome = R::slot_mut(app).finish_submit(result);
                if outcome != SubmitOutcome::Saved {
                    return;
                }
                app.show_toast(format!("Added {}", R::SINGULAR));
                // Reload only if the page is still showing
                if *app.nav.current() == R::ROUTE {
                    if app.modal == Some(Modal::AddRecord) {
                        app.modal = None;
                    }
                    app.load_page::<R>();
                }
            })
        });
    }

    pub fn add_form_open(&self) -> bool {
        match self.nav.current() {
            Route::Categories => self.categories.form().is_some(),
            Route::Location => self.locations.form().is_some(),
            Route::LegalPolicy => self.policy.form().is_some(),
            Route::Reports => self.reports.form().is_some(),
            _ => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Auth screens
    // ─────────────────────────────────────────────────────────────────────

    /// Form of the current auth screen
    pub fn auth_form(&self) -> Option<&AuthForm> {
        match self.nav.current() {
            Route::Login => Some(&self.login.form),
            Route::Register => Some(&self.signup.form),
            Route::Forgot => Some(&self.forgot.form),
            Route::ResetPassword(_) => self.reset.as_ref().map(|r| &r.form),
            _ => None,
        }
    }

    pub fn auth_form_mut(&mut self) -> Option<&mut AuthForm> {
        match self.nav.current() {
            Route::Login => Some(&mut self.login.form),
            Route::Register => Some(&mut self.signup.form),
            Route::Forgot => Some(&mut self.forgot.form),
            Route::ResetPassword(_) => self.reset.as_mut().map(|r| &mut r.form),
            _ => None,
        }
    }

    pub fn submit_auth(&mut self) {
        match self.nav.current().clone() {
            Route::Login => self.submit_login(),
            Route::Register => self.submit_signup(),
            Route::Forgot => self.submit_forgot(),
            Route::ResetPassword(_) => self.submit_reset(),
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        let Some((email, password)) = self.login.begin() else {
            return;
        };
        let api = self.api.clone();
        self.spawn(async move {
            let result = api.login(&email, &password).await;
            update(move |app| {
                let outcome = app.login.finish(result, &app.session);
                app.apply_auth_outcome(outcome);
            })
        });
    }

    fn submit_signup(&mut self) {
        let Some((email, password)) = self.signup.begin() else {
            return;
        };
        let api = self.api.clone();
        self.spawn(async move {
            let result = api.signup(&email, &password).await;
            update(move |app| {
                let outcome = app.signup.finish(result);
                if let Some(notice) = app.signup.form.notice.clone() {
                    app.show_toast(notice);
                }
                app.apply_auth_outcome(outcome);
            })
        });
    }

    fn submit_forgot(&mut self) {
        let Some(email) = self.forgot.begin() else {
            return;
        };
        let api = self.api.clone();
        self.spawn(async move {
            let result = api.forgot_password(&email).await;
            update(move |app| {
                let outcome = app.forgot.finish(result);
                app.apply_auth_outcome(outcome);
            })
        });
    }

    fn submit_reset(&mut self) {
        let Some(reset) = self.reset.as_mut() else {
            return;
        };
        let Some(password) = reset.begin() else {
            return;
        };
        let token = reset.token.clone();
        let api = self.api.clone();
        self.spawn(async move {
            let result = api.reset_password(&token, &password).await;
            update(move |app| {
                // The screen may have been left while the request ran
                if let Some(reset) = app.reset.as_mut().filter(|r| r.token == token) {
                    let outcome = reset.finish(result);
                    app.apply_auth_outcome(outcome);
                }
            })
        });
    }

    fn apply_auth_outcome(&mut self, outcome: AuthOutcome) {
        match outcome {
            AuthOutcome::Stay => {}
            AuthOutcome::Replace(route) => self.redirect(route),
            AuthOutcome::Push(route) => self.navigate(route),
            AuthOutcome::PushAfter(route, delay) => self.spawn(async move {
                tokio::time::sleep(delay).await;
                update(move |app| {
                    if matches!(app.nav.current(), Route::ResetPassword(_)) {
                        app.navigate(route);
                    }
                })
            }),
        }
    }

    /// Put the Google sign-in link on the login screen
    pub fn show_google_login(&mut self) {
        let url = self.api.google_login_url();
        self.login.form.error = None;
        self.login.form.notice = Some(format!(
            "Open {} in a browser, then run `searchkro-admin oauth-callback <redirect URL>`",
            url
        ));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────

    /// Every token change lands here (login, logout, countdown expiry)
    pub fn on_session_change(&mut self, token: Option<String>) {
        let signed_out = token.is_none();
        if let Some(ticket) = self.profile.sync(token) {
            self.fetch_profile(ticket);
        }

        if signed_out {
            self.countdown = None;
            if matches!(
                self.modal,
                Some(Modal::Logout { .. } | Modal::ProfileMenu | Modal::AddRecord)
            ) {
                self.modal = None;
            }
            if self.nav.current().is_protected() {
                self.redirect(Route::Login);
            }
        }
    }

    /// Show the countdown popup; a second request while it runs is ignored
    pub fn open_logout_popup(&mut self) {
        if self.countdown.as_ref().is_some_and(LogoutCountdown::is_running) {
            return;
        }
        let secs = self.config.countdown_secs;
        let tx = self.updates.clone();
        let countdown = LogoutCountdown::start(secs, self.session.clone(), move |event| {
            let _ = tx.send(update(move |app| app.on_countdown(event)));
        });
        self.countdown = Some(countdown);
        self.modal = Some(Modal::logout(secs));
    }

    /// Close the popup and stop its timer
    pub fn cancel_logout(&mut self) {
        self.countdown = None;
        if self.modal.as_ref().and_then(Modal::remaining).is_some() {
            self.modal = None;
        }
    }

    pub fn logout_now(&mut self) {
        match self.countdown.take() {
            Some(countdown) => countdown.logout_now(),
            None => self.session.logout(),
        }
    }

    fn on_countdown(&mut self, event: CountdownEvent) {
        match event {
            CountdownEvent::Tick(n) => {
                if let Some(Modal::Logout { remaining }) = &mut self.modal {
                    *remaining = n;
                }
            }
            CountdownEvent::Expired => self.cancel_logout(),
        }
    }

    pub fn open_profile_menu(&mut self) {
        if !self.profile.menu_open {
            self.profile.toggle_menu();
        }
        self.modal = Some(Modal::ProfileMenu);
    }

    pub fn close_profile_menu(&mut self) {
        if self.profile.menu_open {
            self.profile.toggle_menu();
        }
        if self.modal == Some(Modal::ProfileMenu) {
            self.modal = None;
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.session_watch.abort();
    }
}

/// Forward session changes into the update channel
fn spawn_session_watch(session: &SessionStore, tx: mpsc::UnboundedSender<Update>) -> JoinHandle<()> {
    let mut rx = session.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let token = rx.borrow_and_update().clone();
            if tx.send(update(move |app| app.on_session_change(token))).is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests;
