// Client routes and the session guard
//
// Paths mirror the web dashboard so `--route /categories` and the OAuth
// redirect behave the same way they do in a browser.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Forgot,
    ResetPassword(String),
    Dashboard,
    Categories,
    Reports,
    LegalPolicy,
    Location,
    Rating,
}

impl Route {
    /// Pages reachable from the sidebar, in sidebar order
    pub const PAGES: [Route; 6] = [
        Route::Dashboard,
        Route::Categories,
        Route::Location,
        Route::Rating,
        Route::Reports,
        Route::LegalPolicy,
    ];

    /// Parse a client path. Unmatched paths land on the dashboard.
    pub fn parse(path: &str) -> Self {
        // Ignore query string and fragment
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim().trim_end_matches('/');

        match trimmed {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/forgot" => Route::Forgot,
            "/categories" => Route::Categories,
            "/reports" => Route::Reports,
            "/legal-policy" | "/legalpolicy" => Route::LegalPolicy,
            "/location" => Route::Location,
            "/rating" => Route::Rating,
            "" | "/dashboard" => Route::Dashboard,
            other => match other.strip_prefix("/reset-password/") {
                Some(token) if !token.is_empty() && !token.contains('/') => {
                    Route::ResetPassword(token.to_string())
                }
                _ => Route::Dashboard,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Forgot => "/forgot".to_string(),
            Route::ResetPassword(token) => format!("/reset-password/{}", token),
            Route::Dashboard => "/".to_string(),
            Route::Categories => "/categories".to_string(),
            Route::Reports => "/reports".to_string(),
            Route::LegalPolicy => "/legal-policy".to_string(),
            Route::Location => "/location".to_string(),
            Route::Rating => "/rating".to_string(),
        }
    }

    /// Requires a session token
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            Route::Login | Route::Register | Route::Forgot | Route::ResetPassword(_)
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Forgot => "Forgot Password",
            Route::ResetPassword(_) => "Reset Password",
            Route::Dashboard => "Dashboard",
            Route::Categories => "Categories",
            Route::Reports => "Reports",
            Route::LegalPolicy => "Legal Policy",
            Route::Location => "Location",
            Route::Rating => "Rating",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where a route may actually be shown.
///
/// Returns `Some(redirect)` when the current session forbids `route`:
/// protected screens without a token go to login, and the login/register
/// screens bounce an already-authenticated user to the dashboard.
pub fn guard(route: &Route, authenticated: bool) -> Option<Route> {
    match route {
        r if r.is_protected() && !authenticated => Some(Route::Login),
        Route::Login | Route::Register if authenticated => Some(Route::Dashboard),
        _ => None,
    }
}

/// History stack plus a trail of every route actually entered
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
    trail: Vec<Route>,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            stack: vec![start.clone()],
            trail: vec![start],
        }
    }

    pub fn current(&self) -> &Route {
        // The stack is never empty: `back` keeps the root entry
        &self.stack[self.stack.len() - 1]
    }

    /// Navigate to `route`, keeping the current entry in history
    pub fn push(&mut self, route: Route) -> bool {
        if *self.current() == route {
            return false;
        }
        self.trail.push(route.clone());
        self.stack.push(route);
        true
    }

    /// Navigate to `route`, replacing the current entry so back cannot return to it.
    /// A no-op when already there.
    pub fn replace(&mut self, route: Route) -> bool {
        if *self.current() == route {
            return false;
        }
        self.trail.push(route.clone());
        if let Some(top) = self.stack.last_mut() {
            *top = route;
        }
        true
    }

    /// Go back one entry; the root entry stays put
    pub fn back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        self.trail.push(self.current().clone());
        true
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Every route entered, oldest first
    pub fn trail(&self) -> &[Route] {
        &self.trail
    }

    /// How many times `route` has been entered
    pub fn visits(&self, route: &Route) -> usize {
        self.trail.iter().filter(|r| *r == route).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths_and_aliases() {
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse("/dashboard"), Route::Dashboard);
        assert_eq!(Route::parse("/legalpolicy"), Route::LegalPolicy);
        assert_eq!(Route::parse("/legal-policy/"), Route::LegalPolicy);
        assert_eq!(Route::parse("/register?token=abc"), Route::Register);
        assert_eq!(
            Route::parse("/reset-password/tok123"),
            Route::ResetPassword("tok123".to_string())
        );
    }

    #[test]
    fn test_unmatched_paths_go_to_dashboard() {
        assert_eq!(Route::parse("/nowhere"), Route::Dashboard);
        assert_eq!(Route::parse("/reset-password/"), Route::Dashboard);
        assert_eq!(Route::parse("/reset-password/a/b"), Route::Dashboard);
    }

    #[test]
    fn test_path_round_trip() {
        for route in Route::PAGES {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_guard_protected_routes_need_token() {
        for route in Route::PAGES {
            assert_eq!(guard(&route, false), Some(Route::Login));
            assert_eq!(guard(&route, true), None);
        }
        assert_eq!(guard(&Route::Forgot, false), None);
        assert_eq!(guard(&Route::ResetPassword("t".into()), false), None);
    }

    #[test]
    fn test_guard_bounces_authenticated_user_from_login() {
        assert_eq!(guard(&Route::Login, true), Some(Route::Dashboard));
        assert_eq!(guard(&Route::Register, true), Some(Route::Dashboard));
        assert_eq!(guard(&Route::Forgot, true), None);
        assert_eq!(guard(&Route::Login, false), None);
    }

    #[test]
    fn test_replace_hides_protected_page_from_back() {
        let mut nav = Navigator::new(Route::Login);
        nav.push(Route::Categories);
        assert_eq!(nav.depth(), 2);

        // Session lost on the categories page
        assert!(nav.replace(Route::Login));
        assert_eq!(*nav.current(), Route::Login);
        assert_eq!(nav.depth(), 2);

        assert!(nav.back());
        assert_eq!(*nav.current(), Route::Login);
        assert_eq!(nav.visits(&Route::Categories), 1);
    }

    #[test]
    fn test_replace_same_route_is_noop() {
        let mut nav = Navigator::new(Route::Dashboard);
        assert!(nav.replace(Route::Login));
        assert!(!nav.replace(Route::Login));
        assert_eq!(nav.visits(&Route::Login), 1);
        assert_eq!(nav.trail(), &[Route::Dashboard, Route::Login]);
    }

    #[test]
    fn test_back_keeps_root() {
        let mut nav = Navigator::new(Route::Dashboard);
        assert!(!nav.back());
        nav.push(Route::Rating);
        assert!(nav.back());
        assert_eq!(*nav.current(), Route::Dashboard);
        assert_eq!(nav.visits(&Route::Dashboard), 2);
    }
}
