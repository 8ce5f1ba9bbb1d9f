pub mod traits;
pub mod web;

pub use traits::PageEffects;
pub use web::WebEffects;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use regex::Regex;

use crate::error::RouterError;
use crate::models::UserType;
use crate::services::MockApi;

/// Parameters extracted from a matched path (`:id` segments by name).
pub type RouteParams = HashMap<String, String>;

pub type HandlerResult = Result<(), RouterError>;

type Handler = Rc<dyn Fn(RouteParams) -> LocalBoxFuture<'static, HandlerResult>>;
type Middleware = Rc<dyn Fn(String) -> LocalBoxFuture<'static, bool>>;

/// Per-route configuration.
#[derive(Clone)]
pub struct RouteOptions {
    pub title: String,
    pub requires_auth: bool,
    pub user_type: Option<UserType>,
}

impl RouteOptions {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            requires_auth: false,
            user_type: None,
        }
    }

    pub fn protected(title: &str, user_type: UserType) -> Self {
        Self {
            title: title.to_string(),
            requires_auth: true,
            user_type: Some(user_type),
        }
    }
}

#[derive(Clone)]
struct Route {
    path: String,
    options: RouteOptions,
    handler: Handler,
}

/// Path-based router with middleware-gated navigation. Navigation is
/// single-flight: a newer `navigate` supersedes an in-flight one, which then
/// aborts at its next checkpoint without touching `current_route`.
#[derive(Clone)]
pub struct Router {
    routes: Rc<RefCell<Vec<Route>>>,
    middlewares: Rc<RefCell<Vec<Middleware>>>,
    current_route: Rc<RefCell<Option<String>>>,
    flight: Rc<Cell<u64>>,
    api: MockApi,
    effects: Rc<dyn PageEffects>,
}

impl Router {
    pub fn new(api: MockApi, effects: Rc<dyn PageEffects>) -> Self {
        Self {
            routes: Rc::new(RefCell::new(Vec::new())),
            middlewares: Rc::new(RefCell::new(Vec::new())),
            current_route: Rc::new(RefCell::new(None)),
            flight: Rc::new(Cell::new(0)),
            api,
            effects,
        }
    }

    /// Register a route. Table order matters: pattern resolution picks the
    /// first match, with no specificity ranking.
    pub fn route<F, Fut>(&self, path: &str, options: RouteOptions, handler: F) -> &Self
    where
        F: Fn(RouteParams) -> Fut + 'static,
        Fut: Future<Output = HandlerResult> + 'static,
    {
        let handler: Handler = Rc::new(move |params| handler(params).boxed_local());
        self.routes.borrow_mut().push(Route {
            path: path.to_string(),
            options,
            handler,
        });
        self
    }

    /// Register an async middleware. Middlewares run sequentially in
    /// registration order; returning false blocks the navigation.
    pub fn use_middleware<F, Fut>(&self, middleware: F) -> &Self
    where
        F: Fn(String) -> Fut + 'static,
        Fut: Future<Output = bool> + 'static,
    {
        let middleware: Middleware = Rc::new(move |path| middleware(path).boxed_local());
        self.middlewares.borrow_mut().push(middleware);
        self
    }

    /// Navigate to a path. Errors (including RouteNotFound) are reported and
    /// recovered with a single redirect to the root route.
    pub fn navigate(&self, path: &str, push_state: bool) -> LocalBoxFuture<'static, ()> {
        let router = self.clone();
        let path = path.to_string();

        // Take over the flight: any navigation still in progress is superseded
        let flight = self.flight.get().wrapping_add(1);
        self.flight.set(flight);

        async move {
            if let Err(error) = router.dispatch(&path, push_state, flight).await {
                router.effects.hide_loading();
                router.effects.report_error("Router navigation", &error);

                if path != "/" {
                    router.navigate("/", true).await;
                }
            }
        }
        .boxed_local()
    }

    /// Re-run the navigation for the current location without pushing history
    /// (popstate, initial load, auto-refresh).
    pub fn refresh(&self) -> LocalBoxFuture<'static, ()> {
        self.navigate(&self.effects.current_path(), false)
    }

    async fn dispatch(&self, path: &str, push_state: bool, flight: u64) -> HandlerResult {
        self.effects.show_loading();

        if push_state && self.effects.current_path() != path {
            self.effects.push_history(path);
        }

        // Guarding: each middleware awaited in registration order; a blocked
        // navigation leaves current_route untouched.
        let middlewares: Vec<Middleware> = self.middlewares.borrow().clone();
        for middleware in middlewares {
            let proceed = middleware(path.to_string()).await;
            if self.superseded(flight) {
                return Ok(());
            }
            if !proceed {
                log::info!("🚧 Navigation to {} blocked by middleware", path);
                self.effects.hide_loading();
                return Ok(());
            }
        }

        // Resolving
        let route = self
            .find_route(path)
            .ok_or_else(|| RouterError::RouteNotFound(path.to_string()))?;

        if route.options.requires_auth && !self.api.is_authenticated(route.options.user_type) {
            self.navigate("/login", true).await;
            return Ok(());
        }

        self.effects.set_title(&route.options.title);

        // Transitioning: fade out the previous content before replacing it
        if self.current_route.borrow().is_some() {
            self.effects.transition_out().await;
            if self.superseded(flight) {
                return Ok(());
            }
        }

        let params = route_params(&route.path, path);
        (route.handler)(params).await?;
        if self.superseded(flight) {
            return Ok(());
        }

        self.effects.transition_in();
        *self.current_route.borrow_mut() = Some(path.to_string());
        self.effects.hide_loading();
        Ok(())
    }

    fn superseded(&self, flight: u64) -> bool {
        if self.flight.get() != flight {
            log::debug!("Navigation superseded by a newer one");
            true
        } else {
            false
        }
    }

    /// Exact string match first, then the first matching pattern in table
    /// order.
    fn find_route(&self, path: &str) -> Option<Route> {
        let routes = self.routes.borrow();

        if let Some(route) = routes.iter().find(|r| r.path == path) {
            return Some(route.clone());
        }

        routes
            .iter()
            .find(|r| match_route(&r.path, path))
            .cloned()
    }

    /// Whether the pattern matches the last navigated path (falling back to
    /// the current location before any navigation completed).
    pub fn is_current_route(&self, pattern: &str) -> bool {
        let current = self
            .current_route
            .borrow()
            .clone()
            .unwrap_or_else(|| self.effects.current_path());
        match_route(pattern, &current)
    }

    pub fn current_route(&self) -> Option<String> {
        self.current_route.borrow().clone()
    }
}

/// Match a route pattern against a path. `:name` matches one non-empty
/// segment, `*` matches the remainder. The regex is rebuilt per lookup.
pub fn match_route(pattern: &str, path: &str) -> bool {
    match pattern_to_regex(pattern) {
        Some(regex) => regex.is_match(path),
        None => false,
    }
}

fn pattern_to_regex(pattern: &str) -> Option<Regex> {
    let expr = pattern
        .split('/')
        .map(|segment| {
            if segment.starts_with(':') {
                "([^/]+)".to_string()
            } else if segment == "*" {
                ".*".to_string()
            } else {
                regex::escape(segment)
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    match Regex::new(&format!("^{}$", expr)) {
        Ok(regex) => Some(regex),
        Err(e) => {
            log::error!("❌ Invalid route pattern '{}': {}", pattern, e);
            None
        }
    }
}

/// Extract named parameters by aligning the matched route's template with the
/// navigated path, segment by segment.
fn route_params(pattern: &str, path: &str) -> RouteParams {
    let mut params = RouteParams::new();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    for (index, segment) in pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .enumerate()
    {
        if let Some(name) = segment.strip_prefix(':') {
            if let Some(value) = path_segments.get(index) {
                params.insert(name.to_string(), value.to_string());
            }
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::Credentials;
    use crate::services::{NotificationHub, Store};
    use futures::executor::block_on;
    use futures::future;

    /// Headless page effects that record every side effect in order.
    struct RecordingEffects {
        events: RefCell<Vec<String>>,
        location: RefCell<String>,
    }

    impl RecordingEffects {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                events: RefCell::new(Vec::new()),
                location: RefCell::new("/".to_string()),
            })
        }

        fn record(&self, event: impl Into<String>) {
            self.events.borrow_mut().push(event.into());
        }

        fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }
    }

    impl PageEffects for RecordingEffects {
        fn show_loading(&self) {
            self.record("show_loading");
        }

        fn hide_loading(&self) {
            self.record("hide_loading");
        }

        fn current_path(&self) -> String {
            self.location.borrow().clone()
        }

        fn push_history(&self, path: &str) {
            self.record(format!("push:{}", path));
            *self.location.borrow_mut() = path.to_string();
        }

        fn set_title(&self, title: &str) {
            self.record(format!("title:{}", title));
        }

        fn transition_out(&self) -> LocalBoxFuture<'static, ()> {
            self.record("transition_out");
            future::ready(()).boxed_local()
        }

        fn transition_in(&self) {
            self.record("transition_in");
        }

        fn report_error(&self, context: &str, error: &RouterError) {
            self.record(format!("error:{}:{}", context, error));
        }
    }

    fn api() -> MockApi {
        MockApi::new(
            Store::in_memory(),
            NotificationHub::new(),
            &AppConfig::default(),
        )
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn(RouteParams) -> future::Ready<HandlerResult>) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let handler = move |_params: RouteParams| {
            count_clone.set(count_clone.get() + 1);
            future::ready(Ok(()))
        };
        (count, handler)
    }

    #[test]
    fn pattern_matching_rules() {
        assert!(match_route("/cleaning-requests/:id", "/cleaning-requests/42"));
        assert!(!match_route("/cleaning-requests/:id", "/cleaning-requests"));
        assert!(!match_route("/cleaning-requests/:id", "/cleaning-requests/42/edit"));
        assert!(match_route("/owner/*", "/owner/anything/nested"));
        assert!(match_route("/", "/"));
        assert!(!match_route("/owner", "/cleaner"));
    }

    #[test]
    fn params_extracted_from_matched_template() {
        let params = route_params("/cleaning-requests/:id", "/cleaning-requests/42");
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn navigation_invokes_handler_and_sets_title() {
        let effects = RecordingEffects::new();
        let router = Router::new(api(), effects.clone());
        let (count, handler) = counter();
        router.route("/owner", RouteOptions::titled("Owner Portal"), handler);

        block_on(router.navigate("/owner", true));

        assert_eq!(count.get(), 1);
        assert_eq!(router.current_route().as_deref(), Some("/owner"));
        let events = effects.events();
        assert!(events.contains(&"push:/owner".to_string()));
        assert!(events.contains(&"title:Owner Portal".to_string()));
        assert_eq!(events.last().map(String::as_str), Some("hide_loading"));
    }

    #[test]
    fn dynamic_route_receives_params() {
        let router = Router::new(api(), RecordingEffects::new());
        let seen = Rc::new(RefCell::new(None));

        let seen_clone = seen.clone();
        router.route(
            "/cleaning-requests/:id",
            RouteOptions::titled("Request"),
            move |params| {
                *seen_clone.borrow_mut() = params.get("id").cloned();
                future::ready(Ok(()))
            },
        );

        block_on(router.navigate("/cleaning-requests/42", true));
        assert_eq!(seen.borrow().as_deref(), Some("42"));
    }

    #[test]
    fn unknown_path_recovers_to_root() {
        let effects = RecordingEffects::new();
        let router = Router::new(api(), effects.clone());
        let (count, handler) = counter();
        router.route("/", RouteOptions::titled("Home"), handler);

        block_on(router.navigate("/does-not-exist", true));

        assert_eq!(count.get(), 1, "root handler runs as recovery");
        assert_eq!(router.current_route().as_deref(), Some("/"));
        assert!(effects
            .events()
            .iter()
            .any(|e| e.starts_with("error:Router navigation:Route not found")));
    }

    #[test]
    fn blocking_middleware_prevents_dispatch() {
        let effects = RecordingEffects::new();
        let router = Router::new(api(), effects.clone());
        let (count, handler) = counter();
        router.route("/owner", RouteOptions::titled("Owner"), handler);
        router.use_middleware(|path| future::ready(path != "/owner"));

        block_on(router.navigate("/owner", true));

        assert_eq!(count.get(), 0);
        assert_eq!(router.current_route(), None);
        assert_eq!(
            effects.events().last().map(String::as_str),
            Some("hide_loading")
        );
    }

    #[test]
    fn middlewares_run_in_registration_order_and_short_circuit() {
        let router = Router::new(api(), RecordingEffects::new());
        let order = Rc::new(RefCell::new(Vec::new()));

        let order_first = order.clone();
        router.use_middleware(move |_| {
            order_first.borrow_mut().push("first");
            future::ready(false)
        });
        let order_second = order.clone();
        router.use_middleware(move |_| {
            order_second.borrow_mut().push("second");
            future::ready(true)
        });

        block_on(router.navigate("/anywhere", true));
        assert_eq!(*order.borrow(), ["first"]);
    }

    #[test]
    fn auth_gated_route_redirects_to_login() {
        let router = Router::new(api(), RecordingEffects::new());
        let (cleaner_count, cleaner_handler) = counter();
        let (login_count, login_handler) = counter();

        router.route(
            "/cleaner",
            RouteOptions::protected("Cleaner Dashboard", UserType::Cleaner),
            cleaner_handler,
        );
        router.route("/login", RouteOptions::titled("Login"), login_handler);

        block_on(router.navigate("/cleaner", true));

        assert_eq!(cleaner_count.get(), 0);
        assert_eq!(login_count.get(), 1);
        assert_eq!(router.current_route().as_deref(), Some("/login"));
    }

    #[test]
    fn auth_gated_route_dispatches_with_session() {
        let api = api();
        block_on(api.login(Credentials::cleaner("c@email.com", "clean123"))).unwrap();

        let router = Router::new(api, RecordingEffects::new());
        let (count, handler) = counter();
        router.route(
            "/cleaner",
            RouteOptions::protected("Cleaner Dashboard", UserType::Cleaner),
            handler,
        );

        block_on(router.navigate("/cleaner", true));
        assert_eq!(count.get(), 1);
        assert_eq!(router.current_route().as_deref(), Some("/cleaner"));
    }

    #[test]
    fn first_matching_pattern_wins() {
        let router = Router::new(api(), RecordingEffects::new());
        let hits = Rc::new(RefCell::new(Vec::new()));

        let hits_param = hits.clone();
        router.route("/p/:x", RouteOptions::titled("Param"), move |_| {
            hits_param.borrow_mut().push("param");
            future::ready(Ok(()))
        });
        let hits_wild = hits.clone();
        router.route("/p/*", RouteOptions::titled("Wild"), move |_| {
            hits_wild.borrow_mut().push("wild");
            future::ready(Ok(()))
        });

        block_on(router.navigate("/p/value", true));
        assert_eq!(*hits.borrow(), ["param"]);
    }

    #[test]
    fn redirecting_middleware_supersedes_navigation() {
        let effects = RecordingEffects::new();
        let router = Router::new(api(), effects.clone());
        let (private_count, private_handler) = counter();
        let (login_count, login_handler) = counter();

        router.route("/private", RouteOptions::titled("Private"), private_handler);
        router.route("/login", RouteOptions::titled("Login"), login_handler);

        let redirecting = router.clone();
        router.use_middleware(move |path| {
            let redirecting = redirecting.clone();
            async move {
                if path == "/private" {
                    redirecting.navigate("/login", true).await;
                    false
                } else {
                    true
                }
            }
        });

        block_on(router.navigate("/private", true));

        assert_eq!(private_count.get(), 0);
        assert_eq!(login_count.get(), 1);
        assert_eq!(router.current_route().as_deref(), Some("/login"));
    }

    #[test]
    fn is_current_route_matches_last_navigation() {
        let router = Router::new(api(), RecordingEffects::new());
        let (_, handler) = counter();
        router.route("/owner", RouteOptions::titled("Owner"), handler);

        block_on(router.navigate("/owner", true));
        assert!(router.is_current_route("/owner"));
        assert!(!router.is_current_route("/cleaner"));
    }
}
