use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::AppConfig;
use crate::models::{RequestStatus, UserType};
use crate::router::{RouteOptions, Router, WebEffects};
use crate::services::{MockApi, Notification, NotificationHub, Store};
use crate::utils::{show_notification, NotificationKind};
use crate::views;

/// Application shell: owns the backend, the router and the global listeners.
pub struct App {
    config: AppConfig,
    api: MockApi,
    router: Router,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let config = AppConfig::from_env();
        let store = Store::local();
        let hub = NotificationHub::new();
        let api = MockApi::new(store, hub, &config);
        let router = Router::new(api.clone(), Rc::new(WebEffects));

        let app = Self {
            config,
            api,
            router,
        };
        app.register_middleware();
        app.register_routes();
        app.subscribe_notifications();

        Ok(app)
    }

    /// Seed demo data, wire the browser listeners and render the current
    /// location. Call once after construction.
    pub fn bootstrap(&self) -> Result<(), JsValue> {
        {
            let api = self.api.clone();
            let router = self.router.clone();
            spawn_local(async move {
                if let Err(err) = api.seed_demo_data().await {
                    log::error!("❌ Demo data seeding failed: {err}");
                }
                router.refresh().await;
            });
        }

        self.wire_history()?;
        self.wire_link_clicks()?;
        self.wire_connectivity()?;
        self.wire_auto_refresh()?;

        log::info!("🏠 {} ready", self.config.app_title);
        Ok(())
    }

    fn register_middleware(&self) {
        // Cleaner routes require a cleaner session; everything else passes.
        let api = self.api.clone();
        let router = self.router.clone();
        self.router.use_middleware(move |path| {
            let api = api.clone();
            let router = router.clone();
            async move {
                if path.starts_with("/cleaner") && !api.is_authenticated(Some(UserType::Cleaner)) {
                    log::info!("🔒 Cleaner area requested without session, redirecting");
                    spawn_local(router.navigate("/login", true));
                    return false;
                }
                true
            }
        });

        // The owner portal needs a remembered email before it can filter.
        let api = self.api.clone();
        let router = self.router.clone();
        self.router.use_middleware(move |path| {
            let api = api.clone();
            let router = router.clone();
            async move {
                if path == "/owner" && api.owner_email().is_none() {
                    spawn_local(router.navigate("/owner-setup", true));
                    return false;
                }
                true
            }
        });
    }

    fn register_routes(&self) {
        let title = |suffix: &str| format!("{} - {}", self.config.app_title, suffix);

        let router = self.router.clone();
        self.router
            .route("/", RouteOptions::titled(&title("Property Care Platform")), {
                let router = router.clone();
                move |_| {
                    let router = router.clone();
                    async move { mount(views::render_landing(router)) }
                }
            });

        let api = self.api.clone();
        self.router.route(
            "/owner",
            RouteOptions::titled(&title("Cabin Owner Portal")),
            {
                let api = api.clone();
                let router = router.clone();
                move |_| {
                    let api = api.clone();
                    let router = router.clone();
                    async move { mount(views::render_owner_portal(api, router)) }
                }
            },
        );

        self.router.route(
            "/cleaner",
            RouteOptions::protected(&title("Cleaner Dashboard"), UserType::Cleaner),
            {
                let api = api.clone();
                let router = router.clone();
                move |_| {
                    let api = api.clone();
                    let router = router.clone();
                    async move { mount(views::render_cleaner_dashboard(api, router)) }
                }
            },
        );

        self.router
            .route("/login", RouteOptions::titled(&title("Cleaner Sign In")), {
                let api = api.clone();
                let router = router.clone();
                move |_| {
                    let api = api.clone();
                    let router = router.clone();
                    async move { mount(views::render_login(api, router)) }
                }
            });

        self.router
            .route("/owner-setup", RouteOptions::titled(&title("Owner Setup")), {
                let api = api.clone();
                let router = router.clone();
                move |_| {
                    let api = api.clone();
                    let router = router.clone();
                    async move { mount(views::render_owner_setup(api, router)) }
                }
            });
    }

    /// Toasts for backend events, scoped to whoever is looking: cleaners see
    /// new requests, owners see status changes on theirs.
    fn subscribe_notifications(&self) {
        let router = self.router.clone();
        self.api.hub().subscribe(move |notification| match notification {
            Notification::NewRequest(request) => {
                if router.is_current_route("/cleaner") {
                    show_notification(
                        &format!("New cleaning request from {}!", request.owner_email),
                        NotificationKind::Success,
                    );
                }
            }
            Notification::StatusChange(request) => {
                if router.is_current_route("/owner") {
                    let message = match request.status {
                        RequestStatus::Approved => "Your cleaning request has been approved!",
                        RequestStatus::Completed => "Your cleaning request has been completed!",
                        RequestStatus::Pending => return,
                    };
                    show_notification(message, NotificationKind::Success);
                }
            }
        });
    }

    /// Back/forward buttons re-dispatch the location without pushing history.
    fn wire_history(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

        let router = self.router.clone();
        let on_popstate = Closure::wrap(Box::new(move |_: web_sys::Event| {
            spawn_local(router.refresh());
        }) as Box<dyn FnMut(web_sys::Event)>);
        window.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())?;
        on_popstate.forget();

        Ok(())
    }

    /// Intercept clicks on `a[data-link]` anchors so in-app links go through
    /// the router instead of a full page load.
    fn wire_link_clicks(&self) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("No document"))?;

        let router = self.router.clone();
        let on_click = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            let Some(anchor) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|e| e.closest("a[data-link]").ok().flatten())
            else {
                return;
            };
            if let Some(href) = anchor.get_attribute("href") {
                event.prevent_default();
                spawn_local(router.navigate(&href, true));
            }
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();

        Ok(())
    }

    fn wire_connectivity(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

        let router = self.router.clone();
        let on_online = Closure::wrap(Box::new(move |_: web_sys::Event| {
            show_notification("Connection restored", NotificationKind::Success);
            spawn_local(router.refresh());
        }) as Box<dyn FnMut(web_sys::Event)>);
        window.add_event_listener_with_callback("online", on_online.as_ref().unchecked_ref())?;
        on_online.forget();

        let on_offline = Closure::wrap(Box::new(move |_: web_sys::Event| {
            show_notification("Working offline", NotificationKind::Error);
        }) as Box<dyn FnMut(web_sys::Event)>);
        window.add_event_listener_with_callback("offline", on_offline.as_ref().unchecked_ref())?;
        on_offline.forget();

        Ok(())
    }

    /// Refresh when the tab becomes visible again, plus a periodic refresh
    /// while it stays visible, so the dashboard keeps up with other tabs.
    fn wire_auto_refresh(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;

        let router = self.router.clone();
        let doc = document.clone();
        let on_visibility = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if !doc.hidden() {
                spawn_local(router.refresh());
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        document
            .add_event_listener_with_callback("visibilitychange", on_visibility.as_ref().unchecked_ref())?;
        on_visibility.forget();

        let router = self.router.clone();
        let interval_ms = self.config.auto_refresh_seconds * 1000;
        gloo_timers::callback::Interval::new(interval_ms, move || {
            if document.hidden() {
                return;
            }
            spawn_local(router.refresh());
        })
        .forget();

        Ok(())
    }
}

fn mount(view: Result<Element, JsValue>) -> crate::router::HandlerResult {
    use crate::error::RouterError;

    let element = view.map_err(|e| RouterError::Handler(format!("{e:?}")))?;
    views::mount(element).map_err(|e| RouterError::Handler(format!("{e:?}")))
}
