use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;
use web_sys::window;

use crate::error::RouterError;
use crate::router::traits::PageEffects;
use crate::utils::{self, NotificationKind};

// Fixed transition timings, matching the CSS animations.
const EXIT_TRANSITION_MS: u32 = 300;
const ENTRY_TRANSITION_MS: u32 = 500;

/// Browser implementation of the navigation side effects: #loading overlay,
/// history API, document title and the #app fade transitions.
pub struct WebEffects;

impl WebEffects {
    fn app_element() -> Option<web_sys::Element> {
        window()?.document()?.get_element_by_id("app")
    }
}

impl PageEffects for WebEffects {
    fn show_loading(&self) {
        utils::show_loading();
    }

    fn hide_loading(&self) {
        utils::hide_loading();
    }

    fn current_path(&self) -> String {
        window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn push_history(&self, path: &str) {
        let pushed = window()
            .and_then(|w| w.history().ok())
            .map(|h| h.push_state_with_url(&JsValue::NULL, "", Some(path)));

        if let Some(Err(e)) = pushed {
            log::warn!("⚠️ Could not push history state: {:?}", e);
        }
    }

    fn set_title(&self, title: &str) {
        if let Some(document) = window().and_then(|w| w.document()) {
            document.set_title(title);
        }
    }

    fn transition_out(&self) -> LocalBoxFuture<'static, ()> {
        async {
            if let Some(app) = Self::app_element() {
                let _ = app.class_list().add_1("fade-out");
            }
            TimeoutFuture::new(EXIT_TRANSITION_MS).await;
        }
        .boxed_local()
    }

    fn transition_in(&self) {
        if let Some(app) = Self::app_element() {
            let _ = app.class_list().remove_1("fade-out");
            let _ = app.class_list().add_1("fade-in");

            Timeout::new(ENTRY_TRANSITION_MS, move || {
                let _ = app.class_list().remove_1("fade-in");
            })
            .forget();
        }
    }

    fn report_error(&self, context: &str, error: &RouterError) {
        log::error!("❌ Error in {}: {}", context, error);
        utils::show_notification("An error occurred. Please try again.", NotificationKind::Error);
    }
}
