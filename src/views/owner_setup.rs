use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{input_value, on_submit, ElementBuilder};
use crate::models::Credentials;
use crate::router::Router;
use crate::services::MockApi;
use crate::utils::{is_valid_email, show_notification, NotificationKind};

/// One-field onboarding for owners: remember an email so the portal can
/// filter requests down to theirs. No password, owners are trusted here.
pub fn render_owner_setup(api: MockApi, router: Router) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .id("owner-setup-form")?
        .class("card")
        .html(
            "<h2>Welcome, Cabin Owner</h2>\
             <p>Enter your email to see your cleaning requests and submit new ones.</p>\
             <div class=\"form-group\">\
               <label for=\"owner-email\">Email</label>\
               <input type=\"email\" id=\"owner-email\" placeholder=\"you@example.com\" required>\
             </div>\
             <button type=\"submit\" class=\"btn\">Continue</button>",
        )
        .build();

    on_submit(&form, move |_| {
        let email = input_value("owner-email").trim().to_string();
        if !is_valid_email(&email) {
            show_notification("Please enter a valid email address.", NotificationKind::Error);
            return;
        }

        let api = api.clone();
        let router = router.clone();
        spawn_local(async move {
            match api.login(Credentials::owner(email)).await {
                Ok(_) => router.navigate("/owner", true).await,
                Err(err) => {
                    log::error!("❌ Owner setup failed: {err}");
                    show_notification("Something went wrong. Please try again.", NotificationKind::Error);
                }
            }
        });
    });

    let view = ElementBuilder::new("div")?
        .class("owner-setup")
        .child(form)?
        .build();

    Ok(view)
}
