use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{input_value, on_submit, ElementBuilder};
use crate::models::Credentials;
use crate::router::Router;
use crate::services::MockApi;
use crate::utils::{show_notification, NotificationKind};

/// Cleaner sign-in form. The demo credentials are printed right on the page,
/// this is a showcase, not a security boundary.
pub fn render_login(api: MockApi, router: Router) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .id("login-form")?
        .class("card")
        .html(
            "<h2>Cleaner Sign In</h2>\
             <div class=\"form-group\">\
               <label for=\"login-email\">Email</label>\
               <input type=\"email\" id=\"login-email\" value=\"cleaner@lakeclean.com\" required>\
             </div>\
             <div class=\"form-group\">\
               <label for=\"login-password\">Password</label>\
               <input type=\"password\" id=\"login-password\" placeholder=\"clean123\" required>\
             </div>\
             <button type=\"submit\" class=\"btn\">Sign In</button>\
             <p class=\"form-hint\">Demo password: <code>clean123</code></p>",
        )
        .build();

    on_submit(&form, move |_| {
        let api = api.clone();
        let router = router.clone();
        let email = input_value("login-email");
        let password = input_value("login-password");

        spawn_local(async move {
            match api.login(Credentials::cleaner(email, password)).await {
                Ok(_) => {
                    show_notification("Welcome back!", NotificationKind::Success);
                    router.navigate("/cleaner", true).await;
                }
                Err(err) => {
                    log::warn!("🔒 Cleaner login rejected: {err}");
                    show_notification("Invalid email or password.", NotificationKind::Error);
                }
            }
        });
    });

    let owner_link = ElementBuilder::new("p")?
        .class("form-footer")
        .html("Cabin owner? <a href=\"/owner-setup\" data-link>Set up your portal</a>")
        .build();

    let view = ElementBuilder::new("div")?
        .class("login")
        .child(form)?
        .child(owner_link)?
        .build();

    Ok(view)
}
