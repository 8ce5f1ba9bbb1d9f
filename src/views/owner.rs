use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{get_element_by_id, input_value, on_submit, set_inner_html, textarea_value, ElementBuilder};
use crate::models::{CleaningRequest, NewCleaningRequest};
use crate::router::Router;
use crate::services::MockApi;
use crate::utils::{
    escape_html, format_date, format_date_time, format_time, show_notification, urgency,
    validate_new_request, NotificationKind,
};

/// Owner portal: new-request form on top, the owner's own requests below.
/// The list loads asynchronously into #owner-requests after mount.
pub fn render_owner_portal(api: MockApi, router: Router) -> Result<Element, JsValue> {
    let owner_email = api.owner_email().unwrap_or_default();

    let form = build_request_form(api.clone(), router, owner_email.clone())?;

    let list = ElementBuilder::new("div")?
        .id("owner-requests")?
        .class("request-list")
        .html("<p class=\"empty\">Loading your requests…</p>")
        .build();

    let heading = ElementBuilder::new("h2")?.text("Your Requests").build();

    let view = ElementBuilder::new("div")?
        .class("owner-portal")
        .child(form)?
        .child(heading)?
        .child(list)?
        .build();

    spawn_local(async move {
        match api.list_requests(Some(&owner_email)).await {
            Ok(requests) => render_request_list(&requests),
            Err(err) => {
                log::error!("❌ Failed to load owner requests: {err}");
                show_notification("Could not load your requests.", NotificationKind::Error);
            }
        }
    });

    Ok(view)
}

fn build_request_form(
    api: MockApi,
    router: Router,
    owner_email: String,
) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .id("request-form")?
        .class("card")
        .html(
            "<h2>Request a Cleaning</h2>\
             <div class=\"form-group\">\
               <label for=\"cabin-address\">Cabin address</label>\
               <textarea id=\"cabin-address\" rows=\"2\" \
                 placeholder=\"123 Lakeshore Drive, Pine Lake Resort\" required></textarea>\
             </div>\
             <div class=\"form-row\">\
               <div class=\"form-group\">\
                 <label for=\"checkout-date\">Checkout date</label>\
                 <input type=\"date\" id=\"checkout-date\" required>\
               </div>\
               <div class=\"form-group\">\
                 <label for=\"checkout-time\">Checkout time</label>\
                 <input type=\"time\" id=\"checkout-time\" required>\
               </div>\
             </div>\
             <div class=\"form-group\">\
               <label for=\"special-requests\">Special requests</label>\
               <textarea id=\"special-requests\" rows=\"3\" \
                 placeholder=\"Gate code, pets, areas needing extra attention…\"></textarea>\
             </div>\
             <button type=\"submit\" class=\"btn\">Submit Request</button>",
        )
        .build();

    on_submit(&form, move |_| {
        let data = NewCleaningRequest {
            owner_email: owner_email.clone(),
            cabin_address: textarea_value("cabin-address").trim().to_string(),
            checkout_date: input_value("checkout-date"),
            checkout_time: input_value("checkout-time"),
            special_requests: textarea_value("special-requests").trim().to_string(),
        };

        if let Err(errors) = validate_new_request(&data) {
            show_notification(&errors.join(" "), NotificationKind::Error);
            return;
        }

        let api = api.clone();
        let router = router.clone();
        spawn_local(async move {
            match api.create_request(data).await {
                Ok(_) => {
                    show_notification(
                        "Cleaning request submitted! A cleaner will review it shortly.",
                        NotificationKind::Success,
                    );
                    router.refresh().await;
                }
                Err(err) => {
                    log::error!("❌ Failed to create request: {err}");
                    show_notification("Could not submit your request.", NotificationKind::Error);
                }
            }
        });
    });

    Ok(form)
}

fn render_request_list(requests: &[CleaningRequest]) {
    let Some(container) = get_element_by_id("owner-requests") else {
        return;
    };

    if requests.is_empty() {
        set_inner_html(
            &container,
            "<p class=\"empty\">No requests yet. Submit one above to get started.</p>",
        );
        return;
    }

    let cards: String = requests.iter().map(request_card).collect();
    set_inner_html(&container, &cards);
}

fn request_card(request: &CleaningRequest) -> String {
    let urgency = urgency(&request.checkout_date);
    let notes = if request.special_requests.is_empty() {
        String::new()
    } else {
        format!(
            "<p class=\"notes\">{}</p>",
            escape_html(&request.special_requests)
        )
    };

    format!(
        "<div class=\"request-card status-{status}\">\
           <div class=\"card-header\">\
             <span class=\"status-badge\">{label}</span>\
             <span class=\"urgency urgency-{level}\">{urgency}</span>\
           </div>\
           <p class=\"address\">{address}</p>\
           <p class=\"schedule\">Checkout {date} at {time}</p>\
           {notes}\
           <p class=\"meta\">Submitted {submitted}</p>\
         </div>",
        status = request.status.as_str(),
        label = request.status.label(),
        level = urgency.level(),
        urgency = urgency.text(),
        address = escape_html(&request.cabin_address),
        date = format_date(&request.checkout_date),
        time = format_time(&request.checkout_time),
        notes = notes,
        submitted = format_date_time(&request.submitted_at),
    )
}
