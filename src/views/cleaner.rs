use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{get_element_by_id, on_click, set_inner_html, ElementBuilder};
use crate::models::{CleaningRequest, CleaningRequestPatch, RequestStatus, Statistics};
use crate::router::Router;
use crate::services::MockApi;
use crate::utils::{
    escape_html, format_date, format_date_time, format_time, show_notification, urgency,
    NotificationKind,
};

/// Cleaner dashboard: summary statistics, every request in the system, and
/// the approve / complete / delete actions. Buttons carry data-action and
/// data-id attributes so one delegated listener on the list handles them all.
pub fn render_cleaner_dashboard(api: MockApi, router: Router) -> Result<Element, JsValue> {
    let header = build_header(api.clone(), router.clone())?;

    let stats = ElementBuilder::new("div")?
        .id("cleaner-stats")?
        .class("stats-grid")
        .build();

    let list = ElementBuilder::new("div")?
        .id("cleaner-requests")?
        .class("request-list")
        .html("<p class=\"empty\">Loading requests…</p>")
        .build();

    attach_action_handler(&list, api.clone(), router);

    let view = ElementBuilder::new("div")?
        .class("cleaner-dashboard")
        .child(header)?
        .child(stats)?
        .child(list)?
        .build();

    spawn_local(async move {
        match api.get_statistics().await {
            Ok(stats) => render_statistics(&stats),
            Err(err) => log::error!("❌ Failed to load statistics: {err}"),
        }
        match api.list_requests(None).await {
            Ok(requests) => render_request_list(&requests),
            Err(err) => {
                log::error!("❌ Failed to load requests: {err}");
                show_notification("Could not load requests.", NotificationKind::Error);
            }
        }
    });

    Ok(view)
}

fn build_header(api: MockApi, router: Router) -> Result<Element, JsValue> {
    let logout = ElementBuilder::new("button")?
        .class("btn btn-secondary")
        .text("Sign Out")
        .on_click(move |_| {
            let api = api.clone();
            let router = router.clone();
            spawn_local(async move {
                if let Err(err) = api.logout().await {
                    log::error!("❌ Logout failed: {err}");
                }
                router.navigate("/", true).await;
            });
        })
        .build();

    let title = ElementBuilder::new("h2")?.text("Cleaner Dashboard").build();

    let header = ElementBuilder::new("div")?
        .class("dashboard-header")
        .child(title)?
        .child(logout)?
        .build();

    Ok(header)
}

/// One listener on the container instead of per-card closures. The list is
/// re-rendered wholesale after every action, so per-button listeners would
/// leak a forgotten closure on each refresh.
fn attach_action_handler(list: &Element, api: MockApi, router: Router) {
    on_click(list, move |event| {
        let Some(button) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|e| e.closest("[data-action]").ok().flatten())
        else {
            return;
        };
        let Some(action) = button.get_attribute("data-action") else {
            return;
        };
        let Some(id) = button.get_attribute("data-id") else {
            return;
        };

        let api = api.clone();
        let router = router.clone();
        spawn_local(async move {
            let outcome = match action.as_str() {
                "approve" => api
                    .update_request(&id, CleaningRequestPatch::status(RequestStatus::Approved))
                    .await
                    .map(|_| "Request approved."),
                "complete" => api
                    .update_request(&id, CleaningRequestPatch::status(RequestStatus::Completed))
                    .await
                    .map(|_| "Request marked complete."),
                "delete" => api.delete_request(&id).await.map(|_| "Request deleted."),
                other => {
                    log::warn!("⚠️ Unknown dashboard action: {other}");
                    return;
                }
            };

            match outcome {
                Ok(message) => {
                    show_notification(message, NotificationKind::Success);
                    router.refresh().await;
                }
                Err(err) => {
                    log::error!("❌ Dashboard action {action} failed for {id}: {err}");
                    show_notification("Action failed. Please try again.", NotificationKind::Error);
                }
            }
        });
    });
}

fn render_statistics(stats: &Statistics) {
    let Some(container) = get_element_by_id("cleaner-stats") else {
        return;
    };

    set_inner_html(
        &container,
        &format!(
            "{}{}{}{}{}",
            stat_card("Total", stats.total),
            stat_card("Pending", stats.pending),
            stat_card("Approved", stats.approved),
            stat_card("Completed", stats.completed),
            stat_card("This Week", stats.this_week),
        ),
    );
}

fn stat_card(label: &str, value: usize) -> String {
    format!(
        "<div class=\"stat-card\">\
           <span class=\"stat-value\">{value}</span>\
           <span class=\"stat-label\">{label}</span>\
         </div>"
    )
}

fn render_request_list(requests: &[CleaningRequest]) {
    let Some(container) = get_element_by_id("cleaner-requests") else {
        return;
    };

    if requests.is_empty() {
        set_inner_html(&container, "<p class=\"empty\">No cleaning requests yet.</p>");
        return;
    }

    let cards: String = requests.iter().map(request_card).collect();
    set_inner_html(&container, &cards);
}

fn request_card(request: &CleaningRequest) -> String {
    let urgency = urgency(&request.checkout_date);
    let id = escape_html(&request.id);

    let actions = match request.status {
        RequestStatus::Pending => format!(
            "<button class=\"btn btn-small\" data-action=\"approve\" data-id=\"{id}\">Approve</button>\
             <button class=\"btn btn-small btn-danger\" data-action=\"delete\" data-id=\"{id}\">Delete</button>"
        ),
        RequestStatus::Approved => format!(
            "<button class=\"btn btn-small\" data-action=\"complete\" data-id=\"{id}\">Mark Complete</button>\
             <button class=\"btn btn-small btn-danger\" data-action=\"delete\" data-id=\"{id}\">Delete</button>"
        ),
        RequestStatus::Completed => format!(
            "<button class=\"btn btn-small btn-danger\" data-action=\"delete\" data-id=\"{id}\">Delete</button>"
        ),
    };

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
           <p class=\"owner\">{owner}</p>\
           <p class=\"schedule\">Checkout {date} at {time}</p>\
           {notes}\
           <p class=\"meta\">Submitted {submitted}</p>\
           <div class=\"card-actions\">{actions}</div>\
         </div>",
        status = request.status.as_str(),
        label = request.status.label(),
        level = urgency.level(),
        urgency = urgency.text(),
        address = escape_html(&request.cabin_address),
        owner = escape_html(&request.owner_email),
        date = format_date(&request.checkout_date),
        time = format_time(&request.checkout_time),
        notes = notes,
        submitted = format_date_time(&request.submitted_at),
    )
}
