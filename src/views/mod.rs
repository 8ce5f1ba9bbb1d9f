pub mod cleaner;
pub mod landing;
pub mod login;
pub mod owner;
pub mod owner_setup;

pub use cleaner::render_cleaner_dashboard;
pub use landing::render_landing;
pub use login::render_login;
pub use owner::render_owner_portal;
pub use owner_setup::render_owner_setup;

use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_inner_html};

/// Replace the #app content with a freshly rendered view.
pub fn mount(view: Element) -> Result<(), JsValue> {
    let app =
        get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
    set_inner_html(&app, "");
    append_child(&app, &view)
}
