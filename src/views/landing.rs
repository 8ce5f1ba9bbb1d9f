use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::router::Router;

/// Landing page: pitch plus the two entry points.
pub fn render_landing(router: Router) -> Result<Element, JsValue> {
    let hero = ElementBuilder::new("div")?
        .class("hero")
        .html(
            "<h1>LakeClean</h1>\
             <p class=\"tagline\">Cabin cleaning, coordinated. Connect your lakeside \
             property with professional cleaners in one place.</p>",
        )
        .build();

    let owner_router = router.clone();
    let owner_button = ElementBuilder::new("button")?
        .class("btn")
        .text("I own a cabin")
        .on_click(move |_| {
            spawn_local(owner_router.navigate("/owner", true));
        })
        .build();

    let cleaner_button = ElementBuilder::new("button")?
        .class("btn btn-secondary")
        .text("I clean cabins")
        .on_click(move |_| {
            spawn_local(router.navigate("/cleaner", true));
        })
        .build();

    let actions = ElementBuilder::new("div")?
        .class("landing-actions")
        .child(owner_button)?
        .child(cleaner_button)?
        .build();

    let view = ElementBuilder::new("div")?
        .class("landing")
        .child(hero)?
        .child(actions)?
        .build();

    Ok(view)
}
