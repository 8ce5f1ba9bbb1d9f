use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::dom::element::{append_child, create_element, on_click};

/// Builder for DOM elements, so views read as markup.
pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    pub fn class(self, class: &str) -> Self {
        self.element.set_class_name(class);
        self
    }

    pub fn id(self, id: &str) -> Result<Self, JsValue> {
        self.element.set_attribute("id", id)?;
        Ok(self)
    }

    pub fn text(self, text: &str) -> Self {
        self.element.set_text_content(Some(text));
        self
    }

    pub fn html(self, html: &str) -> Self {
        self.element.set_inner_html(html);
        self
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn on_click<F>(self, handler: F) -> Self
    where
        F: FnMut(MouseEvent) + 'static,
    {
        on_click(&self.element, handler);
        self
    }

    pub fn build(self) -> Element {
        self.element
    }
}
