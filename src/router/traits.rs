use futures::future::LocalBoxFuture;

use crate::error::RouterError;

/// Side effects a navigation performs on the page, behind a trait so the
/// router core can run headless in tests. The web implementation lives in
/// `router::web`.
pub trait PageEffects {
    /// Show the global loading indicator.
    fn show_loading(&self);

    /// Hide the global loading indicator.
    fn hide_loading(&self);

    /// Current location path.
    fn current_path(&self) -> String;

    /// Push a new entry onto the browser history.
    fn push_history(&self, path: &str);

    /// Set the document title.
    fn set_title(&self, title: &str);

    /// Play the exit animation on the current content and resolve when the
    /// content may be replaced without visual flicker.
    fn transition_out(&self) -> LocalBoxFuture<'static, ()>;

    /// Play the entry animation on the freshly rendered content.
    fn transition_in(&self);

    /// Report a navigation failure to the user.
    fn report_error(&self, context: &str, error: &RouterError);
}
