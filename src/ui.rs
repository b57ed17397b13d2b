//! Seam to the windowing toolkit.
//!
//! The panel never draws anything itself; modal interaction and browser
//! launching stay with the host GUI. This trait is the whole surface the
//! panel needs from it. Prompts are modal: they block the UI thread until
//! the operator dismisses them, with no timeout.

/// Modal prompts and external actions provided by the host GUI.
pub trait UserPrompt {
    /// Show a warning the operator must acknowledge.
    fn warn(&self, message: &str);

    /// Ask a yes/no safety question. Only an explicit affirmative returns
    /// `true`; closing the dialog counts as a refusal.
    fn confirm(&self, message: &str) -> bool;

    /// Open a documentation URL in the operator's default browser.
    fn open_url(&self, url: &str);
}
