//! Narrow contract between this plugin and the host agent runtime.
//!
//! The host framework passes rich message and state objects around; the
//! plugin only ever needs the message text, a source tag, and a way to send
//! a response back. Keeping the surface this small isolates the crate from
//! the host's object shapes.

use async_trait::async_trait;

/// An incoming user message, reduced to what the actions consume.
#[derive(Debug, Clone, Default)]
pub struct Message {
    pub text: String,
    /// Where the message came from (channel, platform); echoed back in
    /// responses so the host can route them.
    pub source: Option<String>,
}

impl Message {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }
}

/// A response delivered to the host via the handler callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub text: String,
    /// Names of the actions that produced this response, if any.
    pub actions: Vec<String>,
    pub source: Option<String>,
}

impl ActionResponse {
    /// Response carrying no action attribution (guidance and error paths).
    pub fn plain(text: impl Into<String>, source: Option<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
            source,
        }
    }

    /// Response attributed to a single action.
    pub fn from_action(action: &str, text: impl Into<String>, source: Option<String>) -> Self {
        Self {
            text: text.into(),
            actions: vec![action.to_string()],
            source,
        }
    }
}

/// How handlers deliver responses to the host. Every handler code path
/// invokes this at least once; the host must never be left waiting.
pub type ResponseCallback = dyn Fn(ActionResponse) + Send + Sync;

/// One turn of an example conversation attached to an action.
#[derive(Debug, Clone, Copy)]
pub struct ActionExample {
    pub name: &'static str,
    pub text: &'static str,
    pub actions: &'static [&'static str],
}

/// A named, independently routable unit of intent handling.
///
/// `validate` is a cheap, side-effect-free routing predicate; several
/// actions may claim the same ambiguous message, and picking one is the
/// host's job. `handle` does the full extraction-validation-fetch-format
/// pipeline and reports every outcome through the callback.
#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;

    fn similes(&self) -> &'static [&'static str];

    fn description(&self) -> &'static str;

    fn validate(&self, message: &Message) -> bool;

    async fn handle(&self, message: &Message, callback: &ResponseCallback);

    fn examples(&self) -> &'static [&'static [ActionExample]] {
        &[]
    }
}
