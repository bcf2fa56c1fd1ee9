use thiserror::Error;

/// Failure to attach the widget to the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("target element not found: {id}")]
    ElementNotFound { id: String },
}

/// A scripted input that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("invalid swipe '{0}', expected AT_MS:FROM_X:TO_X")]
    InvalidSwipe(String),
}
