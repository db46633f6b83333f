//! Feedback models, re-exported from the `classpulse-models` crate.

pub use classpulse_models::feedback::*;
