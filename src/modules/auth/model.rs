pub use classpulse_models::admin::*;
