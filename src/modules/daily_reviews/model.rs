pub use classpulse_models::daily_reviews::*;
