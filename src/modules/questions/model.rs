pub use classpulse_models::questions::*;
