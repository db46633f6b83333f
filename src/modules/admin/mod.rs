pub mod controller;
pub mod export;
pub mod model;
pub mod router;
pub mod service;
