pub mod controller;
pub mod device;
pub mod model;
pub mod router;
pub mod service;
pub mod validation;
