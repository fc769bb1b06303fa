mod ftx_auth_settings;
pub mod rest;

pub use ftx_auth_settings::*;
