mod error;
mod ftx_request_builder;
mod ftx_rest_client;
mod ftx_rest_settings;
mod models;
mod query_string;
mod transport;

pub use error::*;
pub use ftx_request_builder::*;
pub use ftx_rest_client::*;
pub use ftx_rest_settings::*;
pub use models::*;
pub use query_string::*;
pub use transport::*;
