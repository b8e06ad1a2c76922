mod client;
pub use client::CloudClient;

mod config;
pub use config::{CloudConfig, DEFAULT_BASE_URL};

mod errors;
pub use errors::CloudError;

mod wire;
