pub mod config;
pub mod transport;

pub use config::SesConfig;
pub use transport::SesTransport;
