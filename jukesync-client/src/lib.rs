pub mod api;
pub mod error;
pub mod poller;

pub use api::ServerClient;
pub use error::ClientError;
pub use poller::StatePoller;
