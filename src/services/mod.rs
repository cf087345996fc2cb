pub mod api;
pub mod credential;

pub use api::ApiClient;
pub use credential::Credential;
