pub mod credentials;
pub mod error;
pub mod http;
pub mod timing;
pub mod traits;
pub mod types;

pub use credentials::ApiKey;
pub use error::BenchError;
pub use http::{HttpClient, HttpClientConfig};
pub use timing::timed;
pub use traits::Dispatcher;
pub use types::{ChatRole, Message, Prompt, ProviderConfig, RawResponse, ResponseRecord};
