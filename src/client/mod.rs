pub mod error;
pub mod http;

pub use error::ClientError;
pub use http::{ApiResponse, HttpClient, RequestBody, ResponseBody};
