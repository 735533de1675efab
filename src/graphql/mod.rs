pub mod envelope;
pub mod payload;
pub mod queries;

pub use envelope::Envelope;
pub use payload::{GraphQLPayload, MultipartUpload, UploadFile};
pub use queries::Operation;

/// Path every operation is posted to
pub const GRAPHQL_PATH: &str = "/graphql";
