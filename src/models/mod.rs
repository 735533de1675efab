pub mod permission;
pub mod project;
pub mod storage;

pub use permission::{Id, Permission, Role};
pub use project::{ProjectScope, Side};
pub use storage::{Bucket, FileList, StoredFile};
