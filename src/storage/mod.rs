pub mod api;

pub use api::{NewBucket, NewFile, StorageApi};
