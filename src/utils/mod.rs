pub mod network;
pub mod progress;
