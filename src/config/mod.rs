pub mod env_loader;
pub mod parser;
pub mod validator;

pub use parser::Config;
pub use validator::ConfigValidator;
