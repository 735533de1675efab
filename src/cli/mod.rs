pub mod bucket;
pub mod files;
pub mod run;
pub mod validate;
