pub mod annotation;
pub mod discovery;
pub mod loader;
pub mod partition;
pub mod writer;
