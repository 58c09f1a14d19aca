pub mod cache;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod entropy;
pub mod entry;
pub mod error;
pub mod fingerprint;
pub mod publish;
pub mod scan;
pub mod tasks {
    pub mod refresh;
    pub mod rotation;
}
