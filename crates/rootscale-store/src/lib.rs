#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};

mod backend;
mod document;
mod store;

pub use backend::{DimensionBackend, JsonFileBackend, MemoryBackend};
pub use document::{decode_document, encode_records};
pub use store::DimensionStore;

pub const CRATE_NAME: &str = "rootscale-store";

#[derive(Debug)]
pub struct StoreError(pub String);

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}
