#![forbid(unsafe_code)]

mod element;
mod error;
mod producer;
mod store;
mod utils;

pub use self::element::{Element, Index, MAX_HEIGHT, ROOT_INDEX, START_INDEX};
pub use self::error::ShachainError;
pub use self::producer::{generate_from_seed, RevocationProducer};
pub use self::store::RevocationStore;
