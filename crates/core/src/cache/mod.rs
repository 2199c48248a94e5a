mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{list_items_key, parse_list_items_key};
pub use serialization::{
    decode_snapshot, encode_snapshot, SerializationError, Snapshot, SNAPSHOT_VERSION,
};
pub use traits::Cache;
