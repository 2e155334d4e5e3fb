//! Bidirectional tag index for `ftag`.
//!
//! [`TagMap`] keeps a file-to-tags and a tag-to-files [`StringListMap`] in
//! step with each other. A [`Store`] loads and persists a [`TagMap`]; the only
//! on-disk format is the v1 JSON document handled by [`JsonFileStore`].

mod error;
pub use self::error::Error;

mod json_file_store;
pub use json_file_store::JsonFileStore;

mod memory_store;
pub use memory_store::MemoryStore;

mod store;
pub use store::Store;

mod string_list_map;
pub use string_list_map::StringListMap;

mod tag_map;
pub use tag_map::TagMap;

pub mod v1;
pub use v1::VERSION;
