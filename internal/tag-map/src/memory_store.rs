use std::cell::RefCell;

use crate::{v1, Error, Store, TagMap};

/// A [`Store`] that keeps the encoded v1 document in memory.
///
/// The document goes through the same encoding as [`crate::JsonFileStore`],
/// so whatever would fail to round trip through a file fails here too.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document<B>(document: B) -> Self
    where
        B: Into<Vec<u8>>,
    {
        Self {
            document: RefCell::new(Some(document.into())),
        }
    }

    /// Returns a copy of the stored document, if anything has been stored.
    pub fn document(&self) -> Option<Vec<u8>> {
        self.document.borrow().clone()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<TagMap, Error> {
        match self.document.borrow().as_deref() {
            Some(document) => v1::deserialize(document),
            None => Ok(TagMap::new()),
        }
    }

    fn put(&self, tag_map: &TagMap) -> Result<(), Error> {
        let mut buf = Vec::new();
        v1::serialize_into(&mut buf, &tag_map.normalize())?;
        self.document.replace(Some(buf));

        Ok(())
    }
}
