use crate::{Error, TagMap};

/// Persistence for a [`TagMap`].
pub trait Store {
    /// Loads the tag map. Missing backing storage is not an error: an empty
    /// [`TagMap`] is returned instead.
    fn load(&self) -> Result<TagMap, Error>;

    /// Normalises and persists the tag map, replacing whatever was stored.
    fn put(&self, tag_map: &TagMap) -> Result<(), Error>;
}

impl<S> Store for &S
where
    S: Store + ?Sized,
{
    fn load(&self) -> Result<TagMap, Error> {
        (**self).load()
    }

    fn put(&self, tag_map: &TagMap) -> Result<(), Error> {
        (**self).put(tag_map)
    }
}
