use std::{collections::BTreeSet, fs};

use ftag_tag_map::{Store, TagMap};

mod error;
pub(crate) use self::error::{Error, Result};

/// `FTag` runs tag operations against a [`TagMap`] loaded from a [`Store`].
///
/// A session starts with [`FTag::load()`] and, for operations that change the
/// tag map, ends with [`FTag::store()`]. Storing consumes the session, so a
/// tag map can't be modified again once it has been written back.
#[derive(Debug)]
pub(crate) struct FTag<S>
where
    S: Store,
{
    store: S,
    tag_map: TagMap,
}

impl<S> FTag<S>
where
    S: Store,
{
    pub(crate) fn load(store: S) -> Result<Self> {
        let tag_map = store.load()?;
        Ok(Self { store, tag_map })
    }

    pub(crate) fn store(self) -> Result<()> {
        self.store.put(&self.tag_map)?;
        Ok(())
    }

    #[allow(dead_code)]
    pub(crate) fn tag_map(&self) -> &TagMap {
        &self.tag_map
    }

    /// Adds tags to a file, which must exist.
    pub(crate) fn add<T>(&mut self, file: &str, tags: &[T]) -> Result<()>
    where
        T: AsRef<str>,
    {
        fs::metadata(file).map_err(|err| Error::file_not_found(file, err))?;

        log::debug!("adding {} tag(s) to {}", tags.len(), file);
        for tag in tags {
            self.tag_map.add(file, tag.as_ref());
        }

        Ok(())
    }

    pub(crate) fn clear<T>(&mut self, files: &[T])
    where
        T: AsRef<str>,
    {
        for file in files {
            self.tag_map.clear(file.as_ref());
        }
    }

    /// Returns the files that have _all_ of the given tags.
    pub(crate) fn find<T>(&self, tags: &[T]) -> Vec<String>
    where
        T: AsRef<str>,
    {
        // The tag index can only answer "any of", so narrow that down by
        // checking each candidate's own tags.
        self.tag_map
            .files_for(tags)
            .into_iter()
            .filter(|file| tags.iter().all(|tag| self.tag_map.has_tag(file, tag.as_ref())))
            .collect()
    }

    pub(crate) fn remove<T>(&mut self, file: &str, tags: &[T])
    where
        T: AsRef<str>,
    {
        for tag in tags {
            if !self.tag_map.remove(file, tag.as_ref()) {
                log::debug!("{} was not tagged with {}", file, tag.as_ref());
            }
        }
    }

    /// Returns the sorted tags of the given files, or of every file if none
    /// are given.
    pub(crate) fn list<T>(&self, files: &[T]) -> Vec<String>
    where
        T: AsRef<str>,
    {
        let tags: BTreeSet<&String> = if files.is_empty() {
            self.tag_map
                .file_to_tag()
                .iter()
                .flat_map(|(_file, tags)| tags.iter())
                .collect()
        } else {
            files
                .iter()
                .filter_map(|file| self.tag_map.tags_for(file.as_ref()))
                .flatten()
                .collect()
        };

        tags.into_iter().cloned().collect()
    }

    /// Returns an error for every tracked file that can't be accessed.
    pub(crate) fn check(&self) -> Vec<Error> {
        self.tag_map
            .list_files()
            .into_iter()
            .filter_map(|file| match fs::metadata(&file) {
                Ok(_) => None,
                Err(err) => {
                    log::debug!("tracked file {} is missing: {}", &file, &err);
                    Some(Error::file_not_found(file, err))
                }
            })
            .collect()
    }

    /// Moves the tags of `from` to `to` after the file has been moved on
    /// disk. `to` is not checked for existence.
    pub(crate) fn move_file(&mut self, from: &str, to: &str) -> Result<()> {
        match self.tag_map.rename(from, to) {
            Some(tags) => {
                log::debug!("moved {} tag(s) from {} to {}", tags.len(), from, to);
                Ok(())
            }
            None => Err(Error::NoMapping(from.to_string())),
        }
    }
}
