use std::collections::BTreeSet;

use crate::{StringListMap, VERSION};

/// A bidirectional index of files to tags and tags to files.
///
/// Every mutating method updates both directions, so that a tag appears in a
/// file's tag list exactly when the file appears in that tag's file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMap {
    pub(crate) version: String,
    pub(crate) file_to_tag: StringListMap,
    pub(crate) tag_to_file: StringListMap,
}

impl Default for TagMap {
    fn default() -> Self {
        Self {
            version: VERSION.to_string(),
            file_to_tag: StringListMap::new(),
            tag_to_file: StringListMap::new(),
        }
    }
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn file_to_tag(&self) -> &StringListMap {
        &self.file_to_tag
    }

    pub fn tag_to_file(&self) -> &StringListMap {
        &self.tag_to_file
    }

    /// Returns every file that has at least one tag.
    pub fn list_files(&self) -> Vec<String> {
        self.file_to_tag.keys()
    }

    /// Returns the sorted set of files that have _any_ of the given tags.
    pub fn files_for<I>(&self, tags: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        tags.into_iter()
            .filter_map(|tag| self.tag_to_file.get(tag.as_ref()))
            .flatten()
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    pub fn tags_for(&self, file: &str) -> Option<&[String]> {
        self.file_to_tag.get(file)
    }

    pub fn has_tag(&self, file: &str, tag: &str) -> bool {
        self.file_to_tag.has_value(file, tag)
    }

    pub fn add(&mut self, file: &str, tag: &str) {
        log::trace!("adding tag {} to {}", tag, file);
        self.file_to_tag.add_unique(file, [tag]);
        self.tag_to_file.add_unique(tag, [file]);
    }

    /// Removes the pairing of `file` and `tag`.
    ///
    /// Returns true if the pairing was found in either direction.
    pub fn remove(&mut self, file: &str, tag: &str) -> bool {
        log::trace!("removing tag {} from {}", tag, file);
        let removed_tag = self.file_to_tag.remove_first(file, tag);
        let removed_file = self.tag_to_file.remove_first(tag, file);
        removed_tag || removed_file
    }

    /// Removes every tag from `file`.
    pub fn clear(&mut self, file: &str) {
        if let Some(tags) = self.file_to_tag.remove_key(file) {
            log::trace!("clearing {} tag(s) from {}", tags.len(), file);
            for tag in tags.iter() {
                self.tag_to_file.remove_first(tag, file);
            }
        }
    }

    /// Moves the tags of `from` onto `to`, replacing whatever `to` had.
    ///
    /// Returns the moved tags, or `None` if `from` has no tags.
    pub fn rename(&mut self, from: &str, to: &str) -> Option<Vec<String>> {
        let tags = self.file_to_tag.get(from)?.to_vec();
        if from == to {
            return Some(tags);
        }

        log::trace!("renaming {} to {}", from, to);
        self.clear(to);
        self.file_to_tag.remove_key(from);
        self.file_to_tag.insert(to, tags.clone());

        for tag in tags.iter() {
            self.tag_to_file.remove_first(tag, from);
            self.tag_to_file.add_unique(tag, [to]);
        }

        Some(tags)
    }

    /// Returns a copy ready for persistence: the version is reset, each file's
    /// tags are sorted and empty entries are dropped.
    ///
    /// Files per tag are left in insertion order.
    pub fn normalize(&self) -> TagMap {
        let mut tag_map = self.clone();

        tag_map.version = VERSION.to_string();
        tag_map.file_to_tag.sort_values();
        tag_map.file_to_tag.prune();
        tag_map.tag_to_file.prune();

        tag_map
    }

    /// Checks that both directions of the index agree.
    pub fn is_consistent(&self) -> bool {
        self.file_to_tag.iter().all(|(file, tags)| {
            tags.iter()
                .all(|tag| self.tag_to_file.has_value(tag, file))
        }) && self.tag_to_file.iter().all(|(tag, files)| {
            files
                .iter()
                .all(|file| self.file_to_tag.has_value(file, tag))
        })
    }
}
