use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{v1, Error, Store, TagMap};

/// A [`Store`] backed by a v1 JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P>(path: P) -> Self
    where
        P: AsRef<Path>,
    {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<TagMap, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no tag map at {}; starting empty", self.path.display());
                return Ok(TagMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        let tag_map = v1::deserialize_from(BufReader::new(file))?;
        log::debug!(
            "loaded {} file(s) and {} tag(s) from {}",
            tag_map.file_to_tag().len(),
            tag_map.tag_to_file().len(),
            self.path.display()
        );

        Ok(tag_map)
    }

    fn put(&self, tag_map: &TagMap) -> Result<(), Error> {
        let tag_map = tag_map.normalize();

        // Write next to the destination and rename over it, so the mapping
        // file is never seen half written.
        let mut file = NamedTempFile::new_in(self.dir())?;
        v1::serialize_into(BufWriter::new(file.as_file_mut()), &tag_map)?;
        file.persist(&self.path)?;

        log::debug!(
            "stored {} file(s) and {} tag(s) to {}",
            tag_map.file_to_tag().len(),
            tag_map.tag_to_file().len(),
            self.path.display()
        );

        Ok(())
    }
}
