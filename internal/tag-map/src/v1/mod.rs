//! v1 contains the data types for the v1 JSON document format:
//!
//! ```text
//! {"version":"1","fileToTag":{"<file>":["<tag>"]},"tagToFile":{"<tag>":["<file>"]}}
//! ```

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::{Error, StringListMap, TagMap};

/// The document version written by this module.
pub const VERSION: &str = "1";

// Only the version is decoded up front, so that documents from other versions
// are rejected by version rather than by whatever field happens not to match.
#[derive(Deserialize)]
struct Header {
    version: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    version: String,
    file_to_tag: StringListMap,
    tag_to_file: StringListMap,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRef<'a> {
    version: &'a str,
    file_to_tag: &'a StringListMap,
    tag_to_file: &'a StringListMap,
}

impl From<Document> for TagMap {
    fn from(doc: Document) -> Self {
        let mut tag_map = TagMap {
            version: doc.version,
            file_to_tag: doc.file_to_tag,
            tag_to_file: doc.tag_to_file,
        };

        tag_map.file_to_tag.prune();
        tag_map.tag_to_file.prune();

        tag_map
    }
}

/// Writes `tag_map` as a v1 document. The caller is responsible for
/// normalising it first.
pub fn serialize_into<W>(mut writer: W, tag_map: &TagMap) -> Result<(), Error>
where
    W: Write,
{
    serde_json::to_writer(
        &mut writer,
        &DocumentRef {
            version: &tag_map.version,
            file_to_tag: &tag_map.file_to_tag,
            tag_to_file: &tag_map.tag_to_file,
        },
    )?;
    writer.flush()?;

    Ok(())
}

pub fn deserialize_from<R>(mut reader: R) -> Result<TagMap, Error>
where
    R: Read,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;

    deserialize(&buf)
}

pub fn deserialize(input: &[u8]) -> Result<TagMap, Error> {
    let header: Header = serde_json::from_slice(input)?;
    if header.version != VERSION {
        return Err(Error::UnknownVersion(header.version));
    }

    let tag_map: TagMap = serde_json::from_slice::<Document>(input)?.into();
    if !tag_map.is_consistent() {
        log::warn!("tag map index is inconsistent; affected tags can be repaired with remove");
    }

    Ok(tag_map)
}
