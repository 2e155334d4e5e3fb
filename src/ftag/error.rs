use std::{io, path::PathBuf};

use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("{} tracked file(s) missing:{}", .0.len(), format_list(.0))]
    Check(Vec<Error>),

    #[error("cannot access {}: {}", .path.display(), .err)]
    FileNotFound { path: PathBuf, err: io::Error },

    #[error("tag mapping for file not found: {0}")]
    NoMapping(String),

    #[error(transparent)]
    Store(#[from] ftag_tag_map::Error),
}

impl Error {
    pub(crate) fn file_not_found<P>(path: P, err: io::Error) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::FileNotFound {
            path: path.into(),
            err,
        }
    }
}

fn format_list(errors: &[Error]) -> String {
    errors.iter().map(|err| format!("\n  {}", err)).collect()
}
