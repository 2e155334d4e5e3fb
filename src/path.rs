use std::{
    env, io,
    path::{Path, PathBuf},
};

/// Resolves `path` against the current working directory if it's relative.
pub(crate) fn resolve_path<P>(path: P) -> io::Result<PathBuf>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}
