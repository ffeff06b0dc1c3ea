use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

use crate::error::{map_read_err, map_write_err, PatchResult};

/// Read a file's entire contents as a string.
///
/// The handle lives only for the duration of this call and is closed on
/// every exit path, including a failed read.
pub fn read_file_to_string(path: impl AsRef<Path>) -> PatchResult<String> {
    let path = path.as_ref();
    debug!("Reading file: {}", path.display());

    let mut file = File::open(path).map_err(map_read_err(path))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(map_read_err(path))?;

    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// Truncate `path` and write `content` in full.
///
/// Not atomic: a failure after the truncation leaves the file short or empty.
pub fn write_file_sync(path: impl AsRef<Path>, content: &str) -> PatchResult<()> {
    let path = path.as_ref();
    debug!("Writing {} bytes to {}", content.len(), path.display());

    let mut file = File::create(path).map_err(map_write_err(path))?;
    file.write_all(content.as_bytes())
        .map_err(map_write_err(path))?;
    file.flush().map_err(map_write_err(path))?;

    Ok(())
}
