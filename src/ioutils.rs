use std::io::Write;
use std::path::{Path, PathBuf};

use crate::constants::STDIN_INDICATOR;
use crate::error::{Error, Result};
use crate::ext::PathExt;

/// Ensures the output directory is safe to write to.
pub fn get_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)
}

/// Writes `content` atomically: a temporary file in the destination
/// directory is persisted over `dest_path`, so readers never see a partial document.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    let parent = match dest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    create_dir_all(&parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(dest_path).map_err(|e| Error::IoError(e.error))?;
    log::debug!("Wrote {}", dest_path.display());
    Ok(())
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

/// Fails when more than one of `sources` is `-`.
pub fn ensure_stdin_read_once<'a>(sources: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let uses = sources.into_iter().filter(|source| *source == STDIN_INDICATOR).count();
    if uses > 1 {
        return Err(Error::StdinReusedError { uses });
    }
    Ok(())
}

/// Reads a template file, or stdin when `path` is `-`.
pub fn read_template<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if path.to_str_checked()? == STDIN_INDICATOR {
        return read_from(std::io::stdin());
    }
    if !path.is_file() {
        return Err(Error::TemplateDoesNotExistsError { path: path.display().to_string() });
    }
    Ok(std::fs::read_to_string(path)?)
}
