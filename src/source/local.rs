//! Local-file source: an uploaded body, a file path, or a directory treated like a listing.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use walkdir::WalkDir;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{ByteStream, RemoteEntry};

use super::select::{select_entry_matching, NameCriteria};
use super::{ResolveOptions, Resolved, SourceResolver};

/// Where a local document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalFileSource {
    /// Bytes supplied by the caller (e.g. an uploaded request body).
    Bytes(Vec<u8>),
    /// A file, or a directory whose newest matching file is used.
    Path { path: PathBuf, criteria: NameCriteria },
}

impl LocalFileSource {
    /// A single file or directory with no name filter.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path {
            path: path.into(),
            criteria: NameCriteria::default(),
        }
    }
}

impl SourceResolver for LocalFileSource {
    fn resolve(&self, _options: &ResolveOptions) -> PipelineResult<Resolved> {
        let stream = match self {
            Self::Bytes(bytes) => ByteStream::new("upload", bytes.clone()),
            Self::Path { path, criteria } if path.is_dir() => read_newest_in_dir(path, criteria)?,
            Self::Path { path, .. } => read_file(path)?,
        };
        Ok(Resolved::new(stream))
    }
}

fn read_newest_in_dir(dir: &Path, criteria: &NameCriteria) -> PipelineResult<ByteStream> {
    let entries = list_dir(dir)?;
    if entries.is_empty() {
        return Err(PipelineError::EmptyListing);
    }

    let selected = select_entry_matching(&entries, criteria)?;
    read_file(&dir.join(&selected.name))
}

fn read_file(path: &Path) -> PipelineResult<ByteStream> {
    let name = path.display().to_string();
    match fs::read(path) {
        Ok(bytes) => Ok(ByteStream::new(name, bytes)),
        Err(e) => Err(PipelineError::Retrieval {
            name,
            message: e.to_string(),
        }),
    }
}

/// Regular files directly inside `dir`, in file-name order.
fn list_dir(dir: &Path) -> PipelineResult<Vec<RemoteEntry>> {
    let mut entries = Vec::new();
    for item in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let item = item.map_err(|e| PipelineError::List {
            message: e.to_string(),
        })?;
        if !item.file_type().is_file() {
            continue;
        }
        let meta = item.metadata().map_err(|e| PipelineError::List {
            message: e.to_string(),
        })?;
        let modified_at = meta.modified().unwrap_or(UNIX_EPOCH);
        entries.push(RemoteEntry::new(
            item.file_name().to_string_lossy(),
            modified_at,
            meta.len(),
        ));
    }
    Ok(entries)
}
