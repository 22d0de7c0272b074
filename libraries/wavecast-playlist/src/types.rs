//! Playlist item model

use serde::{Deserialize, Serialize};
use std::fs::FileType;
use std::path::PathBuf;
use std::time::SystemTime;

/// Filesystem classification bits for a scanned entry.
///
/// More than one bit may be set: a symbolic link to a directory is both
/// `symlink` and `dir`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeKind {
    pub file: bool,
    pub dir: bool,
    pub symlink: bool,
    pub device: bool,
}

impl NodeKind {
    /// Classify an entry from its resolved file type and whether the path
    /// itself is a symbolic link.
    pub fn classify(file_type: FileType, path_is_symlink: bool) -> Self {
        Self {
            file: file_type.is_file(),
            dir: file_type.is_dir(),
            symlink: path_is_symlink || file_type.is_symlink(),
            device: is_device(file_type),
        }
    }
}

#[cfg(unix)]
fn is_device(file_type: FileType) -> bool {
    use std::os::unix::fs::FileTypeExt;
    file_type.is_block_device() || file_type.is_char_device()
}

#[cfg(not(unix))]
fn is_device(_file_type: FileType) -> bool {
    false
}

/// One filesystem entry eligible for playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// File path as produced by the walk.
    pub path: PathBuf,

    /// Cover-art image inferred for the containing directory, if any.
    pub cover: Option<PathBuf>,

    /// Last modification time reported by the filesystem.
    pub modified_at: SystemTime,

    /// File size in bytes.
    pub size_bytes: u64,

    /// Whether this entry is selected for native-engine playback.
    /// Every scanned item starts selected.
    pub checked: bool,

    /// Filesystem classification of the entry.
    pub kind: NodeKind,
}

impl PlaylistItem {
    /// Base name of the underlying file, if the path has one.
    pub fn basename(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}
