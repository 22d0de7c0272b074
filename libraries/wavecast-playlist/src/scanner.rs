//! Directory scanning for audio files and cover art

use crate::types::{NodeKind, PlaylistItem};
use crate::{Result, ScanError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Audio extensions eligible for playlist entries (lowercase).
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "aac"];

/// Image extensions recognized as potential cover art (lowercase).
const COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "heic", "webp"];

/// Conventional cover-art file probed directly inside each directory.
const COVER_FILENAME: &str = "Folder.jpg";

/// Scanner for audio files below a media root.
pub struct Scanner {
    /// Whether to follow symbolic links to directories.
    follow_links: bool,

    /// Maximum depth to traverse (unlimited when unset).
    max_depth: Option<usize>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            follow_links: true,
            max_depth: None,
        }
    }
}

impl Scanner {
    /// Create a new scanner
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum directory depth to traverse
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Walk `root` depth-first and build a playlist entry for every audio
    /// file found below it.
    ///
    /// Each directory is probed for a `Folder.jpg` when the walk enters it;
    /// audio files directly inside that directory carry the probed path as
    /// their cover. The inherited cover never applies to subdirectories or
    /// siblings. Playlist order is the traversal order; no sort is applied
    /// over it.
    ///
    /// An unreadable root aborts the walk. Every failure below the root
    /// degrades to "entry omitted" with a warning.
    pub fn scan(&self, root: &Path) -> Result<Vec<PlaylistItem>> {
        if !root.exists() {
            return Err(ScanError::RootNotFound(root.display().to_string()));
        }

        if !root.is_dir() {
            return Err(ScanError::InvalidRoot(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        std::fs::read_dir(root).map_err(|source| ScanError::RootUnreadable {
            path: root.display().to_string(),
            source,
        })?;

        let mut items = Vec::new();

        // Cover art discovered per directory. Keyed by directory path so a
        // cover can never leak into a sibling or a subdirectory.
        let mut covers: HashMap<PathBuf, Option<PathBuf>> = HashMap::new();

        let mut walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            // The walk yields a directory before its contents, so the probe
            // result is always in place when the children come by.
            if entry.file_type().is_dir() {
                covers.insert(entry.path().to_path_buf(), probe_cover(entry.path()));
                continue;
            }

            if !is_audio_file(entry.path()) {
                if is_cover_image(entry.path()) {
                    tracing::debug!("cover image candidate: {}", entry.path().display());
                }
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::warn!("stat failed on {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            let modified_at = match metadata.modified() {
                Ok(modified_at) => modified_at,
                Err(e) => {
                    tracing::warn!(
                        "no modification time for {}: {}",
                        entry.path().display(),
                        e
                    );
                    continue;
                }
            };

            let cover = entry
                .path()
                .parent()
                .and_then(|dir| covers.get(dir).cloned())
                .flatten();

            items.push(PlaylistItem {
                path: entry.path().to_path_buf(),
                cover,
                modified_at,
                size_bytes: metadata.len(),
                checked: true,
                kind: NodeKind::classify(metadata.file_type(), entry.path_is_symlink()),
            });
        }

        Ok(items)
    }
}

/// Check if a file carries one of the accepted audio extensions.
///
/// A missing or empty extension never matches.
pub fn is_audio_file(path: &Path) -> bool {
    match lowercase_extension(path) {
        Some(ext) => AUDIO_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}

/// Check if a file carries one of the recognized cover-image extensions.
pub fn is_cover_image(path: &Path) -> bool {
    match lowercase_extension(path) {
        Some(ext) => COVER_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .filter(|ext| !ext.is_empty())
}

/// Look for the conventional cover file directly inside `dir`.
fn probe_cover(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(COVER_FILENAME);
    candidate.is_file().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("test.mp3")));
        assert!(is_audio_file(Path::new("test.MP3")));
        assert!(is_audio_file(Path::new("test.m4a")));
        assert!(is_audio_file(Path::new("test.AAC")));
        assert!(!is_audio_file(Path::new("test.flac")));
        assert!(!is_audio_file(Path::new("test.txt")));
        assert!(!is_audio_file(Path::new("test")));
        // A trailing dot yields an empty extension, which must not match.
        assert!(!is_audio_file(Path::new("test.")));
    }

    #[test]
    fn test_is_cover_image() {
        assert!(is_cover_image(Path::new("Folder.jpg")));
        assert!(is_cover_image(Path::new("front.JPEG")));
        assert!(is_cover_image(Path::new("art.webp")));
        assert!(!is_cover_image(Path::new("notes.txt")));
        assert!(!is_cover_image(Path::new("noext")));
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("song1.mp3"), b"fake mp3").unwrap();
        fs::write(base.join("song2.M4A"), b"fake m4a").unwrap();
        fs::write(base.join("readme.txt"), b"not audio").unwrap();
        fs::write(base.join("noext"), b"no extension").unwrap();
        fs::write(base.join("trailing."), b"empty extension").unwrap();

        let items = Scanner::new().scan(base).unwrap();

        assert_eq!(items.len(), 2);
        assert!(items.iter().any(|i| i.path.ends_with("song1.mp3")));
        assert!(items.iter().any(|i| i.path.ends_with("song2.M4A")));
    }

    #[test]
    fn test_scan_example_tree() {
        // root/{a.mp3, sub/Folder.jpg, sub/b.mp3, sub/c.txt} yields two
        // items: a.mp3 without cover, b.mp3 covered by sub/Folder.jpg.
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("a.mp3"), b"fake mp3").unwrap();
        let sub = base.join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("Folder.jpg"), b"fake jpeg").unwrap();
        fs::write(sub.join("b.mp3"), b"fake mp3").unwrap();
        fs::write(sub.join("c.txt"), b"not audio").unwrap();

        let items = Scanner::new().scan(base).unwrap();

        assert_eq!(items.len(), 2);
        assert!(items[0].path.ends_with("a.mp3"));
        assert_eq!(items[0].cover, None);
        assert!(items[1].path.ends_with("b.mp3"));
        assert_eq!(items[1].cover, Some(sub.join("Folder.jpg")));
    }

    #[test]
    fn test_cover_never_leaks_into_siblings() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        let covered = base.join("covered");
        fs::create_dir(&covered).unwrap();
        fs::write(covered.join("Folder.jpg"), b"fake jpeg").unwrap();
        fs::write(covered.join("a.mp3"), b"fake mp3").unwrap();

        let plain = base.join("plain");
        fs::create_dir(&plain).unwrap();
        fs::write(plain.join("b.mp3"), b"fake mp3").unwrap();

        let items = Scanner::new().scan(base).unwrap();

        assert_eq!(items.len(), 2);
        let a = items.iter().find(|i| i.path.ends_with("a.mp3")).unwrap();
        let b = items.iter().find(|i| i.path.ends_with("b.mp3")).unwrap();
        assert_eq!(a.cover, Some(covered.join("Folder.jpg")));
        assert_eq!(b.cover, None);
    }

    #[test]
    fn test_cover_never_leaks_into_subdirectories() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("Folder.jpg"), b"fake jpeg").unwrap();
        fs::write(base.join("a.mp3"), b"fake mp3").unwrap();
        let sub = base.join("deeper");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("b.mp3"), b"fake mp3").unwrap();

        let items = Scanner::new().scan(base).unwrap();

        let a = items.iter().find(|i| i.path.ends_with("a.mp3")).unwrap();
        let b = items.iter().find(|i| i.path.ends_with("b.mp3")).unwrap();
        assert_eq!(a.cover, Some(base.join("Folder.jpg")));
        assert_eq!(b.cover, None);
    }

    #[test]
    fn test_scan_items_start_checked_with_stat_fields() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        fs::write(base.join("song.mp3"), b"twelve bytes").unwrap();

        let items = Scanner::new().scan(base).unwrap();

        assert_eq!(items.len(), 1);
        assert!(items[0].checked);
        assert_eq!(items[0].size_bytes, 12);
        assert!(items[0].kind.file);
        assert!(!items[0].kind.dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_marks_symlinked_files() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("real.mp3"), b"fake mp3").unwrap();
        std::os::unix::fs::symlink(base.join("real.mp3"), base.join("alias.mp3")).unwrap();

        let items = Scanner::new().scan(base).unwrap();

        assert_eq!(items.len(), 2);
        let alias = items.iter().find(|i| i.path.ends_with("alias.mp3")).unwrap();
        assert!(alias.kind.file);
        assert!(alias.kind.symlink);
        let real = items.iter().find(|i| i.path.ends_with("real.mp3")).unwrap();
        assert!(!real.kind.symlink);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_directory_symlinks() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        let target = base.join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inside.mp3"), b"fake mp3").unwrap();
        std::os::unix::fs::symlink(&target, base.join("link")).unwrap();

        let items = Scanner::new().scan(base).unwrap();
        // Reached both directly and through the link.
        assert_eq!(items.len(), 2);

        let unfollowed = Scanner::new().follow_links(false).scan(base).unwrap();
        assert_eq!(unfollowed.len(), 1);
    }

    #[test]
    fn test_rescan_of_unchanged_tree_is_identical() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("b.mp3"), b"fake mp3").unwrap();
        fs::write(base.join("a.mp3"), b"fake mp3").unwrap();
        let sub = base.join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("c.aac"), b"fake aac").unwrap();

        let scanner = Scanner::new();
        let first = scanner.scan(base).unwrap();
        let second = scanner.scan(base).unwrap();

        let paths = |items: &[PlaylistItem]| -> Vec<PathBuf> {
            items.iter().map(|i| i.path.clone()).collect()
        };
        assert_eq!(paths(&first), paths(&second));
    }

    #[test]
    fn test_scan_rejects_bad_roots() {
        let temp = TempDir::new().unwrap();

        let missing = temp.path().join("nope");
        assert!(matches!(
            Scanner::new().scan(&missing),
            Err(ScanError::RootNotFound(_))
        ));

        let file = temp.path().join("file.mp3");
        fs::write(&file, b"fake mp3").unwrap();
        assert!(matches!(
            Scanner::new().scan(&file),
            Err(ScanError::InvalidRoot(_))
        ));
    }

    #[test]
    fn test_scan_with_max_depth() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("song1.mp3"), b"fake mp3").unwrap();
        let subdir = base.join("subdir");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("song2.mp3"), b"fake mp3").unwrap();

        let items = Scanner::new().max_depth(1).scan(base).unwrap();

        assert_eq!(items.len(), 1);
        assert!(items[0].path.ends_with("song1.mp3"));
    }
}
