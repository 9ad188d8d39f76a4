//! File ordering by the selected sort key

use crate::domain::{CandidateFile, SortKey};
use crate::error::{MergeError, MergeResult};
use std::fs::Metadata;
use std::time::SystemTime;

/// Extracted comparison value. A run only ever produces one variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Text(String),
    Time(SystemTime),
    Bytes(u64),
}

fn metadata_error(file: &CandidateFile, source: std::io::Error) -> MergeError {
    MergeError::Metadata { path: file.absolute_path.clone(), source }
}

fn metadata(file: &CandidateFile) -> MergeResult<Metadata> {
    std::fs::metadata(&file.absolute_path).map_err(|source| metadata_error(file, source))
}

fn sort_value(file: &CandidateFile, key: SortKey) -> MergeResult<SortValue> {
    let value = match key {
        SortKey::Name => SortValue::Text(file.relative_path.to_string_lossy().to_lowercase()),
        SortKey::CreationTime => SortValue::Time(creation_time(&metadata(file)?)),
        SortKey::ModificationTime => SortValue::Time(
            metadata(file)?.modified().map_err(|source| metadata_error(file, source))?,
        ),
        SortKey::Size => SortValue::Bytes(metadata(file)?.len()),
    };
    Ok(value)
}

/// Inode change time on Unix, where no portable creation time is reported.
#[cfg(unix)]
fn creation_time(metadata: &Metadata) -> SystemTime {
    use std::os::unix::fs::MetadataExt;
    use std::time::{Duration, UNIX_EPOCH};

    let nanos = Duration::from_nanos(metadata.ctime_nsec().max(0) as u64);
    let secs = metadata.ctime();
    if secs >= 0 {
        UNIX_EPOCH + Duration::from_secs(secs as u64) + nanos
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs()) + nanos
    }
}

/// Birth time, or modification time where the filesystem does not record one.
#[cfg(not(unix))]
fn creation_time(metadata: &Metadata) -> SystemTime {
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

/// Sort candidates by `key`, ascending, keeping discovery order for equal keys.
///
/// With `reverse` the finished ascending list is reversed as a whole, so equal
/// keys come out in reverse discovery order too.
pub fn order_files(
    files: Vec<CandidateFile>,
    key: SortKey,
    reverse: bool,
) -> MergeResult<Vec<CandidateFile>> {
    let mut keyed = files
        .into_iter()
        .map(|file| sort_value(&file, key).map(|value| (value, file)))
        .collect::<MergeResult<Vec<_>>>()?;

    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    if reverse {
        keyed.reverse();
    }

    tracing::debug!("Ordered {} files by {} (reverse: {})", keyed.len(), key, reverse);
    Ok(keyed.into_iter().map(|(_, file)| file).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use tempfile::TempDir;

    fn candidate(root: &Path, rel: &str, content: &str) -> CandidateFile {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        CandidateFile::new(path, PathBuf::from(rel))
    }

    fn names(files: &[CandidateFile]) -> Vec<String> {
        files.iter().map(|f| f.display_path()).collect()
    }

    #[test]
    fn test_name_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            candidate(temp.path(), "c.txt", ""),
            candidate(temp.path(), "B.txt", ""),
            candidate(temp.path(), "a.txt", ""),
        ];

        let ordered = order_files(files, SortKey::Name, false).unwrap();
        assert_eq!(names(&ordered), vec!["a.txt", "B.txt", "c.txt"]);
    }

    #[test]
    fn test_name_does_not_touch_filesystem() {
        let files = vec![
            CandidateFile::new(PathBuf::from("/nowhere/z"), PathBuf::from("z")),
            CandidateFile::new(PathBuf::from("/nowhere/y"), PathBuf::from("y")),
        ];
        let ordered = order_files(files, SortKey::Name, false).unwrap();
        assert_eq!(names(&ordered), vec!["y", "z"]);
    }

    #[test]
    fn test_size_ascending_keeps_ties_in_discovery_order() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            candidate(temp.path(), "big", "xxx"),
            candidate(temp.path(), "tie_first", "xx"),
            candidate(temp.path(), "small", "x"),
            candidate(temp.path(), "tie_second", "xx"),
        ];

        let ordered = order_files(files, SortKey::Size, false).unwrap();
        assert_eq!(names(&ordered), vec!["small", "tie_first", "tie_second", "big"]);
    }

    #[test]
    fn test_reverse_inverts_whole_order_including_ties() {
        let temp = TempDir::new().unwrap();
        let make = |root: &Path| {
            vec![
                candidate(root, "big", "xxx"),
                candidate(root, "tie_first", "xx"),
                candidate(root, "small", "x"),
                candidate(root, "tie_second", "xx"),
            ]
        };

        let forward = order_files(make(temp.path()), SortKey::Size, false).unwrap();
        let backward = order_files(make(temp.path()), SortKey::Size, true).unwrap();

        let mut expected = names(&forward);
        expected.reverse();
        assert_eq!(names(&backward), expected);
        assert_eq!(names(&backward), vec!["big", "tie_second", "tie_first", "small"]);
    }

    #[test]
    fn test_modification_time() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            candidate(temp.path(), "newest", "a"),
            candidate(temp.path(), "oldest", "b"),
            candidate(temp.path(), "middle", "c"),
        ];

        let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        for (file, offset) in files.iter().zip([300u64, 100, 200]) {
            let handle = fs::OpenOptions::new().write(true).open(&file.absolute_path).unwrap();
            handle.set_modified(base + Duration::from_secs(offset)).unwrap();
        }

        let ordered = order_files(files, SortKey::ModificationTime, false).unwrap();
        assert_eq!(names(&ordered), vec!["oldest", "middle", "newest"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_creation_time_follows_inode_change_time() {
        use std::os::unix::fs::PermissionsExt;
        use std::thread::sleep;

        let temp = TempDir::new().unwrap();
        let first = candidate(temp.path(), "a", "1");
        sleep(Duration::from_millis(50));
        let second = candidate(temp.path(), "b", "2");
        sleep(Duration::from_millis(50));

        // A permission change touches ctime but not birth time.
        fs::set_permissions(&first.absolute_path, fs::Permissions::from_mode(0o444)).unwrap();

        let ordered = order_files(vec![first, second], SortKey::CreationTime, false).unwrap();
        assert_eq!(names(&ordered), vec!["b", "a"]);
    }

    #[test]
    fn test_missing_file_fails_metadata_keys() {
        let files = vec![CandidateFile::new(PathBuf::from("/nowhere/gone"), PathBuf::from("gone"))];
        let err = order_files(files, SortKey::Size, false).unwrap_err();
        assert!(matches!(err, MergeError::Metadata { .. }));
    }
}
