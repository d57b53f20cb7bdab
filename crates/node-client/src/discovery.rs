//! Locating the daemon's command-line binary.

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};

use crate::errors::NodeError;

/// Binary name searched for on `PATH` when none is given explicitly.
pub const DEFAULT_EXECUTABLE: &str = "ipfs";

/// Resolves the daemon binary: `explicit` when given, otherwise
/// [`DEFAULT_EXECUTABLE`] looked up on the process `PATH`.
pub fn locate_executable(explicit: Option<&Utf8Path>) -> Result<Utf8PathBuf, NodeError> {
    let program = explicit.unwrap_or_else(|| Utf8Path::new(DEFAULT_EXECUTABLE));

    find_executable(program, env::var_os("PATH").as_deref())
}

/// A program with a directory component is checked in place; a bare name is
/// searched for in each entry of `search_path`, first match wins.
pub fn find_executable(
    program: &Utf8Path,
    search_path: Option<&OsStr>,
) -> Result<Utf8PathBuf, NodeError> {
    let not_found = || NodeError::ExecutableNotFound {
        path: program.to_owned(),
    };

    let has_directory = program
        .parent()
        .is_some_and(|parent| !parent.as_str().is_empty());

    if has_directory {
        return if is_executable(program.as_std_path()) {
            Ok(program.to_owned())
        } else {
            Err(not_found())
        };
    }

    let search_path = search_path.ok_or_else(not_found)?;

    env::split_paths(search_path)
        .filter_map(|dir| Utf8PathBuf::from_path_buf(dir).ok())
        .map(|dir| Utf8Path::new(dir.as_str().trim_matches('"')).join(program))
        .find(|candidate| is_executable(candidate.as_std_path()))
        .ok_or_else(not_found)
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };

    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use tempfile::TempDir;

    use super::*;

    fn bin_dir(files: &[(&str, u32)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();

        for (name, mode) in files {
            let path = dir.path().join(name);
            fs::write(&path, "#!/bin/sh\n").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(*mode)).unwrap();
        }

        dir
    }

    fn utf8(path: &Path) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path.to_path_buf()).unwrap()
    }

    #[test]
    fn test_search_path_finds_first_executable() {
        let plain = bin_dir(&[("ipfs", 0o644)]);
        let exec = bin_dir(&[("ipfs", 0o755)]);
        let search = env::join_paths([plain.path(), exec.path()]).unwrap();

        let found = find_executable(Utf8Path::new("ipfs"), Some(&search)).unwrap();

        assert_eq!(found, utf8(exec.path()).join("ipfs"));
    }

    #[test]
    fn test_search_path_strips_quotes() {
        let exec = bin_dir(&[("ipfs", 0o755)]);
        let quoted = format!("\"{}\"", exec.path().display());

        let found = find_executable(Utf8Path::new("ipfs"), Some(OsStr::new(&quoted))).unwrap();

        assert_eq!(found, utf8(exec.path()).join("ipfs"));
    }

    #[test]
    fn test_missing_executable() {
        let empty = bin_dir(&[]);

        let err = find_executable(Utf8Path::new("ipfs"), Some(empty.path().as_os_str()));
        assert!(
            matches!(err, Err(NodeError::ExecutableNotFound { .. })),
            "nothing on the search path"
        );

        let err = find_executable(Utf8Path::new("ipfs"), None);
        assert!(
            matches!(err, Err(NodeError::ExecutableNotFound { .. })),
            "no search path at all"
        );
    }

    #[test]
    fn test_explicit_path_is_checked_in_place() {
        let dir = bin_dir(&[("custom-ipfs", 0o755), ("not-exec", 0o600)]);
        let root = utf8(dir.path());

        let found = find_executable(&root.join("custom-ipfs"), None).unwrap();
        assert_eq!(found, root.join("custom-ipfs"));

        assert!(
            find_executable(&root.join("not-exec"), None).is_err(),
            "file without execute bit"
        );
        assert!(
            find_executable(&root, None).is_err(),
            "a directory is not an executable"
        );
    }
}
