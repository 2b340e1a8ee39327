//! File-based variable sources: path resolution, candidate layering and parsing.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::parse::parse_numbered;
use super::vars::VariableSet;
use super::DotenvError;

/// File name used when the base path is a directory.
pub const DEFAULT_FILE_NAME: &str = ".env";

/// Suffix of the machine-local variant of every candidate file.
pub const LOCAL_SUFFIX: &str = ".local";

/// The directory and base file name a loader reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub dir: PathBuf,
    pub file_name: OsString,
}

impl ResolvedLocation {
    /// Resolves a base path that must be a readable file or directory.
    ///
    /// A file supplies both the directory and the base file name; a directory
    /// uses [`DEFAULT_FILE_NAME`].
    pub fn resolve(path: &Path) -> Result<Self, DotenvError> {
        if path.as_os_str().is_empty() {
            return Err(DotenvError::PathNotSet);
        }

        if is_readable_file(path) {
            let file_name = path
                .file_name()
                .ok_or_else(|| DotenvError::PathNotAccessible(path.to_path_buf()))?;
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            return Ok(Self {
                dir,
                file_name: file_name.to_os_string(),
            });
        }

        if is_readable_dir(path) {
            return Ok(Self {
                dir: path.to_path_buf(),
                file_name: OsString::from(DEFAULT_FILE_NAME),
            });
        }

        Err(DotenvError::PathNotAccessible(path.to_path_buf()))
    }

    /// Lists the readable files of one layer, in load order.
    ///
    /// An empty `suffix` selects the base layer (`F`, `F.local`); otherwise
    /// the environment layer (`F-suffix`, `F-suffix.local`). Missing files
    /// are skipped.
    pub fn candidate_files(&self, suffix: &str) -> Vec<PathBuf> {
        let mut stem = self.file_name.clone();
        if !suffix.is_empty() {
            stem.push("-");
            stem.push(suffix);
        }
        let mut local = stem.clone();
        local.push(LOCAL_SUFFIX);

        [stem, local]
            .into_iter()
            .map(|name| self.dir.join(name))
            .filter(|candidate| {
                let found = is_readable_file(candidate);
                debug!(
                    "env file candidate {}: {}",
                    candidate.display(),
                    if found { "found" } else { "skipped" }
                );
                found
            })
            .collect()
    }
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && fs::File::open(path).is_ok()
}

fn is_readable_dir(path: &Path) -> bool {
    path.is_dir() && fs::read_dir(path).is_ok()
}

fn read_text(path: &Path) -> Result<String, DotenvError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e)
            if matches!(
                e.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ) =>
        {
            Err(DotenvError::PathNotAccessible(path.to_path_buf()))
        }
        Err(e) => Err(DotenvError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Parses a single env file.
///
/// Fails on the first invalid line without returning any of the file's pairs.
pub fn process_file(path: impl AsRef<Path>) -> Result<VariableSet, DotenvError> {
    let path = path.as_ref();
    let vars = parse_numbered(&read_text(path)?).map_err(|(line, source)| {
        DotenvError::Syntax {
            path: path.to_path_buf(),
            line,
            source,
        }
    })?;

    debug!("parsed {} variable(s) from {}", vars.len(), path.display());
    Ok(vars)
}

/// Parses every file in order and merges them, later files winning.
pub fn process_file_list<I>(paths: I) -> Result<VariableSet, DotenvError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let mut merged = VariableSet::new();
    for path in paths {
        merged.merge(process_file(path)?);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dotenv::SyntaxError;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_resolve_directory_uses_default_name() {
        let dir = TempDir::new().unwrap();
        let loc = ResolvedLocation::resolve(dir.path()).unwrap();

        assert_eq!(loc.dir, dir.path());
        assert_eq!(loc.file_name, OsString::from(".env"));
    }

    #[test]
    fn test_resolve_file_splits_dir_and_name() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "my-app.vars", "A1=x\n");
        let loc = ResolvedLocation::resolve(&path).unwrap();

        assert_eq!(loc.dir, dir.path());
        assert_eq!(loc.file_name, OsString::from("my-app.vars"));
    }

    #[test]
    fn test_resolve_errors() {
        assert!(matches!(
            ResolvedLocation::resolve(Path::new("")),
            Err(DotenvError::PathNotSet)
        ));
        assert!(matches!(
            ResolvedLocation::resolve(Path::new("/not/existing")),
            Err(DotenvError::PathNotAccessible(_))
        ));
    }

    #[test]
    fn test_candidate_order_and_skipping() {
        let dir = TempDir::new().unwrap();
        write(&dir, ".env", "");
        write(&dir, ".env.local", "");
        write(&dir, ".env-production.local", "");
        let loc = ResolvedLocation::resolve(dir.path()).unwrap();

        assert_eq!(
            loc.candidate_files(""),
            vec![dir.path().join(".env"), dir.path().join(".env.local")]
        );
        assert_eq!(
            loc.candidate_files("production"),
            vec![dir.path().join(".env-production.local")]
        );
        assert!(loc.candidate_files("staging").is_empty());
    }

    #[test]
    fn test_process_file_correct_syntax() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            ".correct-syntax",
            "# leading comment\nvarOne=First\n\nvar2 = Second\nvarThree=3rd\n",
        );
        let vars = process_file(&path).unwrap();

        let expected: VariableSet = [("varOne", "First"), ("var2", "Second"), ("varThree", "3rd")]
            .into_iter()
            .collect();
        assert_eq!(vars, expected);
    }

    #[test]
    fn test_process_file_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, ".empty", "# only a comment\n\n");
        assert!(process_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_process_file_wrong_definition() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, ".wrong-syntax", "GOOD=1\n\nbad line no equals\n");
        let err = process_file(&path).unwrap_err();

        match err {
            DotenvError::Syntax { line, source, .. } => {
                assert_eq!(line, 3);
                assert_eq!(source, SyntaxError::MissingSeparator("bad line no equals".into()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_process_file_missing_or_directory() {
        let dir = TempDir::new().unwrap();
        assert!(process_file(dir.path().join("absent")).unwrap_err().is_path_error());
        assert!(process_file(dir.path()).unwrap_err().is_path_error());
    }

    #[test]
    fn test_process_file_list_disjoint() {
        let dir = TempDir::new().unwrap();
        let base = write(
            &dir,
            ".env-list-base",
            "DB_HOST=example.host\nDB_PORT=3306\nDB_USER=appdbuser\nDB_PASS=appdbpass\n",
        );
        let different = write(
            &dir,
            ".env-list-different",
            "DB_NAME=exampledb\nDB_ENCODING=utf-8\n",
        );
        let vars = process_file_list([&base, &different]).unwrap();

        assert_eq!(vars.len(), 6);
        assert_eq!(vars.get("DB_HOST"), Some("example.host"));
        assert_eq!(vars.get("DB_ENCODING"), Some("utf-8"));
    }

    #[test]
    fn test_process_file_list_overlap() {
        let dir = TempDir::new().unwrap();
        let base = write(
            &dir,
            ".env-list-base",
            "DB_HOST=example.host\nDB_PORT=3306\nDB_USER=appdbuser\nDB_PASS=appdbpass\n",
        );
        let overlap = write(
            &dir,
            ".env-list-overlap",
            "DB_PORT=5432\nDB_TIMEOUT=5\nDB_PASS=appdbsecret\n",
        );
        let vars = process_file_list([&base, &overlap]).unwrap();

        let expected: VariableSet = [
            ("DB_HOST", "example.host"),
            ("DB_USER", "appdbuser"),
            ("DB_PORT", "5432"),
            ("DB_TIMEOUT", "5"),
            ("DB_PASS", "appdbsecret"),
        ]
        .into_iter()
        .collect();
        assert_eq!(vars, expected);
    }

    #[test]
    fn test_process_file_list_fails_fast() {
        let dir = TempDir::new().unwrap();
        let good = write(&dir, ".good", "A1=x\n");
        let bad = write(&dir, ".bad", "1st_ENV=x\n");
        let err = process_file_list([good, bad, dir.path().join("never-read")]).unwrap_err();

        assert!(matches!(
            err.syntax(),
            Some(SyntaxError::InvalidName(name)) if name == "1st_ENV"
        ));
    }
}
