// src/utils/env.rs

//! Credential resolution from a local `.env` file.
//!
//! The process environment always wins; the file is only consulted when the
//! variable is unset or blank. Nothing here mutates the environment.

use std::fs;
use std::path::Path;

/// Look up `key` in a `KEY=VALUE` style dotenv file.
///
/// Blank lines, `#` comments and lines without `=` are skipped. Values may be
/// wrapped in single or double quotes. Returns `None` if the file is missing
/// or does not define the key.
pub fn read_dotenv_value(path: impl AsRef<Path>, key: &str) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    content.lines().find_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (name, value) = line.split_once('=')?;
        (name.trim() == key).then(|| unquote(value.trim()).to_string())
    })
}

/// Resolve a credential: a non-blank explicit value first, then the dotenv file.
///
/// The result is trimmed; a blank result counts as absent.
pub fn resolve_credential(
    explicit: Option<&str>,
    dotenv_path: impl AsRef<Path>,
    key: &str,
) -> Option<String> {
    explicit
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| read_dotenv_value(dotenv_path, key))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"').trim_matches('\'')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_env(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(".env");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_quoted_and_bare_values() {
        let tmp = TempDir::new().unwrap();
        let path = write_env(
            &tmp,
            "# local secrets\n\nOTHER=1\nSEOUL_API_KEY=\"abc123\"\nNOISE\n",
        );
        assert_eq!(
            read_dotenv_value(&path, "SEOUL_API_KEY"),
            Some("abc123".to_string())
        );
        assert_eq!(read_dotenv_value(&path, "OTHER"), Some("1".to_string()));
        assert_eq!(read_dotenv_value(&path, "NOISE"), None);
    }

    #[test]
    fn missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            read_dotenv_value(tmp.path().join(".env"), "SEOUL_API_KEY"),
            None
        );
    }

    #[test]
    fn explicit_value_wins_over_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_env(&tmp, "SEOUL_API_KEY=from-file\n");
        assert_eq!(
            resolve_credential(Some(" from-env "), &path, "SEOUL_API_KEY"),
            Some("from-env".to_string())
        );
    }

    #[test]
    fn blank_explicit_value_falls_back_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_env(&tmp, "SEOUL_API_KEY='from-file'\n");
        assert_eq!(
            resolve_credential(Some("  "), &path, "SEOUL_API_KEY"),
            Some("from-file".to_string())
        );
    }

    #[test]
    fn blank_everywhere_is_none() {
        let tmp = TempDir::new().unwrap();
        let path = write_env(&tmp, "SEOUL_API_KEY=\n");
        assert_eq!(resolve_credential(None, &path, "SEOUL_API_KEY"), None);
    }
}
