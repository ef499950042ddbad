use crate::error::{GenerateError, Result};
use crate::parsers;
use rand::seq::SliceRandom;
use std::path::Path;

/// Loads the keyword pool
///
/// A missing file is an empty pool. A file that exists but cannot be read
/// aborts the run.
pub fn load_keywords<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    if !path.exists() {
        ::log::debug!("Keyword pool {} not found", path.display());
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| GenerateError::Asset {
        path: path.to_path_buf(),
        source,
    })?;

    let pool = parsers::parse_lines(&contents);
    ::log::debug!("Loaded {} keywords from {}", pool.len(), path.display());
    Ok(pool)
}

/// Picks the keyword for this run
///
/// A non-blank override is returned unchanged and the pool is not read.
/// Otherwise one pool entry is chosen uniformly at random, or an empty
/// string when the pool is empty.
pub fn select_keyword<P: AsRef<Path>>(keyword_override: &str, pool_path: P) -> Result<String> {
    if !keyword_override.trim().is_empty() {
        return Ok(keyword_override.to_string());
    }

    let pool = load_keywords(pool_path)?;
    Ok(pool
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn pool_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_keywords() {
        let file = pool_file("保湿\n\n  美白 \n\t\n毛穴\n");
        assert_eq!(load_keywords(file.path()).unwrap(), vec!["保湿", "美白", "毛穴"]);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_keywords("/nonexistent/keywords.txt").unwrap().is_empty());
    }

    #[test]
    fn test_override_wins() {
        let file = pool_file("保湿\n美白\n");
        for _ in 0..10 {
            assert_eq!(select_keyword("spa", file.path()).unwrap(), "spa");
        }
        assert_eq!(select_keyword("spa", "/nonexistent/keywords.txt").unwrap(), "spa");
    }

    #[test]
    fn test_blank_override_uses_pool() {
        let file = pool_file("  保湿  \n\n美白\nエイジングケア\n");
        let pool = load_keywords(file.path()).unwrap();

        for _ in 0..20 {
            let keyword = select_keyword("  ", file.path()).unwrap();
            assert!(pool.contains(&keyword), "{:?} not in pool", keyword);
        }
    }

    #[test]
    fn test_single_entry_pool() {
        let file = pool_file("\n  hydration \n\n");
        assert_eq!(select_keyword("", file.path()).unwrap(), "hydration");
    }

    #[test]
    fn test_empty_pool_returns_empty() {
        let file = pool_file("\n   \n");
        assert_eq!(select_keyword("", file.path()).unwrap(), "");
        assert_eq!(select_keyword(" ", "/nonexistent/keywords.txt").unwrap(), "");
    }

    #[test]
    fn test_unreadable_pool_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xff\xfe\xfd\n").unwrap();

        let result = select_keyword("", file.path());
        assert!(matches!(result, Err(GenerateError::Asset { .. })));
        assert!(matches!(
            load_keywords(file.path()),
            Err(GenerateError::Asset { .. })
        ));
    }

    #[test]
    fn test_override_skips_unreadable_pool() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xff\xfe\n").unwrap();

        assert_eq!(select_keyword("spa", file.path()).unwrap(), "spa");
    }
}
