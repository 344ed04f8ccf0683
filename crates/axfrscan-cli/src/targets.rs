//! Target list loading.

use std::path::Path;

use axfrscan_core::AxfrError;

/// Read a target file: one entry per line, blank lines and `#` comments
/// ignored. Invalid UTF-8 is replaced rather than rejected.
pub fn load_file(path: &Path) -> Result<Vec<String>, AxfrError> {
    if !path.is_file() {
        return Err(AxfrError::TargetFile {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path)?;
    Ok(parse_list(&String::from_utf8_lossy(&bytes)))
}

fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Combine `-u` and `-f` into one raw target list.
///
/// Fails only if neither was given; an empty list file yields an empty
/// scan. Deduplication happens after normalization, in the scanner.
pub fn gather(url: Option<&str>, file: Option<&Path>) -> Result<Vec<String>, AxfrError> {
    if url.is_none() && file.is_none() {
        return Err(AxfrError::NoTargets);
    }

    let mut targets: Vec<String> = url.map(str::to_string).into_iter().collect();
    if let Some(path) = file {
        targets.extend(load_file(path)?);
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn comments_and_blanks_are_skipped() {
        let list = parse_list("# staging\nexample.com\n\n   \n  https://www.example.org/  \n#old.example\n");
        assert_eq!(list, ["example.com", "https://www.example.org/"]);
    }

    #[test]
    fn missing_file_is_reported_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.txt");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, AxfrError::TargetFile { .. }));
        assert!(err.to_string().contains("targets.txt"));
    }

    #[test]
    fn invalid_utf8_is_tolerated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"example.com\n\xff\xfe.example\nexample.net\n").unwrap();

        let list = load_file(file.path()).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0], "example.com");
        assert_eq!(list[2], "example.net");
    }

    #[test]
    fn url_and_file_are_combined() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "example.org").unwrap();

        let targets = gather(Some("example.com"), Some(file.path())).unwrap();
        assert_eq!(targets, ["example.com", "example.org"]);
    }

    #[test]
    fn no_source_wants_usage() {
        let err = gather(None, None).unwrap_err();
        assert!(err.wants_usage());
    }

    #[test]
    fn empty_file_is_an_empty_scan() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(gather(None, Some(file.path())).unwrap().is_empty());
    }
}
