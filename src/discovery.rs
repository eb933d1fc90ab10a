//! Recursive file discovery under a glob pattern.

use crate::error::PatternError;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// A file name glob.
///
/// Supports `*`, `?`, `[...]` (with `!` or `^` negation) and `{a,b}`
/// alternation. Matching is anchored and case-sensitive.
#[derive(Debug, Clone)]
pub struct FilePattern {
    raw: String,
    regex: Regex,
}

impl FilePattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(&glob_to_regex(pattern)?)?;
        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    /// Check a bare file name against the pattern.
    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }
}

impl std::fmt::Display for FilePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

fn glob_to_regex(pattern: &str) -> Result<String, PatternError> {
    let unclosed = |delimiter| PatternError::Unclosed {
        pattern: pattern.to_string(),
        delimiter,
    };

    let mut out = String::from("^");
    let mut chars = pattern.chars().peekable();
    let mut brace_depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                out.push('[');
                if matches!(chars.peek(), Some('!') | Some('^')) {
                    chars.next();
                    out.push('^');
                }
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    if c == '\\' || c == '[' {
                        out.push('\\');
                    }
                    out.push(c);
                }
                if !closed {
                    return Err(unclosed('['));
                }
                out.push(']');
            }
            '{' => {
                brace_depth += 1;
                out.push_str("(?:");
            }
            '}' if brace_depth > 0 => {
                brace_depth -= 1;
                out.push(')');
            }
            ',' if brace_depth > 0 => out.push('|'),
            c => out.push_str(&regex::escape(&c.to_string())),
        }
    }

    if brace_depth > 0 {
        return Err(unclosed('{'));
    }

    out.push('$');
    Ok(out)
}

/// Lazily walk `root` for files whose names match `pattern`.
///
/// Entries are visited in file-name order so runs are reproducible.
/// Unreadable entries are logged and skipped.
pub fn discover<'a>(root: &Path, pattern: &'a FilePattern) -> impl Iterator<Item = PathBuf> + 'a {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(move |entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| pattern.matches(name))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_star_pattern() {
        let pattern = FilePattern::new("*.mp4").unwrap();
        assert!(pattern.matches("a.mp4"));
        assert!(pattern.matches(".mp4"));
        assert!(!pattern.matches("a.mkv"));
        assert!(!pattern.matches("a.mp4.part"));
        assert!(!pattern.matches("a.MP4"));
    }

    #[test]
    fn test_question_and_class() {
        let pattern = FilePattern::new("ep?[0-9].ts").unwrap();
        assert!(pattern.matches("ep12.ts"));
        assert!(!pattern.matches("ep1x.ts"));

        let negated = FilePattern::new("[!a]*.ts").unwrap();
        assert!(negated.matches("b.ts"));
        assert!(!negated.matches("a.ts"));
    }

    #[test]
    fn test_alternation() {
        let pattern = FilePattern::new("*.{mp4,mkv}").unwrap();
        assert!(pattern.matches("a.mp4"));
        assert!(pattern.matches("b.mkv"));
        assert!(!pattern.matches("c.avi"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let pattern = FilePattern::new("show (1).mp4").unwrap();
        assert!(pattern.matches("show (1).mp4"));
        assert!(!pattern.matches("show 1.mp4"));
    }

    #[test]
    fn test_unclosed_delimiters() {
        assert!(matches!(
            FilePattern::new("*.{mp4"),
            Err(PatternError::Unclosed { delimiter: '{', .. })
        ));
        assert!(matches!(
            FilePattern::new("[ab"),
            Err(PatternError::Unclosed { delimiter: '[', .. })
        ));
    }

    #[test]
    fn test_discover_recurses_in_order() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        fs::write(dir.path().join("z.mp4"), b"x").unwrap();
        fs::write(dir.path().join("a.mp4"), b"x").unwrap();
        fs::write(dir.path().join("b/nested/c.mp4"), b"x").unwrap();
        fs::write(dir.path().join("b/notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("dir.mp4")).unwrap();

        let pattern = FilePattern::new("*.mp4").unwrap();
        let found: Vec<PathBuf> = discover(dir.path(), &pattern).collect();

        assert_eq!(
            found,
            vec![
                dir.path().join("a.mp4"),
                dir.path().join("b/nested/c.mp4"),
                dir.path().join("z.mp4"),
            ]
        );
    }

    #[test]
    fn test_discover_no_matches_is_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.avi"), b"x").unwrap();
        let pattern = FilePattern::new("*.mp4").unwrap();
        assert_eq!(discover(dir.path(), &pattern).count(), 0);
    }
}
