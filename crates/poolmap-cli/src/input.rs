use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Reads one item per line from `path`, or from stdin when `path` is `None`.
///
/// Trailing whitespace (including `\r`) is stripped and blank lines are
/// skipped.
pub fn read_items(path: Option<&Path>) -> anyhow::Result<Vec<String>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            parse_items(BufReader::new(file))
                .with_context(|| format!("failed to read input file {}", path.display()))
        }
        None => parse_items(io::stdin().lock()).context("failed to read items from stdin"),
    }
}

fn parse_items(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let item = line.trim_end();
        if !item.is_empty() {
            items.push(item.to_string());
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_and_trailing_whitespace_are_dropped() {
        let raw = "a.png\r\n\n  b c.png  \n\n";
        let items = parse_items(raw.as_bytes()).unwrap();
        assert_eq!(items, vec!["a.png", "  b c.png"]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_items(Some(Path::new("/nonexistent/items.txt"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/items.txt"));
    }

    #[test]
    fn items_are_read_from_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.txt");
        std::fs::write(&path, "first\n\nsecond  \nthird").unwrap();

        let items = read_items(Some(&path)).unwrap();
        assert_eq!(items, vec!["first", "second", "third"]);
    }
}
