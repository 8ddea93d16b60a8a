//! File I/O for Lights Off fields and press grids

use crate::bits::BitMatrix;
use crate::error::BitError;
use anyhow::{Context, Result};
use std::io::BufRead;
use std::path::Path;

/// Read a field from a stream.
/// Format: one row per line, '1' for a lit cell and '0' for an unlit one,
/// terminated by a blank line or end of input.
pub fn read_field<R: BufRead>(reader: R) -> Result<BitMatrix, BitError> {
    BitMatrix::read_from_text(reader)
}

/// Parse a field from a string representation
pub fn parse_field(content: &str) -> Result<BitMatrix, BitError> {
    BitMatrix::parse(content)
}

/// Load a field from a text file
pub fn load_field_from_file<P: AsRef<Path>>(path: P) -> Result<BitMatrix> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read field file: {}", path.as_ref().display()))?;

    parse_field(&content)
        .with_context(|| format!("Failed to parse field from file: {}", path.as_ref().display()))
}

/// Convert a field to its '0'/'1' text form, one row per line
pub fn field_to_string(field: &BitMatrix) -> String {
    field.to_string()
}

/// Save a field to a text file
pub fn save_field_to_file<P: AsRef<Path>>(field: &BitMatrix, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, field_to_string(field))
        .with_context(|| format!("Failed to write field to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Load every `*.txt` field in a directory, sorted by file name.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_fields_from_directory<P: AsRef<Path>>(dir_path: P) -> Result<Vec<(String, BitMatrix)>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut fields = Vec::new();

    for entry in dir {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if path.is_file() && path.extension().is_some_and(|extension| extension == "txt") {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match load_field_from_file(&path) {
                Ok(field) => fields.push((name, field)),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping field"),
            }
        }
    }

    fields.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fields)
}

/// Create example field files
pub fn create_example_fields<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        // Solved by a single centre press
        ("plus.txt", "010\n111\n010\n"),
        // Sixteen solutions, four presses at minimum
        ("lit_4x4.txt", "1111\n1111\n1111\n1111\n"),
        // The classic 5x5 board, four solutions
        ("lit_5x5.txt", "11111\n11111\n11111\n11111\n11111\n"),
        // No press pattern clears this one
        ("corner_5x5.txt", "10000\n00000\n00000\n00000\n00000\n"),
    ];

    for (name, content) in examples {
        std::fs::write(dir.join(name), content).with_context(|| format!("Failed to write {name}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_field() {
        let field = parse_field("010\n101\n010\n").unwrap();
        assert_eq!(field.dimensions(), (3, 3));
        assert_eq!(field.count_ones(), 4);
        assert!(field.get(0, 1));
        assert!(field.get(1, 0));
        assert!(field.get(1, 2));
        assert!(field.get(2, 1));
    }

    #[test]
    fn test_round_trip() {
        let original_content = "010\n101\n010\n";
        let field = parse_field(original_content).unwrap();
        assert_eq!(field_to_string(&field), original_content);
    }

    #[test]
    fn test_read_field_from_stream() {
        let input = std::io::Cursor::new("110\n011\n\nignored\n");
        let field = read_field(input).unwrap();
        assert_eq!(field_to_string(&field), "110\n011\n");
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/test_field.txt");

        let field = parse_field("101\n010\n").unwrap();
        save_field_to_file(&field, &file_path).unwrap();

        let loaded = load_field_from_file(&file_path).unwrap();
        assert_eq!(loaded, field);
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_field("010\n1X1\n010\n").is_err());
        assert!(parse_field("010\n11\n010\n").is_err());
        assert!(parse_field("").is_err());

        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing.txt");
        let err = load_field_from_file(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read field file"));
    }

    #[test]
    fn test_load_fields_from_directory() {
        let temp_dir = tempdir().unwrap();
        create_example_fields(temp_dir.path()).unwrap();
        std::fs::write(temp_dir.path().join("broken.txt"), "012\n").unwrap();
        std::fs::write(temp_dir.path().join("notes.md"), "not a field").unwrap();

        let fields = load_fields_from_directory(temp_dir.path()).unwrap();
        let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["corner_5x5", "lit_4x4", "lit_5x5", "plus"]);
        assert_eq!(fields[1].1.dimensions(), (4, 4));
    }
}
