use crate::Result;
use anyhow::Context;
use std::fs::ReadDir;
use std::path::{Path, PathBuf};

/// Write a file.
pub(crate) fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, contents)
        .with_context(|| format!("Unable to write to {}", path.display()))
}

/// Read a file to a `String`.
pub(crate) fn read(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file at {}", path.display()))
}

/// Create a directory and its parents if they do not exist.
pub(crate) fn make_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)
        .with_context(|| format!("Unable to create directory at {}", path.display()))
}

pub(crate) fn canonicalize(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    std::fs::canonicalize(path)
        .with_context(|| format!("Unable to canonicalize the path {}", path.display()))
}

pub(crate) fn read_dir(path: impl AsRef<Path>) -> Result<ReadDir> {
    let path = path.as_ref();
    std::fs::read_dir(path)
        .with_context(|| format!("Unable to read directory {}", path.display()))
}

pub(crate) fn copy(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    std::fs::copy(from, to).with_context(|| {
        format!(
            "Unable to copy file from '{}' to '{}'",
            from.display(),
            to.display()
        )
    })?;
    Ok(())
}

pub(crate) fn remove(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::remove_file(path).with_context(|| format!("Unable to remove {}", path.display()))
}

/// Serializes `value` as JSON with a four space indent.
pub(crate) fn to_json_pretty<T>(value: &T) -> serde_json::Result<Vec<u8>>
where
    T: serde::Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_to_json_pretty_indent() {
        let value = serde_json::json!({"users": {"alice": "pw"}});
        let text = String::from_utf8(to_json_pretty(&value).unwrap()).unwrap();
        assert_eq!(text, "{\n    \"users\": {\n        \"alice\": \"pw\"\n    }\n}");
    }

    #[test]
    fn test_write_read_copy_remove() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("nested").join("b.txt");
        write(&a, "hello").unwrap();
        make_dir(dir.path().join("nested")).unwrap();
        copy(&a, &b).unwrap();
        assert_eq!(read(&b).unwrap(), "hello");
        remove(&a).unwrap();
        assert!(read(&a).is_err());
    }
}
