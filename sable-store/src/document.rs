use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Read a whole JSON document, falling back to the default when the file is
/// missing or unreadable. A corrupt store file must never prevent startup.
pub(crate) fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) => {
            if source.kind() != std::io::ErrorKind::NotFound {
                warn!(?source, path = %path.display(), "failed to read store file; starting empty");
            }
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(source) => {
            warn!(?source, path = %path.display(), "failed to parse store file; starting empty");
            T::default()
        }
    }
}

fn to_pretty_bytes<T>(value: &T) -> anyhow::Result<Vec<u8>>
where
    T: Serialize,
{
    // Four-space indentation, matching the on-disk format the stores were
    // originally written with.
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Rewrite a whole JSON document, pretty-printed.
pub(crate) async fn save_pretty<T>(path: &Path, value: &T) -> anyhow::Result<()>
where
    T: Serialize,
{
    let buffer = to_pretty_bytes(value)?;
    tokio::fs::write(path, buffer)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

/// Blocking variant used while seeding default documents at startup.
pub(crate) fn save_pretty_sync<T>(path: &Path, value: &T) -> anyhow::Result<()>
where
    T: Serialize,
{
    let buffer = to_pretty_bytes(value)?;
    std::fs::write(path, buffer).with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sable-document-{}-{}.json", tag, std::process::id()))
    }

    #[test]
    fn missing_file_yields_default() {
        let loaded: BTreeMap<String, u64> = load_or_default(&temp_path("missing"));
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_file_yields_default() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{not json").unwrap();

        let loaded: BTreeMap<String, u64> = load_or_default(&path);
        assert!(loaded.is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn save_uses_four_space_indent() {
        let path = temp_path("indent");
        let mut value = BTreeMap::new();
        value.insert("key".to_owned(), 7_u64);

        save_pretty(&path, &value).await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n    \"key\": 7"));

        let _ = std::fs::remove_file(&path);
    }
}
