use std::collections::BTreeMap;
use std::path::Path;

use tracing::warn;

use crate::document::{load_or_default, save_pretty_sync};

/// Gif urls per social action, seeded with defaults when the file is
/// missing so the social commands work out of the box.
#[derive(Debug, Default)]
pub struct GifStore {
    actions: BTreeMap<String, Vec<String>>,
}

impl GifStore {
    pub fn open(path: &Path) -> Self {
        let mut actions: BTreeMap<String, Vec<String>> = load_or_default(path);
        if actions.is_empty() {
            actions = default_gifs();
            if let Err(source) = save_pretty_sync(path, &actions) {
                warn!(?source, "failed to seed the gif table");
            }
        }

        Self { actions }
    }

    pub fn urls_for(&self, action: &str) -> &[String] {
        self.actions
            .get(action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn default_gifs() -> BTreeMap<String, Vec<String>> {
    let mut actions = BTreeMap::new();
    actions.insert(
        "hug".to_owned(),
        vec![
            "https://media.tenor.com/kCZjTqCKiggAAAAC/hug.gif".to_owned(),
            "https://media.tenor.com/J7eGDvGeP9IAAAAC/anime-hug.gif".to_owned(),
            "https://media.tenor.com/wUQH5CF2DJ0AAAAC/hugs.gif".to_owned(),
        ],
    );
    actions.insert(
        "pat".to_owned(),
        vec![
            "https://media.tenor.com/N41zKEDABuUAAAAC/head-pat.gif".to_owned(),
            "https://media.tenor.com/7xrOS-GaGAIAAAAC/pat-pat-pat.gif".to_owned(),
        ],
    );
    actions.insert(
        "snuggle".to_owned(),
        vec![
            "https://media.tenor.com/iocthxXBQVYAAAAC/snuggle.gif".to_owned(),
            "https://media.tenor.com/k6DZJiEOmLoAAAAC/anime-snuggle.gif".to_owned(),
        ],
    );
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_defaults_when_missing() {
        let path = std::env::temp_dir().join(format!("sable-gifs-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let store = GifStore::open(&path);
        assert!(!store.urls_for("hug").is_empty());
        assert!(!store.urls_for("pat").is_empty());
        assert!(!store.urls_for("snuggle").is_empty());
        assert!(store.urls_for("unknown").is_empty());
        assert!(path.exists());

        let _ = std::fs::remove_file(&path);
    }
}
