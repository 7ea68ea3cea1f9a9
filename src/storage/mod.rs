//! Flat-file page storage.
//!
//! Every page is a single file under the data directory, named
//! `<title>.txt`, holding the raw body bytes with no header or metadata.
//! Writes are whole-file overwrites; the filesystem is the only arbiter of
//! ordering between concurrent saves of the same title.

use std::io;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// File extension used for persisted pages.
pub const PAGE_EXTENSION: &str = "txt";

/// A titled unit of text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    /// Raw body bytes, unconstrained.
    pub body: Vec<u8>,
    /// Titles of all stored pages. Filled in only where a page listing is
    /// actually displayed; empty everywhere else.
    pub menu: Vec<String>,
}

impl Page {
    pub fn new(title: &str, body: Vec<u8>) -> Self {
        Self {
            title: title.to_string(),
            body,
            menu: Vec::new(),
        }
    }

    /// A page for a title with no stored file yet.
    pub fn empty(title: &str) -> Self {
        Self::new(title, Vec::new())
    }
}

/// Check that a string is usable as a page title.
///
/// Titles are restricted to ASCII alphanumerics, which also keeps the
/// derived filenames free of separators and dotfiles.
pub fn is_valid_title(title: &str) -> bool {
    !title.is_empty() && title.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Reads and writes pages under a single flat directory.
#[derive(Debug, Clone)]
pub struct PageStore {
    data_dir: PathBuf,
}

impl PageStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn page_path(&self, title: &str) -> PathBuf {
        self.data_dir.join(format!("{title}.{PAGE_EXTENSION}"))
    }

    /// Read a page's body from disk.
    ///
    /// Any read failure means "this page does not exist yet" as far as the
    /// handlers are concerned; the error is still returned so callers can
    /// log it if they care.
    pub async fn load(&self, title: &str) -> io::Result<Page> {
        let body = fs::read(self.page_path(title)).await?;
        Ok(Page::new(title, body))
    }

    /// Write the full body to the page's file, creating or truncating it.
    ///
    /// New files are created owner read/write only. There is no atomicity
    /// beyond what the filesystem gives a single write.
    pub async fn save(&self, title: &str, body: &[u8]) -> io::Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(self.page_path(title)).await?;
        file.write_all(body).await?;
        file.flush().await?;
        Ok(())
    }

    /// List the titles of all stored pages, sorted.
    ///
    /// Files without the page extension, or whose stem is not a valid
    /// title, are skipped rather than exposed. A listing failure is
    /// returned to the caller instead of ending the process.
    pub async fn list_titles(&self) -> io::Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.data_dir).await?;
        let mut titles = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PAGE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if is_valid_title(stem) {
                titles.push(stem.to_string());
            }
        }

        // read_dir order is filesystem-dependent; sort for a stable menu
        titles.sort();
        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fresh store rooted in a unique temp directory per test.
    fn temp_store(tag: &str) -> PageStore {
        let dir = std::env::temp_dir().join(format!("flatwiki-store-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        PageStore::new(dir)
    }

    #[test]
    fn test_valid_titles() {
        assert!(is_valid_title("FrontPage"));
        assert!(is_valid_title("a"));
        assert!(is_valid_title("Page2"));
        assert!(!is_valid_title(""));
        assert!(!is_valid_title("Front Page"));
        assert!(!is_valid_title("front/page"));
        assert!(!is_valid_title("page.txt"));
        assert!(!is_valid_title("caf\u{e9}"));
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let store = temp_store("roundtrip");
        store.save("TestPage", b"Hello World").await.unwrap();

        let page = store.load("TestPage").await.unwrap();
        assert_eq!(page.title, "TestPage");
        assert_eq!(page.body, b"Hello World");
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_body() {
        let store = temp_store("overwrite");
        store
            .save("Note", b"first version, quite long")
            .await
            .unwrap();
        store.save("Note", b"short").await.unwrap();

        let page = store.load("Note").await.unwrap();
        assert_eq!(page.body, b"short");
    }

    #[tokio::test]
    async fn test_load_missing_page_fails() {
        let store = temp_store("missing");
        assert!(store.load("NoSuchPage").await.is_err());
    }

    #[tokio::test]
    async fn test_list_titles_sorted_and_filtered() {
        let store = temp_store("listing");
        store.save("Beta", b"b").await.unwrap();
        store.save("Alpha", b"a").await.unwrap();

        // Stray files in the data directory must not show up as pages.
        std::fs::write(store.data_dir.join("notes.md"), "not a page").unwrap();
        std::fs::write(store.data_dir.join("bad title.txt"), "invalid stem").unwrap();

        let titles = store.list_titles().await.unwrap();
        assert_eq!(titles, vec!["Alpha".to_string(), "Beta".to_string()]);
    }

    #[tokio::test]
    async fn test_list_titles_missing_dir_is_recoverable() {
        let store = PageStore::new("/nonexistent/flatwiki-data");
        assert!(store.list_titles().await.is_err());
    }
}
