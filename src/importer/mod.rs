//! Import of the UniProt cross-reference database registry.
//!
//! - [`fetch`] — the [`Fetcher`](fetch::Fetcher) seam and its HTTP implementation.
//! - [`parser`] — RDF/XML to [`RegistryMapping`](crate::models::RegistryMapping).
//!
//! The raw document is cached as `uniprot.xml` in the data directory and the
//! parsed mapping is written next to it as `uniprot.json`.

pub mod fetch;
pub mod parser;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ImportError;
use crate::models::RegistryMapping;
use fetch::Fetcher;

/// Registry download URL.
pub const DEFAULT_URL: &str = "https://www.uniprot.org/database/?format=rdf";
/// File name of the cached raw document.
pub const RAW_FILE_NAME: &str = "uniprot.xml";
/// File name of the JSON snapshot.
pub const SNAPSHOT_FILE_NAME: &str = "uniprot.json";

pub struct Importer<F> {
    fetcher: F,
    url: String,
    data_dir: PathBuf,
}

impl<F: Fetcher> Importer<F> {
    pub fn new(fetcher: F, url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            url: url.into(),
            data_dir: data_dir.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn raw_path(&self) -> PathBuf {
        self.data_dir.join(RAW_FILE_NAME)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE_NAME)
    }

    /// Load the registry, downloading it first if there is no local copy or
    /// `force_refresh` is set, and rewrite the JSON snapshot.
    pub async fn fetch_and_parse(&self, force_refresh: bool) -> Result<RegistryMapping, ImportError> {
        let raw_path = self.raw_path();

        if force_refresh || !raw_path.exists() {
            self.download(&raw_path).await?;
        } else {
            debug!(path = %raw_path.display(), "using cached registry document");
        }

        let content = std::fs::read(&raw_path).map_err(|e| ImportError::io(&raw_path, e))?;
        let registry = parser::parse_registry(&content)?;
        info!(records = registry.len(), "parsed registry");

        self.write_snapshot(&registry)?;
        Ok(registry)
    }

    async fn download(&self, raw_path: &Path) -> Result<(), ImportError> {
        info!(url = %self.url, "downloading registry");
        let body = self.fetcher.fetch(&self.url).await?;

        std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| ImportError::io(&self.data_dir, e))?;
        std::fs::write(raw_path, &body).map_err(|e| ImportError::io(raw_path, e))?;
        info!(path = %raw_path.display(), bytes = body.len(), "saved registry document");
        Ok(())
    }

    fn write_snapshot(&self, registry: &RegistryMapping) -> Result<(), ImportError> {
        let path = self.snapshot_path();
        let json = serde_json::to_string_pretty(registry)?;
        std::fs::write(&path, json).map_err(|e| ImportError::io(&path, e))?;
        info!(path = %path.display(), "wrote registry snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tempfile::TempDir;

    const FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:up="http://purl.uniprot.org/core/">
  <rdf:Description rdf:about="http://purl.uniprot.org/database/foo">
    <up:abbreviation>foo</up:abbreviation>
    <rdfs:label>Foo DB</rdfs:label>
    <up:urlTemplate>https://foo.example.org/%s</up:urlTemplate>
  </rdf:Description>
  <rdf:Description rdf:about="http://purl.uniprot.org/database/nameless">
    <rdfs:label>Nameless</rdfs:label>
  </rdf:Description>
</rdf:RDF>"#;

    /// Serves a fixed body and counts how often it was asked to.
    struct CountingFetcher {
        body: &'static str,
        calls: AtomicUsize,
    }

    impl CountingFetcher {
        fn new(body: &'static str) -> Self {
            Self {
                body,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Fetcher for CountingFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, ImportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.as_bytes().to_vec())
        }
    }

    struct FailingFetcher;

    impl Fetcher for FailingFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImportError> {
            Err(ImportError::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            })
        }
    }

    fn importer<F: Fetcher>(fetcher: F, dir: &TempDir) -> Importer<F> {
        Importer::new(fetcher, "https://registry.example.org/rdf", dir.path().join("external"))
    }

    #[tokio::test]
    async fn test_fetches_when_no_local_copy() {
        let dir = TempDir::new().unwrap();
        let importer = importer(CountingFetcher::new(FIXTURE), &dir);

        let registry = importer.fetch_and_parse(false).await.unwrap();

        assert_eq!(importer.fetcher.calls(), 1);
        assert!(importer.raw_path().exists());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry["foo"].name.as_deref(), Some("Foo DB"));
        assert_eq!(
            registry["foo"].formatter.as_deref(),
            Some("https://foo.example.org/%s")
        );
    }

    #[tokio::test]
    async fn test_cached_copy_is_reused_without_fetching() {
        let dir = TempDir::new().unwrap();
        let importer = importer(CountingFetcher::new(FIXTURE), &dir);
        std::fs::create_dir_all(dir.path().join("external")).unwrap();
        std::fs::write(importer.raw_path(), FIXTURE).unwrap();

        let registry = importer.fetch_and_parse(false).await.unwrap();
        assert_eq!(importer.fetcher.calls(), 0);
        assert!(registry.contains_key("foo"));

        importer.fetch_and_parse(false).await.unwrap();
        assert_eq!(importer.fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_force_refresh_always_fetches() {
        let dir = TempDir::new().unwrap();
        let importer = importer(CountingFetcher::new(FIXTURE), &dir);

        importer.fetch_and_parse(true).await.unwrap();
        importer.fetch_and_parse(true).await.unwrap();
        assert_eq!(importer.fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_force_refresh_overwrites_raw_copy() {
        let dir = TempDir::new().unwrap();
        let importer = importer(CountingFetcher::new(FIXTURE), &dir);
        std::fs::create_dir_all(dir.path().join("external")).unwrap();
        std::fs::write(importer.raw_path(), "<stale/>").unwrap();

        let registry = importer.fetch_and_parse(true).await.unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(std::fs::read_to_string(importer.raw_path()).unwrap(), FIXTURE);
    }

    #[tokio::test]
    async fn test_snapshot_is_pretty_json() {
        let dir = TempDir::new().unwrap();
        let importer = importer(CountingFetcher::new(FIXTURE), &dir);

        importer.fetch_and_parse(true).await.unwrap();

        let snapshot = std::fs::read_to_string(importer.snapshot_path()).unwrap();
        let expected = r#"{
  "foo": {
    "prefix": "foo",
    "name": "Foo DB",
    "formatter": "https://foo.example.org/%s"
  }
}"#;
        assert_eq!(snapshot, expected);
    }

    #[tokio::test]
    async fn test_snapshot_is_rewritten_in_full() {
        let dir = TempDir::new().unwrap();
        let importer = importer(CountingFetcher::new(FIXTURE), &dir);
        std::fs::create_dir_all(dir.path().join("external")).unwrap();
        std::fs::write(importer.snapshot_path(), "{\"old\": {\"prefix\": \"old\"}, \"padding\": 1}")
            .unwrap();

        importer.fetch_and_parse(true).await.unwrap();

        let snapshot = std::fs::read_to_string(importer.snapshot_path()).unwrap();
        let parsed: RegistryMapping = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(parsed.keys().collect::<Vec<_>>(), vec!["foo"]);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let dir = TempDir::new().unwrap();
        let importer = importer(FailingFetcher, &dir);

        let result = importer.fetch_and_parse(false).await;
        assert!(matches!(result, Err(ImportError::Status { .. })));
        assert!(!importer.raw_path().exists());
        assert!(!importer.snapshot_path().exists());
    }

    #[tokio::test]
    async fn test_malformed_document_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let importer = importer(CountingFetcher::new("<rdf:RDF><oops>"), &dir);

        let result = importer.fetch_and_parse(true).await;
        assert!(matches!(result, Err(ImportError::Parse(_))));
        assert!(!importer.snapshot_path().exists());
    }

    #[tokio::test]
    async fn test_unwritable_data_dir_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("external");
        std::fs::write(&blocker, "a file where the directory should be").unwrap();
        let importer = importer(CountingFetcher::new(FIXTURE), &dir);

        let result = importer.fetch_and_parse(true).await;
        assert!(matches!(result, Err(ImportError::Io { .. })));
    }
}
