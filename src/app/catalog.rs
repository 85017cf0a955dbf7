// src/app/catalog.rs
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Duration;

use itertools::Itertools;
use reqwest::blocking::Client;
use thiserror::Error;
use tracing::{info, warn};

use super::data::CatalogEntry;
use super::types::CatalogMsg;

const FETCH_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed games data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where `games.json` comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        let lower = t.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(t.to_string())
        } else {
            Self::Path(crate::config::resolve_relative_path(t))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::Url(u) => u.clone(),
        }
    }

    /// Raw bytes of the resource; one attempt, no retry.
    pub(crate) fn fetch(&self) -> Result<Vec<u8>, CatalogError> {
        match self {
            Self::Path(path) => fs::read(path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            }),
            Self::Url(url) => {
                let client = Client::builder()
                    .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
                    .build()?;
                let resp = client.get(url).send()?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(CatalogError::Http {
                        status: status.as_u16(),
                    });
                }
                Ok(resp.bytes()?.to_vec())
            }
        }
    }
}

/// Dropdown contents derived from the loaded catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
    pub years: Vec<i32>,
}

/// The immutable snapshot every other component reads from.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let raw: Vec<CatalogEntry> = serde_json::from_slice(bytes)?;
        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(i, e)| e.normalize(i))
            .collect();
        Ok(Self { entries })
    }

    pub fn load(source: &CatalogSource) -> Result<Self, CatalogError> {
        let bytes = source.fetch()?;
        Self::from_slice(&bytes)
    }

    pub fn get(&self, id: usize) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn filter_options(&self) -> FilterOptions {
        let genres = self
            .entries
            .iter()
            .flat_map(|e| e.genres.iter())
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .unique()
            .sorted()
            .map(str::to_string)
            .collect();
        let platforms = self
            .entries
            .iter()
            .flat_map(|e| e.platforms.iter())
            .map(|p| p.name.as_str())
            .unique()
            .sorted()
            .map(str::to_string)
            .collect();
        let years = self
            .entries
            .iter()
            .filter_map(CatalogEntry::release_year)
            .unique()
            .sorted_by(|a, b| b.cmp(a))
            .collect();
        FilterOptions {
            genres,
            platforms,
            years,
        }
    }
}

/// Load the catalog on a worker thread; the UI drains `rx` each frame.
pub fn spawn_catalog_load(source: CatalogSource, tx: Sender<CatalogMsg>) {
    std::thread::spawn(move || {
        let msg = match Catalog::load(&source) {
            Ok(catalog) => {
                info!(
                    "Loaded {} games from {}",
                    catalog.len(),
                    source.describe()
                );
                CatalogMsg::Loaded(catalog)
            }
            Err(e) => {
                warn!("Error loading games data from {}: {e}", source.describe());
                CatalogMsg::Failed(e.to_string())
            }
        };
        let _ = tx.send(msg);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::mpsc;

    const SAMPLE: &str = r#"[
        { "name": "Hades", "genres": ["Action", "Indie"], "platforms": [{ "name": "PC" }],
          "release_date": "2020-09-17", "metacritic": 93, "size": "11 GB" },
        { "name": "Celeste", "genres": ["Indie", "Platformer"], "platforms": [{ "name": "PC" }, { "name": "Switch" }],
          "release_date": "2018-01-25", "metacritic": null },
        { "name": "Mystery", "genres": null, "platforms": [{}], "release_date": "TBA" }
    ]"#;

    #[test]
    fn assigns_positional_ids() {
        let cat = Catalog::from_slice(SAMPLE.as_bytes()).unwrap();
        assert_eq!(cat.len(), 3);
        for (i, e) in cat.entries.iter().enumerate() {
            assert_eq!(e.id, i);
        }
        assert_eq!(cat.get(2).map(|e| e.platforms[0].name.as_str()), Some("Unknown"));
        assert!(cat.get(3).is_none());
    }

    #[test]
    fn filter_options_are_unique_and_ordered() {
        let cat = Catalog::from_slice(SAMPLE.as_bytes()).unwrap();
        let opts = cat.filter_options();
        assert_eq!(opts.genres, ["Action", "Indie", "Platformer"]);
        assert_eq!(opts.platforms, ["PC", "Switch", "Unknown"]);
        assert_eq!(opts.years, [2020, 2018]);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = Catalog::from_slice(b"{ not an array").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = CatalogSource::Path(dir.path().join("nope.json"));
        assert!(matches!(Catalog::load(&src), Err(CatalogError::Io { .. })));
    }

    #[test]
    fn source_kind_by_prefix() {
        assert_eq!(
            CatalogSource::parse("HTTPS://example.org/g.json"),
            CatalogSource::Url("HTTPS://example.org/g.json".into())
        );
        assert!(matches!(CatalogSource::parse("data/games.json"), CatalogSource::Path(_)));
    }

    #[test]
    fn background_load_reports_over_channel() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let (tx, rx) = mpsc::channel();
        spawn_catalog_load(CatalogSource::Path(file.path().to_path_buf()), tx);
        match rx.recv().unwrap() {
            CatalogMsg::Loaded(cat) => assert_eq!(cat.len(), 3),
            CatalogMsg::Failed(e) => panic!("unexpected failure: {e}"),
        }

        let (tx, rx) = mpsc::channel();
        spawn_catalog_load(CatalogSource::Path("/definitely/not/here.json".into()), tx);
        assert!(matches!(rx.recv().unwrap(), CatalogMsg::Failed(_)));
    }
}
