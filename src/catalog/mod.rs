// SPDX-License-Identifier: MPL-2.0
//! Catalog fetching.
//!
//! Layers, spheres and markers are JSON arrays read either from a local
//! directory (`layers.json`, `spheres.json`, `markers.json`) or from an
//! HTTP endpoint (`{base}/layers`, `{base}/spheres`, `{base}/markers`).
//! Panorama images and marker pictures are resolved against the same
//! source by [`read_asset`].
//!
//! All functions are `async` and meant to be run through `Task::perform`.

use crate::config::{CatalogConfig, DEFAULT_CATALOG_DIR_NAME};
use crate::domain::{LayerData, MarkerData, SphereData};
use crate::error::{CatalogError, Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Directory containing the three JSON files and the assets.
    File(PathBuf),
    /// Base URL of a catalog server.
    Http(String),
}

impl CatalogSource {
    /// Interprets `raw` as a URL when it has an `http(s)` scheme, as a path otherwise.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if is_url(raw) {
            CatalogSource::Http(raw.trim_end_matches('/').to_string())
        } else {
            CatalogSource::File(PathBuf::from(raw))
        }
    }

    /// Picks the source from `--catalog`, then `[catalog] source`, then the data dir.
    #[must_use]
    pub fn resolve(cli: Option<&str>, config: &CatalogConfig, data_dir: Option<PathBuf>) -> Self {
        if let Some(raw) = cli.or(config.source.as_deref()) {
            return Self::parse(raw);
        }
        let dir = data_dir
            .map(|dir| dir.join(DEFAULT_CATALOG_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_DIR_NAME));
        CatalogSource::File(dir)
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(dir) => write!(f, "{}", dir.display()),
            CatalogSource::Http(base) => f.write_str(base),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Collection {
    Layers,
    Spheres,
    Markers,
}

impl Collection {
    fn endpoint(self) -> &'static str {
        match self {
            Collection::Layers => "layers",
            Collection::Spheres => "spheres",
            Collection::Markers => "markers",
        }
    }
}

pub async fn fetch_layers(source: CatalogSource) -> Result<Vec<LayerData>> {
    fetch(&source, Collection::Layers).await
}

pub async fn fetch_spheres(source: CatalogSource) -> Result<Vec<SphereData>> {
    fetch(&source, Collection::Spheres).await
}

pub async fn fetch_markers(source: CatalogSource) -> Result<Vec<MarkerData>> {
    fetch(&source, Collection::Markers).await
}

async fn fetch<T: DeserializeOwned>(
    source: &CatalogSource,
    collection: Collection,
) -> Result<Vec<T>> {
    match source {
        CatalogSource::File(dir) => {
            let path = dir.join(format!("{}.json", collection.endpoint()));
            let bytes = read_file(&path).await?;
            Ok(serde_json::from_slice(&bytes)?)
        }
        CatalogSource::Http(base) => {
            let url = join_url(base, collection.endpoint());
            let response = reqwest::get(&url).await?.error_for_status()?;
            Ok(response.json().await?)
        }
    }
}

/// Reads an asset (panorama, marker picture) referenced by the catalog.
///
/// Absolute URLs are fetched as-is; other references are resolved against
/// the catalog source.
pub async fn read_asset(source: CatalogSource, reference: String) -> Result<Vec<u8>> {
    if is_url(&reference) {
        return download(&reference).await;
    }
    match source {
        CatalogSource::File(dir) => read_file(&dir.join(&reference)).await,
        CatalogSource::Http(base) => download(&join_url(&base, &reference)).await,
    }
}

async fn download(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::Catalog(CatalogError::NotFound(path.display().to_string()))
        } else {
            Error::Io(format!("{}: {}", path.display(), err))
        }
    })
}

fn is_url(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://")
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parse_detects_urls() {
        assert_eq!(
            CatalogSource::parse("https://example.com/api/"),
            CatalogSource::Http("https://example.com/api".into())
        );
        assert_eq!(
            CatalogSource::parse("/srv/catalog"),
            CatalogSource::File(PathBuf::from("/srv/catalog"))
        );
    }

    #[test]
    fn resolve_prefers_cli_then_config_then_data_dir() {
        let config = CatalogConfig {
            source: Some("/from/config".into()),
        };
        assert_eq!(
            CatalogSource::resolve(Some("/from/cli"), &config, None),
            CatalogSource::File(PathBuf::from("/from/cli"))
        );
        assert_eq!(
            CatalogSource::resolve(None, &config, None),
            CatalogSource::File(PathBuf::from("/from/config"))
        );
        assert_eq!(
            CatalogSource::resolve(None, &CatalogConfig::default(), Some("/data".into())),
            CatalogSource::File(PathBuf::from("/data").join(DEFAULT_CATALOG_DIR_NAME))
        );
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("http://h/api/", "/layers"), "http://h/api/layers");
        assert_eq!(join_url("http://h", "img/a.jpg"), "http://h/img/a.jpg");
    }

    #[tokio::test]
    async fn fetch_reads_json_files() {
        let dir = tempdir().expect("temp dir");
        fs::write(
            dir.path().join("layers.json"),
            r#"[{"id":"l1","name":"Ground","mapImage":"maps/l1.png"}]"#,
        )
        .expect("write layers");
        fs::write(
            dir.path().join("spheres.json"),
            r#"[{"id":"s1","layerId":"l1","name":"Lobby","image":"s1.jpg"}]"#,
        )
        .expect("write spheres");

        let source = CatalogSource::File(dir.path().to_path_buf());
        let layers = fetch_layers(source.clone()).await.expect("layers");
        let spheres = fetch_spheres(source).await.expect("spheres");

        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].map_image.as_deref(), Some("maps/l1.png"));
        assert_eq!(spheres[0].layer_id.as_str(), "l1");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempdir().expect("temp dir");
        let result = fetch_markers(CatalogSource::File(dir.path().to_path_buf())).await;
        assert!(matches!(
            result,
            Err(Error::Catalog(CatalogError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join("markers.json"), "{\"not\": \"a list\"}").expect("write");

        let result = fetch_markers(CatalogSource::File(dir.path().to_path_buf())).await;
        assert!(matches!(
            result,
            Err(Error::Catalog(CatalogError::Malformed(_)))
        ));
    }

    #[tokio::test]
    async fn read_asset_resolves_relative_to_directory() {
        let dir = tempdir().expect("temp dir");
        fs::create_dir_all(dir.path().join("spheres")).expect("mkdir");
        fs::write(dir.path().join("spheres/s1.jpg"), b"bytes").expect("write");

        let bytes = read_asset(
            CatalogSource::File(dir.path().to_path_buf()),
            "spheres/s1.jpg".into(),
        )
        .await
        .expect("asset");
        assert_eq!(bytes, b"bytes");
    }
}
