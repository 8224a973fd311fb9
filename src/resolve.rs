//! Asset resolution: downloads remote design assets to local paths.
//!
//! The translator core never touches the network; it consumes a parallel
//! list of already-resolved local paths. `AssetResolver` is the seam where
//! the host plugs retrieval in, and [`HttpAssetResolver`] is the stock
//! implementation: download into a resources directory, reuse files that
//! are already there.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::design::DesignObject;
use crate::error::AficheError;

/// Resolves a source URL to a local resource path.
#[async_trait]
pub trait AssetResolver {
    async fn resolve(&self, url: &str) -> Result<PathBuf, AficheError>;
}

/// Downloads assets over HTTP into a local resources directory.
///
/// Files are named by [`filename_from_url`]; an existing file of the same
/// name short-circuits the download, which makes re-runs over the same
/// design cheap.
pub struct HttpAssetResolver {
    client: reqwest::Client,
    resource_dir: PathBuf,
}

impl HttpAssetResolver {
    pub fn new(resource_dir: impl Into<PathBuf>) -> Result<Self, AficheError> {
        let client = reqwest::Client::builder()
            .user_agent("afiche/0.1")
            .build()
            .map_err(|e| AficheError::Asset(format!("HTTP client error: {}", e)))?;
        Ok(Self {
            client,
            resource_dir: resource_dir.into(),
        })
    }
}

#[async_trait]
impl AssetResolver for HttpAssetResolver {
    async fn resolve(&self, url: &str) -> Result<PathBuf, AficheError> {
        let path = self.resource_dir.join(filename_from_url(url));
        if path.exists() {
            return Ok(path);
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AficheError::Asset(format!("Failed to download {}: {}", url, e)))?;
        if !response.status().is_success() {
            return Err(AficheError::Asset(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AficheError::Asset(format!("Failed to read asset data: {}", e)))?;

        tokio::fs::create_dir_all(&self.resource_dir).await?;
        tokio::fs::write(&path, &bytes).await?;
        Ok(path)
    }
}

/// Resolver for offline runs: maps every URL to its would-be local path
/// without fetching anything.
pub struct OfflineAssetResolver {
    resource_dir: PathBuf,
}

impl OfflineAssetResolver {
    pub fn new(resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
        }
    }
}

#[async_trait]
impl AssetResolver for OfflineAssetResolver {
    async fn resolve(&self, url: &str) -> Result<PathBuf, AficheError> {
        Ok(self.resource_dir.join(filename_from_url(url)))
    }
}

/// Resolve every image object's source, dropping failures.
///
/// Returns the surviving objects and their local paths as parallel lists
/// in source order — exactly the shape the layer-identity assigner wants.
/// Failures are silent here (the pipeline's contract); callers that need
/// diagnostics should wrap the resolver.
pub async fn resolve_images(
    resolver: &dyn AssetResolver,
    images: &[DesignObject],
) -> (Vec<DesignObject>, Vec<String>) {
    let mut surviving = Vec::with_capacity(images.len());
    let mut paths = Vec::with_capacity(images.len());
    for obj in images {
        let Some(src) = obj.src.as_deref() else { continue };
        if let Ok(path) = resolver.resolve(src).await {
            surviving.push(obj.clone());
            paths.push(path.to_string_lossy().into_owned());
        }
    }
    (surviving, paths)
}

/// Derive a local filename from an asset URL.
///
/// Takes the basename of the URL path (query and fragment stripped). When
/// the basename carries no extension, one is sniffed from the URL text the
/// way the design tool's CDN links hint at it; an empty basename falls
/// back to `image.png`.
pub fn filename_from_url(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let after_scheme = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);
    let path = after_scheme.split_once('/').map(|(_, p)| p).unwrap_or("");
    let base = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");

    if base.is_empty() {
        return "image.png".to_string();
    }
    if Path::new(base).extension().is_some() {
        return base.to_string();
    }

    let lower = url.to_lowercase();
    let ext = if lower.contains("png") {
        ".png"
    } else if lower.contains("webp") {
        ".webp"
    } else if lower.contains("jpg") || lower.contains("jpeg") {
        ".jpg"
    } else {
        ""
    };
    format!("{}{}", base, ext)
}
