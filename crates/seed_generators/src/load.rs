use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use seed_core::{CollectionSettings, GeneratorRegistry, StartUrlCollection};
use seed_logging::seed_info;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read crawl spec {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid JSON crawl spec {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid RON crawl spec {path:?}: {source}")]
    Ron {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unsupported crawl spec format {0:?}; expected .json or .ron")]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Ron,
}

impl SpecFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("json") {
            Some(SpecFormat::Json)
        } else if extension.eq_ignore_ascii_case("ron") {
            Some(SpecFormat::Ron)
        } else {
            None
        }
    }
}

/// The start URL section of a crawl spec file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CrawlSpec {
    #[serde(default)]
    pub start_urls: Vec<Value>,
    /// Generator type for legacy entries; overrides the collection default.
    #[serde(default)]
    pub generator_type: Option<String>,
}

impl CrawlSpec {
    pub fn into_collection(
        self,
        generators: GeneratorRegistry,
        mut settings: CollectionSettings,
    ) -> StartUrlCollection {
        if let Some(generator_type) = self.generator_type {
            settings.default_generator_type = generator_type;
        }
        StartUrlCollection::new(self.start_urls, generators, settings)
    }
}

/// Reads a crawl spec, picking the parser from the file extension.
pub fn load_spec(path: &Path) -> Result<CrawlSpec, LoadError> {
    let format =
        SpecFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.into()))?;
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.into(),
        source,
    })?;

    let spec: CrawlSpec = match format {
        SpecFormat::Json => serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.into(),
            source,
        })?,
        SpecFormat::Ron => ron::from_str(&content).map_err(|source| LoadError::Ron {
            path: path.into(),
            source,
        })?,
    };

    seed_info!(
        "Loaded {} start urls from {:?}",
        spec.start_urls.len(),
        path
    );
    Ok(spec)
}
