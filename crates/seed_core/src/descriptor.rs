use std::cell::OnceCell;
use std::collections::BTreeSet;

use seed_logging::seed_trace;
use serde_json::Value;

use crate::domains::fragment_domains;
use crate::generator::fragments_of;
use crate::{GeneratorRegistry, StartUrlError};

/// Generator type whose legacy entries scope domains by their `template`.
pub const GENERATED_URLS: &str = "generated_urls";

/// One start URL entry, normalized into a uniform shape.
#[derive(Debug, Clone, PartialEq)]
pub enum StartUrl {
    Legacy(LegacyUrl),
    Typed(TypedUrl),
}

impl StartUrl {
    /// Wraps a raw entry. Objects carrying both a `url` and a `type` string
    /// are typed; everything else is legacy and uses `default_generator_type`.
    pub fn classify(spec: Value, default_generator_type: &str) -> Self {
        let start_url = match (non_empty_str(&spec, "url"), non_empty_str(&spec, "type")) {
            (Some(url), Some(generator_type)) => {
                let url = Value::String(url.to_string());
                let generator_type = generator_type.to_string();
                StartUrl::Typed(TypedUrl::new(spec, url, generator_type))
            }
            _ => StartUrl::Legacy(LegacyUrl::new(spec, default_generator_type)),
        };
        seed_trace!(
            "classified start url {:?} as {} ({})",
            start_url.key(),
            if start_url.is_legacy() { "legacy" } else { "typed" },
            start_url.generator_type()
        );
        start_url
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, StartUrl::Legacy(_))
    }

    /// Identity used for deduplication.
    pub fn key(&self) -> &str {
        match self {
            StartUrl::Legacy(legacy) => &legacy.key,
            StartUrl::Typed(typed) => &typed.key,
        }
    }

    /// The entry as it appeared in the crawl spec.
    pub fn spec(&self) -> &Value {
        match self {
            StartUrl::Legacy(legacy) => &legacy.spec,
            StartUrl::Typed(typed) => &typed.spec,
        }
    }

    pub fn generator_type(&self) -> &str {
        match self {
            StartUrl::Legacy(legacy) => &legacy.generator_type,
            StartUrl::Typed(typed) => &typed.generator_type,
        }
    }

    /// Input handed to the generator registered under [`Self::generator_type`].
    pub fn generator_value(&self) -> &Value {
        match self {
            StartUrl::Legacy(legacy) => &legacy.spec,
            StartUrl::Typed(typed) => typed.generator_value(),
        }
    }

    pub fn allowed_domains(
        &self,
        generators: &GeneratorRegistry,
    ) -> Result<BTreeSet<String>, StartUrlError> {
        match self {
            StartUrl::Legacy(legacy) => legacy.allowed_domains(),
            StartUrl::Typed(typed) => typed.allowed_domains(generators),
        }
    }
}

/// A bare URL string, or an object lacking `url` or `type`.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyUrl {
    key: String,
    spec: Value,
    generator_type: String,
}

impl LegacyUrl {
    fn new(spec: Value, generator_type: &str) -> Self {
        Self {
            key: literal_text(&spec),
            spec,
            generator_type: generator_type.to_string(),
        }
    }

    fn allowed_domains(&self) -> Result<BTreeSet<String>, StartUrlError> {
        if self.generator_type != GENERATED_URLS {
            return Ok(BTreeSet::from([self.key.clone()]));
        }
        let template = self
            .spec
            .get("template")
            .and_then(Value::as_str)
            .ok_or(StartUrlError::MissingField("template"))?;
        Ok(BTreeSet::from([template.to_string()]))
    }
}

/// An object with an explicit generator `type`, a base `url` and optional
/// `fragments`.
///
/// Fragment domains are decomposed on first request and kept for the life
/// of the descriptor, so later calls ignore the registry they are given.
#[derive(Debug, Clone)]
pub struct TypedUrl {
    key: String,
    spec: Value,
    url: Value,
    generator_type: String,
    has_fragments: bool,
    domains: OnceCell<Result<BTreeSet<String>, StartUrlError>>,
}

impl PartialEq for TypedUrl {
    fn eq(&self, other: &Self) -> bool {
        self.spec == other.spec && self.generator_type == other.generator_type
    }
}

impl TypedUrl {
    fn new(spec: Value, url: Value, generator_type: String) -> Self {
        let fragments = fragments_of(&spec);
        let mut key = url.as_str().unwrap_or_default().to_string();
        for fragment in fragments {
            if let Some(value) = fragment.get("value") {
                key.push_str(&literal_text(value));
            }
        }
        let has_fragments = !fragments.is_empty();
        Self {
            key,
            spec,
            url,
            generator_type,
            has_fragments,
            domains: OnceCell::new(),
        }
    }

    pub fn has_fragments(&self) -> bool {
        self.has_fragments
    }

    fn generator_value(&self) -> &Value {
        // Fragment generators need the fragment definitions, not just the url.
        if self.has_fragments {
            &self.spec
        } else {
            &self.url
        }
    }

    fn allowed_domains(
        &self,
        generators: &GeneratorRegistry,
    ) -> Result<BTreeSet<String>, StartUrlError> {
        if !self.has_fragments {
            let url = self.url.as_str().unwrap_or_default();
            return Ok(BTreeSet::from([url.to_string()]));
        }
        self.domains
            .get_or_init(|| {
                let generator = generators.get(&self.generator_type)?;
                let fragments = generator.process_fragments(&self.spec)?;
                Ok(fragment_domains(fragments))
            })
            .clone()
    }
}

fn non_empty_str<'a>(spec: &'a Value, field: &str) -> Option<&'a str> {
    spec.get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Strings are taken verbatim; other values by their compact JSON text.
fn literal_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
