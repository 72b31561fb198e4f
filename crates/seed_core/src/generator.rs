use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::StartUrlError;

/// Lazy sequence of concrete URLs produced by a generator.
pub type UrlStream<'a> = Box<dyn Iterator<Item = String> + 'a>;

/// Pluggable strategy that expands a generator value into URLs.
pub trait UrlGenerator {
    /// Expands `value` (a base URL or a full fragmented spec) into URLs.
    fn generate<'a>(&'a self, value: &'a Value) -> Result<UrlStream<'a>, StartUrlError>;

    /// Decomposes a fragmented spec into one list of alternatives per fragment slot.
    ///
    /// The default treats every fragment literally: a string value is a single
    /// alternative and an array value lists its alternatives.
    fn process_fragments(&self, spec: &Value) -> Result<Vec<Vec<String>>, StartUrlError> {
        fragments_of(spec)
            .iter()
            .enumerate()
            .map(|(index, fragment)| literal_values(index, fragment_value(index, fragment)?))
            .collect()
    }
}

/// Fragment objects of a spec, or an empty slice when there are none.
pub fn fragments_of(spec: &Value) -> &[Value] {
    match spec.get("fragments") {
        Some(Value::Array(fragments)) => fragments,
        _ => &[],
    }
}

/// The `value` of the fragment at `index`.
pub fn fragment_value(index: usize, fragment: &Value) -> Result<&Value, StartUrlError> {
    fragment
        .get("value")
        .ok_or_else(|| StartUrlError::malformed_fragment(index, "missing `value`"))
}

/// Reads a fragment value as its literal alternatives.
pub fn literal_values(index: usize, value: &Value) -> Result<Vec<String>, StartUrlError> {
    match value {
        Value::String(text) => Ok(vec![text.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(ToOwned::to_owned).ok_or_else(|| {
                    StartUrlError::malformed_fragment(index, "alternatives must be strings")
                })
            })
            .collect(),
        other => Err(StartUrlError::malformed_fragment(
            index,
            format!("unsupported value {other}"),
        )),
    }
}

/// Generators keyed by the type name a spec entry refers to.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<String, Box<dyn UrlGenerator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `generator` under `name`, replacing any previous entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        generator: impl UrlGenerator + 'static,
    ) -> &mut Self {
        self.generators.insert(name.into(), Box::new(generator));
        self
    }

    pub fn with(mut self, name: impl Into<String>, generator: impl UrlGenerator + 'static) -> Self {
        self.register(name, generator);
        self
    }

    /// Looks up a generator; an unregistered name is a configuration error.
    pub fn get(&self, name: &str) -> Result<&dyn UrlGenerator, StartUrlError> {
        self.generators
            .get(name)
            .map(Box::as_ref)
            .ok_or_else(|| StartUrlError::UnknownGenerator(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
