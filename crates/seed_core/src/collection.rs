use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::slice;

use seed_logging::seed_warn;
use serde_json::Value;

use crate::{GeneratorRegistry, StartUrl, StartUrlError, UrlStream};

pub const DEFAULT_GENERATOR_TYPE: &str = "start_urls";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSettings {
    /// Generator type assigned to legacy entries.
    pub default_generator_type: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            default_generator_type: DEFAULT_GENERATOR_TYPE.to_string(),
        }
    }
}

/// The start URLs of one crawl spec together with the generators that expand them.
#[derive(Debug)]
pub struct StartUrlCollection {
    start_urls: Vec<StartUrl>,
    generators: GeneratorRegistry,
    settings: CollectionSettings,
}

impl StartUrlCollection {
    pub fn new<I>(entries: I, generators: GeneratorRegistry, settings: CollectionSettings) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let start_urls = entries
            .into_iter()
            .map(|entry| StartUrl::classify(entry, &settings.default_generator_type))
            .collect();
        Self {
            start_urls,
            generators,
            settings,
        }
    }

    pub fn start_urls(&self) -> &[StartUrl] {
        &self.start_urls
    }

    pub fn generators(&self) -> &GeneratorRegistry {
        &self.generators
    }

    pub fn settings(&self) -> &CollectionSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.start_urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start_urls.is_empty()
    }

    /// Lazily expands every entry, in spec order.
    ///
    /// An entry whose generator is unknown or rejects its value yields a
    /// single error in its place; the following entries still expand.
    pub fn iter(&self) -> StartUrlIter<'_> {
        StartUrlIter {
            generators: &self.generators,
            pending: self.start_urls.iter(),
            current: None,
        }
    }

    /// Spec entries deduplicated by key.
    ///
    /// A repeated key keeps the position of its first occurrence and the
    /// value of its last.
    pub fn uniq(&self) -> Vec<&Value> {
        let mut slots: Vec<&Value> = Vec::with_capacity(self.start_urls.len());
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for start_url in &self.start_urls {
            match positions.entry(start_url.key()) {
                Entry::Occupied(position) => slots[*position.get()] = start_url.spec(),
                Entry::Vacant(position) => {
                    position.insert(slots.len());
                    slots.push(start_url.spec());
                }
            }
        }
        slots
    }

    /// Union of the allowed domains of every entry.
    pub fn allowed_domains(&self) -> Result<BTreeSet<String>, StartUrlError> {
        let mut domains = BTreeSet::new();
        for start_url in &self.start_urls {
            domains.extend(start_url.allowed_domains(&self.generators)?);
        }
        Ok(domains)
    }
}

impl<'a> IntoIterator for &'a StartUrlCollection {
    type Item = Result<String, StartUrlError>;
    type IntoIter = StartUrlIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Flattened, pull-based expansion of a [`StartUrlCollection`].
pub struct StartUrlIter<'a> {
    generators: &'a GeneratorRegistry,
    pending: slice::Iter<'a, StartUrl>,
    current: Option<UrlStream<'a>>,
}

impl<'a> Iterator for StartUrlIter<'a> {
    type Item = Result<String, StartUrlError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(stream) = self.current.as_mut() {
                if let Some(url) = stream.next() {
                    return Some(Ok(url));
                }
                self.current = None;
            }

            let start_url = self.pending.next()?;
            match expand(self.generators, start_url) {
                Ok(stream) => self.current = Some(stream),
                Err(err) => {
                    seed_warn!("cannot expand start url {:?}: {}", start_url.key(), err);
                    return Some(Err(err));
                }
            }
        }
    }
}

fn expand<'a>(
    generators: &'a GeneratorRegistry,
    start_url: &'a StartUrl,
) -> Result<UrlStream<'a>, StartUrlError> {
    let generator = generators.get(start_url.generator_type())?;
    generator.generate(start_url.generator_value())
}
