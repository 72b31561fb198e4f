use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::Once;

use pretty_assertions::assert_eq;
use seed_core::{
    CollectionSettings, GeneratorRegistry, StartUrlCollection, StartUrlError, UrlGenerator,
    UrlStream,
};
use serde_json::{json, Value};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(seed_logging::initialize_for_tests);
}

struct Identity;

impl UrlGenerator for Identity {
    fn generate<'a>(&'a self, value: &'a Value) -> Result<UrlStream<'a>, StartUrlError> {
        match value.as_str() {
            Some(url) => Ok(Box::new(std::iter::once(url.to_string()))),
            None => Err(StartUrlError::invalid_value("identity", "expected a string")),
        }
    }
}

/// Yields `{url}?page=1..=pages`.
struct Paged {
    pages: u32,
}

impl UrlGenerator for Paged {
    fn generate<'a>(&'a self, value: &'a Value) -> Result<UrlStream<'a>, StartUrlError> {
        let url = value
            .as_str()
            .ok_or_else(|| StartUrlError::invalid_value("paged", "expected a string"))?;
        Ok(Box::new(
            (1..=self.pages).map(move |page| format!("{url}?page={page}")),
        ))
    }
}

fn registry() -> GeneratorRegistry {
    GeneratorRegistry::new()
        .with("start_urls", Identity)
        .with("url", Identity)
        .with("paged", Paged { pages: 2 })
}

fn collection(entries: Vec<Value>) -> StartUrlCollection {
    init_logging();
    StartUrlCollection::new(entries, registry(), CollectionSettings::default())
}

fn expand(collection: &StartUrlCollection) -> Vec<String> {
    collection
        .iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("every entry expands")
}

#[test]
fn default_settings_use_start_urls() {
    assert_eq!(
        CollectionSettings::default().default_generator_type,
        "start_urls"
    );
}

#[test]
fn iteration_flattens_in_spec_order() {
    let collection = collection(vec![
        json!("http://a.com"),
        json!({"type": "paged", "url": "http://b.com/list"}),
        json!({"type": "start_urls", "url": "http://c.com"}),
    ]);

    assert_eq!(collection.len(), 3);
    assert_eq!(
        expand(&collection),
        vec![
            "http://a.com",
            "http://b.com/list?page=1",
            "http://b.com/list?page=2",
            "http://c.com",
        ]
    );
}

#[test]
fn iteration_is_restartable() {
    let collection = collection(vec![
        json!({"type": "paged", "url": "http://b.com"}),
        json!("http://a.com"),
    ]);

    let first = expand(&collection);
    let second: Vec<String> = (&collection).into_iter().map(Result::unwrap).collect();
    assert_eq!(first, second);
}

#[test]
fn partial_consumption_leaves_collection_untouched() {
    let collection = collection(vec![
        json!({"type": "paged", "url": "http://b.com"}),
        json!("http://a.com"),
    ]);

    let head: Vec<_> = collection.iter().take(1).collect();
    assert_eq!(head, vec![Ok("http://b.com?page=1".to_string())]);
    assert_eq!(collection.uniq().len(), 2);
    assert_eq!(expand(&collection).len(), 3);
}

#[test]
fn unknown_generator_is_reported_in_place() {
    let collection = collection(vec![
        json!("http://a.com"),
        json!({"type": "ghost", "url": "http://g.com"}),
        json!("http://b.com"),
    ]);

    let results: Vec<_> = collection.iter().collect();
    assert_eq!(
        results,
        vec![
            Ok("http://a.com".to_string()),
            Err(StartUrlError::UnknownGenerator("ghost".to_string())),
            Ok("http://b.com".to_string()),
        ]
    );
}

#[test]
fn unknown_default_generator_fails_legacy_entries() {
    init_logging();
    let settings = CollectionSettings {
        default_generator_type: "missing".to_string(),
    };
    let collection = StartUrlCollection::new(vec![json!("http://a.com")], registry(), settings);

    let results: Vec<_> = collection.iter().collect();
    assert_eq!(
        results,
        vec![Err(StartUrlError::UnknownGenerator("missing".to_string()))]
    );
}

#[test]
fn empty_collection_yields_nothing() {
    let collection = collection(Vec::new());

    assert!(collection.is_empty());
    assert_eq!(collection.iter().count(), 0);
    assert!(collection.uniq().is_empty());
    assert_eq!(collection.allowed_domains().unwrap(), BTreeSet::new());
}

#[test]
fn uniq_keeps_first_position_and_last_value() {
    let first = json!({"type": "start_urls", "url": "http://a.com"});
    let other = json!("http://b.com");
    let last = json!({"type": "url", "url": "http://a.com"});
    let collection = collection(vec![first, other.clone(), last.clone()]);

    assert_eq!(collection.uniq(), vec![&last, &other]);
    assert_eq!(collection.uniq(), collection.uniq());
}

#[test]
fn uniq_compares_literal_fragments_not_expansions() {
    let short = json!({
        "type": "generated",
        "url": "http://a.com/",
        "fragments": [{"type": "range", "value": "1-2"}]
    });
    let long = json!({
        "type": "generated",
        "url": "http://a.com/",
        "fragments": [{"type": "list", "value": "1 2"}]
    });
    let collection = collection(vec![short.clone(), long.clone()]);

    assert_eq!(collection.uniq(), vec![&short, &long]);
}

#[test]
fn allowed_domains_are_the_union_of_entries() {
    let collection = collection(vec![
        json!("x"),
        json!({
            "type": "url",
            "url": "http://y.com/",
            "fragments": [{"value": ["http://y.com/a;p?q#f", "http://z.com/a;p?q#f"]}]
        }),
        json!({"type": "url", "url": "x"}),
    ]);

    assert_eq!(
        collection.allowed_domains().unwrap(),
        ["x", "http://y.com/a;p?q#f", "http://z.com/a;p?q#f"]
            .into_iter()
            .map(String::from)
            .collect::<BTreeSet<_>>()
    );
}

/// Literal fragments that count how often they are decomposed.
#[derive(Clone, Default)]
struct Counting {
    calls: Rc<Cell<usize>>,
}

impl UrlGenerator for Counting {
    fn generate<'a>(&'a self, _value: &'a Value) -> Result<UrlStream<'a>, StartUrlError> {
        Ok(Box::new(std::iter::empty()))
    }

    fn process_fragments(&self, spec: &Value) -> Result<Vec<Vec<String>>, StartUrlError> {
        self.calls.set(self.calls.get() + 1);
        Ok(vec![vec![spec["url"].as_str().unwrap_or_default().to_string()]])
    }
}

#[test]
fn fragment_domains_are_decomposed_once_per_entry() {
    init_logging();
    let counting = Counting::default();
    let generators = registry().with("counting", counting.clone());
    let collection = StartUrlCollection::new(
        vec![json!({
            "type": "counting",
            "url": "http://a.com/x;p?q=1#f",
            "fragments": [{"value": "ignored"}]
        })],
        generators,
        CollectionSettings::default(),
    );

    let first = collection.allowed_domains().unwrap();
    let second = collection.allowed_domains().unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first,
        BTreeSet::from(["http://a.com/x;p?q=1#f".to_string()])
    );
    assert_eq!(counting.calls.get(), 1);
}

#[test]
fn allowed_domains_surface_configuration_errors() {
    let collection = collection(vec![
        json!("http://a.com"),
        json!({"type": "ghost", "url": "http://g.com", "fragments": [{"value": "x"}]}),
    ]);

    assert_eq!(
        collection.allowed_domains(),
        Err(StartUrlError::UnknownGenerator("ghost".to_string()))
    );
}

#[test]
fn settings_and_generators_are_kept() {
    let collection = collection(vec![json!("http://a.com")]);

    assert_eq!(collection.settings(), &CollectionSettings::default());
    assert!(collection.generators().contains("paged"));
    assert_eq!(
        collection.generators().names().collect::<Vec<_>>(),
        vec!["paged", "start_urls", "url"]
    );
    assert!(collection.start_urls()[0].is_legacy());
}
