use seed_core::{
    fragment_value, fragments_of, literal_values, StartUrlError, UrlGenerator, UrlStream,
};
use seed_logging::seed_debug;
use serde_json::Value;

use crate::product::Product;

const DEFAULT_MAX_RANGE_LEN: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSettings {
    /// Largest number of values a single `range` fragment may expand to.
    pub max_range_len: usize,
}

impl Default for FragmentSettings {
    fn default() -> Self {
        Self {
            max_range_len: DEFAULT_MAX_RANGE_LEN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Fixed,
    List,
    Range,
}

impl FragmentKind {
    fn of(index: usize, fragment: &Value, value: &Value) -> Result<Self, StartUrlError> {
        match fragment.get("type").and_then(Value::as_str) {
            Some("fixed") => Ok(FragmentKind::Fixed),
            Some("list") => Ok(FragmentKind::List),
            Some("range") => Ok(FragmentKind::Range),
            Some(other) => Err(StartUrlError::malformed_fragment(
                index,
                format!("unknown fragment type `{other}`"),
            )),
            None if value.is_array() => Ok(FragmentKind::List),
            None => Ok(FragmentKind::Fixed),
        }
    }
}

/// Expands every fragment object into its alternatives.
pub fn process_fragment_list(
    fragments: &[Value],
    settings: &FragmentSettings,
) -> Result<Vec<Vec<String>>, StartUrlError> {
    fragments
        .iter()
        .enumerate()
        .map(|(index, fragment)| process_fragment(index, fragment, settings))
        .collect()
}

fn process_fragment(
    index: usize,
    fragment: &Value,
    settings: &FragmentSettings,
) -> Result<Vec<String>, StartUrlError> {
    let value = fragment_value(index, fragment)?;
    match FragmentKind::of(index, fragment, value)? {
        FragmentKind::Fixed => match value {
            Value::String(text) => Ok(vec![text.clone()]),
            _ => Err(StartUrlError::malformed_fragment(
                index,
                "fixed value must be a string",
            )),
        },
        FragmentKind::List => match value {
            Value::String(text) => Ok(text.split_whitespace().map(ToOwned::to_owned).collect()),
            other => literal_values(index, other),
        },
        FragmentKind::Range => {
            let text = value.as_str().ok_or_else(|| {
                StartUrlError::malformed_fragment(index, "range value must be a string")
            })?;
            expand_range(text, settings.max_range_len)
                .map_err(|reason| StartUrlError::malformed_fragment(index, reason))
        }
    }
}

/// Expands `"1-10"` or `"a-f"` into every value in between, inclusive.
fn expand_range(text: &str, max_len: usize) -> Result<Vec<String>, String> {
    let (low, high) = text
        .trim()
        .split_once('-')
        .ok_or_else(|| format!("range `{text}` is not of the form `low-high`"))?;
    let (low, high) = (low.trim(), high.trim());

    if let (Ok(low), Ok(high)) = (low.parse::<u64>(), high.parse::<u64>()) {
        check_range_len(low.abs_diff(high), max_len, text)?;
        return Ok(if low <= high {
            (low..=high).map(|n| n.to_string()).collect()
        } else {
            (high..=low).rev().map(|n| n.to_string()).collect()
        });
    }

    match (single_char(low), single_char(high)) {
        (Some(low), Some(high)) => {
            check_range_len(u64::from(low).abs_diff(u64::from(high)), max_len, text)?;
            Ok(if low <= high {
                (low..=high).map(String::from).collect()
            } else {
                (high..=low).rev().map(String::from).collect()
            })
        }
        _ => Err(format!("range `{text}` mixes or misuses bounds")),
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn check_range_len(span: u64, max_len: usize, text: &str) -> Result<(), String> {
    let len = span.saturating_add(1);
    if len > max_len as u64 {
        return Err(format!("range `{text}` has {len} values, limit is {max_len}"));
    }
    Ok(())
}

/// Builds URLs by concatenating one alternative from every fragment.
#[derive(Debug, Clone, Default)]
pub struct FragmentGenerator {
    settings: FragmentSettings,
}

impl FragmentGenerator {
    pub fn new(settings: FragmentSettings) -> Self {
        Self { settings }
    }
}

impl UrlGenerator for FragmentGenerator {
    fn generate<'a>(&'a self, value: &'a Value) -> Result<UrlStream<'a>, StartUrlError> {
        if let Some(url) = value.as_str() {
            return Ok(Box::new(std::iter::once(url.to_string())));
        }
        let fragments = fragments_of(value);
        if fragments.is_empty() {
            return match value.get("url").and_then(Value::as_str) {
                Some(url) => Ok(Box::new(std::iter::once(url.to_string()))),
                None => Err(StartUrlError::invalid_value(
                    "fragments",
                    "expected a url or a spec with fragments",
                )),
            };
        }

        let lists = process_fragment_list(fragments, &self.settings)?;
        seed_debug!(
            "expanding {} fragment slots into {} urls",
            lists.len(),
            Product::total(&lists)
        );
        Ok(Box::new(Product::new(lists).map(|parts| parts.concat())))
    }

    fn process_fragments(&self, spec: &Value) -> Result<Vec<Vec<String>>, StartUrlError> {
        process_fragment_list(fragments_of(spec), &self.settings)
    }
}
