use std::collections::{BTreeSet, VecDeque};

use seed_logging::seed_debug;
use url::Url;

/// True when `candidate` parses as a URL whose path, params, query and
/// fragment are all non-empty.
///
/// `params` is the `;`-suffix of the last path segment. References without a
/// scheme (`//host/x`, `host/x`, `x;p?q#f`) are split into the same parts.
pub fn is_domain_bearing(candidate: &str) -> bool {
    let parsed = Url::parse(candidate);
    let parts = match &parsed {
        Ok(url) => {
            let (path, params) = split_params(url.path());
            UrlParts {
                path,
                params,
                query: url.query().unwrap_or_default(),
                fragment: url.fragment().unwrap_or_default(),
            }
        }
        Err(_) => split_reference(candidate),
    };
    !parts.path.is_empty()
        && !parts.params.is_empty()
        && !parts.query.is_empty()
        && !parts.fragment.is_empty()
}

#[derive(Debug, PartialEq, Eq)]
struct UrlParts<'a> {
    path: &'a str,
    params: &'a str,
    query: &'a str,
    fragment: &'a str,
}

/// Splits a reference the way `scheme://netloc/path;params?query#fragment`
/// reads, without requiring any part to be present.
fn split_reference(reference: &str) -> UrlParts<'_> {
    let (rest, fragment) = reference.split_once('#').unwrap_or((reference, ""));
    let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));
    let rest = strip_scheme(rest);
    let rest = match rest.strip_prefix("//") {
        Some(authority) => authority.find('/').map_or("", |slash| &authority[slash..]),
        None => rest,
    };
    let (path, params) = split_params(rest);
    UrlParts {
        path,
        params,
        query,
        fragment,
    }
}

fn strip_scheme(reference: &str) -> &str {
    match reference.split_once(':') {
        Some((scheme, rest))
            if scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
        {
            rest
        }
        _ => reference,
    }
}

fn split_params(path: &str) -> (&str, &str) {
    let segment_start = path.rfind('/').map_or(0, |slash| slash + 1);
    match path[segment_start..].find(';') {
        Some(offset) => {
            let at = segment_start + offset;
            (&path[..at], &path[at + 1..])
        }
        None => (path, ""),
    }
}

/// Joins fragment alternatives left to right until every candidate is
/// domain-bearing.
///
/// Returns the first fully domain-bearing accumulator, or an empty set when
/// the fragments run out before that happens. Later fragment lists are never
/// combined once the accumulator qualifies.
pub fn fragment_domains(fragments: Vec<Vec<String>>) -> BTreeSet<String> {
    let mut queue = VecDeque::from(fragments);
    let Some(mut accumulator) = queue.pop_front() else {
        return BTreeSet::new();
    };

    loop {
        if accumulator.iter().all(|candidate| is_domain_bearing(candidate)) {
            return accumulator.into_iter().collect();
        }
        let Some(next) = queue.pop_front() else {
            seed_debug!(
                "fragments never resolved to domain-bearing urls ({} candidates)",
                accumulator.len()
            );
            return BTreeSet::new();
        };
        accumulator = join_product(&accumulator, &next);
    }
}

fn join_product(left: &[String], right: &[String]) -> Vec<String> {
    left.iter()
        .flat_map(|head| right.iter().map(move |tail| format!("{head}{tail}")))
        .collect()
}
