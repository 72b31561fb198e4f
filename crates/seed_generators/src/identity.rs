use seed_core::{StartUrlError, UrlGenerator, UrlStream};
use serde_json::Value;

/// Hands plain start URLs through unchanged.
///
/// Accepts a URL string, an array of URL strings, or an object with a `url`
/// string (a legacy entry that lacks a `type`).
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityGenerator;

impl UrlGenerator for IdentityGenerator {
    fn generate<'a>(&'a self, value: &'a Value) -> Result<UrlStream<'a>, StartUrlError> {
        match value {
            Value::String(url) => Ok(Box::new(std::iter::once(url.clone()))),
            Value::Array(items) => {
                let urls = items
                    .iter()
                    .map(|item| {
                        item.as_str().map(ToOwned::to_owned).ok_or_else(|| {
                            StartUrlError::invalid_value("identity", format!("{item} is not a url"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Box::new(urls.into_iter()))
            }
            Value::Object(fields) => match fields.get("url").and_then(Value::as_str) {
                Some(url) => Ok(Box::new(std::iter::once(url.to_string()))),
                None => Err(StartUrlError::invalid_value(
                    "identity",
                    "object entries need a `url` string",
                )),
            },
            other => Err(StartUrlError::invalid_value(
                "identity",
                format!("{other} is not a url"),
            )),
        }
    }
}
