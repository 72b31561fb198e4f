use seed_core::{StartUrlError, UrlGenerator, UrlStream};
use seed_logging::seed_debug;
use serde_json::Value;

use crate::fragment::{process_fragment_list, FragmentSettings};
use crate::product::Product;

const PLACEHOLDER: &str = "{}";

/// Expands legacy `{ "template": ..., "params": [...] }` entries.
///
/// Every `{}` in the template is filled positionally by one alternative of
/// the matching param, which is a fragment object.
#[derive(Debug, Clone, Default)]
pub struct TemplateGenerator {
    settings: FragmentSettings,
}

impl TemplateGenerator {
    pub fn new(settings: FragmentSettings) -> Self {
        Self { settings }
    }
}

impl UrlGenerator for TemplateGenerator {
    fn generate<'a>(&'a self, value: &'a Value) -> Result<UrlStream<'a>, StartUrlError> {
        let (template, params) = match value {
            Value::String(template) => (template.as_str(), &[][..]),
            Value::Object(fields) => {
                let template = fields
                    .get("template")
                    .and_then(Value::as_str)
                    .ok_or(StartUrlError::MissingField("template"))?;
                let params = match fields.get("params") {
                    Some(Value::Array(params)) => params.as_slice(),
                    None | Some(Value::Null) => &[][..],
                    Some(_) => {
                        return Err(StartUrlError::invalid_value(
                            "template",
                            "`params` must be an array",
                        ))
                    }
                };
                (template, params)
            }
            other => {
                return Err(StartUrlError::invalid_value(
                    "template",
                    format!("{other} is not a template"),
                ))
            }
        };

        let pieces: Vec<&'a str> = template.split(PLACEHOLDER).collect();
        let placeholders = pieces.len() - 1;
        if placeholders != params.len() {
            return Err(StartUrlError::invalid_value(
                "template",
                format!(
                    "`{template}` has {placeholders} placeholders but {} params",
                    params.len()
                ),
            ));
        }

        let lists = process_fragment_list(params, &self.settings)?;
        seed_debug!(
            "filling template {template:?} with {} combinations",
            Product::total(&lists)
        );
        Ok(Box::new(
            Product::new(lists).map(move |values| fill(&pieces, &values)),
        ))
    }

    fn process_fragments(&self, spec: &Value) -> Result<Vec<Vec<String>>, StartUrlError> {
        match spec.get("params") {
            Some(Value::Array(params)) => process_fragment_list(params, &self.settings),
            _ => Ok(Vec::new()),
        }
    }
}

fn fill(pieces: &[&str], values: &[String]) -> String {
    let mut url = String::from(pieces[0]);
    for (value, piece) in values.iter().zip(&pieces[1..]) {
        url.push_str(value);
        url.push_str(piece);
    }
    url
}
