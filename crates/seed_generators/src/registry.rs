use seed_core::{GeneratorRegistry, GENERATED_URLS};

use crate::{FragmentGenerator, FragmentSettings, IdentityGenerator, TemplateGenerator};

pub const START_URLS: &str = "start_urls";
pub const URL: &str = "url";
pub const GENERATED: &str = "generated";
pub const FRAGMENTS: &str = "fragments";

/// Registry with every built-in generator.
///
/// `generated` and `fragments` are two names for the fragment generator;
/// `generated_urls` expands legacy templates.
pub fn default_registry(settings: FragmentSettings) -> GeneratorRegistry {
    GeneratorRegistry::new()
        .with(START_URLS, IdentityGenerator)
        .with(URL, IdentityGenerator)
        .with(GENERATED, FragmentGenerator::new(settings.clone()))
        .with(FRAGMENTS, FragmentGenerator::new(settings.clone()))
        .with(GENERATED_URLS, TemplateGenerator::new(settings))
}
