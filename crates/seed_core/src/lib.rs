//! Start URL core: descriptor model, domain inference and the collection contract.
mod collection;
mod descriptor;
mod domains;
mod error;
mod generator;

pub use collection::{
    CollectionSettings, StartUrlCollection, StartUrlIter, DEFAULT_GENERATOR_TYPE,
};
pub use descriptor::{LegacyUrl, StartUrl, TypedUrl, GENERATED_URLS};
pub use domains::{fragment_domains, is_domain_bearing};
pub use error::StartUrlError;
pub use generator::{
    fragment_value, fragments_of, literal_values, GeneratorRegistry, UrlGenerator, UrlStream,
};
