//! Start URL generators and crawl spec loading.
mod fragment;
mod identity;
mod load;
mod product;
mod registry;
mod template;

pub use fragment::{process_fragment_list, FragmentGenerator, FragmentKind, FragmentSettings};
pub use identity::IdentityGenerator;
pub use load::{load_spec, CrawlSpec, LoadError, SpecFormat};
pub use product::Product;
pub use registry::{default_registry, FRAGMENTS, GENERATED, START_URLS, URL};
pub use template::TemplateGenerator;
