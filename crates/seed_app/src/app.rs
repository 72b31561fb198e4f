use std::io::Write;

use anyhow::{Context, Result};
use seed_core::CollectionSettings;
use seed_generators::{default_registry, load_spec, FragmentSettings};
use seed_logging::{seed_info, seed_warn};

use crate::cli::{Cli, Command};
use crate::output;

pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let spec_path = cli.command.spec();
    let mut spec = load_spec(spec_path)
        .with_context(|| format!("failed to load crawl spec {}", spec_path.display()))?;
    if let Some(default_type) = &cli.default_type {
        spec.generator_type = Some(default_type.clone());
    }

    let mut fragment_settings = FragmentSettings::default();
    if let Some(max_range_len) = cli.max_range {
        fragment_settings.max_range_len = max_range_len;
    }
    let collection =
        spec.into_collection(default_registry(fragment_settings), CollectionSettings::default());
    seed_info!(
        "Expanding {} start urls (legacy default {:?})",
        collection.len(),
        collection.settings().default_generator_type
    );

    match &cli.command {
        Command::Urls { limit, .. } => {
            let urls = collection.iter().take(limit.unwrap_or(usize::MAX));
            if cli.json {
                let urls = urls
                    .collect::<Result<Vec<_>, _>>()
                    .context("failed to expand start urls")?;
                output::write_lines(out, urls, true)?;
            } else {
                for url in urls {
                    let url = url.context("failed to expand start urls")?;
                    output::write_lines(out, [url], false)?;
                }
            }
        }
        Command::Uniq { .. } => {
            output::write_values(out, &collection.uniq(), cli.json)?;
        }
        Command::Domains { .. } => {
            let domains = collection
                .allowed_domains()
                .context("failed to infer allowed domains")?;
            if domains.is_empty() {
                seed_warn!("No allowed domains could be inferred from the start urls");
            }
            output::write_lines(out, domains, cli.json)?;
        }
    }
    Ok(())
}
