use anyhow::{bail, Context, Result};
use isoenum_catalog::{
    read_catalog, snapshot_path, Changelog, ChangeKind, CrossReference, DocContext, EntrySet,
    Generator, GeneratorConfig, PublishedSnapshot,
};
use isoenum_codec::Domain;
use log::{debug, error, info};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::emit::render_enum;
use crate::GenerateArgs;

pub(crate) fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::builtin().context("Built-in config is invalid")?,
    };
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let selected: Vec<Domain> = Domain::ALL
        .into_iter()
        .filter(|domain| args.domains.is_empty() || args.domains.contains(domain))
        .collect();

    let mut generated: BTreeMap<Domain, EntrySet> = BTreeMap::new();
    let mut failed = Vec::new();
    for domain in selected {
        let ctx = DocContext {
            languages: CrossReference::for_domain(
                Domain::Language,
                generated.get(&Domain::Language),
            ),
            currencies: CrossReference::for_domain(
                Domain::Currency,
                generated.get(&Domain::Currency),
            ),
        };
        if domain == Domain::Country && ctx.languages.is_empty() && ctx.currencies.is_empty() {
            debug!("No language or currency results in this run; country docs keep raw codes");
        }

        match generate_domain(domain, &args, &config, &ctx) {
            Ok(set) => {
                generated.insert(domain, set);
            }
            Err(err) => {
                error!("{domain} generation failed: {err:#}");
                failed.push(domain.as_str());
            }
        }
    }

    if !failed.is_empty() {
        bail!("Generation failed for: {}", failed.join(", "));
    }
    Ok(())
}

fn generate_domain(
    domain: Domain,
    args: &GenerateArgs,
    config: &GeneratorConfig,
    ctx: &DocContext,
) -> Result<EntrySet> {
    let catalog = args.catalog_dir.join(format!("{domain}.json"));
    let records = read_catalog(&catalog)
        .with_context(|| format!("Failed to read catalog {}", catalog.display()))?;

    let supplement_path = args.catalog_dir.join(format!("{domain}.supplement.json"));
    let supplement = if supplement_path.is_file() {
        read_catalog(&supplement_path)
            .with_context(|| format!("Failed to read supplement {}", supplement_path.display()))?
    } else {
        Vec::new()
    };

    let sidecar = snapshot_path(&args.out_dir, domain);
    let previous = PublishedSnapshot::load(domain, &sidecar)
        .with_context(|| format!("Failed to load snapshot {}", sidecar.display()))?;

    let set = Generator::new(domain, config)
        .generate_with_supplement(records, supplement, &previous, ctx)?;
    let changelog = Changelog::between(&previous, &set);
    info!(
        "{domain}: {} added, {} changed, {} removed",
        changelog.count(ChangeKind::Added),
        changelog.count(ChangeKind::Changed),
        changelog.count(ChangeKind::Removed)
    );

    // every artifact is staged before the first rename; the sidecar is
    // committed first so it is never behind a published listing
    let snapshot_json = set.to_snapshot().to_json_string()?;
    let mut staged = vec![
        Staged::write(sidecar, &snapshot_json)?,
        Staged::write(args.out_dir.join(format!("{domain}.rs")), &render_enum(&set))?,
    ];
    if args.changelog {
        staged.push(Staged::write(
            args.out_dir.join(format!("{domain}.changelog.md")),
            &changelog.to_markdown(),
        )?);
    }
    commit(staged)?;
    Ok(set)
}

/// Artifact written to `<file>.tmp`, waiting for its rename
struct Staged {
    tmp: PathBuf,
    path: PathBuf,
}

impl Staged {
    fn write(path: PathBuf, contents: &str) -> Result<Self> {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        let tmp = path.with_file_name(name);
        fs::write(&tmp, contents).with_context(|| format!("Failed to write {}", tmp.display()))?;
        Ok(Self { tmp, path })
    }
}

// a failed run leaves no `.tmp` files behind
impl Drop for Staged {
    fn drop(&mut self) {
        if self.tmp.is_file() {
            if let Err(err) = fs::remove_file(&self.tmp) {
                debug!("Could not remove {}: {err}", self.tmp.display());
            }
        }
    }
}

fn commit(staged: Vec<Staged>) -> Result<()> {
    for artifact in &staged {
        fs::rename(&artifact.tmp, &artifact.path)
            .with_context(|| format!("Failed to replace {}", artifact.path.display()))?;
        debug!("Wrote {}", artifact.path.display());
    }
    Ok(())
}
