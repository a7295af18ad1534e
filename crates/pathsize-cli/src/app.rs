/// Run one invocation: resolve configuration, build the registry, and
/// either print the listing or delete a file.
use crate::args::Cli;
use crate::settings;
use anyhow::{bail, Context};
use pathsize_core::analysis::ListingReport;
use pathsize_core::model::{humanize, Deleted, PathRegistry};
use std::io::Write;
use std::time::Instant;
use tracing::info;

/// Execute `cli`, writing the report (or deletion notice) to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let config = settings::resolve(cli)?;
    let registry = PathRegistry::from_config(&config).context("compiling exclusion patterns")?;

    info!("{} exclusion patterns active", registry.exclusions().len());

    if let Some(target) = &cli.delete {
        match registry.delete_path(target)? {
            Deleted::File { path, size } => writeln!(out, "deleted {path} ({})", humanize(size))?,
            Deleted::Link { path } => writeln!(out, "deleted link {path}")?,
        }
        return Ok(());
    }

    let start = Instant::now();
    let root = registry.get_or_create(&cli.path)?;
    if root.metadata(&registry).is_none() {
        bail!("cannot read {}", root.path());
    }

    let mut report = ListingReport::build_with(&root, &registry, config.widths())
        .with_context(|| format!("measuring {}", root.path()))?;
    if let Some(n) = cli.top {
        report = report.top(n);
    }
    info!(
        "measured {} ({} nodes) in {:?}",
        root.path(),
        registry.len(),
        start.elapsed()
    );

    write!(out, "{report}")?;
    Ok(())
}
