use anyhow::Result;
use clap::Parser;
use monobuild::{
    cli::{Cli, Commands},
    config::{CiEnv, Config},
    constants::output,
    git::Git,
    matrix::{build_matrix, MatrixOutput},
    output::OutputSink,
    service::discover_services,
    tags::render_tags,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let ci_env = CiEnv::from_env();
    debug!("CI environment: {:?}", ci_env);

    let sink = OutputSink::new(cli.output.or_else(|| ci_env.output_path.clone()));
    if let Some(path) = sink.path() {
        debug!("Writing outputs to {}", path.display());
    }

    match cli.command {
        Commands::Matrix { base, head } => {
            let config = Config::load(&cli.root)?;
            let base = base.or_else(|| ci_env.base_revision().map(str::to_string));
            run_matrix(&cli.root, &config, base.as_deref(), &head, &sink)?;
        }
        Commands::Tags {
            service_dir,
            dockerfile,
            image,
        } => {
            let config = Config::load(&cli.root)?;
            run_tags(&service_dir, dockerfile, &image, &config, &sink)?;
        }
        Commands::Version => {
            println!("monobuild {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn run_matrix(
    root: &Path,
    config: &Config,
    base: Option<&str>,
    head: &str,
    sink: &OutputSink,
) -> Result<()> {
    info!("Base revision: {}", base.unwrap_or("<none>"));

    let services = discover_services(root, config)?;
    info!("All services: {}", serde_json::to_string(&services)?);

    let result = if services.is_empty() {
        MatrixOutput::new(Vec::new())
    } else {
        let git = Git::new(root, &config.remote)?;
        build_matrix(&services, &git, base, head)?
    };

    let payload = serde_json::to_string(&result.matrix)?;
    info!("Final matrix payload: {}", payload);

    sink.set(output::MATRIX, &payload)?;
    sink.set(output::HAS_WORK, &result.has_work.to_string())?;
    Ok(())
}

fn run_tags(
    service_dir: &Path,
    dockerfile: Option<PathBuf>,
    image: &str,
    config: &Config,
    sink: &OutputSink,
) -> Result<()> {
    let tags = render_tags(
        service_dir,
        dockerfile.as_deref(),
        image,
        &config.descriptor_file,
    )?;

    for tag in &tags {
        info!("Extra tag: {}", tag);
    }

    sink.set_lines(output::EXTRA_TAGS, &tags)
}
