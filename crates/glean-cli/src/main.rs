use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use glean_build::{GleanOptions, ModeSelection, OutputKind};
use glean_package::DependencyOptions;
use std::path::PathBuf;

mod config;
mod output;

use config::GleanConfig;
use output::ConsoleReporter;

/// Source dependency resolver and build orchestrator.
///
/// Reads a glean.json manifest, recursively downloads every declared
/// dependency into a shared cache, and builds and installs them in
/// dependency order - or emits the whole graph as a CMake ExternalProject
/// description for a host build to execute.
///
/// EXAMPLES:
///     glean                                 Resolve and build ./glean.json
///     glean --build_type all                Build release and debug
///     glean --output_type cmake > deps.cmake  Emit instead of building
///     glean --cmake_arg -DBUILD_TESTING=OFF Pass an argument to every build
///
/// ENVIRONMENT VARIABLES:
///     GLEAN_CONFIG    Location of the persistent config file
///     NO_COLOR        Set to disable colored output
#[derive(Parser)]
#[command(name = "glean")]
#[command(version)]
struct Cli {
    /// Dependencies manifest to resolve
    #[arg(long = "deps_file", default_value = "./glean.json")]
    deps_file: PathBuf,

    /// Cache folder (overrides the config file)
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Installation prefix folder
    #[arg(long)]
    prefix: Option<PathBuf>,

    /// Build configuration(s) to produce
    #[arg(long = "build_type", value_enum, default_value_t = BuildTypeArg::Release)]
    build_type: BuildTypeArg,

    /// Execute the graph directly or emit a cmake description of it
    #[arg(long = "output_type", value_enum, default_value_t = OutputTypeArg::Process)]
    output_type: OutputTypeArg,

    /// Extra cmake argument applied to every dependency (repeatable)
    #[arg(long = "cmake_arg", value_name = "ARG")]
    cmake_args: Vec<String>,

    /// Parallel jobs passed to the build tool
    #[arg(long)]
    jobs: Option<u32>,

    /// Use the first declaration when a name has conflicting alternatives
    #[arg(long = "use_first_dependency", default_value_t = true, action = clap::ArgAction::Set)]
    use_first_dependency: bool,

    /// Per-dependency option overrides file
    #[arg(long = "dep_opts_file")]
    dep_opts_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BuildTypeArg {
    Release,
    Debug,
    All,
}

impl From<BuildTypeArg> for ModeSelection {
    fn from(arg: BuildTypeArg) -> Self {
        match arg {
            BuildTypeArg::Release => Self::Release,
            BuildTypeArg::Debug => Self::Debug,
            BuildTypeArg::All => Self::All,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputTypeArg {
    Process,
    Cmake,
}

impl From<OutputTypeArg> for OutputKind {
    fn from(arg: OutputTypeArg) -> Self {
        match arg {
            OutputTypeArg::Process => Self::Process,
            OutputTypeArg::Cmake => Self::Cmake,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = GleanConfig::load();
    let opts = build_options(&cli, &config)?;
    let reporter = ConsoleReporter;

    let graph = glean_build::resolve(&cli.deps_file, &opts, &reporter)?;

    match opts.output {
        OutputKind::Cmake => {
            let description = glean_build::emit(graph, &opts, &reporter)?;
            print!("{description}");
        }
        OutputKind::Process => {
            let report = glean_build::execute(graph, &opts, &reporter)?;
            summarize(&report);
            if !report.is_success() {
                bail!("{} dependencies failed to build", report.failed.len());
            }
        }
    }
    Ok(())
}

fn build_options(cli: &Cli, config: &GleanConfig) -> Result<GleanOptions> {
    let cache_root = cli.cache.clone().unwrap_or_else(|| config.cache_folder.clone());
    ensure_dir(&cache_root).context("cache folder")?;

    let prefix = cli.prefix.clone().unwrap_or_else(|| {
        cli.deps_file
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("glean_files")
    });
    ensure_dir(&prefix).context("prefix folder")?;

    let dep_opts = match &cli.dep_opts_file {
        Some(path) => DependencyOptions::from_file(path)
            .with_context(|| format!("reading dependency options from {}", path.display()))?,
        None => DependencyOptions::default(),
    };

    let mut opts = GleanOptions::new(cache_root, prefix);
    opts.build_modes = cli.build_type.into();
    opts.output = cli.output_type.into();
    opts.cmake_args = cli.cmake_args.clone();
    opts.jobs = cli.jobs;
    opts.use_first_dependency = cli.use_first_dependency;
    opts.dep_opts = dep_opts;
    opts.tools = glean_build::ToolPaths {
        cmake: config.cmake_binary.clone(),
        git: config.git_binary.clone(),
        svn: config.svn_binary.clone(),
    };
    Ok(opts)
}

fn ensure_dir(path: &std::path::Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            bail!("{} exists and is not a directory", path.display());
        }
        return Ok(());
    }
    std::fs::create_dir_all(path)
        .with_context(|| format!("could not create {}", path.display()))?;
    Ok(())
}

fn summarize(report: &glean_build::BuildReport) {
    if !report.built.is_empty() {
        println!("{} {}", "Built:".green().bold(), report.built.join(", "));
    }
    if !report.skipped.is_empty() {
        println!(
            "{} {}",
            "Skipped:".yellow().bold(),
            report.skipped.join(", ")
        );
    }
    if !report.failed.is_empty() {
        eprintln!("{} {}", "Failed:".red().bold(), report.failed.join(", "));
    }
}
