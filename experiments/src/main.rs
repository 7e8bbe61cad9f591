use anyhow::Context;
use clap::Parser;
use expcore::experiment::ExperimentPrototype;
use kwargs::Kwargs;
use site::SiteOptions;
use std::path::PathBuf;

mod common;
mod kwargs;
mod modes;
mod registry;
mod site;

#[derive(Parser)]
#[command(author, version, about = "Offline builder for radar control experiments")]
struct Args {
    /// Experiment name, e.g. normalscan_single_beam
    name: Option<String>,
    /// Experiment arguments as key=value pairs, e.g. --kwarg freq=10600
    #[arg(long = "kwarg", value_name = "KEY=VALUE")]
    kwargs: Vec<String>,
    /// Load site options from YAML instead of the built-in defaults
    #[arg(long)]
    site: Option<PathBuf>,
    /// List the registered experiments and exit
    #[arg(long, default_value_t = false)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for name in registry::names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let name = args
        .name
        .context("no experiment name given (use --list to see the registry)")?;
    let site = match args.site {
        Some(path) => SiteOptions::load(path)?,
        None => SiteOptions::default(),
    };
    let kwargs = Kwargs::from_pairs(&args.kwargs)?;

    let experiment = registry::build(&name, &site, &kwargs)
        .with_context(|| format!("building experiment {}", name))?;
    print_experiment(&experiment)?;
    Ok(())
}

fn print_experiment(experiment: &ExperimentPrototype) -> anyhow::Result<()> {
    for line in experiment.build_log().lines() {
        println!("{}", line);
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&experiment.summary())
            .context("serializing experiment summary")?
    );
    Ok(())
}
