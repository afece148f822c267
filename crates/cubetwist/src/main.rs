//! Command-line front end for the N-layer cube twist engine.

mod cli;
mod settings;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    env_logger::builder().init();
    color_eyre::install()?;

    let args = cli::Args::parse();
    let settings = settings::Settings::load(args.config.as_deref(), &args.overrides())?;
    cli::exec(args.subcommand, &settings)
}
