use net_hparams::cli::{NethpArgs, render};
use ortho_config::OrthoConfig;
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    // Arguments come from the CLI, NETHP_* variables and config files.
    let args = NethpArgs::load()?;
    print!("{}", render(&args)?);
    Ok(())
}
