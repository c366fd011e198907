/*!

This is the command line interface for running the stemcell smoke test against a BOSH director,
either end to end with `run` or one step at a time.

!*/

mod check_env;
mod render_manifest;
mod run;
mod steps;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::path::PathBuf;
use stemcell_smoke::{ExecRunner, HarnessSettings, RequiredEnvironment, SmokeTest};

/// Deploys a release onto a stemcell with the BOSH CLI to check that the stemcell works.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[clap(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
    /// Directory holding the release, stemcell, assets and environment inputs. Also can be passed
    /// with the STEMCELL_SMOKE_INPUTS_DIR environment variable.
    #[clap(long = "inputs-dir")]
    inputs_dir: Option<PathBuf>,
    /// Path to the BOSH CLI. Also can be passed with the STEMCELL_SMOKE_BOSH_PATH environment
    /// variable.
    #[clap(long = "bosh-path")]
    bosh_path: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Parser)]
enum Command {
    /// Check that the required BOSH_* environment variables are set.
    CheckEnv(check_env::CheckEnv),
    /// Log in to the director.
    Login(steps::Login),
    /// Upload the release archive.
    UploadRelease(steps::UploadRelease),
    /// Upload the stemcell archive for the target iaas.
    UploadStemcell(steps::UploadStemcell),
    /// Update the cloud config for the target iaas.
    UpdateCloudConfig(steps::UpdateCloudConfig),
    /// Print the manifest rendered with the release and stemcell versions.
    RenderManifest(render_manifest::RenderManifest),
    /// Render the manifest and deploy it.
    Deploy(steps::Deploy),
    /// Run every step, then clean up.
    Run(run::Run),
    /// Remove unused releases and stemcells from the director.
    CleanUp(steps::CleanUp),
}

fn main() {
    let args = Args::parse();
    init_logger(args.log_level);
    if let Err(e) = run(args) {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut settings =
        HarnessSettings::from_env().context("Unable to read STEMCELL_SMOKE_* settings")?;
    if let Some(inputs_dir) = args.inputs_dir {
        settings.inputs_dir = inputs_dir;
    }
    if let Some(bosh_path) = args.bosh_path {
        settings.bosh_path = bosh_path;
    }
    match args.command {
        Command::CheckEnv(check_env) => check_env.run(),
        Command::Login(login) => login.run(smoke_test(settings)?),
        Command::UploadRelease(upload) => upload.run(smoke_test(settings)?),
        Command::UploadStemcell(upload) => upload.run(smoke_test(settings)?),
        Command::UpdateCloudConfig(update) => update.run(smoke_test(settings)?),
        Command::RenderManifest(render) => render.run(settings),
        Command::Deploy(deploy) => deploy.run(smoke_test(settings)?),
        Command::Run(run) => run.run(smoke_test(settings)?),
        Command::CleanUp(clean_up) => clean_up.run(smoke_test(settings)?),
    }
}

/// Everything that talks to the director needs the required environment first.
fn smoke_test(settings: HarnessSettings) -> Result<SmokeTest<ExecRunner>> {
    let env = RequiredEnvironment::from_env().context("Required environment is incomplete")?;
    Ok(SmokeTest::new(ExecRunner, env, settings))
}

/// Initialize the logger with the value passed by `--log-level` (or its default) when the
/// `RUST_LOG` environment variable is not present. If present, the `RUST_LOG` environment variable
/// overrides `--log-level`/`level`.
fn init_logger(level: LevelFilter) {
    match std::env::var(env_logger::DEFAULT_FILTER_ENV).ok() {
        Some(_) => {
            // RUST_LOG exists; env_logger will use it.
            Builder::from_default_env().init();
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate and the library.
            Builder::new()
                .filter(Some(env!("CARGO_CRATE_NAME")), level)
                .filter(Some("stemcell_smoke"), level)
                .init();
        }
    }
}
