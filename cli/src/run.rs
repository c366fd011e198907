use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use stemcell_smoke::{ExecRunner, SmokeTest};

/// Runs login, both uploads, the cloud config update and the deploy, then cleans up.
#[derive(Debug, Parser)]
pub(crate) struct Run {
    /// Leave the director as it is after the run instead of cleaning up.
    #[clap(long = "keep")]
    keep: bool,
}

impl Run {
    pub(crate) fn run(self, smoke: SmokeTest<ExecRunner>) -> Result<()> {
        let prepared = smoke.prepare().context("Smoke test failed");
        let cleaned = if self.keep {
            info!("Skipping clean-up");
            Ok(())
        } else {
            smoke.clean_up().context("Unable to clean up the director")
        };
        match (prepared, cleaned) {
            (Err(e), Err(cleanup_error)) => {
                return Err(e.context(format!(
                    "The director was also left dirty: {:?}",
                    cleanup_error
                )))
            }
            (prepared, cleaned) => {
                prepared?;
                cleaned?;
            }
        }
        println!("Smoke test passed.");
        Ok(())
    }
}
