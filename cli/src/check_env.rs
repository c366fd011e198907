use anyhow::{Context, Result};
use clap::Parser;
use stemcell_smoke::cloud_config::Iaas;
use stemcell_smoke::RequiredEnvironment;

/// Validates the required environment without contacting the director.
#[derive(Debug, Parser)]
pub(crate) struct CheckEnv {}

impl CheckEnv {
    pub(crate) fn run(self) -> Result<()> {
        let env = RequiredEnvironment::from_env().context("Required environment is incomplete")?;
        println!(
            "Required environment is set for director '{}' as '{}' (iaas '{}').",
            env.bosh_environment,
            env.bosh_client,
            Iaas::from_name(&env.iaas)
        );
        Ok(())
    }
}
