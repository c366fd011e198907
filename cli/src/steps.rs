use anyhow::{Context, Result};
use clap::Parser;
use stemcell_smoke::{ExecRunner, SmokeTest};

type Smoke = SmokeTest<ExecRunner>;

#[derive(Debug, Parser)]
pub(crate) struct Login {}

impl Login {
    pub(crate) fn run(self, smoke: Smoke) -> Result<()> {
        smoke.login().context("Unable to log in to the director")?;
        println!("Logged in to the director.");
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub(crate) struct UploadRelease {}

impl UploadRelease {
    pub(crate) fn run(self, smoke: Smoke) -> Result<()> {
        smoke
            .upload_release()
            .context("Unable to upload the release")?;
        println!("Release was successfully uploaded.");
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub(crate) struct UploadStemcell {}

impl UploadStemcell {
    pub(crate) fn run(self, smoke: Smoke) -> Result<()> {
        smoke
            .upload_stemcell()
            .context("Unable to upload the stemcell")?;
        println!("Stemcell was successfully uploaded.");
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub(crate) struct UpdateCloudConfig {}

impl UpdateCloudConfig {
    pub(crate) fn run(self, smoke: Smoke) -> Result<()> {
        smoke
            .update_cloud_config()
            .context(format!("Unable to update the {} cloud config", smoke.iaas()))?;
        println!("Cloud config for '{}' was successfully updated.", smoke.iaas());
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub(crate) struct Deploy {}

impl Deploy {
    pub(crate) fn run(self, smoke: Smoke) -> Result<()> {
        smoke.deploy().context("Unable to deploy")?;
        println!("Deployment was successful.");
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub(crate) struct CleanUp {}

impl CleanUp {
    pub(crate) fn run(self, smoke: Smoke) -> Result<()> {
        smoke
            .clean_up()
            .context("Unable to clean up the director")?;
        println!("Director was successfully cleaned up.");
        Ok(())
    }
}
