use crate::bosh::{Bosh, CommandRunner, ExecRunner};
use crate::cloud_config::{CloudConfig, Iaas};
use crate::error::Result;
use crate::inputs::Inputs;
use crate::manifest::{ManifestVersions, RenderedManifest};
use crate::settings::{HarnessSettings, RequiredEnvironment};
use log::{error, info};

/// Brings a deployment up on the stemcell under test.
///
/// The required environment is validated while constructing from the process environment, so a
/// missing variable is reported before anything is sent to the director.
pub struct SmokeTest<R: CommandRunner> {
    bosh: Bosh<R>,
    inputs: Inputs,
    env: RequiredEnvironment,
    deployment: String,
}

impl SmokeTest<ExecRunner> {
    /// Reads `BOSH_*`, `IAAS` and the `STEMCELL_SMOKE_*` settings from the process environment.
    pub fn from_env() -> Result<Self> {
        let env = RequiredEnvironment::from_env()?;
        let settings = HarnessSettings::from_env()?;
        Ok(Self::new(ExecRunner, env, settings))
    }
}

impl<R: CommandRunner> SmokeTest<R> {
    pub fn new(runner: R, env: RequiredEnvironment, settings: HarnessSettings) -> Self {
        let bosh = Bosh::new(runner, settings.bosh_path, env.bosh_cli_envs());
        Self {
            bosh,
            inputs: Inputs::new(settings.inputs_dir),
            env,
            deployment: settings.deployment,
        }
    }

    pub fn bosh(&self) -> &Bosh<R> {
        &self.bosh
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn iaas(&self) -> Iaas {
        Iaas::from_name(&self.env.iaas)
    }

    /// Logs in, uploads the release and stemcell, updates the cloud config and deploys.
    pub fn prepare(&self) -> Result<()> {
        info!(
            "Preparing deployment '{}' for iaas '{}'",
            self.deployment,
            self.iaas()
        );
        self.login()?;
        self.upload_release()?;
        self.upload_stemcell()?;
        self.update_cloud_config()?;
        self.deploy()?;
        info!("Deployment '{}' is up", self.deployment);
        Ok(())
    }

    pub fn login(&self) -> Result<()> {
        self.bosh.login().map(drop)
    }

    pub fn upload_release(&self) -> Result<()> {
        let archive = self.inputs.release_archive()?;
        self.bosh.upload_release(&archive).map(drop)
    }

    /// The stemcell archive is looked up under the raw `IAAS` value, not the cloud config flavor.
    pub fn upload_stemcell(&self) -> Result<()> {
        let archive = self.inputs.stemcell_archive(&self.env.iaas)?;
        self.bosh.upload_stemcell(&archive).map(drop)
    }

    pub fn update_cloud_config(&self) -> Result<()> {
        let cloud_config = CloudConfig::for_iaas(self.iaas(), &self.inputs, &self.env)?;
        self.bosh
            .update_cloud_config(&cloud_config.path, &cloud_config.vars)
            .map(drop)
    }

    pub fn versions(&self) -> Result<ManifestVersions> {
        Ok(ManifestVersions {
            syslog_release_version: self.inputs.release_version()?,
            stemcell_version: self.inputs.stemcell_version()?,
        })
    }

    pub fn render_manifest(&self) -> Result<RenderedManifest> {
        RenderedManifest::write(&self.inputs.manifest_template(), &self.versions()?)
    }

    pub fn deploy(&self) -> Result<()> {
        let manifest = self.render_manifest()?;
        self.bosh.deploy(&self.deployment, manifest.path()).map(drop)
    }

    /// Removes unused releases and stemcells from the director.
    pub fn clean_up(&self) -> Result<()> {
        self.bosh.clean_up().map(drop)
    }

    /// Returns a guard that runs [`SmokeTest::clean_up`] when it goes out of scope.
    pub fn cleanup_guard(&self) -> CleanupGuard<'_, R> {
        CleanupGuard { smoke: self }
    }
}

/// Cleans up the director on drop. A failed clean-up is logged; it never panics.
pub struct CleanupGuard<'a, R: CommandRunner> {
    smoke: &'a SmokeTest<R>,
}

impl<R: CommandRunner> Drop for CleanupGuard<'_, R> {
    fn drop(&mut self) {
        if let Err(e) = self.smoke.clean_up() {
            error!("Unable to clean up the director: {}", e)
        }
    }
}
