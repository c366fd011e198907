use crate::error::{self, Result};
use serde::Deserialize;
use snafu::{ensure, OptionExt, ResultExt};
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;

pub const BOSH_ENVIRONMENT: &str = "BOSH_ENVIRONMENT";
pub const BOSH_CLIENT: &str = "BOSH_CLIENT";
pub const BOSH_CLIENT_SECRET: &str = "BOSH_CLIENT_SECRET";
pub const BOSH_CA_CERT: &str = "BOSH_CA_CERT";
pub const BOSH_VSPHERE_VCENTER_DC: &str = "BOSH_VSPHERE_VCENTER_DC";
pub const BOSH_VSPHERE_VCENTER_CLUSTER: &str = "BOSH_VSPHERE_VCENTER_CLUSTER";

/// The prefix for the optional harness settings, e.g. `STEMCELL_SMOKE_BOSH_PATH`.
pub const SETTINGS_PREFIX: &str = "STEMCELL_SMOKE_";

pub const DEFAULT_BOSH_PATH: &str = "gobosh";
pub const DEFAULT_INPUTS_DIR: &str = "..";
pub const DEFAULT_DEPLOYMENT: &str = "bosh-stemcell-smoke-tests";

/// The environment that must be present before anything is sent to the director. Every value is
/// checked for presence and non-emptiness only, never for format.
#[derive(Clone, PartialEq, Eq)]
pub struct RequiredEnvironment {
    pub bosh_environment: String,
    pub bosh_client: String,
    pub bosh_client_secret: String,
    pub bosh_ca_cert: String,
    pub vcenter_dc: String,
    pub vcenter_cluster: String,
    /// The target platform, e.g. `vbox` or `vsphere`. Empty when `IAAS` is not set.
    pub iaas: String,
}

#[derive(Debug, Deserialize)]
struct RawEnvironment {
    bosh_environment: Option<String>,
    bosh_client: Option<String>,
    bosh_client_secret: Option<String>,
    bosh_ca_cert: Option<String>,
    bosh_vsphere_vcenter_dc: Option<String>,
    bosh_vsphere_vcenter_cluster: Option<String>,
    iaas: Option<String>,
}

impl RequiredEnvironment {
    /// Reads and validates the required variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_iter(std::env::vars())
    }

    /// Reads and validates the required variables from `vars`.
    pub fn from_iter<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let raw: RawEnvironment = envy::from_iter(vars).context(error::EnvironmentSnafu)?;
        Ok(Self {
            bosh_environment: required(BOSH_ENVIRONMENT, raw.bosh_environment)?,
            bosh_client: required(BOSH_CLIENT, raw.bosh_client)?,
            bosh_client_secret: required(BOSH_CLIENT_SECRET, raw.bosh_client_secret)?,
            bosh_ca_cert: required(BOSH_CA_CERT, raw.bosh_ca_cert)?,
            vcenter_dc: required(BOSH_VSPHERE_VCENTER_DC, raw.bosh_vsphere_vcenter_dc)?,
            vcenter_cluster: required(
                BOSH_VSPHERE_VCENTER_CLUSTER,
                raw.bosh_vsphere_vcenter_cluster,
            )?,
            iaas: raw.iaas.unwrap_or_default(),
        })
    }

    /// The variables the BOSH CLI reads to find and authenticate against the director.
    pub fn bosh_cli_envs(&self) -> Vec<(String, String)> {
        vec![
            (BOSH_ENVIRONMENT.into(), self.bosh_environment.clone()),
            (BOSH_CLIENT.into(), self.bosh_client.clone()),
            (BOSH_CLIENT_SECRET.into(), self.bosh_client_secret.clone()),
            (BOSH_CA_CERT.into(), self.bosh_ca_cert.clone()),
        ]
    }
}

impl Debug for RequiredEnvironment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequiredEnvironment")
            .field("bosh_environment", &self.bosh_environment)
            .field("bosh_client", &self.bosh_client)
            .field("bosh_client_secret", &"<redacted>")
            .field("bosh_ca_cert", &self.bosh_ca_cert)
            .field("vcenter_dc", &self.vcenter_dc)
            .field("vcenter_cluster", &self.vcenter_cluster)
            .field("iaas", &self.iaas)
            .finish()
    }
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    let value = value.context(error::MissingVariableSnafu { name })?;
    ensure!(!value.is_empty(), error::EmptyVariableSnafu { name });
    Ok(value)
}

/// Optional knobs for the harness itself, read from variables prefixed with `STEMCELL_SMOKE_`.
///
/// # Example
///
/// ```text
/// STEMCELL_SMOKE_BOSH_PATH=/usr/local/bin/bosh
/// STEMCELL_SMOKE_INPUTS_DIR=/tmp/build/inputs
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HarnessSettings {
    /// The path or name of the BOSH CLI. Defaults to `gobosh`, found via `$PATH`.
    #[serde(default = "bosh_path")]
    pub bosh_path: String,

    /// The directory holding `syslog-release/`, `stemcell/`, `assets/` and `environment/`.
    /// Defaults to the parent of the working directory.
    #[serde(default = "inputs_dir")]
    pub inputs_dir: PathBuf,

    /// The deployment name passed to `deploy` with `-d`.
    #[serde(default = "deployment")]
    pub deployment: String,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            bosh_path: bosh_path(),
            inputs_dir: inputs_dir(),
            deployment: deployment(),
        }
    }
}

impl HarnessSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_iter(std::env::vars())
    }

    pub fn from_iter<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(SETTINGS_PREFIX)
            .from_iter(vars)
            .context(error::EnvironmentSnafu)
    }
}

// We need these to provide defaults for serde.
fn bosh_path() -> String {
    String::from(DEFAULT_BOSH_PATH)
}

fn inputs_dir() -> PathBuf {
    PathBuf::from(DEFAULT_INPUTS_DIR)
}

fn deployment() -> String {
    String::from(DEFAULT_DEPLOYMENT)
}
