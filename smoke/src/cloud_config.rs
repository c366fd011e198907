use crate::bosh::CloudConfigVar;
use crate::error::Result;
use crate::inputs::Inputs;
use crate::metadata::EnvironmentMetadata;
use crate::settings::RequiredEnvironment;
use log::debug;
use serde::Serialize;
use serde_plain::derive_display_from_serialize;
use std::path::PathBuf;

/// The cloud config flavor. The serialized name doubles as the asset directory name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Iaas {
    Vbox,
    Vsphere,
}

derive_display_from_serialize!(Iaas);

impl Iaas {
    /// `vbox` selects VirtualBox. Any other value, including the empty string, selects vSphere.
    pub fn from_name(name: &str) -> Self {
        match name {
            "vbox" => Self::Vbox,
            _ => Self::Vsphere,
        }
    }
}

/// A cloud config file and the overrides that go with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudConfig {
    pub path: PathBuf,
    pub vars: Vec<CloudConfigVar>,
}

impl CloudConfig {
    /// Selects the cloud config for `iaas`. vSphere reads the environment metadata to fill in the
    /// internal network; VirtualBox needs no overrides.
    pub fn for_iaas(iaas: Iaas, inputs: &Inputs, env: &RequiredEnvironment) -> Result<Self> {
        let path = inputs.cloud_config(&iaas.to_string());
        let vars = match iaas {
            Iaas::Vbox => Vec::new(),
            Iaas::Vsphere => {
                let metadata = EnvironmentMetadata::from_path(&inputs.environment_metadata())?
                    .with_vcenter(&env.vcenter_dc, &env.vcenter_cluster);
                vsphere_vars(&metadata)
            }
        };
        debug!("Using cloud config '{}' with {} overrides", path.display(), vars.len());
        Ok(Self { path, vars })
    }
}

/// The overrides for `assets/vsphere/cloud-config.yml`. Only the first network is used.
pub fn vsphere_vars(metadata: &EnvironmentMetadata) -> Vec<CloudConfigVar> {
    let network = &metadata.network1;
    vec![
        CloudConfigVar::new("vcenter_dc", &metadata.vcenter_dc),
        CloudConfigVar::new("vcenter_cluster", &metadata.vcenter_cluster),
        CloudConfigVar::new("internal_cidr", &network.vcenter_cidr),
        CloudConfigVar::new(
            "internal_reserved",
            format!("[{}]", network.reserved_range),
        ),
        CloudConfigVar::new("internal_gw", &network.vcenter_gateway),
        CloudConfigVar::new("internal_vcenter_vlan", &network.vcenter_vlan),
    ]
}
