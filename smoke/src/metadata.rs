use crate::error::{self, Result};
use serde::Deserialize;
use snafu::ResultExt;
use std::fs;
use std::path::Path;

/// The vSphere environment lock handed to the pipeline, describing the networks the director may
/// place VMs on. Only used for string interpolation into `update-cloud-config`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnvironmentMetadata {
    #[serde(rename = "DNS")]
    pub dns: String,
    #[serde(rename = "_description")]
    pub description: String,
    #[serde(rename = "directorIP")]
    pub director_ip: String,
    pub network1: PrimaryNetwork,
    pub network2: SecondaryNetwork,

    /// Not part of the document; filled from `BOSH_VSPHERE_VCENTER_DC`.
    #[serde(skip)]
    pub vcenter_dc: String,
    /// Not part of the document; filled from `BOSH_VSPHERE_VCENTER_CLUSTER`.
    #[serde(skip)]
    pub vcenter_cluster: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct PrimaryNetwork {
    #[serde(rename = "vCenterVLAN")]
    pub vcenter_vlan: String,
    #[serde(rename = "vCenterCIDR")]
    pub vcenter_cidr: String,
    #[serde(rename = "vCenterGateway")]
    pub vcenter_gateway: String,
    #[serde(rename = "staticIP-1")]
    pub static_ip_1: String,
    #[serde(rename = "staticIP-2")]
    pub static_ip_2: String,
    #[serde(rename = "reservedRange")]
    pub reserved_range: String,
    #[serde(rename = "staticRange")]
    pub static_range: String,
    #[serde(rename = "_dynamicRange")]
    pub dynamic_range: String,
    #[serde(rename = "vCenterNetmask")]
    pub vcenter_netmask: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct SecondaryNetwork {
    #[serde(rename = "vCenterVLAN")]
    pub vcenter_vlan: String,
    #[serde(rename = "vCenterCIDR")]
    pub vcenter_cidr: String,
    #[serde(rename = "vCenterGateway")]
    pub vcenter_gateway: String,
    #[serde(rename = "staticIP-1")]
    pub static_ip_1: String,
    #[serde(rename = "reservedRange")]
    pub reserved_range: String,
    #[serde(rename = "staticRange")]
    pub static_range: String,
    #[serde(rename = "_dynamicRange")]
    pub dynamic_range: String,
}

impl EnvironmentMetadata {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).context(error::FileReadSnafu { path })?;
        Self::from_json(&contents, path)
    }

    /// Parses a metadata document; `origin` only names it in errors.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(json).context(error::MetadataParseSnafu { path: origin })
    }

    pub fn with_vcenter<D, C>(mut self, dc: D, cluster: C) -> Self
    where
        D: Into<String>,
        C: Into<String>,
    {
        self.vcenter_dc = dc.into();
        self.vcenter_cluster = cluster.into();
        self
    }
}
