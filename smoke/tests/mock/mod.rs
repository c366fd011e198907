/*!

A [`CommandRunner`] that records every invocation instead of spawning a process, and an inputs
directory laid out the way the pipeline would lay it out.

!*/

use stemcell_smoke::{CommandOutput, CommandRunner, HarnessSettings, RequiredEnvironment, Result};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const RELEASE_VERSION: &str = "11.3.2";
pub const STEMCELL_VERSION: &str = "3586.25";

pub const MANIFEST_TEMPLATE: &str = "---
name: bosh-stemcell-smoke-tests
releases:
- name: syslog
  version: {{.SyslogReleaseVersion}}
stemcells:
- alias: default
  version: {{.StemcellVersion}}
";

pub const METADATA: &str = r#"{
  "directorIP": "10.74.0.6",
  "network1": {
    "vCenterVLAN": "VLAN 74",
    "vCenterCIDR": "10.74.0.0/24",
    "vCenterGateway": "10.74.0.1",
    "reservedRange": "10.74.0.2-10.74.0.9"
  }
}"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
    /// The rendered manifest as it was when `deploy` ran, if this was a `deploy`.
    pub manifest: Option<String>,
}

/// Succeeds for every invocation except the ones whose first non-flag argument is `fail_on`.
#[derive(Default)]
pub struct MockRunner {
    pub invocations: RefCell<Vec<Invocation>>,
    pub fail_on: Option<String>,
}

impl MockRunner {
    pub fn failing_on(subcommand: &str) -> Self {
        Self {
            fail_on: Some(subcommand.to_string()),
            ..Default::default()
        }
    }

    /// The BOSH subcommand of each invocation, in order.
    pub fn subcommands(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(|invocation| subcommand(&invocation.args))
            .collect()
    }
}

impl CommandRunner for MockRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        envs: &[(String, String)],
    ) -> Result<CommandOutput> {
        let manifest = match args.iter().position(|arg| arg == "deploy") {
            Some(i) => Some(fs::read_to_string(&args[i + 1]).unwrap()),
            None => None,
        };
        self.invocations.borrow_mut().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            envs: envs.to_vec(),
            manifest,
        });
        let code = if self.fail_on.as_deref() == Some(subcommand(args).as_str()) {
            1
        } else {
            0
        };
        Ok(CommandOutput {
            code: Some(code),
            stdout: format!("{} stdout", subcommand(args)),
            stderr: format!("{} stderr", subcommand(args)),
        })
    }
}

fn subcommand(args: &[String]) -> String {
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" => continue,
            "-d" => {
                args.next();
            }
            other => return other.to_string(),
        }
    }
    String::new()
}

pub fn env(iaas: &str) -> RequiredEnvironment {
    RequiredEnvironment::from_iter(vec![
        ("BOSH_ENVIRONMENT".to_string(), "https://10.74.0.6:25555".to_string()),
        ("BOSH_CLIENT".to_string(), "admin".to_string()),
        ("BOSH_CLIENT_SECRET".to_string(), "hunter2".to_string()),
        ("BOSH_CA_CERT".to_string(), "cert".to_string()),
        ("BOSH_VSPHERE_VCENTER_DC".to_string(), "dc1".to_string()),
        ("BOSH_VSPHERE_VCENTER_CLUSTER".to_string(), "cluster1".to_string()),
        ("IAAS".to_string(), iaas.to_string()),
    ])
    .unwrap()
}

pub fn settings(inputs: &Path) -> HarnessSettings {
    HarnessSettings {
        bosh_path: "gobosh".into(),
        inputs_dir: inputs.to_path_buf(),
        deployment: "bosh-stemcell-smoke-tests".into(),
    }
}

/// Writes a complete set of inputs with one stemcell archive under `stemcell/<iaas>/`.
pub fn inputs(iaas: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "syslog-release/version", &format!("{}\n", RELEASE_VERSION));
    write(dir.path(), "syslog-release/syslog-11.3.2.tgz", "");
    write(dir.path(), "stemcell/version", &format!("{}\n", STEMCELL_VERSION));
    write(
        &stemcell_dir(dir.path(), iaas),
        "bosh-stemcell-3586.25.tgz",
        "",
    );
    write(dir.path(), "assets/manifest.yml", MANIFEST_TEMPLATE);
    write(dir.path(), "assets/vbox/cloud-config.yml", "azs: []\n");
    write(dir.path(), "assets/vsphere/cloud-config.yml", "azs: []\n");
    write(dir.path(), "environment/metadata", METADATA);
    dir
}

pub fn stemcell_dir(root: &Path, iaas: &str) -> PathBuf {
    if iaas.is_empty() {
        root.join("stemcell")
    } else {
        root.join("stemcell").join(iaas)
    }
}

pub fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}
