/*!

Smoke tests for a BOSH stemcell. The harness drives the BOSH CLI to log in to a director, upload
a release and the stemcell under test, update the cloud config for the target platform and deploy
a manifest that combines the two. Every step is one blocking invocation of the CLI which must exit
with status zero.

The inputs are expected in the layout a pipeline produces next to the harness:

```text
<inputs>/syslog-release/version
<inputs>/syslog-release/<release>.tgz
<inputs>/stemcell/version
<inputs>/stemcell/<iaas>/<stemcell>.tgz
<inputs>/assets/manifest.yml
<inputs>/assets/{vbox,vsphere}/cloud-config.yml
<inputs>/environment/metadata
```

!*/

pub mod bosh;
pub mod cloud_config;
mod error;
pub mod inputs;
pub mod manifest;
pub mod metadata;
pub mod settings;
mod smoke;

pub use bosh::{Bosh, CommandOutput, CommandRunner, ExecRunner};
pub use error::{Error, Result};
pub use settings::{HarnessSettings, RequiredEnvironment};
pub use smoke::{CleanupGuard, SmokeTest};
