use anyhow::{Context, Result};
use clap::Parser;
use stemcell_smoke::inputs::Inputs;
use stemcell_smoke::manifest::{render, ManifestVersions};
use stemcell_smoke::HarnessSettings;
use std::fs;

/// Renders the manifest template to stdout. Only reads the inputs directory.
#[derive(Debug, Parser)]
pub(crate) struct RenderManifest {
    /// Use this release version instead of the one in `syslog-release/version`.
    #[clap(long = "release-version")]
    release_version: Option<String>,

    /// Use this stemcell version instead of the one in `stemcell/version`.
    #[clap(long = "stemcell-version")]
    stemcell_version: Option<String>,
}

impl RenderManifest {
    pub(crate) fn run(self, settings: HarnessSettings) -> Result<()> {
        let inputs = Inputs::new(settings.inputs_dir);
        let versions = ManifestVersions {
            syslog_release_version: match self.release_version {
                Some(version) => version,
                None => inputs
                    .release_version()
                    .context("Unable to read the release version")?,
            },
            stemcell_version: match self.stemcell_version {
                Some(version) => version,
                None => inputs
                    .stemcell_version()
                    .context("Unable to read the stemcell version")?,
            },
        };
        let template_path = inputs.manifest_template();
        let template = fs::read_to_string(&template_path).context(format!(
            "Unable to read manifest template '{}'",
            template_path.display()
        ))?;
        let rendered = render(&template, &versions).context("Unable to render manifest")?;
        print!("{}", rendered);
        Ok(())
    }
}
