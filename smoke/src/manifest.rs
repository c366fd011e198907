use crate::error::{self, Result};
use log::{debug, trace};
use regex::{Captures, Regex};
use snafu::{OptionExt, ResultExt};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Matches `{{.Field}}`, allowing spaces inside the braces.
const MARKER_PATTERN_REGEX: &str = r"\{\{\s*\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}";

const RELEASE_VERSION_FIELD: &str = "SyslogReleaseVersion";
const STEMCELL_VERSION_FIELD: &str = "StemcellVersion";
const TEMP_FILE_PREFIX: &str = "manifest";

lazy_static::lazy_static! {
    static ref MARKER: Regex = {
        #[allow(clippy::unwrap_used)]
        Regex::new(MARKER_PATTERN_REGEX).unwrap()
    };
}

/// The values substituted into the manifest template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestVersions {
    pub syslog_release_version: String,
    pub stemcell_version: String,
}

impl ManifestVersions {
    fn lookup(&self, field: &str) -> Option<&str> {
        match field {
            RELEASE_VERSION_FIELD => Some(self.syslog_release_version.as_str()),
            STEMCELL_VERSION_FIELD => Some(self.stemcell_version.as_str()),
            _ => None,
        }
    }
}

/// Replaces each marker in `template` with its version string. Text outside the markers is copied
/// unchanged.
pub fn render(template: &str, versions: &ManifestVersions) -> Result<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;
    for captures in MARKER.captures_iter(template) {
        let (marker, field) = marker_and_field(&captures);
        trace!("Substituting '{}'", marker.as_str());
        let value = versions
            .lookup(field)
            .context(error::UnknownTemplateFieldSnafu { field })?;
        rendered.push_str(&template[last..marker.start()]);
        rendered.push_str(value);
        last = marker.end();
    }
    rendered.push_str(&template[last..]);
    Ok(rendered)
}

fn marker_and_field<'t>(captures: &Captures<'t>) -> (regex::Match<'t>, &'t str) {
    // Group 0 always participates and group 1 is not optional in the pattern.
    #[allow(clippy::unwrap_used)]
    let marker = captures.get(0).unwrap();
    #[allow(clippy::unwrap_used)]
    let field = captures.get(1).unwrap().as_str();
    (marker, field)
}

/// A rendered manifest in its own temporary file. The file is removed when this is dropped, so
/// keep it alive until the deploy has finished reading it.
#[derive(Debug)]
pub struct RenderedManifest {
    _file: NamedTempFile,
    path: PathBuf,
}

impl RenderedManifest {
    pub fn write(template_path: &Path, versions: &ManifestVersions) -> Result<Self> {
        let template = fs::read_to_string(template_path).context(error::FileReadSnafu {
            path: template_path,
        })?;
        let rendered = render(&template, versions)?;
        let mut file = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .tempfile()
            .context(error::TempFileSnafu)?;
        file.write_all(rendered.as_bytes())
            .and_then(|_| file.flush())
            .context(error::FileWriteSnafu { path: file.path() })?;
        let path = fs::canonicalize(file.path())
            .context(error::AbsolutePathSnafu { path: file.path() })?;
        debug!("Rendered manifest to '{}'", path.display());
        Ok(Self { _file: file, path })
    }

    /// The absolute path of the rendered manifest.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    fn contents(&self) -> Result<String> {
        fs::read_to_string(&self.path).context(error::FileReadSnafu { path: &self.path })
    }
}
