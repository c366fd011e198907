use crate::error::{self, Result};
use log::{debug, trace};
use snafu::{ensure, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

const RELEASE_DIR: &str = "syslog-release";
const STEMCELL_DIR: &str = "stemcell";
const ASSETS_DIR: &str = "assets";
const ENVIRONMENT_DIR: &str = "environment";
const VERSION_FILENAME: &str = "version";
const MANIFEST_FILENAME: &str = "manifest.yml";
const CLOUD_CONFIG_FILENAME: &str = "cloud-config.yml";
const METADATA_FILENAME: &str = "metadata";
const ARCHIVE_PATTERN: &str = "*.tgz";

/// The directories the pipeline places next to the harness: the release under test, the stemcell
/// under test, the static assets and the environment lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    root: PathBuf,
}

impl Inputs {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn release_dir(&self) -> PathBuf {
        self.root.join(RELEASE_DIR)
    }

    pub fn release_version_file(&self) -> PathBuf {
        self.release_dir().join(VERSION_FILENAME)
    }

    pub fn stemcell_version_file(&self) -> PathBuf {
        self.root.join(STEMCELL_DIR).join(VERSION_FILENAME)
    }

    /// Stemcell archives are sorted by platform, e.g. `stemcell/vbox/`. An empty `iaas` means the
    /// archive sits directly in `stemcell/`.
    pub fn stemcell_dir(&self, iaas: &str) -> PathBuf {
        let dir = self.root.join(STEMCELL_DIR);
        if iaas.is_empty() {
            dir
        } else {
            dir.join(iaas)
        }
    }

    pub fn manifest_template(&self) -> PathBuf {
        self.root.join(ASSETS_DIR).join(MANIFEST_FILENAME)
    }

    /// `platform` is the asset directory name, `vbox` or `vsphere`.
    pub fn cloud_config(&self, platform: &str) -> PathBuf {
        self.root
            .join(ASSETS_DIR)
            .join(platform)
            .join(CLOUD_CONFIG_FILENAME)
    }

    pub fn environment_metadata(&self) -> PathBuf {
        self.root.join(ENVIRONMENT_DIR).join(METADATA_FILENAME)
    }

    pub fn release_archive(&self) -> Result<PathBuf> {
        find_single_archive(&self.release_dir())
    }

    pub fn stemcell_archive(&self, iaas: &str) -> Result<PathBuf> {
        find_single_archive(&self.stemcell_dir(iaas))
    }

    pub fn release_version(&self) -> Result<String> {
        read_version(&self.release_version_file())
    }

    pub fn stemcell_version(&self) -> Result<String> {
        read_version(&self.stemcell_version_file())
    }
}

/// Finds the one `*.tgz` in `dir`. Zero or several matches are an error; the matches are listed
/// in sorted order.
pub fn find_single_archive(dir: &Path) -> Result<PathBuf> {
    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped_dir)
        .join(ARCHIVE_PATTERN)
        .to_string_lossy()
        .into_owned();
    trace!("Looking for archives matching '{}'", pattern);
    let mut matches = glob::glob(&pattern)
        .context(error::GlobPatternSnafu { pattern: &pattern })?
        .collect::<std::result::Result<Vec<_>, _>>()
        .context(error::GlobEntrySnafu { pattern: &pattern })?;
    matches.sort();
    ensure!(!matches.is_empty(), error::NoArchiveSnafu { pattern });
    ensure!(
        matches.len() == 1,
        error::AmbiguousArchiveSnafu { pattern, matches }
    );
    let archive = matches.remove(0);
    debug!("Found archive '{}'", archive.display());
    Ok(archive)
}

/// Reads a version file, dropping the trailing newline.
pub fn read_version(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path).context(error::FileReadSnafu { path })?;
    Ok(contents.trim_end().to_string())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn layout() {
        let inputs = Inputs::new("..");
        assert_eq!(
            inputs.release_version_file(),
            PathBuf::from("../syslog-release/version")
        );
        assert_eq!(
            inputs.stemcell_version_file(),
            PathBuf::from("../stemcell/version")
        );
        assert_eq!(inputs.stemcell_dir("vbox"), PathBuf::from("../stemcell/vbox"));
        assert_eq!(inputs.stemcell_dir(""), PathBuf::from("../stemcell"));
        assert_eq!(
            inputs.cloud_config("vsphere"),
            PathBuf::from("../assets/vsphere/cloud-config.yml")
        );
        assert_eq!(
            inputs.manifest_template(),
            PathBuf::from("../assets/manifest.yml")
        );
        assert_eq!(
            inputs.environment_metadata(),
            PathBuf::from("../environment/metadata")
        );
    }

    #[test]
    fn exactly_one_archive() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("syslog-11.tgz"));
        touch(&dir.path().join("version"));
        touch(&dir.path().join("notes.txt"));
        let archive = find_single_archive(dir.path()).unwrap();
        assert_eq!(archive, dir.path().join("syslog-11.tgz"));
    }

    #[test]
    fn no_archive() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("version"));
        let err = find_single_archive(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NoArchive { .. }), "{:?}", err);
    }

    #[test]
    fn missing_directory_has_no_archive() {
        let dir = TempDir::new().unwrap();
        let err = find_single_archive(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, Error::NoArchive { .. }), "{:?}", err);
    }

    #[test]
    fn several_archives_are_ambiguous() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("b.tgz"));
        touch(&dir.path().join("a.tgz"));
        match find_single_archive(dir.path()).unwrap_err() {
            Error::AmbiguousArchive { matches, .. } => assert_eq!(
                matches,
                vec![dir.path().join("a.tgz"), dir.path().join("b.tgz")]
            ),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn directory_with_glob_characters() {
        let dir = TempDir::new().unwrap();
        let release_dir = dir.path().join("build[1]").join("syslog-release");
        touch(&release_dir.join("syslog.tgz"));
        touch(&dir.path().join("build1/syslog-release/other.tgz"));
        assert_eq!(
            find_single_archive(&release_dir).unwrap(),
            release_dir.join("syslog.tgz")
        );
    }

    #[test]
    fn archives_in_subdirectories_are_not_matched() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("stemcell/vbox/stemcell.tgz"));
        let inputs = Inputs::new(dir.path());
        assert!(inputs.stemcell_archive("").is_err());
        assert_eq!(
            inputs.stemcell_archive("vbox").unwrap(),
            dir.path().join("stemcell/vbox/stemcell.tgz")
        );
    }

    #[test]
    fn version_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("version");
        fs::write(&path, "3586.25\n").unwrap();
        assert_eq!(read_version(&path).unwrap(), "3586.25");
    }

    #[test]
    fn missing_version_file() {
        let dir = TempDir::new().unwrap();
        let err = read_version(&dir.path().join("version")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }), "{:?}", err);
    }
}
