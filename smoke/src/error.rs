use snafu::Snafu;
use std::path::PathBuf;

/// The crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The crate-wide error type.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{} was not set", name))]
    MissingVariable { name: String },

    #[snafu(display("{} is empty", name))]
    EmptyVariable { name: String },

    #[snafu(display("Unable to parse environment variables: {}", source))]
    Environment { source: envy::Error },

    #[snafu(display("Failed to read '{}': {}", path.display(), source))]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to write '{}': {}", path.display(), source))]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to create temporary manifest file: {}", source))]
    TempFile { source: std::io::Error },

    #[snafu(display("Unable to resolve absolute path of '{}': {}", path.display(), source))]
    AbsolutePath {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Invalid glob pattern '{}': {}", pattern, source))]
    GlobPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[snafu(display("Unable to read glob match for '{}': {}", pattern, source))]
    GlobEntry {
        pattern: String,
        source: glob::GlobError,
    },

    #[snafu(display("No archive matches '{}'", pattern))]
    NoArchive { pattern: String },

    #[snafu(display(
        "Expected exactly one archive matching '{}', found {}: {:?}",
        pattern,
        matches.len(),
        matches
    ))]
    AmbiguousArchive {
        pattern: String,
        matches: Vec<PathBuf>,
    },

    #[snafu(display("Unable to parse environment metadata '{}': {}", path.display(), source))]
    MetadataParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[snafu(display("Manifest template refers to unknown field '{}'", field))]
    UnknownTemplateField { field: String },

    #[snafu(display("Failed to create '{}' process: {}", program, source))]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display(
        "'{}' failed with exit status '{}'\nstdOut: {}\nstdErr: {}",
        command,
        code.map(|code| code.to_string()).unwrap_or_else(|| "signal".to_string()),
        stdout,
        stderr
    ))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}
