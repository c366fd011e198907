use crate::error::{self, Result};
use log::{debug, info};
use snafu::{ensure, ResultExt};
use std::path::Path;
use std::process::Command;

/// What a finished child process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an external program to completion. [`ExecRunner`] is the real implementation; tests swap
/// in a runner that records invocations instead of spawning anything.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String], envs: &[(String, String)])
        -> Result<CommandOutput>;
}

/// Spawns the program with [`std::process::Command`] and blocks until it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecRunner;

impl CommandRunner for ExecRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        envs: &[(String, String)],
    ) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .envs(envs.iter().map(|(k, v)| (k, v)))
            .output()
            .context(error::SpawnSnafu { program })?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// A `-v key=value` override handed to `update-cloud-config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudConfigVar {
    pub key: String,
    pub value: String,
}

impl CloudConfigVar {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The BOSH CLI. Every operation is one blocking invocation that must exit with status zero.
pub struct Bosh<R: CommandRunner> {
    runner: R,
    program: String,
    envs: Vec<(String, String)>,
}

impl<R: CommandRunner> Bosh<R> {
    /// `envs` are passed to every invocation, typically
    /// [`RequiredEnvironment::bosh_cli_envs`](crate::RequiredEnvironment::bosh_cli_envs).
    pub fn new<S>(runner: R, program: S, envs: Vec<(String, String)>) -> Self
    where
        S: Into<String>,
    {
        Self {
            runner,
            program: program.into(),
            envs,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn login(&self) -> Result<CommandOutput> {
        info!("Logging in to the director");
        self.run(vec!["login".into()])
    }

    pub fn upload_release(&self, archive: &Path) -> Result<CommandOutput> {
        info!("Uploading release '{}'", archive.display());
        self.run(vec![
            "upload-release".into(),
            archive.to_string_lossy().into_owned(),
        ])
    }

    pub fn upload_stemcell(&self, archive: &Path) -> Result<CommandOutput> {
        info!("Uploading stemcell '{}'", archive.display());
        self.run(vec![
            "upload-stemcell".into(),
            archive.to_string_lossy().into_owned(),
        ])
    }

    pub fn update_cloud_config(
        &self,
        cloud_config: &Path,
        vars: &[CloudConfigVar],
    ) -> Result<CommandOutput> {
        info!("Updating cloud config from '{}'", cloud_config.display());
        let mut args = vec![
            "-n".to_string(),
            "update-cloud-config".to_string(),
            cloud_config.to_string_lossy().into_owned(),
        ];
        for var in vars {
            args.push("-v".into());
            args.push(format!("{}={}", var.key, var.value));
        }
        self.run(args)
    }

    pub fn deploy(&self, deployment: &str, manifest: &Path) -> Result<CommandOutput> {
        info!("Deploying '{}'", deployment);
        self.run(vec![
            "-n".into(),
            "-d".into(),
            deployment.into(),
            "deploy".into(),
            manifest.to_string_lossy().into_owned(),
        ])
    }

    pub fn clean_up(&self) -> Result<CommandOutput> {
        info!("Cleaning up the director");
        self.run(vec!["-n".into(), "clean-up".into()])
    }

    fn run(&self, args: Vec<String>) -> Result<CommandOutput> {
        let command = format!("{} {}", self.program, args.join(" "));
        debug!("Running '{}'", command);
        let output = self.runner.run(&self.program, &args, &self.envs)?;
        ensure!(
            output.success(),
            error::CommandFailedSnafu {
                command,
                code: output.code,
                stdout: output.stdout.clone(),
                stderr: output.stderr.clone(),
            }
        );
        Ok(output)
    }
}
