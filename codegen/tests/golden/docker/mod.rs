//! Typed wrappers for `docker`, generated by helpwrap. Do not edit.

#![allow(clippy::too_many_arguments)]

pub mod compose;

pub use compose::DockerCompose;

use helpwrap_core::runtime::{CommandLine, Runner};

/// Typed entry point for `docker`.
pub struct Docker<'r, R: Runner> {
    runner: &'r R,
    cmd: CommandLine,
}

impl<'r, R: Runner> Docker<'r, R> {
    pub fn new(runner: &'r R) -> Self {
        Self {
            runner,
            cmd: CommandLine::new("docker"),
        }
    }

    /// Create and run a new container from an image
    ///
    /// * `image` - IMAGE
    /// * `detach` - Run container in background and print container ID
    /// * `env` - Set environment variables
    /// * `cpus` - Number of CPUs
    /// * `name` - Assign a name to the container
    /// * `label` - Set meta data on a container
    /// * `ulimit` - Ulimit options
    /// * `stop_timeout` - Timeout (in seconds) to stop a container
    pub fn run(
        &self,
        image: &str,
        detach: Option<bool>,
        env: Option<&[&str]>,
        cpus: Option<f64>,
        name: Option<&str>,
        label: Option<&std::collections::BTreeMap<String, String>>,
        ulimit: Option<&[&str]>,
        stop_timeout: Option<i64>,
    ) -> R::Handle {
        let mut cmd = self.cmd.clone();
        cmd.push("run");
        cmd.positional(image);
        if let Some(value) = detach {
            cmd.presence("--detach", value);
        }
        if let Some(value) = env {
            cmd.joined("--env", value);
        }
        if let Some(value) = cpus {
            cmd.scalar("--cpus", value);
        }
        if let Some(value) = name {
            cmd.scalar("--name", value);
        }
        if let Some(value) = label {
            cmd.json("--label", value);
        }
        if let Some(value) = ulimit {
            cmd.repeated("--ulimit", value);
        }
        if let Some(value) = stop_timeout {
            cmd.scalar("--stop-timeout", value);
        }
        self.runner.run(&cmd.render())
    }

    /// List containers
    ///
    /// * `all` - Show all containers (default shows just running)
    /// * `filter` - Filter output based on conditions provided
    /// * `quiet` - Only display container IDs
    pub fn ps(
        &self,
        all: Option<bool>,
        filter: Option<&[(&str, &str)]>,
        quiet: Option<bool>,
    ) -> R::Handle {
        let mut cmd = self.cmd.clone();
        cmd.push("ps");
        if let Some(value) = all {
            cmd.presence("--all", value);
        }
        if let Some(value) = filter {
            cmd.repeated("--filter", value);
        }
        if let Some(value) = quiet {
            cmd.presence("--quiet", value);
        }
        self.runner.run(&cmd.render())
    }

    /// Return low-level information on Docker objects
    ///
    /// * `name_id` - [NAME|ID...]
    /// * `format` - Format output using a custom template
    /// * `r#type` - Return JSON for specified type
    pub fn inspect(
        &self,
        name_id: &[&str],
        format: Option<&str>,
        r#type: Option<&str>,
    ) -> R::Handle {
        let mut cmd = self.cmd.clone();
        cmd.push("inspect");
        cmd.positionals(name_id);
        if let Some(value) = format {
            cmd.scalar("--format", value);
        }
        if let Some(value) = r#type {
            cmd.scalar("--type", value);
        }
        self.runner.run(&cmd.render())
    }

    /// Show the Docker version information
    pub fn version(&self) -> R::Handle {
        let mut cmd = self.cmd.clone();
        cmd.push("version");
        self.runner.run(&cmd.render())
    }

    /// Docker Compose
    ///
    /// * `project_name` - Project name
    /// * `file` - Compose configuration files
    pub fn compose(
        &self,
        project_name: Option<&str>,
        file: Option<&[&str]>,
    ) -> DockerCompose<'r, R> {
        let mut cmd = self.cmd.clone();
        cmd.push("compose");
        if let Some(value) = project_name {
            cmd.scalar("--project-name", value);
        }
        if let Some(value) = file {
            cmd.repeated("--file", value);
        }
        DockerCompose::new(self.runner, cmd)
    }
}
