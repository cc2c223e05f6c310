//! Subcommands of `docker compose`, generated by helpwrap. Do not edit.

#![allow(clippy::too_many_arguments)]

use helpwrap_core::runtime::{CommandLine, Runner};

/// Subcommands of `docker compose`.
pub struct DockerCompose<'r, R: Runner> {
    runner: &'r R,
    cmd: CommandLine,
}

impl<'r, R: Runner> DockerCompose<'r, R> {
    pub fn new(runner: &'r R, cmd: CommandLine) -> Self {
        Self { runner, cmd }
    }

    /// Create and start containers
    ///
    /// * `service` - [SERVICE...]
    /// * `detach` - Detached mode: Run containers in the background
    /// * `timeout` - Use this timeout in seconds for container shutdown
    pub fn up(
        &self,
        service: &[&str],
        detach: Option<bool>,
        timeout: Option<i64>,
    ) -> R::Handle {
        let mut cmd = self.cmd.clone();
        cmd.push("up");
        cmd.positionals(service);
        if let Some(value) = detach {
            cmd.presence("--detach", value);
        }
        if let Some(value) = timeout {
            cmd.scalar("--timeout", value);
        }
        self.runner.run(&cmd.render())
    }

    /// Stop and remove containers, networks
    ///
    /// * `services` - [SERVICES]
    /// * `volumes` - Remove named volumes declared in the "volumes" section of the Compose file
    pub fn down(
        &self,
        services: &[&str],
        volumes: Option<bool>,
    ) -> R::Handle {
        let mut cmd = self.cmd.clone();
        cmd.push("down");
        cmd.positionals(services);
        if let Some(value) = volumes {
            cmd.presence("--volumes", value);
        }
        self.runner.run(&cmd.render())
    }
}
