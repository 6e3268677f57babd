// src/collector/containers.rs
//! Docker container listing through the docker CLI.

use std::io::Write;
use std::process::Command;
use std::rc::Rc;
use std::str;

use serde::Deserialize;
use tracing::debug;

use crate::error::DiagError;
use crate::presenter::divider;
use crate::registry::Collector;

const OPERATION: &str = "docker container list";

/// A port mapping; `public_port` is 0 when the port is exposed but not published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPort {
    pub public_port: u16,
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    pub id: String,
    pub image: String,
    pub state: String,
    pub status: String,
    pub ports: Vec<PublishedPort>,
}

/// Container runtime client, stopped containers included.
pub trait ContainerRuntime {
    fn list_containers(&self) -> Result<Vec<ContainerInfo>, DiagError>;
}

/// Runtime client that shells out to `docker ps`.
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl ContainerRuntime for DockerCli {
    fn list_containers(&self) -> Result<Vec<ContainerInfo>, DiagError> {
        debug!(program = %self.program, "listing containers");
        let output = Command::new(&self.program)
            .args(["ps", "--all", "--no-trunc", "--format", "{{json .}}"])
            .output()
            .map_err(|e| DiagError::unavailable(OPERATION, format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiagError::unavailable(
                OPERATION,
                format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            ));
        }

        let stdout = str::from_utf8(&output.stdout)
            .map_err(|e| DiagError::unavailable(OPERATION, e))?;
        parse_ps_output(stdout)
    }
}

/// One line of `docker ps --format '{{json .}}'`.
#[derive(Debug, Deserialize)]
struct PsRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Image")]
    image: String,
    #[serde(rename = "State", default)]
    state: String,
    #[serde(rename = "Status", default)]
    status: String,
    #[serde(rename = "Ports", default)]
    ports: String,
}

/// Function to decode the line-delimited JSON printed by `docker ps`.
pub fn parse_ps_output(raw: &str) -> Result<Vec<ContainerInfo>, DiagError> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let row: PsRow = serde_json::from_str(line)
                .map_err(|e| DiagError::unavailable(OPERATION, format!("bad row: {e}")))?;
            Ok(ContainerInfo {
                id: row.id,
                image: row.image,
                state: row.state,
                status: row.status,
                ports: parse_ports(&row.ports),
            })
        })
        .collect()
}

/// Function to expand a docker ports column such as
/// `0.0.0.0:8000-8001->8000-8001/tcp, 443/tcp` into individual ports.
pub fn parse_ports(raw: &str) -> Vec<PublishedPort> {
    let mut ports = Vec::new();

    for mapping in raw.split(',').map(str::trim).filter(|m| !m.is_empty()) {
        let (public, private) = match mapping.split_once("->") {
            Some((host, container)) => (host.rsplit_once(':').map(|(_, p)| p), container),
            None => (None, mapping),
        };
        let protocol = private
            .split_once('/')
            .map(|(_, proto)| proto)
            .unwrap_or("tcp")
            .to_string();

        match public.map(parse_port_range) {
            Some(Some((start, end))) => {
                for port in start..=end {
                    ports.push(PublishedPort {
                        public_port: port,
                        protocol: protocol.clone(),
                    });
                }
            }
            Some(None) => debug!(mapping, "skipping unparsable port mapping"),
            None => ports.push(PublishedPort {
                public_port: 0,
                protocol,
            }),
        }
    }

    ports
}

fn parse_port_range(raw: &str) -> Option<(u16, u16)> {
    match raw.split_once('-') {
        Some((start, end)) => {
            let (start, end) = (start.parse().ok()?, end.parse().ok()?);
            (start <= end).then_some((start, end))
        }
        None => raw.parse().ok().map(|port| (port, port)),
    }
}

pub struct ContainersCollector {
    runtime: Rc<dyn ContainerRuntime>,
}

impl ContainersCollector {
    pub fn new(runtime: Rc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }
}

impl Collector for ContainersCollector {
    fn collect(&self, out: &mut dyn Write) -> Result<(), DiagError> {
        let containers = self.runtime.list_containers()?;

        writeln!(out, "DOCKER CONTAINER")?;
        for (i, container) in containers.iter().enumerate() {
            writeln!(out, "{} - container id: {}", i, container.id)?;
            writeln!(out, "   - image: {}", container.image)?;
            writeln!(out, "   - state: {}", container.state)?;
            writeln!(out, "   - status: {}", container.status)?;

            if !container.ports.is_empty() {
                writeln!(out, "   - Ports")?;
                for port in &container.ports {
                    writeln!(out, "      - {} ({})", port.public_port, port.protocol)?;
                }
            }
        }

        divider(out)?;
        Ok(())
    }
}
