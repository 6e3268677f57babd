// src/collector/mod.rs

pub mod containers;
pub mod cpu;
pub mod host;
pub mod memory;
pub mod network;
pub mod partitions;

use std::rc::Rc;

pub use containers::{
    ContainerInfo, ContainerRuntime, ContainersCollector, DockerCli, PublishedPort,
};
pub use cpu::CpuCollector;
pub use host::{
    CpuModel, CpuReport, HostMetrics, InterfaceInfo, MemoryStats, PartitionUsage, SysinfoHost,
};
pub use memory::MemoryCollector;
pub use network::NetworkCollector;
pub use partitions::PartitionsCollector;

use crate::error::DiagError;
use crate::registry::Registry;

/// Canonical selectors in run-all order.
pub const SELECTORS: [&str; 5] = ["-vm", "-cp", "-pp", "-ni", "-c"];

/// Function to build the registry of the five built-in collectors.
pub fn default_registry(
    host: Rc<dyn HostMetrics>,
    runtime: Rc<dyn ContainerRuntime>,
) -> Result<Registry, DiagError> {
    let [vm, cp, pp, ni, c] = SELECTORS;

    Registry::new()
        .with(vm, MemoryCollector::new(Rc::clone(&host)))?
        .with(cp, CpuCollector::new(Rc::clone(&host)))?
        .with(pp, PartitionsCollector::new(Rc::clone(&host)))?
        .with(ni, NetworkCollector::new(host))?
        .with(c, ContainersCollector::new(runtime))
}
