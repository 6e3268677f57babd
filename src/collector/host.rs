// src/collector/host.rs
//! Host metrics provider: the `HostMetrics` seam and its `sysinfo` backend.

use std::fs;

use sysinfo::{Disks, Networks, System};
use tracing::debug;

use crate::error::DiagError;

/// Memory totals in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStats {
    pub total: u64,
    pub free: u64,
    pub used: u64,
}

/// One logical CPU as reported by the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuModel {
    pub model_name: String,
    pub cores: u32,
    pub mhz: u64,
    /// Cache size in KB, when the platform reports it.
    pub cache_size_kb: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CpuReport {
    pub models: Vec<CpuModel>,
    pub physical_cores: usize,
    pub logical_cores: usize,
}

/// Usage of a mounted partition in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionUsage {
    pub device: String,
    pub mountpoint: String,
    pub total: u64,
    pub free: u64,
    pub used: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub name: String,
    pub hardware_addr: String,
    pub addresses: Vec<String>,
    pub mtu: u64,
}

/// Source of host metrics consumed by the memory, cpu, partition and
/// network collectors.
pub trait HostMetrics {
    fn memory(&self) -> Result<MemoryStats, DiagError>;
    fn cpu(&self) -> Result<CpuReport, DiagError>;
    fn partitions(&self) -> Result<Vec<PartitionUsage>, DiagError>;
    fn interfaces(&self) -> Result<Vec<InterfaceInfo>, DiagError>;
}

/// Production provider backed by `sysinfo`, with `/proc/cpuinfo` filling in
/// per-cpu core count and cache size on Linux.
#[derive(Debug, Clone)]
pub struct SysinfoHost {
    cpuinfo_path: String,
}

impl Default for SysinfoHost {
    fn default() -> Self {
        Self {
            cpuinfo_path: "/proc/cpuinfo".to_string(),
        }
    }
}

impl SysinfoHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads cpu details from an alternative cpuinfo file.
    pub fn with_cpuinfo_path(path: impl Into<String>) -> Self {
        Self {
            cpuinfo_path: path.into(),
        }
    }

    fn ensure_supported(operation: &str) -> Result<(), DiagError> {
        if sysinfo::IS_SUPPORTED_SYSTEM {
            Ok(())
        } else {
            Err(DiagError::unavailable(
                operation,
                "platform is not supported by the metrics provider",
            ))
        }
    }

    fn cpuinfo_entries(&self) -> Vec<CpuInfoEntry> {
        match fs::read_to_string(&self.cpuinfo_path) {
            Ok(raw) => parse_cpuinfo(&raw),
            Err(e) => {
                debug!(path = %self.cpuinfo_path, error = %e, "cpuinfo not readable");
                Vec::new()
            }
        }
    }
}

impl HostMetrics for SysinfoHost {
    fn memory(&self) -> Result<MemoryStats, DiagError> {
        Self::ensure_supported("virtual memory diagnostics")?;

        let mut sys = System::new();
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(DiagError::unavailable(
                "virtual memory diagnostics",
                "total memory not reported",
            ));
        }

        Ok(MemoryStats {
            total,
            free: sys.free_memory(),
            used: sys.used_memory(),
        })
    }

    fn cpu(&self) -> Result<CpuReport, DiagError> {
        Self::ensure_supported("cpu diagnostics")?;

        let mut sys = System::new();
        sys.refresh_cpu_all();

        let cpus = sys.cpus();
        if cpus.is_empty() {
            return Err(DiagError::unavailable("cpu diagnostics", "no cpus reported"));
        }

        let physical_cores = System::physical_core_count().ok_or_else(|| {
            DiagError::unavailable("physical number of cores", "core count not reported")
        })?;

        let details = self.cpuinfo_entries();
        let models = cpus
            .iter()
            .enumerate()
            .map(|(i, cpu)| {
                let detail = details.get(i);
                CpuModel {
                    model_name: cpu.brand().trim().to_string(),
                    cores: detail.and_then(|d| d.cores).unwrap_or(1),
                    mhz: cpu.frequency(),
                    cache_size_kb: detail.and_then(|d| d.cache_size_kb),
                }
            })
            .collect();

        Ok(CpuReport {
            models,
            physical_cores,
            logical_cores: cpus.len(),
        })
    }

    fn partitions(&self) -> Result<Vec<PartitionUsage>, DiagError> {
        Self::ensure_supported("system partitions")?;

        let disks = Disks::new_with_refreshed_list();

        Ok(disks
            .iter()
            .map(|disk| {
                let total = disk.total_space();
                let free = disk.available_space();
                PartitionUsage {
                    device: disk.name().to_string_lossy().into_owned(),
                    mountpoint: disk.mount_point().to_string_lossy().into_owned(),
                    total,
                    free,
                    used: total.saturating_sub(free),
                }
            })
            .collect())
    }

    fn interfaces(&self) -> Result<Vec<InterfaceInfo>, DiagError> {
        Self::ensure_supported("network interface information")?;

        let networks = Networks::new_with_refreshed_list();

        let mut interfaces: Vec<InterfaceInfo> = networks
            .iter()
            .map(|(name, data)| InterfaceInfo {
                name: name.to_string(),
                hardware_addr: data.mac_address().to_string(),
                addresses: data
                    .ip_networks()
                    .iter()
                    .map(|net| format!("{}/{}", net.addr, net.prefix))
                    .collect(),
                mtu: data.mtu(),
            })
            .collect();
        // sysinfo hands interfaces back in hash order
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(interfaces)
    }
}

/// Per-processor fields sysinfo does not expose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuInfoEntry {
    pub cores: Option<u32>,
    pub cache_size_kb: Option<u64>,
}

/// Function to split `/proc/cpuinfo` into one entry per processor block.
pub fn parse_cpuinfo(raw: &str) -> Vec<CpuInfoEntry> {
    let mut entries = Vec::new();
    let mut current: Option<CpuInfoEntry> = None;

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "processor" => {
                if let Some(done) = current.take() {
                    entries.push(done);
                }
                current = Some(CpuInfoEntry::default());
            }
            "cpu cores" => {
                if let Some(entry) = current.as_mut() {
                    entry.cores = value.parse().ok();
                }
            }
            "cache size" => {
                if let Some(entry) = current.as_mut() {
                    // "512 KB"
                    entry.cache_size_kb = value
                        .split_whitespace()
                        .next()
                        .and_then(|n| n.parse().ok());
                }
            }
            _ => {}
        }
    }

    if let Some(done) = current {
        entries.push(done);
    }
    entries
}
