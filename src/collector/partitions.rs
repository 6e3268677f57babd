// src/collector/partitions.rs
//! Mounted partitions with their usage.

use std::io::Write;
use std::rc::Rc;

use crate::collector::host::HostMetrics;
use crate::error::DiagError;
use crate::presenter::{divider, used_percent};
use crate::registry::Collector;

pub struct PartitionsCollector {
    host: Rc<dyn HostMetrics>,
}

impl PartitionsCollector {
    pub fn new(host: Rc<dyn HostMetrics>) -> Self {
        Self { host }
    }
}

impl Collector for PartitionsCollector {
    fn collect(&self, out: &mut dyn Write) -> Result<(), DiagError> {
        writeln!(out, "PHYSICAL PARTITIONS:")?;
        let partitions = self.host.partitions()?;

        for (i, partition) in partitions.iter().enumerate() {
            writeln!(out, "{} - name: {}", i, partition.device)?;
            writeln!(out, "   - mountpoint: {}", partition.mountpoint)?;
            writeln!(out, "   - free: {}", partition.free)?;
            writeln!(out, "   - used: {}", partition.used)?;
            writeln!(
                out,
                "   - usage in percent: {}%",
                used_percent(partition.used, partition.total)
            )?;
        }

        divider(out)?;
        Ok(())
    }
}
