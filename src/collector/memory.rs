// src/collector/memory.rs
//! Virtual memory block.

use std::io::Write;
use std::rc::Rc;

use crate::collector::host::HostMetrics;
use crate::error::DiagError;
use crate::presenter::{divider, used_percent};
use crate::registry::Collector;

pub struct MemoryCollector {
    host: Rc<dyn HostMetrics>,
}

impl MemoryCollector {
    pub fn new(host: Rc<dyn HostMetrics>) -> Self {
        Self { host }
    }
}

impl Collector for MemoryCollector {
    fn collect(&self, out: &mut dyn Write) -> Result<(), DiagError> {
        let memory = self.host.memory()?;

        writeln!(out, "VIRTUAL MEMORY:")?;
        writeln!(out, "total Memory: {}", memory.total)?;
        writeln!(out, "free Memory: {}", memory.free)?;
        writeln!(
            out,
            "usage in percent: {}%",
            used_percent(memory.used, memory.total)
        )?;
        divider(out)?;
        Ok(())
    }
}
