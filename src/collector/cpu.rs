// src/collector/cpu.rs
//! CPU models and core totals.

use std::io::Write;
use std::rc::Rc;

use crate::collector::host::HostMetrics;
use crate::error::DiagError;
use crate::presenter::divider;
use crate::registry::Collector;

pub struct CpuCollector {
    host: Rc<dyn HostMetrics>,
}

impl CpuCollector {
    pub fn new(host: Rc<dyn HostMetrics>) -> Self {
        Self { host }
    }
}

impl Collector for CpuCollector {
    fn collect(&self, out: &mut dyn Write) -> Result<(), DiagError> {
        let report = self.host.cpu()?;

        writeln!(out, "CPU:")?;
        for (i, model) in report.models.iter().enumerate() {
            writeln!(out, "{} - {}", i + 1, model.model_name)?;
            writeln!(out, "   - cores: {}", model.cores)?;
            writeln!(out, "   - mhz: {}", model.mhz)?;
            match model.cache_size_kb {
                Some(kb) => writeln!(out, "   - cacheSize: {kb}")?,
                None => writeln!(out, "   - cacheSize: unknown")?,
            }
        }

        divider(out)?;
        writeln!(out, "physical cores total: {}", report.physical_cores)?;
        writeln!(out, "logical cores total: {}", report.logical_cores)?;
        divider(out)?;
        Ok(())
    }
}
