// src/collector/network.rs
//! Network interfaces with hardware address, assigned addresses and MTU.

use std::io::Write;
use std::rc::Rc;

use crate::collector::host::HostMetrics;
use crate::error::DiagError;
use crate::presenter::divider;
use crate::registry::Collector;

pub struct NetworkCollector {
    host: Rc<dyn HostMetrics>,
}

impl NetworkCollector {
    pub fn new(host: Rc<dyn HostMetrics>) -> Self {
        Self { host }
    }
}

impl Collector for NetworkCollector {
    fn collect(&self, out: &mut dyn Write) -> Result<(), DiagError> {
        let interfaces = self.host.interfaces()?;

        writeln!(out, "NETWORK INTERFACES")?;
        for (i, interface) in interfaces.iter().enumerate() {
            writeln!(out, "{} - name: {}", i + 1, interface.name)?;
            writeln!(out, "  - hardware address: {}", interface.hardware_addr)?;

            writeln!(out, "  Addresses:")?;
            for address in &interface.addresses {
                writeln!(out, "    - {address}")?;
            }

            writeln!(out, "  - MTU: {}", interface.mtu)?;
        }

        divider(out)?;
        Ok(())
    }
}
