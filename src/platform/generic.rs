//! Fallback for platforms without a supported process table
//!
//! Reporting no foreground processes classifies every session as local, so
//! pastes keep their default behavior.

use crate::error::Result;
use crate::models::ProcessDescriptor;
use crate::platform::traits::ProcessOps;

pub struct NoProcessTable;

impl ProcessOps for NoProcessTable {
    fn foreground_processes(&self, shell_pid: u32) -> Result<Vec<ProcessDescriptor>> {
        debug!("No process table support; treating pid {} as local", shell_pid);
        Ok(Vec::new())
    }
}
