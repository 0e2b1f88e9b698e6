//! # Host Memory
//!
//! Estimates how much physical memory remains once the index working set is
//! resident. Only meaningful when the tool runs on the database host itself.

use crate::{
    error::StatsError,
    units::format_bytes,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::net::IpAddr;

/// Physical memory usage of the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostMemory {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub used_percent: f64,
}

impl HostMemory {
    pub fn from_total_and_free(total_bytes: u64, free_bytes: u64) -> Self {
        let used_bytes = total_bytes.saturating_sub(free_bytes);
        let used_percent = if total_bytes == 0 {
            0.0
        } else {
            used_bytes as f64 / total_bytes as f64 * 100.0
        };
        Self {
            total_bytes,
            used_bytes,
            free_bytes,
            used_percent,
        }
    }
}

/// Source of host memory statistics
pub trait MemoryProvider {
    fn host_memory(&self) -> Result<HostMemory, StatsError>;
}

/// Reads memory statistics of the machine this process runs on
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMemory;

impl MemoryProvider for SystemMemory {
    #[cfg(target_os = "linux")]
    fn host_memory(&self) -> Result<HostMemory, StatsError> {
        // SAFETY: `sysinfo` only writes into the zero-initialised struct we own.
        let mut info: libc::sysinfo = unsafe { std::mem::zeroed() };
        if unsafe { libc::sysinfo(&mut info) } != 0 {
            return Err(StatsError::HostMemory(std::io::Error::last_os_error().to_string()));
        }

        let unit = u64::from(info.mem_unit.max(1));
        Ok(HostMemory::from_total_and_free(
            info.totalram as u64 * unit,
            info.freeram as u64 * unit,
        ))
    }

    #[cfg(not(target_os = "linux"))]
    fn host_memory(&self) -> Result<HostMemory, StatsError> {
        Err(StatsError::HostMemory(format!(
            "not supported on {}",
            std::env::consts::OS
        )))
    }
}

/// True for `localhost` and loopback addresses, i.e. when the database runs
/// on this machine.
pub fn is_loopback_host(host: &str) -> bool {
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .is_ok_and(|ip| ip.is_loopback())
}

/// Memory left once the index working set is resident
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Headroom {
    /// Free physical memory minus the total index size. Negative when the
    /// indexes no longer fit.
    pub headroom_bytes: f64,
    pub used_bytes: u64,
    pub used_percent: f64,
    /// Headroom scaled by the share of memory still free
    pub available_headroom_bytes: f64,
}

impl Headroom {
    pub fn estimate(memory: &HostMemory, total_index_size_bytes: u64) -> Self {
        let headroom_bytes = memory.free_bytes as f64 - total_index_size_bytes as f64;
        Self {
            headroom_bytes,
            used_bytes: memory.used_bytes,
            used_percent: memory.used_percent,
            available_headroom_bytes: (100.0 - memory.used_percent) / 100.0 * headroom_bytes,
        }
    }

    pub fn render(&self) -> String {
        format!(
            "RAM Headroom: {}\n\
             RAM Used: {} ({:.1}%)\n\
             Available RAM Headroom: {}",
            format_bytes(self.headroom_bytes),
            format_bytes(self.used_bytes as f64),
            self.used_percent,
            format_bytes(self.available_headroom_bytes),
        )
    }
}
