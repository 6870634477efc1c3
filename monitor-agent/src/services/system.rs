use crate::models::SystemMetrics;
use std::time::Instant;
use sysinfo::{MemoryRefreshKind, System};

/// Samples host CPU and memory usage plus agent uptime.
pub struct SystemSampler {
    system: System,
    started_at: Instant,
}

impl SystemSampler {
    pub fn new(started_at: Instant) -> Self {
        Self {
            system: System::new(),
            started_at,
        }
    }

    pub fn sample(&mut self) -> SystemMetrics {
        self.system.refresh_cpu_usage();
        self.system
            .refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());

        let cpu_usage = f64::from(self.system.global_cpu_usage());
        let cpu_usage = if cpu_usage.is_finite() { cpu_usage } else { 0.0 };

        let total = self.system.total_memory();
        let memory_usage = if total == 0 {
            0.0
        } else {
            self.system.used_memory() as f64 / total as f64 * 100.0
        };

        SystemMetrics {
            cpu_usage,
            memory_usage,
            uptime: self.started_at.elapsed().as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_values_are_in_range() {
        let mut sampler = SystemSampler::new(Instant::now());
        let metrics = sampler.sample();

        assert!(metrics.cpu_usage >= 0.0);
        assert!((0.0..=100.0).contains(&metrics.memory_usage));
        assert!(metrics.uptime >= 0.0);
    }

    #[test]
    fn uptime_grows() {
        let started_at = Instant::now();
        let mut sampler = SystemSampler::new(started_at);
        let first = sampler.sample().uptime;
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = sampler.sample().uptime;
        assert!(second > first);
    }
}
