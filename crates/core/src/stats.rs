//! Episode statistics collection and reporting.
//!
//! This module tracks the counters of one simulation episode. It provides:
//! 1. **Request counters:** Total requests processed and misses among them.
//! 2. **Agent counters:** Evictions performed and decision epochs resolved.
//! 3. **Derived rates:** Miss and hit rates, guarded against empty episodes.

use std::time::Instant;

use serde::Serialize;

use crate::common::{SimError, SimResult};

/// Counters of the current episode. All of them are zeroed by `reset`.
#[derive(Clone, Debug, Serialize)]
pub struct EpisodeStats {
    #[serde(skip)]
    start_time: Instant,
    /// Requests processed, including the initial fill.
    pub total_count: u64,
    /// Requests that found their resource absent.
    pub miss_count: u64,
    /// Evictions performed on behalf of the agent.
    pub evict_count: u64,
    /// Decision epochs resolved by `step`.
    pub epochs: u64,
}

impl Default for EpisodeStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            total_count: 0,
            miss_count: 0,
            evict_count: 0,
            epochs: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"cache"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "cache"];

impl EpisodeStats {
    /// Requests that found their resource resident.
    #[inline]
    pub const fn hit_count(&self) -> u64 {
        self.total_count - self.miss_count
    }

    /// Fraction of processed requests that missed.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoData`] if no request has been processed.
    pub fn miss_rate(&self) -> SimResult<f64> {
        if self.total_count == 0 {
            return Err(SimError::NoData);
        }
        Ok(self.miss_count as f64 / self.total_count as f64)
    }

    /// Fraction of processed requests that hit.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoData`] if no request has been processed.
    pub fn hit_rate(&self) -> SimResult<f64> {
        self.miss_rate().map(|m| 1.0 - m)
    }

    /// Prints every section to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }

    /// Prints only the requested sections to stdout. An empty slice prints all of them.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Renders the requested sections as text. An empty slice renders all of them.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let total = self.total_count.max(1) as f64;
        let mut out = String::new();

        if want("summary") {
            let rps = if seconds > 0.0 {
                self.total_count as f64 / seconds
            } else {
                0.0
            };
            out.push_str("\n==========================================================\n");
            out.push_str("CACHE SIMULATION STATISTICS\n");
            out.push_str("==========================================================\n");
            out.push_str(&format!("host_seconds             {seconds:.4} s\n"));
            out.push_str(&format!("sim_requests             {}\n", self.total_count));
            out.push_str(&format!("sim_epochs               {}\n", self.epochs));
            out.push_str(&format!("sim_requests_per_sec     {rps:.2}\n"));
            out.push_str("----------------------------------------------------------\n");
        }
        if want("cache") {
            let hits = self.hit_count();
            out.push_str("CACHE\n");
            out.push_str(&format!(
                "  cache.hits             {} ({:.2}%)\n",
                hits,
                hits as f64 / total * 100.0
            ));
            out.push_str(&format!(
                "  cache.misses           {} ({:.2}%)\n",
                self.miss_count,
                self.miss_count as f64 / total * 100.0
            ));
            out.push_str(&format!("  cache.evictions        {}\n", self.evict_count));
            out.push_str("----------------------------------------------------------\n");
        }
        out
    }
}
