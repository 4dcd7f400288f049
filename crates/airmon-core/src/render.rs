//! OpenMetrics text exposition renderer.
//!
//! Produces the body served on a scrape: per live series a `# HELP` /
//! `# UNIT` / `# TYPE` block (HELP and UNIT only when present), one sample
//! line with the fixed instance labels, a blank separator line, and a final
//! `# EOF` marker. Expired slots are skipped silently, never rendered as
//! stale or zero.
//!
//! The output buffer is reserved up front from a conservative per-series
//! bound so no write needs to grow it; if that reservation fails the whole
//! render is abandoned and the registry lock released — a scraper gets a
//! server error, never a truncated body.

use std::fmt::Write as _;
use std::time::Instant;

use crate::error::{AirmonError, Result};
use crate::registry::{Registry, Slot};

/// Media type for the exposition body.
pub const CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// Fixed identity labels stamped on every sample line.
#[derive(Debug, Clone)]
pub struct InstanceLabels {
    /// `host="..."` label value.
    pub host: String,
    /// `instance="..."` label value.
    pub node: String,
}

// Upper bound for one formatted f64 at fixed precision: up to 309 integer
// digits for the largest finite value, sign and decimal point, plus the
// fractional digits.
const VALUE_BOUND: usize = 320;

// Comment-line framing ("# HELP ", "# UNIT ", "# TYPE " plus separator and
// newline) and sample-line framing (braces, label names, quotes, blank
// line), rounded up.
const SERIES_OVERHEAD: usize = 64;

// "# EOF\n"
const TRAILER: usize = 8;

/// Render the registry to exposition text at the current instant.
pub fn render(registry: &Registry, labels: &InstanceLabels) -> Result<String> {
    render_at(registry, labels, Instant::now())
}

/// Clock-explicit variant of [`render`].
///
/// Holds the registry lock for the duration of the render; `put` calls from
/// producers block until it returns.
pub fn render_at(registry: &Registry, labels: &InstanceLabels, now: Instant) -> Result<String> {
    registry.with_slots(|slots| {
        let mut bound = TRAILER;
        for slot in slots {
            if now < slot.expires_at {
                bound += series_bound(slot, labels);
            }
        }

        let mut out = String::new();
        out.try_reserve(bound)
            .map_err(|e| AirmonError::Render(format!("cannot reserve {bound} bytes: {e}")))?;

        for slot in slots {
            if now >= slot.expires_at {
                tracing::debug!(name = slot.metric.name, "metric expired, skipped");
                continue;
            }
            write_series(&mut out, slot, labels)
                .map_err(|e| AirmonError::Render(format!("format failed: {e}")))?;
        }
        out.push_str("# EOF\n");
        Ok(out)
    })
}

fn series_bound(slot: &Slot, labels: &InstanceLabels) -> usize {
    let m = &slot.metric;
    // Name appears on up to four lines.
    m.name.len() * 4
        + m.help.map_or(0, str::len)
        + m.unit.map_or(0, str::len)
        + labels.host.len()
        + labels.node.len()
        + m.precision
        + VALUE_BOUND
        + SERIES_OVERHEAD
}

fn write_series(out: &mut String, slot: &Slot, labels: &InstanceLabels) -> std::fmt::Result {
    let m = &slot.metric;
    if let Some(help) = m.help {
        writeln!(out, "# HELP {} {}", m.name, help)?;
    }
    if let Some(unit) = m.unit {
        writeln!(out, "# UNIT {} {}", m.name, unit)?;
    }
    writeln!(out, "# TYPE {} {}", m.name, m.kind.as_str())?;
    writeln!(
        out,
        "{}{{host=\"{}\", instance=\"{}\"}} {:.prec$}\n",
        m.name,
        labels.host,
        labels.node,
        m.value,
        prec = m.precision
    )?;
    Ok(())
}
