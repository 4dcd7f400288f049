//! Metric data model: one named, typed, unit-tagged numeric value.

/// Exposition type of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Monotonically increasing value.
    Counter,
    /// Value that can go up and down.
    Gauge,
}

impl MetricKind {
    /// String used on the `# TYPE` line.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// One metric sample as handed to the registry by a producer.
///
/// Names and descriptions are driver-fixed, so they are `&'static str` and
/// the whole record stays `Copy`. `precision` is the number of decimal
/// digits the renderer emits for `value`; it is a per-put choice, so two
/// consecutive updates to the same name may legally change it.
#[derive(Debug, Clone, Copy)]
pub struct Metric {
    /// Series name, unique among live entries.
    pub name: &'static str,
    /// Exposition type.
    pub kind: MetricKind,
    /// Optional `# HELP` text.
    pub help: Option<&'static str>,
    /// Optional `# UNIT` string.
    pub unit: Option<&'static str>,
    /// Latest reading.
    pub value: f64,
    /// Decimal digits for display.
    pub precision: usize,
}

impl Metric {
    /// Gauge with no help text.
    pub fn gauge(name: &'static str, unit: &'static str, value: f64, precision: usize) -> Self {
        Self {
            name,
            kind: MetricKind::Gauge,
            help: None,
            unit: Some(unit),
            value,
            precision,
        }
    }

    /// Attach help text.
    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}
