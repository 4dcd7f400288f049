//! Exposition format: comment lines, precision, labels, EOF trailer.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::{Duration, Instant};

use airmon_core::render::{render_at, InstanceLabels, CONTENT_TYPE};
use airmon_core::{Metric, MetricKind, Registry};

const TTL: Duration = Duration::from_millis(30_000);

fn labels() -> InstanceLabels {
    InstanceLabels {
        host: "airmon".into(),
        node: "dev0".into(),
    }
}

#[test]
fn empty_registry_renders_only_eof() {
    let reg = Registry::new(4);
    let body = render_at(&reg, &labels(), Instant::now()).unwrap();
    assert_eq!(body, "# EOF\n");
}

#[test]
fn full_series_block_is_bit_exact() {
    let reg = Registry::new(4);
    let now = Instant::now();
    reg.put_at(
        Metric::gauge("sm300d2_temp", "C", 23.45, 2).with_help("Ambient temperature"),
        TTL,
        now,
    );
    reg.put_at(Metric::gauge("sm300d2_co2", "ppm", 610.0, 0), TTL, now);

    let body = render_at(&reg, &labels(), now).unwrap();
    let expected = "\
# HELP sm300d2_temp Ambient temperature
# UNIT sm300d2_temp C
# TYPE sm300d2_temp gauge
sm300d2_temp{host=\"airmon\", instance=\"dev0\"} 23.45

# UNIT sm300d2_co2 ppm
# TYPE sm300d2_co2 gauge
sm300d2_co2{host=\"airmon\", instance=\"dev0\"} 610

# EOF
";
    assert_eq!(body, expected);
}

#[test]
fn help_and_unit_lines_are_optional() {
    let reg = Registry::new(4);
    let now = Instant::now();
    reg.put_at(
        Metric {
            name: "bare",
            kind: MetricKind::Counter,
            help: None,
            unit: None,
            value: 3.0,
            precision: 0,
        },
        TTL,
        now,
    );

    let body = render_at(&reg, &labels(), now).unwrap();
    assert!(!body.contains("# HELP"));
    assert!(!body.contains("# UNIT"));
    assert!(body.contains("# TYPE bare counter\n"));
    assert!(body.contains("bare{host=\"airmon\", instance=\"dev0\"} 3\n"));
}

#[test]
fn precision_follows_latest_put() {
    let reg = Registry::new(4);
    let now = Instant::now();
    reg.put_at(Metric::gauge("humi", "percent", 51.0, 0), TTL, now);
    reg.put_at(Metric::gauge("humi", "percent", 51.23, 2), TTL, now);

    let body = render_at(&reg, &labels(), now).unwrap();
    assert!(body.contains("humi{host=\"airmon\", instance=\"dev0\"} 51.23\n"));
}

#[test]
fn fully_expired_registry_still_terminates_with_eof() {
    let reg = Registry::new(4);
    let now = Instant::now();
    reg.put_at(Metric::gauge("a", "ppm", 1.0, 0), TTL, now);
    reg.put_at(Metric::gauge("b", "ppm", 2.0, 0), TTL, now);

    let body = render_at(&reg, &labels(), now + TTL).unwrap();
    assert_eq!(body, "# EOF\n");
}

#[test]
fn output_ends_with_eof_line() {
    let reg = Registry::new(4);
    let now = Instant::now();
    reg.put_at(Metric::gauge("a", "ppm", 1.0, 0), TTL, now);

    let body = render_at(&reg, &labels(), now).unwrap();
    assert_eq!(body.lines().last().unwrap(), "# EOF");
}

#[test]
fn content_type_is_openmetrics() {
    assert!(CONTENT_TYPE.starts_with("application/openmetrics-text"));
}
