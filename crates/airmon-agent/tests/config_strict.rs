#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use airmon_agent::config;
use airmon_core::AirmonError;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
agent:
  listen: "0.0.0.0:9100"
sources:
  sm300d2:
    portt: "/dev/ttyUSB0" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, AirmonError::BadConfig(_)));
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.agent.listen, "0.0.0.0:9100");
    assert_eq!(cfg.agent.metrics_path, "/metrics");
    assert_eq!(cfg.agent.capacity, 32);
    assert!(cfg.sources.sm300d2.is_none());
    assert!(cfg.sources.senseair_s8.is_none());
}

#[test]
fn source_defaults_applied() {
    let ok = r#"
version: 1
sources:
  sm300d2:
    port: "/dev/ttyUSB0"
  senseair_s8:
    port: "/dev/ttyUSB1"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.sources.sm300d2.unwrap().ttl_ms, 30_000);
    let s8 = cfg.sources.senseair_s8.unwrap();
    assert_eq!(s8.poll_interval_ms, 5_000);
    assert_eq!(s8.ttl_ms, 30_000);
}

#[test]
fn wrong_version_rejected() {
    let bad = r#"
version: 2
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, AirmonError::BadConfig(_)));
}

#[test]
fn capacity_out_of_range_rejected() {
    let bad = r#"
version: 1
agent:
  capacity: 0
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, AirmonError::BadConfig(_)));
}

#[test]
fn metrics_path_must_be_absolute() {
    let bad = r#"
version: 1
agent:
  metrics_path: "metrics"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, AirmonError::BadConfig(_)));
}

#[test]
fn ttl_must_exceed_poll_interval() {
    let bad = r#"
version: 1
sources:
  senseair_s8:
    port: "/dev/ttyUSB1"
    poll_interval_ms: 5000
    ttl_ms: 5000
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, AirmonError::BadConfig(_)));
}
