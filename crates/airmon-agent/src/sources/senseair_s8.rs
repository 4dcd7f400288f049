//! SenseAir S8 source: Modbus request/response poller.
//!
//! Unlike the SM300D2 the S8 never pushes; the blocking thread writes the
//! fixed read-register request on a configured cadence and decodes the
//! 7-byte reply.

use std::io::{Read as _, Write as _};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::watch;

use airmon_core::error::{AirmonError, Result};
use airmon_core::protocol::senseair_s8;
use airmon_core::{Metric, Registry};

use crate::config::SenseAirS8Config;
use crate::sources::{reopen_delay, Source};

const BAUD_RATE: u32 = 9600;
const RESPONSE_TIMEOUT: Duration = Duration::from_millis(500);

// Reopen the port after this many polls in a row have failed.
const MAX_CONSECUTIVE_FAILURES: u32 = 5;

pub struct SenseAirS8Source {
    cfg: SenseAirS8Config,
}

impl SenseAirS8Source {
    pub fn new(cfg: SenseAirS8Config) -> Self {
        Self { cfg }
    }
}

#[async_trait]
impl Source for SenseAirS8Source {
    fn name(&self) -> &'static str {
        "senseair_s8"
    }

    async fn run(self: Arc<Self>, registry: Arc<Registry>) {
        let (tx, mut rx) = watch::channel(None::<u16>);
        let cfg = self.cfg.clone();
        std::thread::spawn(move || poll_loop(cfg, tx));

        let ttl = Duration::from_millis(self.cfg.ttl_ms);
        while rx.changed().await.is_ok() {
            let latest = *rx.borrow_and_update();
            if let Some(ppm) = latest {
                registry.put(
                    Metric::gauge("senseair_s8_co2", "ppm", f64::from(ppm), 0)
                        .with_help("CO2 concentration"),
                    ttl,
                );
            }
        }
    }
}

fn poll_loop(cfg: SenseAirS8Config, tx: watch::Sender<Option<u16>>) {
    let interval = Duration::from_millis(cfg.poll_interval_ms);
    let mut retry = 0u32;
    loop {
        let mut port = match serialport::new(cfg.port.as_str(), BAUD_RATE)
            .timeout(RESPONSE_TIMEOUT)
            .flow_control(serialport::FlowControl::None)
            .open()
        {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(port = %cfg.port, error = %e, "senseair_s8 open failed, retrying");
                std::thread::sleep(reopen_delay(retry));
                retry = retry.saturating_add(1);
                continue;
            }
        };
        retry = 0;
        tracing::info!(port = %cfg.port, "senseair_s8 polling");

        let mut failures = 0u32;
        loop {
            match poll_once(port.as_mut()) {
                Ok(ppm) => {
                    failures = 0;
                    if tx.send(Some(ppm)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    failures += 1;
                    tracing::warn!(error = %e, failures, "senseair_s8 poll failed");
                    let _ = port.clear(serialport::ClearBuffer::Input);
                    if failures >= MAX_CONSECUTIVE_FAILURES {
                        tracing::warn!(port = %cfg.port, "senseair_s8 reopening port");
                        break;
                    }
                }
            }
            std::thread::sleep(interval);
        }
    }
}

fn poll_once(port: &mut dyn serialport::SerialPort) -> Result<u16> {
    port.write_all(&senseair_s8::READ_CO2_REQUEST)
        .map_err(|e| AirmonError::Io(format!("request write failed: {e}")))?;
    port.flush()
        .map_err(|e| AirmonError::Io(format!("request flush failed: {e}")))?;

    let mut resp = [0u8; senseair_s8::RESPONSE_LEN];
    port.read_exact(&mut resp)
        .map_err(|e| AirmonError::Io(format!("response read failed: {e}")))?;

    senseair_s8::decode_response(Bytes::copy_from_slice(&resp))
}
