//! SM300D2 source: continuous UART listener.
//!
//! The module pushes a frame roughly once a second; a blocking thread owns
//! the port and reads frame-sized chunks, the async side publishes each
//! decoded reading as seven gauges.

use std::io::Read as _;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::watch;

use airmon_core::protocol::sm300d2::{self, Sm300d2Data};
use airmon_core::{Metric, Registry};

use crate::config::Sm300d2Config;
use crate::sources::{reopen_delay, Source};

const BAUD_RATE: u32 = 9600;
const READ_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Sm300d2Source {
    cfg: Sm300d2Config,
}

impl Sm300d2Source {
    pub fn new(cfg: Sm300d2Config) -> Self {
        Self { cfg }
    }

    fn publish(&self, registry: &Registry, d: Sm300d2Data) {
        let ttl = Duration::from_millis(self.cfg.ttl_ms);
        registry.put(
            Metric::gauge("sm300d2_co2", "ppm", f64::from(d.e_co2), 0)
                .with_help("Equivalent CO2"),
            ttl,
        );
        registry.put(
            Metric::gauge("sm300d2_ch2o", "ug/m^3", f64::from(d.e_ch2o), 0)
                .with_help("Equivalent formaldehyde"),
            ttl,
        );
        registry.put(
            Metric::gauge("sm300d2_tvoc", "ug/m^3", f64::from(d.tvoc), 0)
                .with_help("Total volatile organic compounds"),
            ttl,
        );
        registry.put(
            Metric::gauge("sm300d2_pm2_5", "ug/m^3", f64::from(d.pm2_5), 0)
                .with_help("PM2.5 particulate matter"),
            ttl,
        );
        registry.put(
            Metric::gauge("sm300d2_pm10", "ug/m^3", f64::from(d.pm10), 0)
                .with_help("PM10 particulate matter"),
            ttl,
        );
        registry.put(
            Metric::gauge("sm300d2_temp", "C", d.temp_celsius(), 2)
                .with_help("Ambient temperature"),
            ttl,
        );
        registry.put(
            Metric::gauge("sm300d2_humi", "percent", d.humi_percent(), 2)
                .with_help("Relative humidity"),
            ttl,
        );
    }
}

#[async_trait]
impl Source for Sm300d2Source {
    fn name(&self) -> &'static str {
        "sm300d2"
    }

    async fn run(self: Arc<Self>, registry: Arc<Registry>) {
        let (tx, mut rx) = watch::channel(None::<Sm300d2Data>);
        let port = self.cfg.port.clone();
        std::thread::spawn(move || read_loop(port, tx));

        while rx.changed().await.is_ok() {
            let latest = *rx.borrow_and_update();
            if let Some(data) = latest {
                self.publish(&registry, data);
            }
        }
    }
}

fn read_loop(port_name: String, tx: watch::Sender<Option<Sm300d2Data>>) {
    let mut retry = 0u32;
    loop {
        let mut port = match serialport::new(port_name.as_str(), BAUD_RATE)
            .timeout(READ_TIMEOUT)
            .flow_control(serialport::FlowControl::None)
            .open()
        {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(port = %port_name, error = %e, "sm300d2 open failed, retrying");
                std::thread::sleep(reopen_delay(retry));
                retry = retry.saturating_add(1);
                continue;
            }
        };
        retry = 0;
        tracing::info!(port = %port_name, "sm300d2 listening");

        let mut frame = [0u8; sm300d2::FRAME_LEN];
        loop {
            match port.read_exact(&mut frame) {
                Ok(()) => match sm300d2::decode_frame(Bytes::copy_from_slice(&frame)) {
                    Ok(data) => {
                        if tx.send(Some(data)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "sm300d2 frame rejected");
                        // Drop queued bytes so the next read starts on a
                        // frame boundary.
                        let _ = port.clear(serialport::ClearBuffer::Input);
                    }
                },
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                    tracing::debug!(port = %port_name, "sm300d2 read timed out");
                    let _ = port.clear(serialport::ClearBuffer::Input);
                }
                Err(e) => {
                    tracing::warn!(port = %port_name, error = %e, "sm300d2 read failed, reopening");
                    break;
                }
            }
        }
    }
}
