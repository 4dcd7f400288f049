//! Xiaomi LYWSD02 thermometer/hygrometer (BLE notification payload).
//!
//! Subscribing to the data characteristic yields a 3-byte notification:
//! temperature in centi-degrees Celsius (little-endian u16) followed by
//! relative humidity in percent (u8). Only the payload is decoded here;
//! the BLE host transport is a collaborator.

use bytes::{Buf, Bytes};

use crate::error::{AirmonError, Result};

/// Exact notification payload length.
pub const NOTIFY_LEN: usize = 3;

/// Decoded LYWSD02 notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lywsd02Data {
    /// Temperature in centi-degrees Celsius.
    pub temp_centi: u16,
    /// Relative humidity in percent.
    pub humi: u8,
}

impl Lywsd02Data {
    /// Temperature in degrees Celsius.
    pub fn temp_celsius(&self) -> f64 {
        f64::from(self.temp_centi) / 100.0
    }
}

/// Decode one notification payload. The length must match exactly.
pub fn decode_notification(mut buf: Bytes) -> Result<Lywsd02Data> {
    if buf.remaining() != NOTIFY_LEN {
        return Err(AirmonError::BadFrame(format!(
            "lywsd02 unexpected payload length {}",
            buf.remaining()
        )));
    }
    let temp_centi = buf.get_u16_le();
    let humi = buf.get_u8();
    Ok(Lywsd02Data { temp_centi, humi })
}
