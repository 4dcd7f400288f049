//! SM300D2 seven-in-one air quality sensor (UART, 9600 8N1).
//!
//! The module pushes a fixed 17-byte frame: address, protocol version,
//! five big-endian u16 readings (eCO2, eCH2O, TVOC, PM2.5, PM10),
//! temperature and humidity as integer/fraction centi pairs, and an
//! additive checksum over the preceding 16 bytes.

use bytes::{Buf, Bytes};

use crate::error::{AirmonError, Result};

/// Fixed module address (first frame byte).
pub const SM300D2_ADDRESS: u8 = 0x3c;
/// Supported protocol version (second frame byte).
pub const SM300D2_VERSION: u8 = 0x02;
/// Full frame length in bytes.
pub const FRAME_LEN: usize = 17;

/// Physically-scaled readings of one SM300D2 frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sm300d2Data {
    /// Equivalent CO2, ppm.
    pub e_co2: u16,
    /// Equivalent CH2O, ug/m^3.
    pub e_ch2o: u16,
    /// Total volatile organic compounds, ug/m^3.
    pub tvoc: u16,
    /// PM2.5, ug/m^3.
    pub pm2_5: u16,
    /// PM10, ug/m^3.
    pub pm10: u16,
    /// Temperature in centi-degrees Celsius.
    pub temp_centi: u16,
    /// Relative humidity in centi-percent.
    pub humi_centi: u16,
}

impl Sm300d2Data {
    /// Temperature in degrees Celsius.
    pub fn temp_celsius(&self) -> f64 {
        f64::from(self.temp_centi) / 100.0
    }

    /// Relative humidity in percent.
    pub fn humi_percent(&self) -> f64 {
        f64::from(self.humi_centi) / 100.0
    }
}

/// Decode one SM300D2 frame.
///
/// Validation order: length, address, checksum, version.
pub fn decode_frame(mut buf: Bytes) -> Result<Sm300d2Data> {
    if buf.remaining() < FRAME_LEN {
        return Err(AirmonError::BadFrame(format!(
            "sm300d2 frame too short ({} < {FRAME_LEN})",
            buf.remaining()
        )));
    }

    // Additive checksum over everything before the checksum byte.
    let sum = buf
        .as_ref()
        .iter()
        .take(FRAME_LEN - 1)
        .fold(0u8, |acc, &b| acc.wrapping_add(b));

    let address = buf.get_u8();
    if address != SM300D2_ADDRESS {
        return Err(AirmonError::BadFrame(format!(
            "sm300d2 wrong address {address:#04x}"
        )));
    }

    let version = buf.get_u8();

    let e_co2 = buf.get_u16();
    let e_ch2o = buf.get_u16();
    let tvoc = buf.get_u16();
    let pm2_5 = buf.get_u16();
    let pm10 = buf.get_u16();
    let temp_int = buf.get_u8();
    let temp_frac = buf.get_u8();
    let humi_int = buf.get_u8();
    let humi_frac = buf.get_u8();

    let checksum = buf.get_u8();
    if checksum != sum {
        return Err(AirmonError::BadFrame(format!(
            "sm300d2 checksum mismatch (got {checksum:#04x}, want {sum:#04x})"
        )));
    }
    if version != SM300D2_VERSION {
        return Err(AirmonError::UnsupportedVersion);
    }

    Ok(Sm300d2Data {
        e_co2,
        e_ch2o,
        tvoc,
        pm2_5,
        pm10,
        temp_centi: u16::from(temp_int) * 100 + u16::from(temp_frac),
        humi_centi: u16::from(humi_int) * 100 + u16::from(humi_frac),
    })
}
