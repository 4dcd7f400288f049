//! SenseAir S8 NDIR CO2 sensor (Modbus RTU over UART, 9600 8N1).
//!
//! The sensor is polled: the agent writes a fixed "read input register 3"
//! request and expects a 7-byte response carrying the CO2 reading. Both
//! directions use CRC-16/MODBUS appended little-endian; a frame is valid
//! when the CRC over all of its bytes is zero.

use bytes::{Buf, Bytes};

use crate::error::{AirmonError, Result};

/// Read input register 3 (space CO2) from any address, quantity 1.
pub const READ_CO2_REQUEST: [u8; 8] = [
    0xfe, // address: any
    0x04, // function: read input registers
    0x00, 0x03, // register: space CO2
    0x00, 0x01, // quantity of registers
    0xd5, 0xc5, // CRC-16/MODBUS, little-endian
];

/// Response length for a single-register read.
pub const RESPONSE_LEN: usize = 7;

/// CRC-16/MODBUS (poly 0xA001, init 0xFFFF).
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xffff;
    for &b in data {
        crc ^= u16::from(b);
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xa001;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// Decode a read-input-register response and return the CO2 reading in ppm.
///
/// Validation order: length, CRC, header (address/function/byte count).
pub fn decode_response(mut buf: Bytes) -> Result<u16> {
    if buf.remaining() < RESPONSE_LEN {
        return Err(AirmonError::BadFrame(format!(
            "s8 response too short ({} < {RESPONSE_LEN})",
            buf.remaining()
        )));
    }

    let frame = buf
        .as_ref()
        .get(..RESPONSE_LEN)
        .ok_or_else(|| AirmonError::BadFrame("s8 response truncated".into()))?;
    if crc16(frame) != 0x0000 {
        return Err(AirmonError::BadFrame("s8 CRC-16 mismatch".into()));
    }

    let addr = buf.get_u8();
    let func = buf.get_u8();
    let size = buf.get_u8();
    if addr != 0xfe || func != 0x04 || size != 2 {
        return Err(AirmonError::BadFrame(format!(
            "s8 wrong response header: {addr:#04x} {func:#04x} {size:#04x}"
        )));
    }

    Ok(buf.get_u16())
}
