//! Vertex records.

use crate::cmd::ParamControl;
use crate::list::Record;
use color::Argb8888;

/// A single vertex with packed colors and 32-bit texture coordinates.
///
/// Records store the fields in declaration order. This is not the hardware `pvr_vertex_t` layout,
/// which places `u` and `v` before the colors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub control: ParamControl,
    pub x: f32,
    pub y: f32,
    /// Reciprocal depth.
    pub z: f32,
    pub argb: Argb8888,
    /// Offset color. Always zero, reserved.
    pub oargb: Argb8888,
    pub u: f32,
    pub v: f32,
}

impl Vertex {
    #[inline(always)]
    pub fn end_of_strip(&self) -> bool {
        self.control.end_of_strip()
    }

    pub fn to_record(&self) -> Record {
        Record([
            self.control.to_bits(),
            self.x.to_bits(),
            self.y.to_bits(),
            self.z.to_bits(),
            self.argb.0,
            self.oargb.0,
            self.u.to_bits(),
            self.v.to_bits(),
        ])
    }

    pub fn from_record(record: &Record) -> Self {
        let [control, x, y, z, argb, oargb, u, v] = record.0;
        Self {
            control: ParamControl::from_bits(control),
            x: f32::from_bits(x),
            y: f32::from_bits(y),
            z: f32::from_bits(z),
            argb: Argb8888(argb),
            oargb: Argb8888(oargb),
            u: f32::from_bits(u),
            v: f32::from_bits(v),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use zerocopy::IntoBytes;

    #[test]
    fn record_layout() {
        let vertex = Vertex {
            control: ParamControl::vertex(true),
            x: 1.0,
            y: 2.0,
            z: 0.5,
            argb: Argb8888(0xFF00_FF00),
            oargb: Argb8888::TRANSPARENT,
            u: 0.25,
            v: 0.75,
        };

        let record = vertex.to_record();
        assert_eq!(record.0[0], 0xF000_0000);
        assert_eq!(record.0[4], 0xFF00_FF00);

        let bytes = record.as_bytes();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[4..8], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[28..32], &0.75f32.to_ne_bytes());

        assert_eq!(Vertex::from_record(&record), vertex);
    }
}
