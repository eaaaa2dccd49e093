use crate::foundation::{
    core::Datatype,
    math::{SRGB_U8_TO_LINEAR, linear_to_srgb, quantize, quantize_u32, saturate, srgb_to_linear},
};

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for f32 {}
}

/// A channel sample type the resampler can read and write.
///
/// Implemented for `u8`, `u16`, `u32` and `f32`; sealed.
pub trait Sample: Copy + Default + Send + Sync + 'static + sealed::Sealed {
    /// Runtime tag for this sample type.
    const DATATYPE: Datatype;

    /// Linear decode into the working range (`[0,1]` for integers).
    fn to_unit(self) -> f32;

    /// sRGB-encoded sample to linear light.
    fn srgb_to_unit(self) -> f32 {
        srgb_to_linear(self.to_unit())
    }

    /// Quantize a linear working value.
    fn from_unit(v: f32) -> Self;

    /// Gamma-encode a linear working value, then quantize.
    fn from_unit_srgb(v: f32) -> Self;
}

impl Sample for u8 {
    const DATATYPE: Datatype = Datatype::U8;

    fn to_unit(self) -> f32 {
        f32::from(self) / 255.0
    }

    fn srgb_to_unit(self) -> f32 {
        SRGB_U8_TO_LINEAR[usize::from(self)]
    }

    fn from_unit(v: f32) -> Self {
        quantize(v, 255.0) as u8
    }

    fn from_unit_srgb(v: f32) -> Self {
        quantize(linear_to_srgb(saturate(v)), 255.0) as u8
    }
}

impl Sample for u16 {
    const DATATYPE: Datatype = Datatype::U16;

    fn to_unit(self) -> f32 {
        f32::from(self) / 65535.0
    }

    fn from_unit(v: f32) -> Self {
        quantize(v, 65535.0) as u16
    }

    fn from_unit_srgb(v: f32) -> Self {
        quantize(linear_to_srgb(saturate(v)), 65535.0) as u16
    }
}

impl Sample for u32 {
    const DATATYPE: Datatype = Datatype::U32;

    fn to_unit(self) -> f32 {
        (f64::from(self) / f64::from(u32::MAX)) as f32
    }

    fn from_unit(v: f32) -> Self {
        quantize_u32(v)
    }

    fn from_unit_srgb(v: f32) -> Self {
        quantize_u32(linear_to_srgb(saturate(v)))
    }
}

impl Sample for f32 {
    const DATATYPE: Datatype = Datatype::F32;

    fn to_unit(self) -> f32 {
        self
    }

    fn from_unit(v: f32) -> Self {
        v
    }

    // Floats are not saturated: out-of-range values survive the round trip.
    fn from_unit_srgb(v: f32) -> Self {
        linear_to_srgb(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/sample.rs"]
mod tests;
