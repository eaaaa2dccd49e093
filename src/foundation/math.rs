use std::sync::LazyLock;

/// sRGB electro-optical transfer: encoded `[0,1]` to linear light.
pub fn srgb_to_linear(f: f32) -> f32 {
    if f <= 0.04045 {
        f / 12.92
    } else {
        ((f + 0.055) / 1.055).powf(2.4)
    }
}

/// Inverse of [`srgb_to_linear`].
pub fn linear_to_srgb(f: f32) -> f32 {
    if f <= 0.003_130_8 {
        f * 12.92
    } else {
        1.055 * f.powf(1.0 / 2.4) - 0.055
    }
}

/// Decode table for 8-bit sRGB samples.
///
/// Built once on first use and never written afterwards, so it is shared freely across threads.
pub(crate) static SRGB_U8_TO_LINEAR: LazyLock<[f32; 256]> = LazyLock::new(|| {
    let mut table = [0.0f32; 256];
    for (i, v) in table.iter_mut().enumerate() {
        *v = srgb_to_linear(i as f32 / 255.0);
    }
    table
});

/// Clamp into `[0,1]`; NaN maps to 0.
pub(crate) fn saturate(x: f32) -> f32 {
    if x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else if x.is_nan() {
        0.0
    } else {
        x
    }
}

/// Round half up and quantize to an integer range.
pub(crate) fn quantize(unit: f32, max: f32) -> u32 {
    (saturate(unit) * max + 0.5) as u32
}

/// `u32` quantization goes through `f64`: `f32` cannot represent every step of `u32::MAX`.
pub(crate) fn quantize_u32(unit: f32) -> u32 {
    (f64::from(saturate(unit)) * f64::from(u32::MAX) + 0.5) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
