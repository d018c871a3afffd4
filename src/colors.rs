//! Color helpers for the key LEDs.
//!
//! Hue math goes through `palette`'s HSV so the rainbow stays perceptually
//! even. LEDs take 8-bit `Srgb<u8>`.

use palette::{FromColor, Hsv, Srgb};

/// 8-bit LED color.
pub type Rgb8 = Srgb<u8>;

pub const OFF: Rgb8 = rgb(0x000000);

/// Builds an 8-bit color from `0xRRGGBB`.
#[inline]
pub const fn rgb(hex: u32) -> Rgb8 {
    Srgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Creates an RGB color from HSV (Hue, Saturation, Value) components.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb {
    let hsv = Hsv::new(hue, saturation, value);
    Srgb::from_color(hsv)
}

/// Creates an RGB color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Srgb {
    hsv(hue, 1.0, 1.0)
}

/// Rainbow position `0..=255` around the hue circle, as an LED color.
pub fn colorwheel(position: u8) -> Rgb8 {
    hue(position as f32 * 360.0 / 256.0).into_format()
}

/// Subtracts `amount` from every channel, stopping at `floor`. Channels
/// already below `floor` are left alone.
#[inline]
pub fn fade(color: Rgb8, amount: u8, floor: u8) -> Rgb8 {
    let fade_channel = |c: u8| {
        if c <= floor {
            c
        } else {
            c.saturating_sub(amount).max(floor)
        }
    };
    Srgb::new(
        fade_channel(color.red),
        fade_channel(color.green),
        fade_channel(color.blue),
    )
}
