//! Integration tests for colors module

use drum_sequencer::colors::{self, colorwheel, fade, rgb};
use palette::Srgb;

fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.01;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}

#[test]
fn hsv_creates_primary_colors() {
    assert!(colors_equal(colors::hsv(0.0, 1.0, 1.0), Srgb::new(1.0, 0.0, 0.0)));
    assert!(colors_equal(colors::hsv(120.0, 1.0, 1.0), Srgb::new(0.0, 1.0, 0.0)));
    assert!(colors_equal(colors::hsv(240.0, 1.0, 1.0), Srgb::new(0.0, 0.0, 1.0)));
}

#[test]
fn hue_wraps_around_360() {
    assert!(colors_equal(colors::hue(0.0), colors::hue(360.0)));
}

#[test]
fn colorwheel_starts_red_and_passes_green_and_blue() {
    assert_eq!(colorwheel(0), rgb(0xFF0000));

    // a third of the way round is green, two thirds blue
    let green = colorwheel(85);
    assert!(green.green > 240 && green.red < 16 && green.blue < 16);
    let blue = colorwheel(171);
    assert!(blue.blue > 240 && blue.red < 16 && blue.green < 16);
}

#[test]
fn colorwheel_is_fully_saturated() {
    for position in 0..=255u8 {
        let c = colorwheel(position);
        let max = c.red.max(c.green).max(c.blue);
        assert!(max >= 250, "position {} too dim: {:?}", position, c);
    }
}

#[test]
fn fade_is_linear_and_saturating() {
    let mut c = rgb(0x0A0300);
    c = fade(c, 5, 0);
    assert_eq!(c, rgb(0x050000));
    c = fade(c, 5, 0);
    assert_eq!(c, colors::OFF);
    assert_eq!(fade(c, 5, 0), colors::OFF);
}

#[test]
fn fade_reaches_floor_after_enough_ticks() {
    let mut c = rgb(0xFFFFFF);
    for _ in 0..100 {
        c = fade(c, 5, 0x10);
    }
    assert_eq!(c, rgb(0x101010));
}
