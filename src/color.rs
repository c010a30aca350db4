use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Fixed chart colours
// ---------------------------------------------------------------------------

pub const LIGHT_SEA_GREEN: Color32 = Color32::from_rgb(0x20, 0xB2, 0xAA);
pub const DEEP_PINK: Color32 = Color32::from_rgb(0xFF, 0x14, 0x93);
pub const HOT_PINK: Color32 = Color32::from_rgb(0xFF, 0x69, 0xB4);
pub const DEEP_SKY_BLUE: Color32 = Color32::from_rgb(0x00, 0xBF, 0xFF);

/// Brewer "Set2", used for the gender donut.
pub const SET2: [Color32; 6] = [
    Color32::from_rgb(0x66, 0xC2, 0xA5),
    Color32::from_rgb(0xFC, 0x8D, 0x62),
    Color32::from_rgb(0x8D, 0xA0, 0xCB),
    Color32::from_rgb(0xE7, 0x8A, 0xC3),
    Color32::from_rgb(0xA6, 0xD8, 0x54),
    Color32::from_rgb(0xFF, 0xD9, 0x2F),
];

/// Anchor points of the viridis colour map, dark purple to yellow.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (0x44, 0x01, 0x54),
    (0x3B, 0x52, 0x8B),
    (0x21, 0x91, 0x8C),
    (0x5E, 0xC9, 0x62),
    (0xFD, 0xE7, 0x25),
];

// ---------------------------------------------------------------------------
// Color palette generators
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

/// `n` colours sampled evenly along viridis, interpolated in linear RGB.
pub fn viridis(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    let anchors: Vec<LinSrgb> = VIRIDIS
        .iter()
        .map(|&(r, g, b)| Srgb::new(r, g, b).into_format::<f32>().into_linear::<f32>())
        .collect();
    let segments = (anchors.len() - 1) as f32;

    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
            let pos = t * segments;
            let seg = (pos.floor() as usize).min(anchors.len() - 2);
            let mixed = anchors[seg].mix(anchors[seg + 1], pos - seg as f32);
            to_color32(Srgb::from_linear(mixed))
        })
        .collect()
}

/// Take `n` colours from a fixed palette, topping up with generated hues
/// when the palette runs out.
pub fn take_palette(fixed: &[Color32], n: usize) -> Vec<Color32> {
    if n <= fixed.len() {
        return fixed[..n].to_vec();
    }
    let mut colors = fixed.to_vec();
    colors.extend(generate_palette(n - fixed.len()));
    colors
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints_match_anchors() {
        let colors = viridis(10);
        assert_eq!(colors.len(), 10);
        assert_eq!(colors[0], Color32::from_rgb(0x44, 0x01, 0x54));
        assert_eq!(colors[9], Color32::from_rgb(0xFD, 0xE7, 0x25));
    }

    #[test]
    fn viridis_single_and_empty() {
        assert!(viridis(0).is_empty());
        assert_eq!(viridis(1), vec![Color32::from_rgb(0x44, 0x01, 0x54)]);
    }

    #[test]
    fn palette_is_topped_up() {
        let two = [HOT_PINK, DEEP_SKY_BLUE];
        assert_eq!(take_palette(&two, 1), vec![HOT_PINK]);
        let four = take_palette(&two, 4);
        assert_eq!(four.len(), 4);
        assert_eq!(&four[..2], &two);
    }
}
