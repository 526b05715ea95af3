use serde::{Serialize, Serializer};
use std::fmt;

pub const SATURATION: u8 = 70;
pub const LIGHTNESS: u8 = 50;

/// An HSL color at fixed saturation and lightness, rendered in CSS notation
/// (`hsl(326, 70%, 50%)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

impl Serialize for Hsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 31-multiplier rolling hash over UTF-16 code units.
///
/// Arithmetic wraps at signed 32 bits so previously rendered category colors
/// keep their hue.
pub fn label_hash(label: &str) -> i32 {
    label.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    })
}

pub fn label_hue(label: &str) -> u16 {
    label_hash(label).rem_euclid(360) as u16
}

pub fn category_color(label: &str) -> Hsl {
    Hsl {
        hue: label_hue(label),
        saturation: SATURATION,
        lightness: LIGHTNESS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_label_same_color() {
        assert_eq!(category_color("R-1"), category_color("R-1"));
    }

    #[test]
    fn golden_hues() {
        assert_eq!(label_hue("R-1"), 326);
        assert_eq!(label_hue("R-2"), 327);
        assert_eq!(label_hue("C-2"), 312);
        assert_eq!(label_hue("Unknown"), 74);
    }

    #[test]
    fn hash_wraps_at_32_bits() {
        assert_eq!(label_hash("R-1"), 80246);
        assert_eq!(label_hash("c-2-lower"), 1_089_708_604);
        assert_eq!(label_hash("Commercial"), -1_399_154_838);
        assert_eq!(label_hash("Light Industrial"), -1_690_997_757);
    }

    #[test]
    fn negative_hash_maps_into_hue_range() {
        assert_eq!(label_hue("Commercial"), 282);
        assert_eq!(label_hue("Light Industrial"), 3);
        assert_eq!(label_hue("Mixed Use"), 42);
    }

    #[test]
    fn hashes_utf16_code_units() {
        assert_eq!(label_hash("é"), 233);
        // surrogate pair, two code units
        assert_eq!(label_hash("🏠"), 1_773_348);
    }

    #[test]
    fn empty_label_hashes_to_zero() {
        assert_eq!(label_hue(""), 0);
    }

    #[test]
    fn css_notation() {
        assert_eq!(category_color("R-1").to_string(), "hsl(326, 70%, 50%)");
        assert_eq!(
            serde_json::to_value(category_color("R-2")).unwrap(),
            serde_json::json!("hsl(327, 70%, 50%)")
        );
    }
}
