//! Deterministic user colors.

use std::collections::HashMap;

/// Color used for messages sent by the archive owner
pub const SIGNATURE_RED: &str = "#FF453A";

/// Hue bands for generated colors: reds, oranges, yellows, cyans, blues,
/// purples, magentas, pink-reds.
const HUE_RANGES: [(i64, i64); 8] = [
    (0, 20),
    (20, 45),
    (45, 65),
    (160, 200),
    (200, 260),
    (260, 290),
    (290, 330),
    (330, 360),
];

const SATURATION: f64 = 85.0;
const LIGHTNESS: f64 = 55.0;

/// 32-bit `h * 31 + c` hash over UTF-16 code units.
pub fn string_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Generate the color for a username
pub fn generate_user_color(username: &str) -> String {
    let hash = i64::from(string_hash(username));
    let (min_hue, max_hue) = HUE_RANGES[(hash.abs() % HUE_RANGES.len() as i64) as usize];
    let hue = min_hue + (hash * 7919).abs() % (max_hue - min_hue);
    hsl_to_hex(hue as f64, SATURATION, LIGHTNESS)
}

/// Color for a message header: the signature red for the owner
pub fn user_color(username: &str, is_sender: bool) -> String {
    if is_sender {
        SIGNATURE_RED.to_string()
    } else {
        generate_user_color(username)
    }
}

/// Convert HSL (degrees, percent, percent) to `#rrggbb`
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let s = s / 100.0;
    let l = l / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if (0.0..60.0).contains(&h) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&h) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&h) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&h) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&h) {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

/// Memoizing front for [`generate_user_color`]
#[derive(Debug, Default)]
pub struct UserColors {
    cache: HashMap<String, String>,
}

impl UserColors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, username: &str, is_sender: bool) -> String {
        if is_sender {
            return SIGNATURE_RED.to_string();
        }
        self.cache
            .entry(username.to_string())
            .or_insert_with(|| generate_user_color(username))
            .clone()
    }
}
