// src/charmap.rs
//
// HD44780 character ROM variants and the substitution pass that keeps
// German brewery and step names readable on A00 panels.

use crate::glyphs::{GLYPH_A_UMLAUT, GLYPH_ESZETT, GLYPH_O_UMLAUT, GLYPH_U_UMLAUT};

/// Character ROM fitted to the panel. A00 is the common Japanese ROM without
/// uppercase umlauts; A02 is the European ROM with native Latin-1 coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charmap {
    #[default]
    A00,
    A02,
}

impl Charmap {
    /// Parses the host config value; anything unrecognized falls back to A00.
    pub fn from_config(value: &str) -> Self {
        match value.trim() {
            "A02" => Charmap::A02,
            _ => Charmap::A00,
        }
    }

    /// Substitutes the four characters the A00 ROM cannot show with their
    /// uploaded CGRAM codes. Identity for every other charmap.
    pub fn decode(&self, text: &str) -> String {
        match self {
            Charmap::A00 => text
                .chars()
                .map(|c| match c {
                    'Ä' => GLYPH_A_UMLAUT as char,
                    'Ö' => GLYPH_O_UMLAUT as char,
                    'Ü' => GLYPH_U_UMLAUT as char,
                    'ß' => GLYPH_ESZETT as char,
                    other => other,
                })
                .collect(),
            Charmap::A02 => text.to_string(),
        }
    }

    /// Maps one decoded character to the byte actually sent to the panel.
    /// Unmappable characters degrade to '?' rather than garbage.
    pub fn encode_char(&self, c: char) -> u8 {
        let code = c as u32;
        // CGRAM codes pass straight through on either ROM.
        if code <= 0x05 {
            return code as u8;
        }
        if (0x20..=0x7d).contains(&code) {
            return code as u8;
        }
        match self {
            Charmap::A00 => match c {
                '°' => 0xdf,
                'ä' => 0xe1,
                'ß' => 0xe2,
                'ö' => 0xef,
                'ü' => 0xf5,
                _ => b'?',
            },
            Charmap::A02 => {
                if code < 0x100 {
                    code as u8
                } else {
                    b'?'
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a00_substitutes_fixed_codes() {
        let decoded = Charmap::A00.decode("WÜRZE Äß Öl");
        let codes: Vec<u32> = decoded.chars().map(|c| c as u32).collect();
        assert_eq!(codes[1], GLYPH_U_UMLAUT as u32);
        assert_eq!(decoded.chars().nth(6).unwrap() as u32, GLYPH_A_UMLAUT as u32);
        assert_eq!(decoded.chars().nth(7).unwrap() as u32, GLYPH_ESZETT as u32);
        assert_eq!(decoded.chars().nth(9).unwrap() as u32, GLYPH_O_UMLAUT as u32);
        // everything else untouched
        assert_eq!(decoded.chars().next(), Some('W'));
        assert_eq!(decoded.chars().last(), Some('l'));
    }

    #[test]
    fn test_a02_decode_is_identity() {
        let text = "Würze ÄÖÜß 100°";
        assert_eq!(Charmap::A02.decode(text), text);
    }

    #[test]
    fn test_from_config() {
        assert_eq!(Charmap::from_config("A00"), Charmap::A00);
        assert_eq!(Charmap::from_config("A02"), Charmap::A02);
        assert_eq!(Charmap::from_config("bogus"), Charmap::A00);
    }

    #[test]
    fn test_encode_degree_sign() {
        assert_eq!(Charmap::A00.encode_char('°'), 0xdf);
        assert_eq!(Charmap::A02.encode_char('°'), 0xb0);
        assert_eq!(Charmap::A00.encode_char('~'), b'?');
        assert_eq!(Charmap::A00.encode_char('\u{02}'), 0x02);
    }
}
