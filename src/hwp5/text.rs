//! UTF-16LE paragraph text decoding.
//!
//! `PARA_TEXT` payloads are 16-bit little-endian code units. Values below 32
//! are inline control codes: some translate to a line break, most are
//! dropped, and a fixed family carries 7 trailing parameter units that must
//! be consumed with the control. Miscounting the 8-unit form corrupts all
//! subsequent text.

/// Decode one `PARA_TEXT` payload into visible text.
///
/// Line-break and paragraph-break codes become `'\n'`; extended control
/// codes are skipped together with their 7 parameter units; all other
/// sub-space codes are dropped. Surrogate pairs follow normal UTF-16 rules,
/// with lone surrogates replaced by U+FFFD.
pub fn decode_para_text(payload: &[u8]) -> String {
    let units: Vec<u16> = payload
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let mut out = String::with_capacity(units.len());
    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        match unit {
            0 | 10 | 13 => {
                out.push('\n');
                i += 1;
            }
            // Inline controls carrying 7 parameter units: the control and
            // its parameters are consumed as one 8-unit block.
            1..=9 | 11 | 12 | 14..=21 | 23 | 24 => {
                i += 8;
            }
            22 | 25..=31 => {
                i += 1;
            }
            0xD800..=0xDBFF => {
                if i + 1 < units.len() && (0xDC00..=0xDFFF).contains(&units[i + 1]) {
                    let scalar = 0x10000
                        + (((units[i] as u32 - 0xD800) << 10)
                            | (units[i + 1] as u32 - 0xDC00));
                    out.push(char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER));
                    i += 2;
                } else {
                    out.push(char::REPLACEMENT_CHARACTER);
                    i += 1;
                }
            }
            0xDC00..=0xDFFF => {
                out.push(char::REPLACEMENT_CHARACTER);
                i += 1;
            }
            _ => {
                out.push(char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
                i += 1;
            }
        }
    }
    out
}

/// Trim trailing nulls and padding whitespace from finalized paragraph text.
///
/// A trailing `'\n'` produced by an explicit line-break control is content
/// and stays.
pub fn trim_paragraph(text: &str) -> &str {
    text.trim_end_matches(['\0', ' ', '\t', '\r'])
}

/// Decode the `PrvText` preview stream: plain UTF-16LE with null padding.
pub fn decode_prv_text(data: &[u8]) -> String {
    let units = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    let text: String = char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .filter(|c| *c != '\0')
        .collect();
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units_to_bytes(units: &[u16]) -> Vec<u8> {
        units.iter().flat_map(|u| u.to_le_bytes()).collect()
    }

    #[test]
    fn test_plain_text() {
        let payload = units_to_bytes(&[b'H' as u16, b'i' as u16, b'!' as u16]);
        assert_eq!(decode_para_text(&payload), "Hi!");
    }

    #[test]
    fn test_korean_text() {
        let payload = units_to_bytes(&[0xD55C, 0xAE00]);
        assert_eq!(decode_para_text(&payload), "한글");
    }

    #[test]
    fn test_line_break_codes() {
        let payload = units_to_bytes(&[b'a' as u16, 10, b'b' as u16, 13, b'c' as u16]);
        assert_eq!(decode_para_text(&payload), "a\nb\nc");
    }

    #[test]
    fn test_extended_control_skips_seven_units() {
        // Control code 3 followed by 7 parameter units, then visible text.
        let mut units = vec![3u16, 1, 2, 3, 4, 5, 6, 7];
        units.extend([b'o' as u16, b'k' as u16]);
        assert_eq!(decode_para_text(&units_to_bytes(&units)), "ok");
    }

    #[test]
    fn test_extended_control_parameters_not_misread() {
        // Parameter units that look like printable chars must be discarded.
        let mut units = vec![11u16];
        units.extend([b'X' as u16; 7]);
        units.push(b'!' as u16);
        assert_eq!(decode_para_text(&units_to_bytes(&units)), "!");
    }

    #[test]
    fn test_plain_control_dropped() {
        let payload = units_to_bytes(&[22, b'a' as u16, 25, b'b' as u16]);
        assert_eq!(decode_para_text(&payload), "ab");
    }

    #[test]
    fn test_surrogate_pair() {
        // U+1F600 as a UTF-16 pair.
        let payload = units_to_bytes(&[0xD83D, 0xDE00]);
        assert_eq!(decode_para_text(&payload), "\u{1F600}");
    }

    #[test]
    fn test_lone_surrogate_replaced() {
        let payload = units_to_bytes(&[0xD83D, b'a' as u16]);
        assert_eq!(decode_para_text(&payload), "\u{FFFD}a");
    }

    #[test]
    fn test_trim_keeps_explicit_line_break() {
        assert_eq!(trim_paragraph("P\n"), "P\n");
        assert_eq!(trim_paragraph("x \t\r"), "x");
        assert_eq!(trim_paragraph("y\0\0"), "y");
    }

    #[test]
    fn test_prv_text_decode() {
        let data = units_to_bytes(&[b'a' as u16, 0, b'b' as u16, 0, 0]);
        assert_eq!(decode_prv_text(&data), "ab");
    }
}
