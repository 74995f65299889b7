//! BIFF8 style records.
//!
//! Parses and serializes FONT, FORMAT, XF, STYLE and PALETTE records. The
//! document stores these records in their BIFF8 shape, so parsing maps bit
//! fields straight onto [`FontRecord`] and [`StyleRecord`] and writing is the
//! exact inverse.

use xlsbook_core::style::{rotation_from_biff, rotation_to_biff};
use xlsbook_core::{
    BorderEdge, BorderLineStyle, Borders, Document, Escapement, Fill, FontId, FontRecord,
    HorizontalAlignment, NamedStyle, PatternType, StyleRecord, Underline, VerticalAlignment,
    XfKind,
};

use crate::biff::parser::{read_u16, read_u32, read_u8};
use crate::biff::strings::{
    read_short_string, read_unicode_string, write_short_string, write_unicode_string,
};
use crate::error::{BiffError, BiffResult};

/// Size of an XF record body
pub const XF_RECORD_LEN: usize = 20;

/// Parent index stored in style XFs
const NO_PARENT: u16 = 0x0FFF;

/// Set in a STYLE record's XF field for built-in styles
const BUILTIN_STYLE_FLAG: u16 = 0x8000;

// ============================================================================
// Record parsers
// ============================================================================

/// Parse a FONT record (0x0031).
///
/// Layout:
///   0  u16  dyHeight   - font height in twips (1/20 pt)
///   2  u16  grbit      - flags (bit 1 = italic, bit 3 = strikethrough)
///   4  u16  icv        - color index
///   6  u16  bls        - bold weight (400 = normal, 700 = bold)
///   8  u16  sss        - super/subscript (0/1/2)
///  10  u8   uls        - underline type
///  11  u8   bFamily    - font family (ignored)
///  12  u8   bCharSet   - character set (ignored)
///  13  u8   reserved
///  14  ...  font name  - short string (1-byte length prefix)
pub fn parse_font(data: &[u8]) -> BiffResult<FontRecord> {
    if data.len() < 15 {
        return Err(BiffError::Parse("FONT record too short".into()));
    }

    let mut off = 0;
    let height = read_u16(data, &mut off)?;
    let grbit = read_u16(data, &mut off)?;
    let color = read_u16(data, &mut off)?;
    let weight = read_u16(data, &mut off)?;
    let escapement = read_u16(data, &mut off)?;
    let underline = read_u8(data, &mut off)?;
    // family, charset, reserved
    off += 3;

    let name = read_short_string(data, &mut off).unwrap_or_else(|e| {
        log::warn!("unreadable font name: {e}");
        String::new()
    });

    Ok(FontRecord {
        height,
        weight,
        italic: (grbit & 0x0002) != 0,
        strikeout: (grbit & 0x0008) != 0,
        underline: Underline::from_biff(underline),
        color,
        escapement: Escapement::from_biff(escapement),
        name,
    })
}

/// Parse a FORMAT record (0x041E).
///
/// Layout:
///   0  u16  ifmt   - format index
///   2  ...  format string (unicode string, 2-byte length prefix)
pub fn parse_format(data: &[u8]) -> BiffResult<(u16, String)> {
    let mut off = 0;
    let ifmt = read_u16(data, &mut off)?;
    let s = read_unicode_string(data, &mut off)?;
    Ok((ifmt, s))
}

/// Parse an XF record (0x00E0, always 20 bytes in BIFF8).
///
/// Layout (see [MS-XLS] §2.4.353):
///   0   u16  ifnt          - font index
///   2   u16  ifmt          - format index
///   4   u16  type/protect  - bits 0-1 lock/hidden, bit 2 style-xf, bits 4-15 parent
///   6   u8   alignment1    - bits 0-2 halign, bit 3 wrap, bits 4-6 valign
///   7   u8   trot          - text rotation
///   8   u8   alignment2    - bits 0-3 indent, bit 4 shrink
///   9   u8   used_attribs  - (ignored)
///  10   u32  border lines/colors 1
///  14   u32  border lines/colors 2 + fill pattern
///  18   u16  fill colors
pub fn parse_xf(data: &[u8]) -> BiffResult<StyleRecord> {
    if data.len() < XF_RECORD_LEN {
        return Err(BiffError::Parse(format!(
            "XF record too short: {} bytes (expected 20)",
            data.len()
        )));
    }

    let mut off = 0;
    let ifnt = read_u16(data, &mut off)?;
    let ifmt = read_u16(data, &mut off)?;
    let type_prot = read_u16(data, &mut off)?;

    let align1 = read_u8(data, &mut off)?;
    let rotation = read_u8(data, &mut off)?;
    let align2 = read_u8(data, &mut off)?;
    let _used = read_u8(data, &mut off)?;

    let border1 = read_u32(data, &mut off)?;
    let border2 = read_u32(data, &mut off)?;
    let fill_colors = read_u16(data, &mut off)?;

    let edge = |line: u32, icv: u32| {
        BorderEdge::new(BorderLineStyle::from_biff((line & 0x0F) as u8), (icv & 0x7F) as u16)
    };

    Ok(StyleRecord {
        font: FontId(ifnt),
        format: ifmt,
        horizontal: HorizontalAlignment::from_biff(align1 & 0x07),
        vertical: VerticalAlignment::from_biff((align1 >> 4) & 0x07),
        wrap_text: (align1 & 0x08) != 0,
        shrink_to_fit: (align2 & 0x10) != 0,
        indent: align2 & 0x0F,
        rotation: rotation_from_biff(rotation),
        borders: Borders {
            left: edge(border1, border1 >> 16),
            right: edge(border1 >> 4, border1 >> 23),
            top: edge(border1 >> 8, border2),
            bottom: edge(border1 >> 12, border2 >> 7),
        },
        fill: Fill {
            pattern: PatternType::from_biff(((border2 >> 26) & 0x3F) as u8),
            foreground: fill_colors & 0x7F,
            background: (fill_colors >> 7) & 0x7F,
        },
        locked: (type_prot & 0x0001) != 0,
        hidden: (type_prot & 0x0002) != 0,
        kind: if (type_prot & 0x0004) != 0 {
            XfKind::Style
        } else {
            XfKind::Cell
        },
        parent: type_prot >> 4,
    })
}

/// Parse a STYLE record (0x0293).
///
/// Layout:
///   0  u16  ixfe   - bits 0-11 style XF index, bit 15 built-in
///   built-in: u8 style id, u8 outline level
///   user:     unicode string name
pub fn parse_style(data: &[u8]) -> BiffResult<NamedStyle> {
    let mut off = 0;
    let ixfe = read_u16(data, &mut off)?;
    let xf = ixfe & 0x0FFF;

    if (ixfe & BUILTIN_STYLE_FLAG) != 0 {
        let id = read_u8(data, &mut off)?;
        let level = read_u8(data, &mut off)?;
        Ok(NamedStyle::Builtin { xf, id, level })
    } else {
        let name = read_unicode_string(data, &mut off)?;
        Ok(NamedStyle::User { xf, name })
    }
}

/// Apply a PALETTE record to the document.
///
/// Layout:
///   0  u16  ccv    - number of colors (typically 56)
///   2  ...  colors - array of ccv × 4-byte entries (R, G, B, 0x00)
pub fn apply_palette(data: &[u8], doc: &mut Document) -> BiffResult<()> {
    if data.len() < 2 {
        return Err(BiffError::Parse("PALETTE record too short".into()));
    }

    let mut off = 0;
    let count = read_u16(data, &mut off)? as usize;

    for (i, entry) in data[off..].chunks_exact(4).take(count.min(56)).enumerate() {
        doc.set_palette_color(8 + i as u16, (entry[0], entry[1], entry[2]))?;
    }

    Ok(())
}

// ============================================================================
// Record writers
// ============================================================================

/// FONT record body
pub fn write_font(font: &FontRecord) -> Vec<u8> {
    let mut body = Vec::with_capacity(16 + font.name.len());
    let mut grbit = 0u16;
    if font.italic {
        grbit |= 0x0002;
    }
    if font.strikeout {
        grbit |= 0x0008;
    }
    body.extend_from_slice(&font.height.to_le_bytes());
    body.extend_from_slice(&grbit.to_le_bytes());
    body.extend_from_slice(&font.color.to_le_bytes());
    body.extend_from_slice(&font.weight.to_le_bytes());
    body.extend_from_slice(&font.escapement.to_biff().to_le_bytes());
    body.push(font.underline.to_biff());
    body.extend_from_slice(&[0, 0, 0]); // family, charset, reserved
    write_short_string(&mut body, &font.name);
    body
}

/// FORMAT record body
pub fn write_format(code: u16, pattern: &str) -> Vec<u8> {
    let mut body = Vec::with_capacity(5 + pattern.len());
    body.extend_from_slice(&code.to_le_bytes());
    write_unicode_string(&mut body, pattern);
    body
}

/// XF record body
pub fn write_xf(xf: &StyleRecord) -> Vec<u8> {
    let is_style = xf.kind == XfKind::Style;
    let parent = if is_style { NO_PARENT } else { xf.parent & 0x0FFF };
    let type_prot =
        (xf.locked as u16) | ((xf.hidden as u16) << 1) | ((is_style as u16) << 2) | (parent << 4);

    let align1 = (xf.horizontal.to_biff() & 0x07)
        | ((xf.wrap_text as u8) << 3)
        | ((xf.vertical.to_biff() & 0x07) << 4);
    let align2 = (xf.indent & 0x0F) | ((xf.shrink_to_fit as u8) << 4);
    // Cell XFs override every attribute group of their parent
    let used = if is_style { 0x00 } else { 0xFC };

    let b = &xf.borders;
    let border1 = (b.left.style.to_biff() as u32 & 0x0F)
        | ((b.right.style.to_biff() as u32 & 0x0F) << 4)
        | ((b.top.style.to_biff() as u32 & 0x0F) << 8)
        | ((b.bottom.style.to_biff() as u32 & 0x0F) << 12)
        | ((b.left.color as u32 & 0x7F) << 16)
        | ((b.right.color as u32 & 0x7F) << 23);
    let border2 = (b.top.color as u32 & 0x7F)
        | ((b.bottom.color as u32 & 0x7F) << 7)
        | ((xf.fill.pattern.to_biff() as u32 & 0x3F) << 26);
    let fill = (xf.fill.foreground & 0x7F) | ((xf.fill.background & 0x7F) << 7);

    let mut body = Vec::with_capacity(XF_RECORD_LEN);
    body.extend_from_slice(&xf.font.0.to_le_bytes());
    body.extend_from_slice(&xf.format.to_le_bytes());
    body.extend_from_slice(&type_prot.to_le_bytes());
    body.push(align1);
    body.push(rotation_to_biff(xf.rotation));
    body.push(align2);
    body.push(used);
    body.extend_from_slice(&border1.to_le_bytes());
    body.extend_from_slice(&border2.to_le_bytes());
    body.extend_from_slice(&fill.to_le_bytes());
    body
}

/// STYLE record body
pub fn write_style(style: &NamedStyle) -> Vec<u8> {
    let mut body = Vec::new();
    match style {
        NamedStyle::Builtin { xf, id, level } => {
            body.extend_from_slice(&((xf & 0x0FFF) | BUILTIN_STYLE_FLAG).to_le_bytes());
            body.push(*id);
            body.push(*level);
        }
        NamedStyle::User { xf, name } => {
            body.extend_from_slice(&(xf & 0x0FFF).to_le_bytes());
            write_unicode_string(&mut body, name);
        }
    }
    body
}

/// PALETTE record body for all 56 customizable entries
pub fn write_palette(colors: &[(u8, u8, u8)]) -> Vec<u8> {
    let mut body = Vec::with_capacity(2 + colors.len() * 4);
    body.extend_from_slice(&(colors.len() as u16).to_le_bytes());
    for &(r, g, b) in colors {
        body.extend_from_slice(&[r, g, b, 0]);
    }
    body
}

// ============================================================================
// Unit tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use xlsbook_core::Palette;

    #[test]
    fn test_parse_font_basic() {
        // height=220 (11pt), flags=0, color=auto(0x7FFF), bls=400, sss=0,
        // uls=0, family=0, charset=0, reserved=0, short string "Arial"
        let mut data = Vec::new();
        data.extend_from_slice(&220u16.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&0x7FFFu16.to_le_bytes());
        data.extend_from_slice(&400u16.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.push(5);
        data.push(0x00);
        data.extend_from_slice(b"Arial");

        let font = parse_font(&data).unwrap();
        assert_eq!(font.height, 220);
        assert!(!font.is_bold());
        assert!(!font.italic);
        assert!(!font.strikeout);
        assert_eq!(font.underline, Underline::None);
        assert_eq!(font.color, 0x7FFF);
        assert_eq!(font.escapement, Escapement::None);
        assert_eq!(font.name, "Arial");
    }

    #[test]
    fn test_parse_font_bold_italic() {
        let mut data = Vec::new();
        data.extend_from_slice(&240u16.to_le_bytes()); // 12pt
        data.extend_from_slice(&0x000Au16.to_le_bytes()); // italic + strikeout
        data.extend_from_slice(&10u16.to_le_bytes()); // red
        data.extend_from_slice(&700u16.to_le_bytes()); // bold
        data.extend_from_slice(&1u16.to_le_bytes()); // superscript
        data.push(0x01); // single underline
        data.extend_from_slice(&[0, 0, 0]);
        data.extend_from_slice(&[0, 0]); // empty name

        let font = parse_font(&data).unwrap();
        assert!(font.is_bold());
        assert!(font.italic);
        assert!(font.strikeout);
        assert_eq!(font.underline, Underline::Single);
        assert_eq!(font.escapement, Escapement::Superscript);
        assert_eq!(font.color, 10);
        assert_eq!(font.height, 240);
        assert_eq!(font.name, "");
    }

    #[test]
    fn test_font_write_parse() {
        let font = FontRecord::new("Times New Roman", 14)
            .with_bold(true)
            .with_underline(Underline::Double)
            .with_color(12);
        let parsed = parse_font(&write_font(&font)).unwrap();
        assert_eq!(parsed, font);
    }

    #[test]
    fn test_parse_xf_style_default() {
        let mut data = [0u8; 20];
        // type_prot = 0xFFF5: locked, style XF, parent 0xFFF
        data[4] = 0xF5;
        data[5] = 0xFF;

        let xf = parse_xf(&data).unwrap();
        assert_eq!(xf.font, FontId(0));
        assert_eq!(xf.format, 0);
        assert!(xf.locked);
        assert!(!xf.hidden);
        assert!(xf.is_style_xf());
        assert_eq!(xf.parent, 0x0FFF);
        assert_eq!(xf.horizontal, HorizontalAlignment::General);
        assert_eq!(xf.vertical, VerticalAlignment::Top);
        assert!(xf.fill.is_none());
    }

    #[test]
    fn test_parse_xf_too_short() {
        assert!(parse_xf(&[0u8; 12]).is_err());
    }

    #[test]
    fn test_xf_bit_layout() {
        let mut xf = StyleRecord::new();
        xf.font = FontId(6);
        xf.format = 164;
        xf.horizontal = HorizontalAlignment::Center;
        xf.vertical = VerticalAlignment::Center;
        xf.wrap_text = true;
        xf.indent = 3;
        xf.rotation = -45;
        xf.borders.left = BorderEdge::new(BorderLineStyle::Thin, 10);
        xf.borders.bottom = BorderEdge::new(BorderLineStyle::Double, 12);
        xf.fill = Fill::solid(13);

        let body = write_xf(&xf);
        assert_eq!(body.len(), XF_RECORD_LEN);
        assert_eq!(&body[0..2], &[6, 0]);
        assert_eq!(&body[2..4], &[164, 0]);
        assert_eq!(&body[4..6], &[0x01, 0x00]);
        assert_eq!(body[6], 0x02 | 0x08 | 0x10);
        assert_eq!(body[7], 135);
        assert_eq!(body[8], 3);

        let border1 = u32::from_le_bytes([body[10], body[11], body[12], body[13]]);
        assert_eq!(border1 & 0x0F, 1);
        assert_eq!((border1 >> 12) & 0x0F, 6);
        assert_eq!((border1 >> 16) & 0x7F, 10);
        let border2 = u32::from_le_bytes([body[14], body[15], body[16], body[17]]);
        assert_eq!((border2 >> 7) & 0x7F, 12);
        assert_eq!(border2 >> 26, 1);

        assert_eq!(parse_xf(&body).unwrap(), xf);
    }

    #[test]
    fn test_style_xf_written_with_no_parent() {
        let body = write_xf(&StyleRecord::style_xf());
        assert_eq!(&body[4..6], &[0xF5, 0xFF]);
    }

    #[test]
    fn test_parse_style_records() {
        let builtin = NamedStyle::Builtin {
            xf: 0x10,
            id: 3,
            level: 0xFF,
        };
        let body = write_style(&builtin);
        assert_eq!(body, vec![0x10, 0x80, 3, 0xFF]);
        assert_eq!(parse_style(&body).unwrap(), builtin);

        let user = NamedStyle::User {
            xf: 21,
            name: "Heading".into(),
        };
        assert_eq!(parse_style(&write_style(&user)).unwrap(), user);
    }

    #[test]
    fn test_apply_palette() {
        let mut doc = Document::new();
        let mut data = Vec::new();
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0x00]);
        data.extend_from_slice(&[0x11, 0x22, 0x33, 0x00]);

        apply_palette(&data, &mut doc).unwrap();
        assert_eq!(doc.palette().rgb_at(8), Some((0xAA, 0xBB, 0xCC)));
        assert_eq!(doc.palette().rgb_at(9), Some((0x11, 0x22, 0x33)));
        assert_eq!(doc.palette().rgb_at(10), Palette::new().rgb_at(10));
    }

    #[test]
    fn test_write_palette_layout() {
        let palette = Palette::new();
        let body = write_palette(palette.colors());
        assert_eq!(body.len(), 2 + 56 * 4);
        assert_eq!(&body[0..2], &[56, 0]);
        // Entry 9 is white
        assert_eq!(&body[6..10], &[255, 255, 255, 0]);
    }
}
