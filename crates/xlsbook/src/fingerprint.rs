//! Canonical lookup keys for staged cell formats

use xlsbook_core::{BorderEdge, BorderLineStyle, StyleRecord, XfKind};

const FIELDS: usize = 23;
const PENDING_BORDER: usize = FIELDS - 1;

/// Canonical key of a staged cell format
///
/// Every formatting attribute of a [`StyleRecord`] is encoded as an integer
/// at a fixed position, the font by its record id. Two records produce the
/// same fingerprint exactly when a cell formatted with either looks the
/// same, so the fingerprint can stand in for the record in a hash map.
///
/// The last slot holds a border line style that was requested without any
/// edge to draw it on. It is zero for fingerprints taken from a record
/// alone, and keeps such a request apart from a plain format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleFingerprint([u32; FIELDS]);

impl StyleFingerprint {
    /// Fingerprint of a staged record whose font is already resolved
    pub fn of(record: &StyleRecord) -> Self {
        let edge = |e: &BorderEdge| [e.style.to_biff() as u32, e.color as u32];
        let [left, left_color] = edge(&record.borders.left);
        let [right, right_color] = edge(&record.borders.right);
        let [top, top_color] = edge(&record.borders.top);
        let [bottom, bottom_color] = edge(&record.borders.bottom);

        StyleFingerprint([
            record.font.0 as u32,
            record.format as u32,
            record.horizontal.to_biff() as u32,
            record.vertical.to_biff() as u32,
            record.wrap_text as u32,
            record.shrink_to_fit as u32,
            record.indent as u32,
            // Rotation keeps its sign; 255 (vertical text) stays distinct.
            record.rotation as u16 as u32,
            left,
            left_color,
            right,
            right_color,
            top,
            top_color,
            bottom,
            bottom_color,
            record.fill.pattern.to_biff() as u32,
            record.fill.foreground as u32,
            record.fill.background as u32,
            record.locked as u32,
            record.hidden as u32,
            matches!(record.kind, XfKind::Style) as u32,
            0,
        ])
    }

    /// Record a line style requested for no edge
    pub fn with_pending_border(mut self, line: BorderLineStyle) -> Self {
        self.0[PENDING_BORDER] = line.to_biff() as u32;
        self
    }

    /// The encoded attributes, in canonical order
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl From<&StyleRecord> for StyleFingerprint {
    fn from(record: &StyleRecord) -> Self {
        Self::of(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use xlsbook_core::{
        BorderLineStyle, Borders, Fill, FontId, HorizontalAlignment, VerticalAlignment,
    };

    #[test]
    fn test_equal_records_equal_fingerprints() {
        let mut a = StyleRecord::new();
        a.font = FontId(5);
        a.borders = Borders::all(BorderLineStyle::Thin, 8);
        let b = a.clone();
        assert_eq!(StyleFingerprint::of(&a), StyleFingerprint::of(&b));
    }

    #[test]
    fn test_single_attribute_changes_discriminate() {
        let base = StyleRecord::new();
        let fp = StyleFingerprint::of(&base);

        let mutations: Vec<Box<dyn Fn(&mut StyleRecord)>> = vec![
            Box::new(|r| r.font = FontId(1)),
            Box::new(|r| r.format = 9),
            Box::new(|r| r.horizontal = HorizontalAlignment::Center),
            Box::new(|r| r.vertical = VerticalAlignment::Top),
            Box::new(|r| r.wrap_text = true),
            Box::new(|r| r.shrink_to_fit = true),
            Box::new(|r| r.indent = 1),
            Box::new(|r| r.rotation = -45),
            Box::new(|r| r.rotation = 255),
            Box::new(|r| r.borders.left.style = BorderLineStyle::Hair),
            Box::new(|r| r.borders.right.color = 10),
            Box::new(|r| r.borders.top.color = 10),
            Box::new(|r| r.borders.bottom.style = BorderLineStyle::Double),
            Box::new(|r| r.fill = Fill::solid(13)),
            Box::new(|r| r.fill.background = 9),
            Box::new(|r| r.locked = false),
            Box::new(|r| r.hidden = true),
        ];

        for (i, mutate) in mutations.iter().enumerate() {
            let mut changed = base.clone();
            mutate(&mut changed);
            assert_ne!(StyleFingerprint::of(&changed), fp, "mutation {i}");
        }
    }

    #[test]
    fn test_conversion_matches_of() {
        let mut record = StyleRecord::new();
        record.font = FontId(6);
        record.wrap_text = true;
        let fp = StyleFingerprint::from(&record);
        assert_eq!(fp, StyleFingerprint::of(&record));
        assert_eq!(fp.as_slice().len(), FIELDS);
        assert_eq!(fp.as_slice()[0], 6);
        assert_eq!(fp.as_slice()[PENDING_BORDER], 0);
    }

    #[test]
    fn test_pending_border_discriminates() {
        let record = StyleRecord::new();
        let plain = StyleFingerprint::of(&record);
        let thick = plain.with_pending_border(BorderLineStyle::Thick);
        assert_ne!(thick, plain);
        assert_ne!(thick, plain.with_pending_border(BorderLineStyle::Thin));
        assert_eq!(plain.with_pending_border(BorderLineStyle::None), plain);
    }

    #[test]
    fn test_rotation_sign_matters() {
        let mut up = StyleRecord::new();
        up.rotation = 45;
        let mut down = StyleRecord::new();
        down.rotation = -45;
        assert_ne!(StyleFingerprint::of(&up), StyleFingerprint::of(&down));
    }

    proptest! {
        #[test]
        fn prop_fingerprint_equality_matches_record_equality(
            font in 0u16..8,
            format in prop::sample::select(vec![0u16, 9, 14, 164]),
            rotation in -90i16..=90,
            border in 0u8..14,
            border_color in 8u16..64,
            fill in prop::option::of(8u16..64),
            wrap in any::<bool>(),
            other_rotation in -90i16..=90,
            other_border_color in 8u16..64,
        ) {
            let build = |rotation: i16, border_color: u16| {
                let mut r = StyleRecord::new();
                r.font = FontId(font);
                r.format = format;
                r.rotation = rotation;
                r.borders = Borders::all(BorderLineStyle::from_biff(border), border_color);
                if let Some(color) = fill {
                    r.fill = Fill::solid(color);
                }
                r.wrap_text = wrap;
                r
            };

            let a = build(rotation, border_color);
            let b = build(other_rotation, other_border_color);
            prop_assert_eq!(a == b, StyleFingerprint::of(&a) == StyleFingerprint::of(&b));
            prop_assert_eq!(StyleFingerprint::of(&a), StyleFingerprint::of(&a.clone()));
        }
    }
}
