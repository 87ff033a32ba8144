//! Wheel geometry. Angles are in degrees, measured clockwise from the top of
//! the wheel, which is where the pointer sits.

use palette::Srgb;

pub const FULL_TURN: f64 = 360.0;
pub const LABEL_RADIUS_FACTOR: f64 = 0.6;
pub const DRAFT_LABEL: &str = "Option";
pub const DRAFT_SECTORS: usize = 10;

pub const PALETTE: [Srgb<u8>; 10] = [
    Srgb::new(0xFF, 0x44, 0x44),
    Srgb::new(0x33, 0xCC, 0x33),
    Srgb::new(0x33, 0x66, 0xCC),
    Srgb::new(0xFF, 0xCC, 0x00),
    Srgb::new(0xCC, 0x33, 0xCC),
    Srgb::new(0x00, 0xCC, 0xCC),
    Srgb::new(0xFF, 0x99, 0x33),
    Srgb::new(0x66, 0xCC, 0x99),
    Srgb::new(0x99, 0x33, 0xFF),
    Srgb::new(0xFF, 0x66, 0x66),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub index: usize,
    pub label: String,
    pub start: f64,
    pub sweep: f64,
    pub color: Srgb<u8>,
}

impl Sector {
    pub fn end(&self) -> f64 {
        self.start + self.sweep
    }

    pub fn mid(&self) -> f64 {
        self.start + self.sweep / 2.0
    }

    /// Label position relative to the wheel center, screen axes (y grows down).
    pub fn label_anchor(&self, radius: f64) -> (f64, f64) {
        let distance = radius * LABEL_RADIUS_FACTOR;
        let mid = self.mid().to_radians();
        (mid.sin() * distance, -mid.cos() * distance)
    }

    /// Rotation for the label text. Labels run along the radius and are
    /// flipped on the left half so they never read upside down.
    pub fn label_rotation(&self) -> f64 {
        let mid = self.mid();
        if mid < FULL_TURN / 2.0 {
            mid - 90.0
        } else {
            mid + 90.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelLayout {
    pub sectors: Vec<Sector>,
    pub draft: bool,
}

impl WheelLayout {
    pub fn new(labels: Vec<String>) -> Self {
        let count = labels.len();
        let sweep = if count == 0 {
            0.0
        } else {
            FULL_TURN / count as f64
        };

        let sectors = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| Sector {
                index,
                label,
                start: index as f64 * sweep,
                sweep,
                color: PALETTE[index % PALETTE.len()],
            })
            .collect();

        Self {
            sectors,
            draft: false,
        }
    }

    /// Placeholder wheel shown before any usable search.
    pub fn draft() -> Self {
        Self {
            draft: true,
            ..Self::new(vec![DRAFT_LABEL.to_string(); DRAFT_SECTORS])
        }
    }

    /// A wheel of `labels`, or the draft when there are none.
    pub fn for_labels(labels: Vec<String>) -> Self {
        if labels.is_empty() {
            Self::draft()
        } else {
            Self::new(labels)
        }
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}

/// Index of the sector under the pointer once an `n`-sector wheel has turned
/// `rotation` degrees clockwise.
pub fn sector_under_pointer(n: usize, rotation: f64) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let sweep = FULL_TURN / n as f64;
    let angle = (-rotation).rem_euclid(FULL_TURN);
    Some(((angle / sweep).floor() as usize).min(n - 1))
}
