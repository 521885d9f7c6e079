//! Three-way district partitioning of a grid
//!
//! A split point is drawn inside the middle band of the grid. Cells at or
//! before it on both axes form one section, cells beyond it along the growth
//! axis a second, and the rest a third. Sections are then ranked by size and
//! the largest receives preset 0.

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::io::configuration::{PARTITION_LOWER_FRACTION, PARTITION_UPPER_FRACTION};
use crate::math::random::RandomSource;

/// Axis along which the second section extends past the split point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrowthAxis {
    /// Columns beyond the split point
    Horizontal,
    /// Rows beyond the split point
    Vertical,
}

/// Result of partitioning a `width × height` grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    split_point: (usize, usize),
    growth: GrowthAxis,
    /// Ranked section index per cell, indexed `[y, x]`
    sections: Array2<u8>,
    /// Cell count per ranked section
    section_sizes: [usize; 3],
}

impl Partition {
    /// Split point `(px, py)`
    pub const fn split_point(&self) -> (usize, usize) {
        self.split_point
    }

    /// Chosen growth axis
    pub const fn growth(&self) -> GrowthAxis {
        self.growth
    }

    /// Ranked section (0 = largest) of the cell at `(x, y)`
    pub fn section_index(&self, x: usize, y: usize) -> Option<usize> {
        self.sections.get([y, x]).map(|&section| usize::from(section))
    }

    /// Number of cells in each ranked section
    pub const fn section_sizes(&self) -> [usize; 3] {
        self.section_sizes
    }

    /// Initial candidates for the cell at `(x, y)` given three presets
    pub fn candidates_for<'a>(&self, x: usize, y: usize, presets: &'a [TileBitset]) -> Option<&'a TileBitset> {
        self.section_index(x, y)
            .and_then(|section| presets.get(section))
    }
}

/// Splits grids into three ranked sections
pub struct GridPartitioner;

impl GridPartitioner {
    /// Partition a `width × height` grid using draws from `rng`
    ///
    /// Draw order is fixed: split `x`, split `y`, then the axis draw for
    /// square grids only.
    pub fn partition<R: RandomSource + ?Sized>(width: usize, height: usize, rng: &mut R) -> Partition {
        let split_x = Self::draw_split(width, rng);
        let split_y = Self::draw_split(height, rng);
        let growth = Self::choose_growth(width, height, rng);

        let raw = Array2::from_shape_fn((height, width), |(y, x)| {
            Self::classify(x, y, (split_x, split_y), growth)
        });

        let mut raw_sizes = [0usize; 3];
        for &section in &raw {
            if let Some(size) = raw_sizes.get_mut(usize::from(section)) {
                *size += 1;
            }
        }

        // Ascending stable sort then reverse: equal-sized sections rank later-first
        let mut order = [0u8, 1, 2];
        order.sort_by_key(|&section| raw_sizes.get(usize::from(section)).copied().unwrap_or(0));
        order.reverse();

        let mut rank_of = [0u8; 3];
        let mut section_sizes = [0usize; 3];
        for (rank, &section) in order.iter().enumerate() {
            if let Some(slot) = rank_of.get_mut(usize::from(section)) {
                *slot = rank as u8;
            }
            if let Some(size) = section_sizes.get_mut(rank) {
                *size = raw_sizes.get(usize::from(section)).copied().unwrap_or(0);
            }
        }

        let sections = raw.mapv(|section| rank_of.get(usize::from(section)).copied().unwrap_or(0));

        tracing::debug!(
            split_x,
            split_y,
            ?growth,
            ?section_sizes,
            "grid partitioned into districts"
        );

        Partition {
            split_point: (split_x, split_y),
            growth,
            sections,
            section_sizes,
        }
    }

    fn draw_split<R: RandomSource + ?Sized>(extent: usize, rng: &mut R) -> usize {
        let extent = extent as f64;
        let lower = (extent * PARTITION_LOWER_FRACTION).floor() as u32;
        let upper = (extent * PARTITION_UPPER_FRACTION).round_ties_even() as u32;
        rng.next_in_range(lower, upper.max(lower)) as usize
    }

    fn choose_growth<R: RandomSource + ?Sized>(width: usize, height: usize, rng: &mut R) -> GrowthAxis {
        match width.cmp(&height) {
            std::cmp::Ordering::Greater => GrowthAxis::Horizontal,
            std::cmp::Ordering::Less => GrowthAxis::Vertical,
            std::cmp::Ordering::Equal => {
                if rng.next_in_range(0, 1) == 1 {
                    GrowthAxis::Vertical
                } else {
                    GrowthAxis::Horizontal
                }
            }
        }
    }

    const fn classify(x: usize, y: usize, split: (usize, usize), growth: GrowthAxis) -> u8 {
        let (split_x, split_y) = split;
        if x <= split_x && y <= split_y {
            0
        } else if (x > split_x && matches!(growth, GrowthAxis::Horizontal))
            || (y > split_y && matches!(growth, GrowthAxis::Vertical))
        {
            1
        } else {
            2
        }
    }
}
