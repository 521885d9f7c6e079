//! Built-in example models for the three city districts
//!
//! Each district is a small hand-drawn example. Districts share some tile
//! names (`grass`, `road`, `path`) so that a merged city catalog can join
//! them at their borders.
//!
//! Every example shows grass on all four sides of each of its tiles, and the
//! residential example does the same for yards.

use crate::analysis::model::{CompiledModels, ExampleGrid, compile_example, merge};
use crate::io::error::Result;
use crate::spatial::catalog::TileCatalog;

/// Character used for each tile name in examples and rendered output
pub const LEGEND: &[(char, &str)] = &[
    ('g', "grass"),
    ('T', "tree"),
    ('~', "water"),
    ('.', "path"),
    ('=', "road"),
    ('#', "office"),
    ('p', "plaza"),
    ('h', "house"),
    ('y', "yard"),
];

const PARK: &[&str] = &[
    "TTggg..gg",
    "Tggg~~.gT",
    "gg~~~~.gg",
    "gg~~~g.gT",
    "........g",
    "gTgg.gggg",
];

const BUSINESS: &[&str] = &[
    "##=##=##",
    "##=##=##",
    "========",
    "##=pp=##",
    "##=pp=##",
    "========",
    "g.=##=.g",
    "gggggggg",
    "g#gpg=gg",
    "ggggggg.",
    "gggggggg",
];

const RESIDENTIAL: &[&str] = &[
    "yyyyyyyyy",
    "yhhyhhy=y",
    "yhhyhhy=y",
    "yyyyyyy=y",
    "=========",
    "yyy.yyyyy",
    "ygy.yhhy.",
    "yyyyyhhyy",
    "hhy=yhhyy",
    "yyy=yyyyy",
    "=========",
    "hgy=yghyy",
    "yyy=yyyyy",
    "gg.=.ggyy",
    "ggggggggg",
    "g=g.ghgyg",
    "ggggggggg",
];

/// One built-in district
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum District {
    /// Grass, trees, a pond and footpaths
    Park,
    /// Office blocks and plazas on a road grid
    Business,
    /// Houses with yards along roads
    Residential,
}

impl District {
    /// Every district in preset order
    pub const ALL: [Self; 3] = [Self::Park, Self::Business, Self::Residential];

    /// Example rows, one character per cell
    pub const fn rows(self) -> &'static [&'static str] {
        match self {
            Self::Park => PARK,
            Self::Business => BUSINESS,
            Self::Residential => RESIDENTIAL,
        }
    }

    /// Parsed example grid
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in rows are malformed
    pub fn example(self) -> Result<ExampleGrid> {
        ExampleGrid::from_rows(self.rows(), LEGEND)
    }

    /// Catalog compiled from this district alone
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in rows are malformed
    pub fn catalog(self) -> Result<TileCatalog> {
        compile_example(&self.example()?)
    }
}

/// Merged catalog of all districts with one preset per district
///
/// # Errors
///
/// Returns an error if the built-in rows are malformed
pub fn city() -> Result<CompiledModels> {
    let examples = District::ALL
        .into_iter()
        .map(District::example)
        .collect::<Result<Vec<_>>>()?;
    merge(&examples)
}

/// Display character for a tile name, `?` if unknown
pub fn glyph_of(name: &str) -> char {
    LEGEND
        .iter()
        .find(|&&(_, tile)| tile == name)
        .map_or('?', |&(glyph, _)| glyph)
}
