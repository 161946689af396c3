//! Named starting patterns, laid out for a 34x9 panel.

use crate::compute::Cell;

/// Cells a preset switches on.
#[derive(Debug, Clone, Copy)]
pub enum PresetCells {
    /// `(row, col)` pairs set to state 1.
    Live(&'static [(usize, usize)]),
    /// `(row, col, state)` triples.
    States(&'static [(usize, usize, Cell)]),
}

/// A named starting pattern.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub cells: PresetCells,
}

impl Preset {
    /// `(row, col, state)` for every cell the pattern sets.
    pub fn cells(&self) -> Vec<(usize, usize, Cell)> {
        match self.cells {
            PresetCells::Live(coords) => coords.iter().map(|&(r, c)| (r, c, 1)).collect(),
            PresetCells::States(cells) => cells.to_vec(),
        }
    }
}

pub const PRESETS: &[Preset] = &[
    // Oscillators
    Preset {
        name: "blinker",
        description: "The simplest period-2 oscillator",
        cells: PresetCells::Live(&[(17, 3), (17, 4), (17, 5)]),
    },
    Preset {
        name: "toad",
        description: "A period-2 oscillator",
        cells: PresetCells::Live(&[(17, 3), (17, 4), (17, 5), (18, 2), (18, 3), (18, 4)]),
    },
    Preset {
        name: "pentadecathlon",
        description: "A period-15 oscillator that fits the panel width",
        cells: PresetCells::Live(&[
            (12, 4),
            (13, 4),
            (14, 2),
            (14, 4),
            (14, 6),
            (15, 4),
            (16, 4),
            (17, 4),
            (18, 4),
            (19, 2),
            (19, 4),
            (19, 6),
            (20, 4),
            (21, 4),
        ]),
    },
    // Spaceships
    Preset {
        name: "glider",
        description: "Travels diagonally, wrapping forever",
        cells: PresetCells::Live(&[(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]),
    },
    Preset {
        name: "lwss",
        description: "Lightweight spaceship; wraps the 9-column width quickly",
        cells: PresetCells::Live(&[
            (17, 3),
            (17, 5),
            (18, 2),
            (19, 2),
            (19, 5),
            (20, 2),
            (20, 3),
            (20, 4),
            (20, 5),
        ]),
    },
    // Methuselahs
    Preset {
        name: "r_pentomino",
        description: "Stabilizes after 1103 generations on an unbounded plane",
        cells: PresetCells::Live(&[(17, 4), (17, 5), (18, 3), (18, 4), (19, 4)]),
    },
    Preset {
        name: "diehard",
        description: "Dies after 130 generations on an unbounded plane",
        cells: PresetCells::Live(&[
            (17, 7),
            (18, 1),
            (18, 2),
            (19, 2),
            (19, 5),
            (19, 6),
            (19, 7),
        ]),
    },
    Preset {
        name: "acorn",
        description: "Runs for 5206 generations on an unbounded plane",
        cells: PresetCells::Live(&[
            (17, 2),
            (18, 4),
            (19, 1),
            (19, 2),
            (19, 5),
            (19, 6),
            (19, 7),
        ]),
    },
    // Still lifes
    Preset {
        name: "block",
        description: "The simplest still life",
        cells: PresetCells::Live(&[(17, 3), (17, 4), (18, 3), (18, 4)]),
    },
    Preset {
        name: "beehive",
        description: "A common still life",
        cells: PresetCells::Live(&[(17, 3), (17, 4), (18, 2), (18, 5), (19, 3), (19, 4)]),
    },
    // Lattice gas
    Preset {
        name: "collision",
        description: "HPP: a north/south pair beside an east/west pair",
        cells: PresetCells::States(&[(17, 4, 0b1100), (17, 3, 0b0011)]),
    },
];

/// Look up a preset by name. Case and `-`/`_` are not significant.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    let wanted = name.trim().to_ascii_lowercase().replace('-', "_");
    PRESETS.iter().find(|p| p.name == wanted)
}

/// Names of every preset, in table order.
pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.name).collect()
}
