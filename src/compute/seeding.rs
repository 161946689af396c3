//! Building the first board of a run.

use log::{debug, warn};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::{SliceRandom, index};

use super::{Board, Cell, LocalRule};
use crate::schema::{InitialState, PRESETS, Preset, SeedError, find_preset, preset_names};

/// Build an initial board for `rule` from `initial`.
///
/// Every state on the returned board is inside the rule's alphabet.
pub fn seed_board(
    initial: &InitialState,
    rule: &dyn LocalRule,
    height: usize,
    width: usize,
    rng: &mut StdRng,
) -> Result<Board, SeedError> {
    match initial {
        InitialState::Named { name } => {
            let preset = find_preset(name).ok_or_else(|| SeedError::UnknownPreset {
                name: name.clone(),
                available: preset_names(),
            })?;
            place_preset(preset, rule, height, width)
        }
        InitialState::AnyPreset => {
            let fitting: Vec<&Preset> = PRESETS
                .iter()
                .filter(|p| p.cells().iter().all(|&(_, _, s)| (s as usize) < rule.alphabet()))
                .collect();
            if fitting.is_empty() {
                return Err(SeedError::UnknownPreset {
                    name: "<any>".to_string(),
                    available: preset_names(),
                });
            }
            let preset = fitting[rng.gen_range(0..fitting.len())];
            debug!("Picked preset {:?}", preset.name);
            place_preset(preset, rule, height, width)
        }
        InitialState::Literal { rows } => {
            let board = grid(rows, height, width)?;
            check_alphabet(&board, rule)?;
            Ok(board)
        }
        InitialState::Occupancy { rows } => {
            let mask = grid(rows, height, width)?;
            let mut occupied: Vec<usize> = (0..mask.cell_count())
                .filter(|&i| mask.cells()[i] != 0)
                .collect();
            // Palette order must not follow board order (BML red/blue halves).
            occupied.shuffle(rng);
            let mut board = Board::new(height, width, 0);
            fill(&mut board, &occupied, rule, rng);
            Ok(board)
        }
        InitialState::Random { density } => {
            let total = height * width;
            let count = ((total as f64) * f64::from((*density).clamp(0.0, 1.0))).floor() as usize;
            // Sampled indices come back shuffled, so palette order is random.
            let picked = index::sample(rng, total, count.min(total)).into_vec();
            let mut board = Board::new(height, width, 0);
            fill(&mut board, &picked, rule, rng);
            Ok(board)
        }
        InitialState::Center { state } => {
            let mut board = Board::new(height, width, 0);
            let (row, col) = (height / 2, width / 2);
            check_state(row, col, *state, rule)?;
            board.set(row as isize, col as isize, *state);
            Ok(board)
        }
    }
}

fn place_preset(
    preset: &Preset,
    rule: &dyn LocalRule,
    height: usize,
    width: usize,
) -> Result<Board, SeedError> {
    let mut board = Board::new(height, width, 0);
    for (row, col, state) in preset.cells() {
        if row >= height || col >= width {
            warn!(
                "Preset {:?} cell ({row}, {col}) is outside the {height}x{width} board, skipping",
                preset.name
            );
            continue;
        }
        check_state(row, col, state, rule)?;
        board.set(row as isize, col as isize, state);
    }
    Ok(board)
}

/// Give each listed cell a state from the rule's seeding palette.
fn fill(board: &mut Board, indices: &[usize], rule: &dyn LocalRule, rng: &mut StdRng) {
    let total = indices.len();
    for (n, &i) in indices.iter().enumerate() {
        board.cells_mut()[i] = rule.seed_state(n, total, rng);
    }
}

fn grid(rows: &[Vec<Cell>], height: usize, width: usize) -> Result<Board, SeedError> {
    let board = Board::from_rows(rows).ok_or(SeedError::RaggedGrid)?;
    if board.height() != height || board.width() != width {
        return Err(SeedError::ShapeMismatch {
            rows: board.height(),
            cols: board.width(),
            height,
            width,
        });
    }
    Ok(board)
}

fn check_alphabet(board: &Board, rule: &dyn LocalRule) -> Result<(), SeedError> {
    for (row, cells) in board.rows().enumerate() {
        for (col, &state) in cells.iter().enumerate() {
            check_state(row, col, state, rule)?;
        }
    }
    Ok(())
}

fn check_state(row: usize, col: usize, state: Cell, rule: &dyn LocalRule) -> Result<(), SeedError> {
    let alphabet = rule.alphabet();
    if state as usize >= alphabet {
        return Err(SeedError::StateOutOfRange {
            row,
            col,
            state,
            alphabet,
        });
    }
    Ok(())
}
