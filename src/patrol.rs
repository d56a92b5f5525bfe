//! # Guard Patrol
//!
//! A guard walks a rectangular lab grid. Each step it looks at the cell in
//! front of it: off the grid ends the walk, an obstacle turns it 90 degrees
//! clockwise in place, anything else is stepped onto.
//!
//! The interesting question is which single added obstacle traps the guard in
//! a cycle. Every candidate cell is a *trial*: the base grid stays untouched
//! and the extra obstacle is supplied as a [`Patch`] that lookups consult
//! first. Each trial owns its own visited-state set.

use crate::error::LabError;
use crate::*;
use rustc_hash::FxHashSet;

/// Facing of the guard. The discriminants encode the clockwise rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

pub const DIRS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

const GLYPHS: [char; 4] = ['^', '>', 'v', '<'];

impl Direction {
    pub fn from_glyph(ch: char) -> Option<Self> {
        GLYPHS.iter().position(|&g| g == ch).map(|i| DIRS[i])
    }

    pub fn glyph(self) -> char {
        GLYPHS[self as usize]
    }

    /// 90 degrees clockwise: Up -> Right -> Down -> Left -> Up.
    pub fn turn_right(self) -> Self {
        DIRS[(self as usize + 1) & 3]
    }

    /// (row, column) offset of one step forward.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    pub row: usize,
    pub col: usize,
    pub dir: Direction,
}

impl State {
    pub fn cell(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// At most one extra obstacle laid over the base grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Patch(Option<(usize, usize)>);

impl Patch {
    pub const NONE: Patch = Patch(None);

    pub fn at(row: usize, col: usize) -> Self {
        Patch(Some((row, col)))
    }

    pub fn cell(&self) -> Option<(usize, usize)> {
        self.0
    }
}

/// How a walk ended. `steps` counts moves and turns taken before the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exited { steps: usize },
    Looped { steps: usize },
}

impl Outcome {
    pub fn is_loop(&self) -> bool {
        matches!(self, Outcome::Looped { .. })
    }

    pub fn steps(&self) -> usize {
        match *self {
            Outcome::Exited { steps } | Outcome::Looped { steps } => steps,
        }
    }
}

/// Which empty cells are worth trying as the added obstacle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pruning {
    /// Every empty cell except the start.
    None,
    /// Only cells on the guard's unmodified path. An obstacle anywhere else is
    /// never reached and cannot change the walk. If the unmodified walk
    /// already loops, every off-path cell keeps it looping, so this falls
    /// back to every empty cell.
    #[default]
    Path,
}

/// Result of trying every candidate obstacle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Survey {
    /// Loop-causing cells in row-major order.
    pub positions: Vec<(usize, usize)>,
    pub trials: usize,
    /// Longest walk (in steps) seen in any trial.
    pub max_steps: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lab {
    rows: usize,
    cols: usize,
    blocked: Vec<Vec<bool>>,
    start: State,
}

impl Lab {
    /// Parses equal-width rows over `.#^>v<` containing exactly one guard.
    ///
    /// Blank lines around the map are ignored and each row is trimmed.
    pub fn parse(input: &str) -> Result<Self, LabError> {
        let lines = input
            .trim()
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>();
        if lines.is_empty() {
            return Err(LabError::Empty);
        }
        let rows = lines.len();
        let cols = lines[0].chars().count();
        let mut blocked = mat![false; rows; cols];
        let mut start = None;
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(LabError::Ragged {
                    row,
                    width,
                    expected: cols,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '.' => {}
                    '#' => blocked[row][col] = true,
                    _ => {
                        let dir = Direction::from_glyph(ch)
                            .ok_or(LabError::BadCell { ch, row, col })?;
                        if start.is_some() {
                            return Err(LabError::ExtraGuard { row, col });
                        }
                        start = Some(State { row, col, dir });
                    }
                }
            }
        }
        Ok(Self {
            rows,
            cols,
            blocked,
            start: start.ok_or(LabError::NoGuard)?,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> State {
        self.start
    }

    /// True for an original obstacle or the patch cell.
    pub fn is_blocked(&self, patch: Patch, row: usize, col: usize) -> bool {
        patch.cell() == Some((row, col)) || self.blocked[row][col]
    }

    fn ahead(&self, state: State) -> Option<(usize, usize)> {
        let (dr, dc) = state.dir.delta();
        let row = state.row.checked_add_signed(dr)?;
        let col = state.col.checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    /// One transition of the guard. `None` once the next step leaves the grid.
    pub fn step(&self, patch: Patch, state: State) -> Option<State> {
        let (row, col) = self.ahead(state)?;
        if self.is_blocked(patch, row, col) {
            Some(State {
                dir: state.dir.turn_right(),
                ..state
            })
        } else {
            Some(State { row, col, ..state })
        }
    }

    /// States of the walk, starting with the initial one.
    ///
    /// The iterator ends when the guard leaves the grid and never ends for a
    /// looping walk; use [`Lab::run`] to classify a walk.
    pub fn walk(&self, patch: Patch) -> Walk<'_> {
        Walk {
            lab: self,
            patch,
            next: Some(self.start),
        }
    }

    /// Walks until the guard exits or a `(row, col, dir)` state repeats.
    pub fn run(&self, patch: Patch) -> Outcome {
        let mut seen = FxHashSet::default();
        let mut steps = 0;
        for state in self.walk(patch) {
            if !seen.insert(state) {
                return Outcome::Looped { steps };
            }
            steps += 1;
        }
        Outcome::Exited { steps: steps - 1 }
    }

    /// Distinct cells of the unmodified walk in order of first visit,
    /// stopping at the exit or at the first repeated state.
    pub fn path(&self) -> Vec<(usize, usize)> {
        let mut seen = FxHashSet::default();
        let mut cells = FxHashSet::default();
        let mut path = vec![];
        for state in self.walk(Patch::NONE) {
            if !seen.insert(state) {
                break;
            }
            if cells.insert(state.cell()) {
                path.push(state.cell());
            }
        }
        path
    }

    pub fn visited_cells(&self) -> usize {
        self.path().len()
    }

    /// Candidate obstacle cells in row-major order. Never includes an
    /// obstacle or the guard's start.
    pub fn candidates(&self, pruning: Pruning) -> Vec<(usize, usize)> {
        let mut cells = match pruning {
            Pruning::None => (0..self.rows)
                .flat_map(|r| (0..self.cols).map(move |c| (r, c)))
                .filter(|&(r, c)| !self.blocked[r][c])
                .collect::<Vec<_>>(),
            Pruning::Path if !self.run(Patch::NONE).is_loop() => self.path(),
            Pruning::Path => return self.candidates(Pruning::None),
        };
        cells.retain(|&cell| cell != self.start.cell());
        cells.sort_unstable();
        cells
    }

    /// One trial. Cells outside the grid, obstacles and the start never count.
    pub fn causes_loop(&self, (row, col): (usize, usize)) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        if self.blocked[row][col] || (row, col) == self.start.cell() {
            return false;
        }
        self.run(Patch::at(row, col)).is_loop()
    }

    /// Runs every trial, calling `progress(done, total)` after each one.
    pub fn survey(&self, pruning: Pruning, mut progress: impl FnMut(usize, usize)) -> Survey {
        let candidates = self.candidates(pruning);
        let total = candidates.len();
        let mut survey = Survey {
            trials: total,
            ..Survey::default()
        };
        for (i, &(row, col)) in candidates.iter().enumerate() {
            let outcome = self.run(Patch::at(row, col));
            survey.max_steps.setmax(outcome.steps());
            if outcome.is_loop() {
                survey.positions.push((row, col));
            }
            progress(i + 1, total);
        }
        survey
    }

    pub fn loop_positions(&self) -> Vec<(usize, usize)> {
        self.survey(Pruning::default(), |_, _| {}).positions
    }

    pub fn count_loop_positions(&self) -> usize {
        self.loop_positions().len()
    }
}

pub struct Walk<'a> {
    lab: &'a Lab,
    patch: Patch,
    next: Option<State>,
}

impl Iterator for Walk<'_> {
    type Item = State;

    fn next(&mut self) -> Option<State> {
        let current = self.next?;
        self.next = self.lab.step(self.patch, current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...";

    // The guard circles a 3x2 block forever without any added obstacle.
    const CLOSED: &str = "\
.#...
.^..#
#....
...#.";

    fn naive_causes_loop(input: &str, (row, col): (usize, usize)) -> bool {
        let mut grid = input
            .lines()
            .map(|l| l.chars().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        if grid[row][col] != '.' {
            return false;
        }
        grid[row][col] = '#';
        let text = grid
            .iter()
            .map(|r| r.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        Lab::parse(&text).unwrap().run(Patch::NONE).is_loop()
    }

    #[test]
    fn rotation_order_is_clockwise() {
        let mut d = Direction::Up;
        let mut seen = vec![];
        for _ in 0..4 {
            seen.push(d);
            d = d.turn_right();
        }
        assert_eq!(seen, DIRS.to_vec());
        assert_eq!(d, Direction::Up);
        assert_eq!(Direction::Left.turn_right(), Direction::Up);
    }

    #[test]
    fn parse_sample() {
        let lab = Lab::parse(SAMPLE).unwrap();
        assert_eq!((lab.rows(), lab.cols()), (10, 10));
        assert_eq!(
            lab.start(),
            State {
                row: 6,
                col: 4,
                dir: Direction::Up
            }
        );
        assert!(lab.is_blocked(Patch::NONE, 0, 4));
        assert!(!lab.is_blocked(Patch::NONE, 0, 0));
        assert!(lab.is_blocked(Patch::at(0, 0), 0, 0));
    }

    #[test]
    fn parse_rejects_malformed_maps() {
        assert_eq!(Lab::parse("\n  \n"), Err(LabError::Empty));
        assert_eq!(
            Lab::parse("^..\n.."),
            Err(LabError::Ragged {
                row: 1,
                width: 2,
                expected: 3
            })
        );
        assert_eq!(
            Lab::parse("^.x"),
            Err(LabError::BadCell {
                ch: 'x',
                row: 0,
                col: 2
            })
        );
        assert_eq!(Lab::parse("...\n.#."), Err(LabError::NoGuard));
        assert_eq!(
            Lab::parse("^..\n..<"),
            Err(LabError::ExtraGuard { row: 1, col: 2 })
        );
    }

    #[test]
    fn sample_visits_41_cells() {
        let lab = Lab::parse(SAMPLE).unwrap();
        assert_eq!(lab.visited_cells(), 41);
        assert!(!lab.run(Patch::NONE).is_loop());
    }

    #[test]
    fn sample_has_six_loop_positions() {
        let lab = Lab::parse(SAMPLE).unwrap();
        assert_eq!(lab.count_loop_positions(), 6);
        assert_eq!(
            lab.loop_positions(),
            vec![(6, 3), (7, 6), (7, 7), (8, 1), (8, 3), (9, 7)]
        );
    }

    #[test]
    fn pruning_does_not_change_the_answer() {
        let lab = Lab::parse(SAMPLE).unwrap();
        let full = lab.survey(Pruning::None, |_, _| {});
        let pruned = lab.survey(Pruning::Path, |_, _| {});
        assert_eq!(full.positions, pruned.positions);
        assert!(pruned.trials < full.trials);
        // 92 open cells minus the start
        assert_eq!(full.trials, 91);
        assert_eq!(pruned.trials, 40);
    }

    #[test]
    fn candidates_skip_start_and_obstacles() {
        let lab = Lab::parse(SAMPLE).unwrap();
        for pruning in [Pruning::None, Pruning::Path] {
            for (r, c) in lab.candidates(pruning) {
                assert!(!lab.is_blocked(Patch::NONE, r, c));
                assert_ne!((r, c), (6, 4));
            }
        }
        assert!(!lab.causes_loop((6, 4)));
        assert!(!lab.causes_loop((0, 4)));
        assert!(!lab.causes_loop((10, 0)));
    }

    #[test]
    fn progress_reports_every_trial() {
        let lab = Lab::parse(SAMPLE).unwrap();
        let mut calls = vec![];
        let survey = lab.survey(Pruning::Path, |done, total| calls.push((done, total)));
        assert_eq!(calls.len(), survey.trials);
        assert_eq!(calls.last(), Some(&(survey.trials, survey.trials)));
        assert!(survey.max_steps > 0);
    }

    #[test]
    fn closed_loop_without_patch() {
        let lab = Lab::parse(CLOSED).unwrap();
        assert_eq!(lab.run(Patch::NONE), Outcome::Looped { steps: 10 });
        assert_eq!(
            lab.path(),
            vec![(1, 1), (1, 2), (1, 3), (2, 3), (2, 2), (2, 1)]
        );
    }

    #[test]
    fn closed_loop_counts_off_path_cells() {
        let lab = Lab::parse(CLOSED).unwrap();
        let expected = lab
            .candidates(Pruning::None)
            .into_iter()
            .filter(|&cell| naive_causes_loop(CLOSED, cell))
            .collect::<Vec<_>>();
        assert_eq!(expected.len(), 10);
        assert_eq!(lab.count_loop_positions(), expected.len());
        assert_eq!(lab.candidates(Pruning::Path), lab.candidates(Pruning::None));
        let full = lab.survey(Pruning::None, |_, _| {});
        let pruned = lab.survey(Pruning::Path, |_, _| {});
        assert_eq!(full.positions, expected);
        assert_eq!(pruned.positions, expected);
        // (3, 0) is never reached, so the walk keeps looping.
        assert!(lab.causes_loop((3, 0)));
    }

    #[test]
    fn immediate_exit_has_no_loops() {
        let lab = Lab::parse("^..\n...\n.#.").unwrap();
        assert_eq!(lab.run(Patch::NONE), Outcome::Exited { steps: 0 });
        assert_eq!(lab.visited_cells(), 1);
        assert!(lab.survey(Pruning::None, |_, _| {}).positions.is_empty());
    }

    #[test]
    fn walk_turns_before_moving() {
        let lab = Lab::parse(".#.\n.^.\n...").unwrap();
        let states = lab.walk(Patch::NONE).take(3).collect::<Vec<_>>();
        assert_eq!(
            states,
            vec![
                State {
                    row: 1,
                    col: 1,
                    dir: Direction::Up
                },
                State {
                    row: 1,
                    col: 1,
                    dir: Direction::Right
                },
                State {
                    row: 1,
                    col: 2,
                    dir: Direction::Right
                },
            ]
        );
    }

    #[test]
    fn matches_grid_copy_simulation_on_random_labs() {
        for seed in 0..8 {
            let input = mapgen::random::generate_lab(12, 14, 0.15, seed);
            let lab = Lab::parse(&input).unwrap();
            let expected = lab
                .candidates(Pruning::None)
                .into_iter()
                .filter(|&cell| naive_causes_loop(&input, cell))
                .collect::<Vec<_>>();
            assert_eq!(lab.loop_positions(), expected, "seed {}", seed);
        }
    }
}
