use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleInfo {
    pub puzzle_name: &'static str,
    pub day: u32,
    /// Where the input is read from when no path is given.
    pub default_input: &'static str,
}

const PUZZLES_DATA: &[PuzzleInfo] = &[
    PuzzleInfo {
        puzzle_name: "patrol",
        day: 6,
        default_input: "input/day06.txt",
    },
    PuzzleInfo {
        puzzle_name: "defrag",
        day: 9,
        default_input: "input/day09.txt",
    },
];

pub fn all_puzzles() -> &'static [PuzzleInfo] {
    PUZZLES_DATA
}

// Build a name -> puzzle map once for O(1) lookup.
static PUZZLE_MAP: Lazy<HashMap<&'static str, &'static PuzzleInfo>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for p in PUZZLES_DATA.iter() {
        m.insert(p.puzzle_name, p);
    }
    m
});

pub fn get_puzzle(name: &str) -> Option<&'static PuzzleInfo> {
    PUZZLE_MAP.get(name).copied()
}

/// The explicit path if one was given, otherwise the puzzle's default input.
pub fn input_path(info: &PuzzleInfo, explicit: Option<&str>) -> String {
    explicit.unwrap_or(info.default_input).to_string()
}
