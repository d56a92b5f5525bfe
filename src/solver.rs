use crate::disk::{DiskMap, Strategy};
use crate::patrol::Lab;
use crate::*;
use anyhow::{Context, bail};
use serde::Serialize;

pub trait Puzzle {
    fn puzzle_name(&self) -> &str;
    fn part1(&self) -> u64;
    fn part2(&self) -> u64;
    fn solve(&self, part: Part) -> u64 {
        match part {
            Part::One => self.part1(),
            Part::Two => self.part2(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Part {
    One,
    Two,
}

impl TryFrom<u8> for Part {
    type Error = anyhow::Error;

    fn try_from(part: u8) -> anyhow::Result<Self> {
        match part {
            1 => Ok(Part::One),
            2 => Ok(Part::Two),
            _ => bail!("part must be 1 or 2, got {}", part),
        }
    }
}

/// Part 1 counts the cells the guard visits; part 2 counts loop-causing
/// obstacle positions.
pub struct PatrolPuzzle {
    lab: Lab,
}

impl PatrolPuzzle {
    pub fn new(input: &str) -> anyhow::Result<Self> {
        Ok(Self {
            lab: Lab::parse(input).context("invalid lab map")?,
        })
    }

    pub fn lab(&self) -> &Lab {
        &self.lab
    }
}

impl Puzzle for PatrolPuzzle {
    fn puzzle_name(&self) -> &str {
        "patrol"
    }
    fn part1(&self) -> u64 {
        self.lab.visited_cells() as u64
    }
    fn part2(&self) -> u64 {
        self.lab.count_loop_positions() as u64
    }
}

/// Part 1 is the single-block shift checksum, part 2 the whole-file one.
pub struct DefragPuzzle {
    map: DiskMap,
}

impl DefragPuzzle {
    pub fn new(input: &str) -> anyhow::Result<Self> {
        Ok(Self {
            map: DiskMap::parse(input).context("invalid disk map")?,
        })
    }

    pub fn checksum(&self, strategy: Strategy) -> u64 {
        let mut disk = self.map.expand();
        disk.compact(strategy);
        disk.checksum()
    }
}

impl Puzzle for DefragPuzzle {
    fn puzzle_name(&self) -> &str {
        "defrag"
    }
    fn part1(&self) -> u64 {
        self.checksum(Strategy::Blocks)
    }
    fn part2(&self) -> u64 {
        self.checksum(Strategy::Files)
    }
}

pub fn load_puzzle(name: &str, input: &str) -> anyhow::Result<Box<dyn Puzzle>> {
    let Some(info) = puzzles::get_puzzle(name) else {
        bail!("Unknown puzzle: {}", name);
    };
    let puzzle: Box<dyn Puzzle> = match info.puzzle_name {
        "patrol" => Box::new(PatrolPuzzle::new(input)?),
        "defrag" => Box::new(DefragPuzzle::new(input)?),
        other => bail!("No solver registered for {}", other),
    };
    Ok(puzzle)
}

/// One solved run, printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub puzzle: String,
    pub part: Part,
    pub answer: u64,
    /// Wall time in seconds.
    pub time: f64,
}

impl Report {
    pub fn log(&self) {
        eprintln!("!log answer {}", self.answer);
        eprintln!("!log time {:.3}", self.time);
        eprintln!("!log status AC");
    }
}

/// Runs `f` and returns its result with the elapsed wall time in seconds.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let stime = std::time::Instant::now();
    let ret = f();
    (ret, stime.elapsed().as_secs_f64())
}
