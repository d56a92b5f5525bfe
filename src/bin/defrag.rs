use anyhow::{Context, Result};
use aoc2024::disk::{DiskMap, Strategy};
use aoc2024::solver::{Part, Report};
use aoc2024::{puzzles, read_input, solver};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Move single blocks from the end into the first free block.
    Blocks,
    /// Move whole files, highest id first, into the leftmost fitting gap.
    Files,
}

/// Disk compaction checksum.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the disk map, or `-` for stdin. Defaults to the registered input.
    input: Option<String>,
    #[clap(long, short = 's', value_enum, default_value = "blocks")]
    strategy: Mode,
    /// Print the block layout before and after compaction to stderr.
    #[clap(long, default_value_t = false)]
    trace: bool,
    #[clap(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let info = puzzles::get_puzzle("defrag").context("defrag is not registered")?;
    let path = puzzles::input_path(info, cli.input.as_deref());
    let input = read_input(&path)?;
    let map = DiskMap::parse(&input).with_context(|| format!("invalid disk map in {}", path))?;
    let (strategy, part) = match cli.strategy {
        Mode::Blocks => (Strategy::Blocks, Part::One),
        Mode::Files => (Strategy::Files, Part::Two),
    };

    let mut disk = map.expand();
    eprintln!("disk: {} files, {} blocks", map.file_count(), disk.len());
    if cli.trace {
        eprintln!("{}", disk.render());
    }
    let (moves, time) = solver::timed(|| disk.compact(strategy));
    if cli.trace {
        eprintln!("{}", disk.render());
    }
    eprintln!("!log moves {}", moves);

    let report = Report {
        puzzle: info.puzzle_name.to_string(),
        part,
        answer: disk.checksum(),
        time,
    };
    report.log();
    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report.answer);
    }
    Ok(())
}
