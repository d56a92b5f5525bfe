use anyhow::{Context, Result};
use aoc2024::solver::{self, Part, Report};
use aoc2024::{puzzles, read_input};
use clap::Parser;

/// Runs any registered puzzle.
#[derive(Parser, Debug)]
struct Cli {
    /// Puzzle name (`patrol` or `defrag`).
    puzzle: String,
    #[clap(long, short = 'p', default_value_t = 1)]
    part: u8,
    /// Input path, or `-` for stdin. Defaults to the registered input.
    #[clap(long, short = 'i')]
    input: Option<String>,
    #[clap(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let info = puzzles::get_puzzle(&cli.puzzle).with_context(|| {
        let known = puzzles::all_puzzles()
            .iter()
            .map(|p| p.puzzle_name)
            .collect::<Vec<_>>();
        format!("Unknown puzzle: {} (known: {:?})", cli.puzzle, known)
    })?;
    let part = Part::try_from(cli.part)?;
    let input = read_input(&puzzles::input_path(info, cli.input.as_deref()))?;
    let puzzle = solver::load_puzzle(info.puzzle_name, &input)?;

    let (answer, time) = solver::timed(|| puzzle.solve(part));
    let report = Report {
        puzzle: puzzle.puzzle_name().to_string(),
        part,
        answer,
        time,
    };
    report.log();
    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", answer);
    }
    Ok(())
}
