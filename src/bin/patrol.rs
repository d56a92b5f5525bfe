use anyhow::{Context, Result};
use aoc2024::patrol::{Lab, Pruning};
use aoc2024::solver::{Part, Report};
use aoc2024::{puzzles, read_input, solver};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

/// Guard patrol: visited cells (part 1) or loop-causing obstacles (part 2).
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the lab map, or `-` for stdin. Defaults to the registered input.
    input: Option<String>,
    #[clap(long, short = 'p', default_value_t = 2)]
    part: u8,
    /// Try every empty cell instead of only the cells on the guard's path.
    #[clap(long, default_value_t = false)]
    all_cells: bool,
    /// Show a progress bar over the obstacle trials.
    #[clap(long, default_value_t = false)]
    progress: bool,
    /// Write an SVG picture of the patrol and the loop-causing cells.
    #[clap(long)]
    svg: Option<String>,
    #[clap(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let info = puzzles::get_puzzle("patrol").context("patrol is not registered")?;
    let path = puzzles::input_path(info, cli.input.as_deref());
    let part = Part::try_from(cli.part)?;
    let input = read_input(&path)?;
    let lab = Lab::parse(&input).with_context(|| format!("invalid lab map in {}", path))?;
    eprintln!(
        "lab {}x{}, guard at {:?}",
        lab.rows(),
        lab.cols(),
        lab.start()
    );

    let pruning = if cli.all_cells {
        Pruning::None
    } else {
        Pruning::Path
    };
    let bar = if cli.progress {
        ProgressBar::new(0)
    } else {
        ProgressBar::hidden()
    };
    bar.set_style(ProgressStyle::with_template(
        "{bar:40} {pos}/{len} trials ({eta})",
    )?);

    let ((answer, loops), time) = solver::timed(|| match part {
        Part::One => (lab.visited_cells() as u64, vec![]),
        Part::Two => {
            let survey = lab.survey(pruning, |done, total| {
                bar.set_length(total as u64);
                bar.set_position(done as u64);
            });
            eprintln!("!log trials {}", survey.trials);
            eprintln!("!log max_steps {}", survey.max_steps);
            (survey.positions.len() as u64, survey.positions)
        }
    });
    bar.finish_and_clear();

    if let Some(svg_path) = &cli.svg {
        write_svg(&lab, &loops, svg_path)?;
    }

    let report = Report {
        puzzle: info.puzzle_name.to_string(),
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

#[cfg(feature = "svg")]
fn write_svg(lab: &Lab, loops: &[(usize, usize)], path: &str) -> Result<()> {
    let doc = aoc2024::svg::render_patrol(lab, loops);
    std::fs::write(path, doc).with_context(|| format!("Cannot create {}", path))
}

#[cfg(not(feature = "svg"))]
fn write_svg(_lab: &Lab, _loops: &[(usize, usize)], _path: &str) -> Result<()> {
    anyhow::bail!("built without the `svg` feature")
}
