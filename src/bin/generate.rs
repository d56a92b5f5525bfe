use anyhow::bail;
use aoc2024::mapgen;
use clap::Parser;

#[derive(Parser)]
struct Cli {
    #[clap(long, short = 'r', default_value = "10")]
    rows: usize,
    #[clap(long, short = 'c', default_value = "10")]
    cols: usize,
    /// Obstacle probability for labs.
    #[clap(long, short = 'd', default_value = "0.1")]
    density: f64,
    /// Number of digits for disk maps.
    #[clap(long, short = 'n', default_value = "19")]
    len: usize,
    #[clap(long, short = 's')]
    seed: Option<u64>,
    #[clap(long, short = 't', default_value = "patrol")]
    r#type: String,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    eprintln!("!log seed {}", seed);
    let text = match args.r#type.as_str() {
        "patrol" => {
            if args.rows == 0 || args.cols == 0 {
                bail!("lab must be at least 1x1");
            }
            let density = mapgen::random::check_density(args.density)?;
            mapgen::random::generate_lab(args.rows, args.cols, density, seed)
        }
        "defrag" => mapgen::random::generate_disk_map(args.len, seed),
        other => bail!("Unknown type: {}", other),
    };
    println!("{}", text);
    Ok(())
}
