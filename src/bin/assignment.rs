use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use dense_linear_assignment::{AssignmentProblem, WeightMatrix};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Solve an n-by-n assignment problem and print the optimal matching
#[derive(Parser)]
#[command(name = "assignment")]
#[command(version)]
struct Cli {
    /// Size of a random matrix with 3-digit integer weights
    #[arg(required_unless_present = "input")]
    n: Option<usize>,

    /// Read `n` followed by n*n whitespace separated weights from a file, `-` for stdin
    #[arg(short, long, conflicts_with = "n")]
    input: Option<PathBuf>,

    /// Seed of the random matrix
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Find the maximum weight matching instead of the minimum one
    #[arg(short, long)]
    maximize: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Matrices of this size and larger are not printed
const MAX_PRINTED_SIZE: usize = 20;

fn random_matrix(n: usize, seed: u64) -> Result<WeightMatrix> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let between = Uniform::from(100..1000);
    let values = (0..n * n).map(|_| between.sample(&mut rng) as f64).collect();
    Ok(WeightMatrix::from_flat(n, values)?)
}

fn parse_matrix(text: &str) -> Result<WeightMatrix> {
    let mut tokens = text.split_whitespace();
    let n: usize = match tokens.next() {
        Some(token) => token
            .parse()
            .with_context(|| format!("invalid matrix size {:?}", token))?,
        None => bail!("input is empty"),
    };
    let values = tokens
        .map(|token| {
            token
                .parse::<f64>()
                .with_context(|| format!("invalid weight {:?}", token))
        })
        .collect::<Result<Vec<f64>>>()?;
    ensure!(
        values.len() == n * n,
        "expected {} weights for a {}-by-{} matrix, got {}",
        n * n,
        n,
        n,
        values.len()
    );
    Ok(WeightMatrix::from_flat(n, values)?)
}

fn read_input(path: &PathBuf) -> Result<String> {
    let mut text = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
    } else {
        text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
    }
    Ok(text)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("dense_linear_assignment=debug,assignment=debug,info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let matrix = match (&cli.input, cli.n) {
        (Some(path), _) => parse_matrix(&read_input(path)?)?,
        (None, Some(n)) => random_matrix(n, cli.seed)?,
        (None, None) => bail!("either a matrix size or --input is required"),
    };
    info!("solving {}x{} matrix", matrix.n(), matrix.n());

    let problem = if cli.maximize {
        AssignmentProblem::<u32>::new_maximize(&matrix)?
    } else {
        AssignmentProblem::<u32>::new(&matrix)?
    };

    println!("weight = {}", problem.weight());
    println!();

    let n = matrix.n();
    if n >= MAX_PRINTED_SIZE {
        return Ok(());
    }
    for i in 0..n {
        let matched = problem.sol(i)?;
        let line = matrix
            .row(i)
            .iter()
            .enumerate()
            .map(|(j, w)| {
                if j == matched {
                    format!("*{}", w)
                } else {
                    format!(" {}", w)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}", line);
    }
    Ok(())
}
