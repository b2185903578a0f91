use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cartesian_rmq::CartesianRmq;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Answers range minimum queries on a file of integers. Queries are read from stdin as pairs of
/// inclusive indices `i j`, separated by whitespace.
#[derive(Parser, Debug)]
#[command(name = "rmq", about = "Constant-time range minimum queries on a file of integers")]
struct Cli {
    /// File containing whitespace-separated integers.
    input: PathBuf,

    /// Log construction details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let data = read_integers(&cli.input)?;
    tracing::info!(len = data.len(), "read input");

    let rmq = CartesianRmq::from_vec(data);
    tracing::debug!(heap_size = rmq.heap_size(), "built rmq");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if rmq.is_empty() {
        writeln!(out, "input is empty, no valid index range")?;
    } else {
        writeln!(out, "valid index range: 0 to {}", rmq.len() - 1)?;
    }

    let mut tokens = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read queries from stdin")?;
        tokens.extend(line.split_whitespace().map(str::to_owned));

        for pair in tokens.chunks_exact(2) {
            answer(&rmq, &pair[0], &pair[1], &mut out)?;
        }
        let answered = tokens.len() - tokens.len() % 2;
        tokens.drain(..answered);
    }

    if !tokens.is_empty() {
        tracing::warn!(token = %tokens[0], "ignoring incomplete query at end of input");
    }

    Ok(())
}

/// Parses one query and writes its answer. Malformed queries are reported and skipped.
fn answer(rmq: &CartesianRmq, i: &str, j: &str, out: &mut impl Write) -> Result<()> {
    let (i, j) = match (i.parse::<i64>(), j.parse::<i64>()) {
        (Ok(i), Ok(j)) => (i, j),
        _ => {
            writeln!(out, "error: query \"{} {}\" is not a pair of integers", i, j)?;
            return Ok(());
        }
    };

    match rmq.range_min_signed(i, j) {
        Ok(idx) => writeln!(out, "index: {} value: {}", idx, rmq[idx])?,
        Err(e) => writeln!(out, "error: {}", e)?,
    }
    Ok(())
}

fn read_integers(path: &Path) -> Result<Vec<i64>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read input from {}", path.display()))?;

    content
        .split_whitespace()
        .enumerate()
        .map(|(n, token)| {
            token.parse::<i64>().with_context(|| {
                format!("token {} (\"{}\") in {} is not an integer", n + 1, token, path.display())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_to_string(rmq: &CartesianRmq, i: &str, j: &str) -> String {
        let mut out = Vec::new();
        answer(rmq, i, j, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_answer() {
        let rmq = CartesianRmq::from_vec(vec![2, 4, 3, 1, 6, 7, 8, 9, 1, 7]);

        assert_eq!(answer_to_string(&rmq, "0", "3"), "index: 3 value: 1\n");
        assert_eq!(answer_to_string(&rmq, "4", "9"), "index: 8 value: 1\n");
        assert_eq!(
            answer_to_string(&rmq, "-1", "3"),
            "error: invalid range [-1, 3] for 10 elements\n"
        );
        assert!(answer_to_string(&rmq, "a", "3").starts_with("error:"));
    }

    #[test]
    fn test_read_integers() {
        let path = std::env::temp_dir().join(format!("rmq-cli-test-{}.txt", std::process::id()));
        fs::write(&path, "5 -3\n 12\t0\n").unwrap();
        assert_eq!(read_integers(&path).unwrap(), vec![5, -3, 12, 0]);

        fs::write(&path, "5 x 7").unwrap();
        assert!(read_integers(&path).is_err());

        fs::remove_file(&path).unwrap();
        assert!(read_integers(&path).is_err());
    }
}
