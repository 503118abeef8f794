// sequence/src/main.rs

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn read_count() -> Result<usize> {
  let raw = match std::env::args().nth(1) {
    Some(arg) => arg,
    None => {
      let mut stdout = io::stdout();
      write!(stdout, "Enter the number of elements: ")?;
      stdout.flush()?;
      let mut line = String::new();
      io::stdin().lock().read_line(&mut line).context("failed to read from stdin")?;
      line
    }
  };
  let raw = raw.trim();
  raw
    .parse::<usize>()
    .with_context(|| format!("'{}' is not a non-negative integer", raw))
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(io::stderr)
    .init();

  let n = read_count()?;
  tracing::debug!(n, "Generating sequence.");
  println!("{}", sequence::format_terms(&sequence::generate(n)));
  Ok(())
}
