use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use plotcalc::Session;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate one or more calculator statements in a single session
  Eval {
    /// Statements to evaluate, in order
    statements: Vec<String>,
    /// Write the last plot's SVG to this file
    #[arg(long)]
    svg: Option<PathBuf>,
  },
  /// Start an interactive line-oriented session
  Repl {
    /// Write each plot's SVG to a numbered file in this directory
    #[arg(long)]
    svg_dir: Option<PathBuf>,
  },
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Commands::Eval { statements, svg } => {
      let mut session = Session::new();
      for statement in &statements {
        match session.run(statement) {
          Ok(result) => println!("{result}"),
          Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
          }
        }
        if let Some(warning) = session.take_warning() {
          eprintln!("Warning: {warning}");
        }
      }
      if let Some(path) = svg {
        match session.take_svg() {
          Some(svg) => fs::write(&path, svg)
            .with_context(|| format!("writing {}", path.display()))?,
          None => eprintln!("Warning: no plot was produced"),
        }
      }
    }
    Commands::Repl { svg_dir } => {
      if let Some(dir) = &svg_dir {
        fs::create_dir_all(dir)
          .with_context(|| format!("creating {}", dir.display()))?;
      }
      let mut session = Session::new();
      let mut plot_count = 0usize;
      let stdin = io::stdin();
      loop {
        print!(">> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
          break;
        }
        let line = line.trim();
        if line.is_empty() {
          continue;
        }
        if line == "quit" || line == "exit" {
          break;
        }
        match session.run(line) {
          Ok(result) => println!("{result}"),
          Err(e) => eprintln!("Error: {}", e),
        }
        if let Some(warning) = session.take_warning() {
          eprintln!("Warning: {warning}");
        }
        if let Some(svg) = session.take_svg() {
          plot_count += 1;
          if let Some(dir) = &svg_dir {
            let path = dir.join(format!("plot-{plot_count}.svg"));
            fs::write(&path, svg)
              .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
          }
        }
      }
    }
  }

  Ok(())
}
