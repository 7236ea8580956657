use clap::Parser;
use clap::Subcommand;
use cover_js::import_targets;
use cover_js::render_lcov;
use cover_js::write_instrumented;
use cover_js::InstrumentOptions;
use cover_js::LCOV_FILE;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::fs;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "cover-js", about = "JavaScript statement coverage instrumenter")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Instrument files and mirror them under the output directory.
  Instrument {
    /// Files to instrument.
    files: Vec<PathBuf>,

    /// Directory instrumented files are written into.
    #[arg(long, default_value = "coverage")]
    out_dir: PathBuf,

    /// Module specifier the injected header imports the recorder from.
    #[arg(long, default_value = "cover-js/runtime")]
    runtime_module: String,

    /// Extension assumed for extensionless relative imports.
    #[arg(long, default_value = "js")]
    extension: String,

    /// Also instrument files reachable through relative imports.
    #[arg(long)]
    follow_imports: bool,
  },

  /// Render recorded coverage data as an LCOV report.
  Lcov {
    /// Coverage data file written by the instrumented run.
    #[arg(long, default_value = "coverage/data.json")]
    data: PathBuf,

    /// Report destination; omit to write lcov.info beside the data.
    #[arg(long)]
    output: Option<PathBuf>,
  },

  /// Parse a file and dump its syntax tree as JSON, for debugging.
  Parse {
    /// File to parse; omit for stdin.
    file: Option<PathBuf>,
  },
}

fn main() {
  let args = Cli::parse();
  let result = match args.command {
    Command::Instrument {
      files,
      out_dir,
      runtime_module,
      extension,
      follow_imports,
    } => {
      let options = InstrumentOptions {
        runtime_module,
        out_dir,
      };
      instrument_all(files, &options, &extension, follow_imports)
    }
    Command::Lcov { data, output } => lcov(&data, output),
    Command::Parse { file } => parse_tree(file),
  };
  if let Err(message) = result {
    eprintln!("{}", message);
    process::exit(1);
  };
}

fn instrument_all(
  files: Vec<PathBuf>,
  options: &InstrumentOptions,
  extension: &str,
  follow_imports: bool,
) -> Result<(), String> {
  let mut queue = VecDeque::from(files);
  let mut seen = HashSet::new();
  while let Some(file) = queue.pop_front() {
    if !seen.insert(file.clone()) {
      continue;
    };
    if follow_imports {
      let source = fs::read_to_string(&file)
        .map_err(|err| format!("failed to read {}: {}", file.display(), err))?;
      let targets = import_targets(&source, &file, extension)
        .map_err(|err| format!("{}: {}", file.display(), err))?;
      queue.extend(targets);
    };
    let dest = write_instrumented(&file, options)
      .map_err(|err| format!("{}: {}", file.display(), err))?;
    eprintln!("instrumented {} -> {}", file.display(), dest.display());
  }
  Ok(())
}

fn lcov(data: &PathBuf, output: Option<PathBuf>) -> Result<(), String> {
  let report = render_lcov(data).map_err(|err| err.to_string())?;
  let dest = output.unwrap_or_else(|| data.with_file_name(LCOV_FILE));
  fs::write(&dest, report)
    .map_err(|err| format!("failed to write {}: {}", dest.display(), err))?;
  eprintln!("wrote {}", dest.display());
  Ok(())
}

fn parse_tree(file: Option<PathBuf>) -> Result<(), String> {
  let source = match file {
    Some(path) => fs::read_to_string(&path)
      .map_err(|err| format!("failed to read {}: {}", path.display(), err))?,
    None => {
      let mut buf = String::new();
      stdin()
        .read_to_string(&mut buf)
        .map_err(|err| format!("failed to read stdin: {}", err))?;
      buf
    }
  };
  let parsed = syntax_js::parse(&source).map_err(|err| format!("syntax error: {}", err))?;
  serde_json::to_writer(stdout(), &parsed)
    .map_err(|err| format!("failed to write output: {}", err))?;
  Ok(())
}
