use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use doxsearch_core::shard::parse_shard;
use doxsearch_core::types::{AppConfig, Category, Dialect, IndexEntry, MatchMode, ShardId};
use doxsearch_core::{IndexDir, WriteReport, validate_index};
use doxsearch_search::{SearchConfig, SearchEngine, SearchQuery};
use serde::Serialize;
use std::path::{Path, PathBuf};

mod logging;

#[derive(Parser)]
#[command(name = "doxsearch", version, about = "Build, check and query documentation search indexes")]
struct Cli {
    /// Config file (defaults to ./doxsearch.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate an index directory from a JSON symbol table
    Build(BuildArgs),
    /// Read and validate every shard of an index directory
    Check(CheckArgs),
    /// Query an index directory
    Search(SearchArgs),
    /// Print a single parsed shard file
    Show(ShowArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// JSON array of symbols
    #[arg(long)]
    symbols: PathBuf,
    /// Output directory
    #[arg(long)]
    out: PathBuf,
    /// Shard dialect, overriding the config
    #[arg(long, value_enum)]
    dialect: Option<DialectArg>,
    /// First running id for doxygen keys, overriding the config
    #[arg(long)]
    first_id: Option<usize>,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CheckArgs {
    /// Index directory containing searchdata.js
    dir: PathBuf,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Index directory containing searchdata.js
    dir: PathBuf,
    /// Text typed into the search box
    query: String,
    /// Match mode, overriding the config
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Maximum number of entries, overriding the config
    #[arg(long)]
    limit: Option<usize>,
    /// Category to search
    #[arg(long, default_value = "all", value_parser = parse_category)]
    category: Category,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ShowArgs {
    /// Shard file, e.g. classes_14.js
    file: PathBuf,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Compact,
    Doxygen,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Compact => Dialect::Compact,
            DialectArg::Doxygen => Dialect::Doxygen,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Prefix,
    Substring,
    Fuzzy,
}

impl From<ModeArg> for MatchMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Prefix => MatchMode::Prefix,
            ModeArg::Substring => MatchMode::Substring,
            ModeArg::Fuzzy => MatchMode::Fuzzy,
        }
    }
}

fn parse_category(name: &str) -> Result<Category, String> {
    Category::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        format!("unknown category {name:?} (expected one of {})", known.join(", "))
    })
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = path.map_or_else(|| AppConfig::path(Path::new(".")), Path::to_path_buf);
    let config = AppConfig::load(&path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    logging::init(&config.logging);

    let problems = config.validate();
    if problems.is_empty() {
        return Ok(config);
    }
    for problem in &problems {
        tracing::warn!(config = %path.display(), "{problem}; using the default");
    }
    Ok(config.with_defaults_for_invalid())
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Build(args) => build(config, args),
        Command::Check(args) => check(args),
        Command::Search(args) => search(config, args),
        Command::Show(args) => show(args),
    }
}

#[derive(Serialize)]
struct BuildOutput<'a> {
    out: &'a Path,
    written: &'a [String],
    unchanged: &'a [String],
    removed: &'a [String],
}

fn build(mut config: AppConfig, args: BuildArgs) -> Result<i32> {
    if let Some(dialect) = args.dialect {
        config.index.dialect = dialect.into();
    }
    if let Some(first_id) = args.first_id {
        config.index.first_id = first_id;
    }

    let report: WriteReport = doxsearch_core::generate(&config.index, &args.symbols, &args.out)
        .with_context(|| format!("failed to build index from {}", args.symbols.display()))?;

    if args.json {
        print_json(&BuildOutput {
            out: &args.out,
            written: &report.written,
            unchanged: &report.unchanged,
            removed: &report.removed,
        })?;
    } else {
        println!("built: {}", args.out.display());
        println!("  written: {}", report.written.len());
        println!("  unchanged: {}", report.unchanged.len());
        println!("  removed: {}", report.removed.len());
    }
    Ok(0)
}

#[derive(Serialize)]
struct CheckOutput {
    shards: usize,
    entries: usize,
    failures: Vec<String>,
    violations: Vec<String>,
}

fn check(args: CheckArgs) -> Result<i32> {
    let dir = IndexDir::new(&args.dir);
    let (index, failures) = dir
        .load()
        .with_context(|| format!("failed to read index {}", args.dir.display()))?;

    let output = CheckOutput {
        shards: index.shards.len(),
        entries: index.entry_count(),
        failures: failures.iter().map(|f| f.error.to_string()).collect(),
        violations: validate_index(&index).iter().map(ToString::to_string).collect(),
    };
    let clean = output.failures.is_empty() && output.violations.is_empty();

    if args.json {
        print_json(&output)?;
    } else {
        for failure in &output.failures {
            println!("unreadable: {failure}");
        }
        for violation in &output.violations {
            println!("violation: {violation}");
        }
        println!(
            "summary: {} shards, {} entries, {} unreadable, {} violations",
            output.shards,
            output.entries,
            output.failures.len(),
            output.violations.len()
        );
    }
    Ok(if clean { 0 } else { 1 })
}

#[derive(Serialize)]
struct RowOutput<'a> {
    label: &'a str,
    scope: &'a str,
    url: &'a str,
    parent_frame: bool,
}

fn search(config: AppConfig, args: SearchArgs) -> Result<i32> {
    let mut search_config = SearchConfig::from(&config.search);
    if let Some(mode) = args.mode {
        search_config.mode = mode.into();
    }
    if let Some(limit) = args.limit {
        if limit == 0 {
            bail!("--limit must be at least 1");
        }
        search_config.result_limit = limit;
    }
    let mode = search_config.mode;

    let engine = SearchEngine::from_dir(&IndexDir::new(&args.dir), args.category, search_config)
        .with_context(|| format!("failed to read index {}", args.dir.display()))?;
    let results = engine.search(&SearchQuery::new(mode, args.query));

    let rows: Vec<RowOutput<'_>> = results
        .rows()
        .map(|row| RowOutput {
            label: row.label,
            scope: row.scope,
            url: row.url,
            parent_frame: row.parent_frame,
        })
        .collect();

    if args.json {
        print_json(&rows)?;
    } else {
        for row in &rows {
            println!("{}\t{}\t{}", row.label, row.scope, row.url);
        }
    }
    Ok(if results.is_empty() { 1 } else { 0 })
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    file: String,
    dialect: Dialect,
    partition: char,
    first_id: usize,
    entries: &'a [IndexEntry],
}

fn show(args: ShowArgs) -> Result<i32> {
    let name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let Some(id) = ShardId::from_file_name(name) else {
        bail!("{} is not named like a shard file", args.file.display());
    };

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let (shard, dialect) = parse_shard(&text, id, None)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    if args.json {
        print_json(&ShowOutput {
            file: shard.file_name(),
            dialect,
            partition: shard.partition.as_char(),
            first_id: shard.first_id,
            entries: &shard.entries,
        })?;
    } else {
        println!(
            "{} ({dialect}, partition {:?}, {} entries)",
            shard.file_name(),
            shard.partition.as_char(),
            shard.len()
        );
        for entry in &shard.entries {
            println!("{}\t{}", entry.key, entry.label);
            for target in &entry.targets {
                println!("  {}\t{}", target.scope, target.url);
            }
        }
    }
    Ok(0)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}
