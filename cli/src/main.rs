//! tricount CLI: count triangles in Matrix Market graphs
//!
//! Runs the counter in-process; logs go to stderr, results to stdout.

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;
use tricount::{build_graph, measure, Backend, BenchPlan, CountConfig, CsrStore, TriangleCounter};

#[derive(Parser)]
#[command(name = "tricount", version, about = "Parallel triangle counting")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum BackendArg {
    Sequential,
    Rayon,
    Scoped,
    Async,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Sequential => Backend::Sequential,
            BackendArg::Rayon => Backend::Rayon,
            BackendArg::Scoped => Backend::Scoped,
            BackendArg::Async => Backend::Async,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Count the triangles in a graph
    Count {
        /// Matrix Market file
        file: PathBuf,

        /// Number of partitions and threads
        #[arg(long, env = "TRICOUNT_WORKERS")]
        workers: Option<usize>,

        /// Concurrency backend
        #[arg(long, env = "TRICOUNT_BACKEND")]
        backend: Option<BackendArg>,

        /// Print triangles per vertex
        #[arg(long)]
        per_vertex: bool,

        /// YAML run configuration; flags override it
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Time every backend and worker count
    Bench {
        /// Matrix Market files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Comma-separated worker counts
        #[arg(long, value_delimiter = ',', default_value = "1,2,4,8")]
        workers: Vec<usize>,

        /// Comma-separated backends (default: all)
        #[arg(long, value_delimiter = ',')]
        backends: Vec<BackendArg>,

        /// Timed runs per configuration
        #[arg(long, default_value_t = 10)]
        runs: usize,
    },
    /// Show graph statistics
    Info {
        /// Matrix Market file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Count {
            file,
            workers,
            backend,
            per_vertex,
            config,
        } => run_count(&file, workers, backend, per_vertex, config.as_deref(), &cli.format),
        Commands::Bench {
            files,
            workers,
            backends,
            runs,
        } => run_bench(&files, workers, backends, runs, &cli.format),
        Commands::Info { file } => run_info(&file, &cli.format),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load(file: &Path) -> anyhow::Result<Arc<CsrStore>> {
    let store = build_graph(file).with_context(|| format!("loading {}", file.display()))?;
    Ok(Arc::new(store))
}

fn run_count(
    file: &Path,
    workers: Option<usize>,
    backend: Option<BackendArg>,
    per_vertex: bool,
    config: Option<&Path>,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let mut config = match config {
        Some(path) => CountConfig::from_yaml_file(path)?,
        None => CountConfig::default(),
    };
    if let Some(workers) = workers {
        config.workers = workers;
    }
    if let Some(backend) = backend {
        config.backend = backend.into();
    }
    config.per_vertex |= per_vertex;

    let store = load(file)?;
    // The default worker count can exceed the row count of a small graph
    if config.workers > store.size() && store.size() > 0 && workers.is_none() {
        config.workers = store.size();
    }

    let report = TriangleCounter::new(config).run(&store)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Csv => match &report.per_vertex {
            Some(counts) => {
                println!("vertex,triangles");
                for (v, t) in counts.iter().enumerate() {
                    println!("{},{}", v + 1, t);
                }
            }
            None => {
                println!("file,backend,workers,triangles,elapsed_us");
                println!(
                    "{},{},{},{},{}",
                    csv_escape(&file.display().to_string()),
                    report.backend,
                    report.workers,
                    report.total,
                    report.elapsed.as_micros()
                );
            }
        },
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Partition", "Rows", "Entries", "Incidences"]);
            for p in &report.partitions {
                table.add_row(vec![
                    p.owner_id.to_string(),
                    format!("{}..{}", p.start_row, p.end_row),
                    p.nonzeros.to_string(),
                    p.incidences.to_string(),
                ]);
            }
            println!("{}", table);

            if let Some(counts) = &report.per_vertex {
                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(vec!["Vertex", "Triangles"]);
                for (v, t) in counts.iter().enumerate() {
                    table.add_row(vec![(v + 1).to_string(), t.to_string()]);
                }
                println!("{}", table);
            }

            println!(
                "{} triangle(s) [{} x{}, {:.3} ms]",
                report.total,
                report.backend,
                report.workers,
                report.elapsed.as_secs_f64() * 1e3
            );
        }
    }

    Ok(())
}

fn run_bench(
    files: &[PathBuf],
    workers: Vec<usize>,
    backends: Vec<BackendArg>,
    runs: usize,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let mut plan = BenchPlan {
        worker_counts: workers,
        runs,
        ..Default::default()
    };
    if !backends.is_empty() {
        plan.backends = backends.into_iter().map(Backend::from).collect();
    }

    let mut rows = Vec::new();
    for file in files {
        let store = load(file)?;
        let results = measure(&store, &plan).with_context(|| format!("benchmarking {}", file.display()))?;
        rows.extend(results.into_iter().map(|m| (file.display().to_string(), m)));
    }

    match format {
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = rows
                .iter()
                .map(|(file, m)| {
                    let mut value = serde_json::to_value(m).unwrap_or_default();
                    if let serde_json::Value::Object(map) = &mut value {
                        map.insert("file".to_string(), serde_json::Value::String(file.clone()));
                    }
                    value
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Csv => {
            println!("file,backend,workers,runs,mean_us,min_us,triangles");
            for (file, m) in &rows {
                println!(
                    "{},{},{},{},{:.1},{:.1},{}",
                    csv_escape(file),
                    m.backend,
                    m.workers,
                    m.runs,
                    m.mean_micros,
                    m.min_micros,
                    m.triangles
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["File", "Backend", "Workers", "Mean (us)", "Min (us)", "Triangles"]);
            for (file, m) in &rows {
                table.add_row(vec![
                    file.clone(),
                    m.backend.to_string(),
                    m.workers.to_string(),
                    format!("{:.1}", m.mean_micros),
                    format!("{:.1}", m.min_micros),
                    m.triangles.to_string(),
                ]);
            }
            println!("{}", table);
            println!("{} measurement(s), {} run(s) each", rows.len(), runs);
        }
    }

    Ok(())
}

fn run_info(file: &Path, format: &OutputFormat) -> anyhow::Result<()> {
    let store = load(file)?;

    let degrees: Vec<usize> = store.rows_iter().map(|(_, cols, _)| cols.len()).collect();
    let max_degree = degrees.iter().copied().max().unwrap_or(0);
    let mean_degree = if degrees.is_empty() {
        0.0
    } else {
        store.nonzero_count() as f64 / degrees.len() as f64
    };
    let stats = serde_json::json!({
        "file": file.display().to_string(),
        "vertices": store.size(),
        "entries": store.nonzero_count(),
        "edges": store.nonzero_count() / 2,
        "max_degree": max_degree,
        "mean_degree": mean_degree,
    });

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Csv => {
            println!("file,vertices,entries,edges,max_degree,mean_degree");
            println!(
                "{},{},{},{},{},{:.3}",
                csv_escape(&file.display().to_string()),
                store.size(),
                store.nonzero_count(),
                store.nonzero_count() / 2,
                max_degree,
                mean_degree
            );
        }
        OutputFormat::Table => {
            println!("File:        {}", file.display());
            println!("Vertices:    {}", store.size());
            println!("Entries:     {}", store.nonzero_count());
            println!("Edges:       {}", store.nonzero_count() / 2);
            println!("Max degree:  {}", max_degree);
            println!("Mean degree: {:.3}", mean_degree);
        }
    }

    Ok(())
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
