//! Demonstration CLI: runs one of the search algorithms against a
//! permutation-TSP instance and optionally writes a JSON report and a
//! solution certificate.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tree_search_solver::schemes::permutation_tsp::PermutationTsp;
use tree_search_solver::{
    anytime_column_search, best_first_search, depth_first_search, greedy,
    iterative_beam_search, iterative_memory_bounded_best_first_search,
    nested_best_first_breadth_first_search, AnytimeColumnSearchParameters,
    BestFirstSearchParameters, BranchingScheme, CommonParameters, DepthFirstSearchParameters,
    GreedyParameters, ImbbfsParameters, IterativeBeamSearchParameters,
    NestedBestFirstBreadthFirstSearchParameters, Output,
};

fn write_certificate(scheme: &PermutationTsp, output: &Output<'_, PermutationTsp>, args: &Args) -> anyhow::Result<()> {
    if let Some(path) = &args.certificate {
        scheme.solution_write(output.solution_pool.best(), path)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    BestFirstSearch,
    Imbbfs,
    IterativeBeamSearch,
    AnytimeColumnSearch,
    DepthFirstSearch,
    Greedy,
    NestedBestFirstBreadthFirstSearch,
}

/// Solves a permutation-TSP instance with one of the tree-search algorithms.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the instance file: first line is the number of vertices `n`,
    /// followed by `n` lines of `n` whitespace-separated distances.
    instance: PathBuf,

    /// Which algorithm to run.
    #[arg(short, long, value_enum, default_value_t = Algorithm::BestFirstSearch)]
    algorithm: Algorithm,

    /// Wall-clock budget in seconds. Unset means unbounded.
    #[arg(short, long)]
    time_limit: Option<f64>,

    /// Node budget. -1 means unbounded.
    #[arg(short = 'n', long, default_value_t = -1)]
    maximum_number_of_nodes: i64,

    /// Maximum size of the solution pool.
    #[arg(short = 'k', long, default_value_t = 1)]
    maximum_size_of_the_solution_pool: usize,

    /// Where to write the JSON report. If unset, nothing is written.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Where to write the best solution's certificate. If unset, nothing is written.
    #[arg(short, long)]
    certificate: Option<PathBuf>,

    /// Verbosity level passed through to the search (0 = silent, 1 = summary,
    /// 2 = detailed); repeat for more detail (`-v`, `-vv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read_instance(path: &PathBuf) -> anyhow::Result<PermutationTsp> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines();
    let n: usize = lines
        .next()
        .ok_or_else(|| anyhow::anyhow!("empty instance file"))?
        .trim()
        .parse()?;
    let mut distances = Vec::with_capacity(n);
    for _ in 0..n {
        let row = lines
            .next()
            .ok_or_else(|| anyhow::anyhow!("instance file has fewer than {n} distance rows"))?;
        let parsed = row
            .split_whitespace()
            .map(|token| token.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()?;
        if parsed.len() != n {
            anyhow::bail!("distance row has {} entries, expected {n}", parsed.len());
        }
        distances.push(parsed);
    }
    Ok(PermutationTsp::new(distances))
}

fn common_parameters<S: BranchingScheme>(args: &Args) -> CommonParameters<'static, S> {
    let mut common = CommonParameters::default();
    common.maximum_size_of_the_solution_pool = args.maximum_size_of_the_solution_pool;
    common.maximum_number_of_nodes = args.maximum_number_of_nodes;
    if let Some(seconds) = args.time_limit {
        common.time_limit = Duration::from_secs_f64(seconds);
    }
    common.verbosity_level = (1 + args.verbose).min(2);
    common
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let scheme = read_instance(&args.instance)?;
    let report_params = common_parameters::<PermutationTsp>(&args).report();

    let report = match args.algorithm {
        Algorithm::BestFirstSearch => {
            let parameters = BestFirstSearchParameters {
                common: common_parameters(&args),
            };
            let output = best_first_search(&scheme, parameters)?;
            write_certificate(&scheme, &output, &args)?;
            output.report(&scheme, report_params.clone())
        }
        Algorithm::Imbbfs => {
            let parameters = ImbbfsParameters {
                common: common_parameters(&args),
                ..ImbbfsParameters::default()
            };
            let output = iterative_memory_bounded_best_first_search(&scheme, parameters)?;
            write_certificate(&scheme, &output, &args)?;
            output.report(&scheme, report_params.clone())
        }
        Algorithm::IterativeBeamSearch => {
            let parameters = IterativeBeamSearchParameters {
                common: common_parameters(&args),
                ..IterativeBeamSearchParameters::default()
            };
            let output = iterative_beam_search(&scheme, parameters)?;
            write_certificate(&scheme, &output, &args)?;
            output.report(&scheme, report_params.clone())
        }
        Algorithm::AnytimeColumnSearch => {
            let parameters = AnytimeColumnSearchParameters {
                common: common_parameters(&args),
                ..AnytimeColumnSearchParameters::default()
            };
            let output = anytime_column_search(&scheme, parameters)?;
            write_certificate(&scheme, &output, &args)?;
            output.report(&scheme, report_params.clone())
        }
        Algorithm::DepthFirstSearch => {
            let parameters = DepthFirstSearchParameters {
                common: common_parameters(&args),
            };
            let output = depth_first_search(&scheme, parameters)?;
            write_certificate(&scheme, &output, &args)?;
            output.report(&scheme, report_params.clone())
        }
        Algorithm::Greedy => {
            let parameters = GreedyParameters {
                common: common_parameters(&args),
            };
            let output = greedy(&scheme, parameters)?;
            write_certificate(&scheme, &output, &args)?;
            output.report(&scheme, report_params.clone())
        }
        Algorithm::NestedBestFirstBreadthFirstSearch => {
            let parameters = NestedBestFirstBreadthFirstSearchParameters {
                common: common_parameters(&args),
            };
            let output = nested_best_first_breadth_first_search(&scheme, parameters)?;
            write_certificate(&scheme, &output, &args)?;
            output.report(&scheme, report_params.clone())
        }
    };

    println!("value: {}", report.output.value);
    println!("time (s): {:.3}", report.output.time_seconds);
    println!("nodes: {}", report.output.counters.number_of_nodes);
    println!("exhaustive: {}", report.output.exhaustive);

    if let Some(output_path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(output_path, json)?;
    }

    Ok(())
}
