//! Command line drivers for the mrtree authenticated spatial index.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use mrtree::{
    count_in_range, digest_to_hex, loader, workload, MerkleRTree, PointOrder, PointRecord,
    QueryStats, Rect,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "mrtree", about = "Authenticated 2D range queries over a Merkle R-tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the index from a dataset and report construction statistics.
    Build {
        /// CSV file with data points
        data_file: PathBuf,
        /// Maximum points per leaf and children per internal node
        #[arg(long, default_value_t = 64)]
        capacity: usize,
        /// Point ordering used by the bulk loader
        #[arg(long, value_enum, default_value = "z")]
        order: OrderArg,
        /// Read the narrow `x,y` format instead of the wide format
        #[arg(long)]
        narrow: bool,
    },

    /// Run and verify a query workload, reporting per-query averages.
    Query {
        /// CSV file with data points
        data_file: PathBuf,
        /// CSV file with query rectangles
        query_file: PathBuf,
        /// Maximum points per leaf and children per internal node
        #[arg(long, default_value_t = 64)]
        capacity: usize,
        /// Point ordering used by the bulk loader
        #[arg(long, value_enum, default_value = "z")]
        order: OrderArg,
        /// Read the narrow `x,y` format instead of the wide format
        #[arg(long)]
        narrow: bool,
    },

    /// Generate a random query workload over a dataset's bounds.
    GenQueries {
        /// CSV file with data points
        data_file: PathBuf,
        /// Output CSV file for the generated queries
        query_file: PathBuf,
        /// Number of queries to generate
        #[arg(long, default_value_t = 1000)]
        count: usize,
        /// Minimum query side as a fraction of the data bounds
        #[arg(long, default_value_t = 0.01)]
        min_frac: f64,
        /// Maximum query side as a fraction of the data bounds
        #[arg(long, default_value_t = 0.1)]
        max_frac: f64,
        /// Read the narrow `x,y` format instead of the wide format
        #[arg(long)]
        narrow: bool,
    },

    /// Generate one query file per target area selectivity.
    GenSelectivity {
        /// CSV file with data points
        data_file: PathBuf,
        /// Prefix for the output files (`<prefix>_sel_<level>.csv`)
        output_prefix: String,
        /// Number of queries per selectivity level
        #[arg(long, default_value_t = 1000)]
        count: usize,
        /// Target area selectivity levels
        #[arg(long, num_args = 1.., default_values_t = vec![0.0001, 0.001, 0.01, 0.1])]
        selectivities: Vec<f64>,
        /// Read the narrow `x,y` format instead of the wide format
        #[arg(long)]
        narrow: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    /// Lexicographic (x, y) ordering
    Lex,
    /// Z-order (Morton) ordering
    Z,
}

impl From<OrderArg> for PointOrder {
    fn from(arg: OrderArg) -> PointOrder {
        match arg {
            OrderArg::Lex => PointOrder::Lexicographic,
            OrderArg::Z => PointOrder::ZOrder,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            data_file,
            capacity,
            order,
            narrow,
        } => cmd_build(&data_file, capacity, order.into(), narrow),
        Commands::Query {
            data_file,
            query_file,
            capacity,
            order,
            narrow,
        } => cmd_query(&data_file, &query_file, capacity, order.into(), narrow),
        Commands::GenQueries {
            data_file,
            query_file,
            count,
            min_frac,
            max_frac,
            narrow,
        } => cmd_gen_queries(&data_file, &query_file, count, min_frac, max_frac, narrow),
        Commands::GenSelectivity {
            data_file,
            output_prefix,
            count,
            selectivities,
            narrow,
        } => cmd_gen_selectivity(&data_file, &output_prefix, count, &selectivities, narrow),
    }
}

fn load_points(path: &Path, narrow: bool) -> anyhow::Result<Vec<PointRecord>> {
    let start = Instant::now();
    let points = if narrow {
        loader::load_points_narrow(path)
    } else {
        loader::load_points_wide(path)
    }
    .with_context(|| format!("cannot load points from {}", path.display()))?;

    if points.is_empty() {
        bail!("no points loaded from {}", path.display());
    }
    println!(
        "Loaded {} points from {} in {:.2?}",
        points.len(),
        path.display(),
        start.elapsed()
    );
    Ok(points)
}

fn cmd_build(
    data_file: &Path,
    capacity: usize,
    order: PointOrder,
    narrow: bool,
) -> anyhow::Result<()> {
    let points = load_points(data_file, narrow)?;
    let point_count = points.len();
    let data_mbr = mrtree::compute_mbr(&points);
    println!("Data MBR: {}", data_mbr);

    let brute_force_points = points.clone();

    let start = Instant::now();
    let tree = MerkleRTree::bulk_load(points, capacity, order)?;
    let build_time = start.elapsed();

    println!();
    println!("=== Construction ===");
    println!("Build time:       {:.2?}", build_time);
    println!("Tree:             {}", tree);
    println!("Root digest:      {}", digest_to_hex(&tree.root_digest()));
    let utilization = point_count as f64 / (tree.leaf_count() * capacity) as f64;
    println!("Leaf utilization: {:.2}%", utilization * 100.0);

    // Self-check: a query around the dataset center must agree with a
    // linear scan and authenticate against the root digest
    let center = data_mbr.center();
    let side = (data_mbr.width().min(data_mbr.height()) / 10).max(1) as i32;
    let probe = Rect::new(
        center.x.saturating_sub(side / 2),
        center.y.saturating_sub(side / 2),
        center.x.saturating_add(side / 2),
        center.y.saturating_add(side / 2),
    );

    let mut stats = QueryStats::new();
    let verified = tree.query_and_verify(&probe, &mut stats)?;
    let expected = count_in_range(&brute_force_points, &probe);

    println!();
    println!("=== Self-check ===");
    println!("Probe query:      {}", probe);
    println!("Linear scan:      {} points", expected);
    println!("Verified query:   {} points", verified.outcome.count());
    if !verified.authentic || verified.outcome.count() != expected {
        bail!("self-check failed: tree query disagrees with linear scan");
    }
    println!("Self-check passed");
    Ok(())
}

fn cmd_query(
    data_file: &Path,
    query_file: &Path,
    capacity: usize,
    order: PointOrder,
    narrow: bool,
) -> anyhow::Result<()> {
    let points = load_points(data_file, narrow)?;

    let start = Instant::now();
    let tree = MerkleRTree::bulk_load(points, capacity, order)?;
    println!("Built {} in {:.2?}", tree, start.elapsed());

    let queries = loader::load_queries(query_file)
        .with_context(|| format!("cannot load queries from {}", query_file.display()))?;
    if queries.is_empty() {
        bail!("no queries loaded from {}", query_file.display());
    }
    println!("Loaded {} queries from {}", queries.len(), query_file.display());

    let mut totals = QueryStats::new();
    let mut mismatches = 0usize;
    for query in &queries {
        let mut stats = QueryStats::new();
        let verified = tree.query_and_verify(query, &mut stats)?;
        if !verified.authentic {
            mismatches += 1;
        }
        totals.merge(&stats);
    }

    let n = queries.len() as f64;
    println!();
    println!("=== Summary over {} queries ===", queries.len());
    println!("Avg nodes visited:   {:.2}", totals.nodes_visited as f64 / n);
    println!("Avg nodes pruned:    {:.2}", totals.nodes_pruned as f64 / n);
    println!("Avg points examined: {:.2}", totals.points_examined as f64 / n);
    println!("Avg points returned: {:.2}", totals.points_returned as f64 / n);
    println!("Avg query time:      {:.2?}", totals.query_time / queries.len() as u32);
    println!("Avg verify time:     {:.2?}", totals.verify_time / queries.len() as u32);
    println!("Pruning efficiency:  {:.2}%", totals.pruning_ratio() * 100.0);

    if mismatches > 0 {
        bail!("{} of {} queries failed digest verification", mismatches, queries.len());
    }
    println!("All digests verified");
    Ok(())
}

fn cmd_gen_queries(
    data_file: &Path,
    query_file: &Path,
    count: usize,
    min_frac: f64,
    max_frac: f64,
    narrow: bool,
) -> anyhow::Result<()> {
    let points = load_points(data_file, narrow)?;
    let data_mbr = mrtree::compute_mbr(&points);
    println!("Data MBR: {}", data_mbr);

    let mut rng = rand::thread_rng();
    let queries = workload::generate_uniform(&data_mbr, count, min_frac, max_frac, &mut rng)?;

    let mut writer = BufWriter::new(
        File::create(query_file)
            .with_context(|| format!("cannot create {}", query_file.display()))?,
    );
    workload::write_query_file(&mut writer, &queries, &points, &data_mbr)?;

    report_workload(&queries, &points);
    println!("Wrote {} queries to {}", queries.len(), query_file.display());
    Ok(())
}

fn cmd_gen_selectivity(
    data_file: &Path,
    output_prefix: &str,
    count: usize,
    selectivities: &[f64],
    narrow: bool,
) -> anyhow::Result<()> {
    let points = load_points(data_file, narrow)?;
    let data_mbr = mrtree::compute_mbr(&points);
    println!("Data MBR: {} (area {})", data_mbr, data_mbr.area());

    let mut rng = rand::thread_rng();
    for &selectivity in selectivities {
        let queries = workload::generate_by_selectivity(&data_mbr, count, selectivity, &mut rng)?;

        let path = format!("{}_sel_{}.csv", output_prefix, selectivity);
        let mut writer = BufWriter::new(
            File::create(&path).with_context(|| format!("cannot create {}", path))?,
        );
        workload::write_query_file(&mut writer, &queries, &points, &data_mbr)?;

        let mean_sel: f64 = queries
            .iter()
            .map(|q| workload::area_selectivity(q, &data_mbr))
            .sum::<f64>()
            / queries.len().max(1) as f64;
        println!();
        println!("Target selectivity {}: wrote {} queries to {}", selectivity, queries.len(), path);
        println!("Actual mean area selectivity: {:.6}", mean_sel);
        report_workload(&queries, &points);
    }
    Ok(())
}

fn report_workload(queries: &[Rect], points: &[PointRecord]) {
    if queries.is_empty() {
        return;
    }
    let counts: Vec<usize> = queries
        .iter()
        .map(|q| count_in_range(points, q))
        .collect();
    let total: usize = counts.iter().sum();
    let avg = total as f64 / queries.len() as f64;
    println!("Avg matching points: {:.2} ({:.4}% of dataset)", avg, avg / points.len() as f64 * 100.0);
    println!(
        "Min/max matching:    {} / {}",
        counts.iter().min().unwrap(),
        counts.iter().max().unwrap()
    );
}
