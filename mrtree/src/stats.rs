//! Per-query statistics.

use std::time::Duration;

/// Counters and timings collected along a single query and its
/// verification.
///
/// The collector is owned by the caller and passed by mutable reference;
/// the index never writes to shared state. All fields only ever increase
/// within a query, and [`QueryStats::merge`] accumulates several queries
/// into a running total.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Nodes entered during the query descent
    pub nodes_visited: u64,
    /// Subtrees replaced by a pruned witness
    pub nodes_pruned: u64,
    /// Points surrendered by reached leaves
    pub points_examined: u64,
    /// Points accepted by the verifier's filter
    pub points_returned: u64,
    /// Time spent producing the verification object
    pub query_time: Duration,
    /// Time spent verifying it
    pub verify_time: Duration,
}

impl QueryStats {
    /// Creates a zeroed collector.
    pub fn new() -> QueryStats {
        QueryStats::default()
    }

    /// Accumulates another collector into this one.
    pub fn merge(&mut self, other: &QueryStats) {
        self.nodes_visited += other.nodes_visited;
        self.nodes_pruned += other.nodes_pruned;
        self.points_examined += other.points_examined;
        self.points_returned += other.points_returned;
        self.query_time += other.query_time;
        self.verify_time += other.verify_time;
    }

    /// Returns query plus verification time.
    pub fn total_time(&self) -> Duration {
        self.query_time + self.verify_time
    }

    /// Fraction of encountered subtrees that were pruned, in `[0, 1]`.
    pub fn pruning_ratio(&self) -> f64 {
        let total = self.nodes_visited + self.nodes_pruned;
        if total == 0 {
            return 0.0;
        }
        self.nodes_pruned as f64 / total as f64
    }
}

impl std::fmt::Display for QueryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "nodes visited:   {}", self.nodes_visited)?;
        writeln!(f, "nodes pruned:    {}", self.nodes_pruned)?;
        writeln!(f, "points examined: {}", self.points_examined)?;
        writeln!(f, "points returned: {}", self.points_returned)?;
        writeln!(f, "query time:      {:.2?}", self.query_time)?;
        writeln!(f, "verify time:     {:.2?}", self.verify_time)?;
        write!(f, "pruning ratio:   {:.2}%", self.pruning_ratio() * 100.0)
    }
}
