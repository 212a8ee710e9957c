use anyhow::Context;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::heuristic::HeuristicKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub nodes_expanded: usize,
    pub nodes_generated: usize,
    pub stale_pops: usize,
    pub max_frontier: usize,
    pub time_us: u64,
}

impl Stats {
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.time_us)
    }

    pub fn print(&self, heuristic: HeuristicKind, moves: Option<usize>) {
        info!(
            "Heuristic {heuristic} Moves {moves:?} Time(microseconds) {:?} Expanded nodes {:?} Generated nodes {:?} Stale pops {:?} Max frontier {:?}",
            self.time_us, self.nodes_expanded, self.nodes_generated, self.stale_pops, self.max_frontier
        );
    }

    /// Append one CSV row, writing the header first if the file is new.
    pub fn write_csv(
        &self,
        path: &str,
        puzzle: &str,
        heuristic: HeuristicKind,
        moves: Option<usize>,
    ) -> anyhow::Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("cannot create directory for {path}"))?;
            }
        }

        let new_file = !Path::new(path).exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open result file {path}"))?;

        if new_file {
            writeln!(
                file,
                "puzzle,heuristic,moves,time_us,nodes_expanded,nodes_generated,stale_pops,max_frontier"
            )?;
        }
        writeln!(
            file,
            "{puzzle},{heuristic},{},{},{},{},{},{}",
            moves.map_or_else(|| "none".to_string(), |m| m.to_string()),
            self.time_us,
            self.nodes_expanded,
            self.nodes_generated,
            self.stale_pops,
            self.max_frontier
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv_appends() {
        let dir = std::env::temp_dir().join(format!("eight_puzzle_stats_{}", std::process::id()));
        let path = dir.join("result.csv");
        let path = path.to_str().unwrap();
        let _ = fs::remove_file(path);

        let stats = Stats {
            nodes_expanded: 10,
            nodes_generated: 20,
            stale_pops: 1,
            max_frontier: 9,
            time_us: 42,
        };
        stats
            .write_csv(path, "default", HeuristicKind::Manhattan, Some(4))
            .unwrap();
        stats
            .write_csv(path, "default", HeuristicKind::Misplaced, None)
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("puzzle,heuristic"));
        assert_eq!(lines[1], "default,manhattan,4,42,10,20,1,9");
        assert_eq!(lines[2], "default,misplaced,none,42,10,20,1,9");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_elapsed() {
        let stats = Stats {
            time_us: 1500,
            ..Default::default()
        };
        assert_eq!(stats.elapsed(), Duration::from_micros(1500));
    }
}
