//! The persisted-solution boundary.
//!
//! One solution is externalized as an ordered, newline-joined list of
//! cylinder identifiers, keyed by its 1-based discovery index. Re-reading a
//! stored solution returns the same ordered list; the store guarantees
//! completeness and order stability, not presentation.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use picklist_core::Result;

use crate::validator::AcceptedSolution;

/// Where accepted solutions go.
pub trait SolutionStore {
    /// Persists the solution under the given 1-based index.
    fn save(&mut self, index: usize, solution: &AcceptedSolution) -> Result<()>;

    /// Reads back the ordered cylinder identifier list for an index, or
    /// `None` if nothing is stored there.
    fn load(&self, index: usize) -> Result<Option<Vec<String>>>;

    /// True if a solution is stored under the index.
    fn contains(&self, index: usize) -> bool;
}

/// In-memory store, used by tests and callers that post-process solutions
/// themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<usize, Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored solutions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SolutionStore for MemoryStore {
    fn save(&mut self, index: usize, solution: &AcceptedSolution) -> Result<()> {
        self.entries.insert(index, solution.cylinder_ids.clone());
        Ok(())
    }

    fn load(&self, index: usize) -> Result<Option<Vec<String>>> {
        Ok(self.entries.get(&index).cloned())
    }

    fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }
}

/// Filesystem store: one `solution_{index}.txt` file per accepted solution.
#[derive(Debug, Clone)]
pub struct FsSolutionStore {
    dir: PathBuf,
}

impl FsSolutionStore {
    /// Opens (and creates if needed) the store directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path of the file backing the given index.
    pub fn path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("solution_{index}.txt"))
    }

    /// The store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SolutionStore for FsSolutionStore {
    fn save(&mut self, index: usize, solution: &AcceptedSolution) -> Result<()> {
        fs::write(self.path(index), solution.key())?;
        Ok(())
    }

    fn load(&self, index: usize) -> Result<Option<Vec<String>>> {
        let path = self.path(index);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        Ok(Some(
            contents
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect(),
        ))
    }

    fn contains(&self, index: usize) -> bool {
        self.path(index).exists()
    }
}

/// Formats a stored solution for inspection.
pub fn render_solution(index: usize, cylinder_ids: &[String]) -> String {
    let mut out = format!("solution {index} ({} cylinders)\n", cylinder_ids.len());
    for (position, id) in cylinder_ids.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", position + 1, id);
    }
    out
}
