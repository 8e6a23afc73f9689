//! Best-first search for a chain of connection tiles.
//!
//! `PathSearch` expands placements in ascending fScore order (ties go to the
//! node created first) until a placement's exit reaches the destination or
//! the frontier runs dry. Every placement is closed once expanded, and nodes
//! that stray too far from the destination are discarded, so the explored
//! region is finite and the search always terminates.
//!
//! The search can be driven in slices: `step` returns `Running` whenever the
//! caller's `SearchBudget` runs out and picks up where it left off on the next
//! call.

use crate::catalog::ConnectionTileSet;
use crate::chain::*;
use crate::constants::*;
use crate::error::SearchError;
use crate::location::*;
use crate::node::*;
use crate::socket::*;
use fnv::FnvHashSet;
use log::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Caller-controlled stop signal, polled after every expansion.
pub struct SearchBudget {
    should_continue: Box<dyn Fn() -> bool>,
}

impl SearchBudget {
    pub fn new<F: Fn() -> bool + 'static>(should_continue: F) -> Self {
        SearchBudget {
            should_continue: Box::new(should_continue),
        }
    }

    /// Returns true if there is budget remaining to continue work.
    pub fn has_budget(&self) -> bool {
        (self.should_continue)()
    }

    /// Never stops the search.
    pub fn unlimited() -> Self {
        SearchBudget {
            should_continue: Box::new(|| true),
        }
    }
}

/// Limits that keep a search bounded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Hard cap on expansions. Off by default; when set, hitting it is
    /// reported as `BudgetExhausted`.
    #[serde(default)]
    pub max_expansions: Option<usize>,
    /// Nodes whose exit is more than this much farther from the destination
    /// than the start are discarded. `None` keeps every node.
    #[serde(default = "default_max_detour")]
    pub max_detour: Option<f32>,
}

fn default_max_detour() -> Option<f32> {
    Some(DEFAULT_MAX_DETOUR)
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            max_expansions: None,
            max_detour: default_max_detour(),
        }
    }
}

impl SearchSettings {
    pub fn unbounded() -> Self {
        SearchSettings {
            max_expansions: None,
            max_detour: None,
        }
    }
}

/// Counters for one search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub generated: usize,
    /// Nodes skipped because their placement was already closed.
    pub duplicates: usize,
    /// Nodes discarded by the detour limit.
    pub pruned: usize,
}

/// Result of a single `PathSearch::step`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The budget ran out; call `step` again to continue.
    Running,
    /// A placement reached the destination.
    Found(NodeId),
    /// The frontier is exhausted.
    NotFound,
    /// `max_expansions` was hit.
    LimitReached,
}

/// Frontier entry. Orders so that `BinaryHeap` pops the lowest fScore, and
/// among equal scores the lowest node id.
#[derive(Copy, Clone, Debug)]
struct OpenEntry {
    f_score: f32,
    id: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

pub struct PathSearch<'a> {
    tile_set: &'a ConnectionTileSet,
    settings: SearchSettings,
    arena: NodeArena,
    open: BinaryHeap<OpenEntry>,
    closed: FnvHashSet<PlacementSignature>,
    /// Nodes with a larger hScore than this are discarded.
    h_limit: f32,
    stats: SearchStats,
    status: SearchStatus,
}

impl<'a> PathSearch<'a> {
    pub fn new(
        tile_set: &'a ConnectionTileSet,
        start: Point,
        side: Side,
        destination: Point,
        settings: SearchSettings,
    ) -> Self {
        let root = SearchNode::start(start, destination, side);
        let h_limit = settings
            .max_detour
            .map(|detour| root.h_score() + detour)
            .unwrap_or(f32::INFINITY);

        let mut arena = NodeArena::new();
        let f_score = root.f_score();
        let id = arena.push(root);

        let mut open = BinaryHeap::new();
        open.push(OpenEntry { f_score, id });

        PathSearch {
            tile_set,
            settings,
            arena,
            open,
            closed: FnvHashSet::default(),
            h_limit,
            stats: SearchStats::default(),
            status: SearchStatus::Running,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Run until a verdict is reached or `budget` runs out.
    ///
    /// Once a verdict is reached further calls return it unchanged.
    pub fn step(&mut self, budget: &SearchBudget) -> SearchStatus {
        if self.status != SearchStatus::Running {
            return self.status;
        }

        self.status = self.run(budget);

        if self.status != SearchStatus::Running {
            debug!(
                "Connector search finished ({:?}): expanded={}, generated={}, duplicates={}, pruned={}",
                self.status,
                self.stats.expanded,
                self.stats.generated,
                self.stats.duplicates,
                self.stats.pruned
            );
        }

        self.status
    }

    fn run(&mut self, budget: &SearchBudget) -> SearchStatus {
        loop {
            if let Some(max) = self.settings.max_expansions {
                if self.stats.expanded >= max {
                    return SearchStatus::LimitReached;
                }
            }

            let entry = match self.open.pop() {
                Some(entry) => entry,
                None => return SearchStatus::NotFound,
            };

            let node = self.arena.get(entry.id);

            // Termination depends on the parent's exit as well as the
            // signature, so a closed signature does not rule it out.
            if self.is_terminal(node) {
                return SearchStatus::Found(entry.id);
            }

            if !self.closed.insert(node.signature()) {
                self.stats.duplicates += 1;
                continue;
            }

            trace!(
                "Expanding node {} at {} (exit {}, f={:.2})",
                entry.id.index(),
                node.location(),
                node.exit_coordinates(),
                entry.f_score
            );

            let children = node.expand(entry.id, self.tile_set);
            self.stats.expanded += 1;

            for child in children {
                self.stats.generated += 1;

                if self.closed.contains(&child.signature()) && !self.is_terminal(&child) {
                    self.stats.duplicates += 1;
                    continue;
                }

                if child.h_score() > self.h_limit {
                    self.stats.pruned += 1;
                    continue;
                }

                let f_score = child.f_score();
                let id = self.arena.push(child);
                self.open.push(OpenEntry { f_score, id });
            }

            if !budget.has_budget() {
                return SearchStatus::Running;
            }
        }
    }

    /// Whether `node` ends the search: its exit sits on the destination, or
    /// the straight step from its parent's exit to its own passed over it.
    fn is_terminal(&self, node: &SearchNode) -> bool {
        let exit = node.exit_coordinates();
        let destination = node.destination();

        if exit == destination {
            return true;
        }

        match node.parent() {
            Some(parent) => {
                let from = self.arena.get(parent).exit_coordinates();
                destination.is_on_segment(from, exit)
            }
            None => false,
        }
    }

    /// Chain of tiles from the start down to `terminal`.
    pub fn chain(&self, terminal: NodeId) -> ConnectionChain {
        let steps = self
            .arena
            .path_to(terminal)
            .into_iter()
            .map(|id| self.arena.get(id))
            .filter_map(|node| {
                let tile = self.tile_set.get(node.tile()?)?;
                Some(ChainStep {
                    tile: tile.clone(),
                    location: node.location(),
                    exit: node.exit_coordinates(),
                })
            })
            .collect();

        let node = self.arena.get(terminal);

        ConnectionChain {
            steps,
            length: node.g_score(),
            end: node.exit_coordinates(),
        }
    }

    /// Convert a verdict into the public result.
    pub fn finish(&self) -> Result<ConnectionChain, SearchError> {
        let expanded = self.stats.expanded;

        match self.status {
            SearchStatus::Found(id) => Ok(self.chain(id)),
            SearchStatus::NotFound => Err(SearchError::NotFound { expanded }),
            SearchStatus::Running | SearchStatus::LimitReached => {
                Err(SearchError::BudgetExhausted { expanded })
            }
        }
    }
}

/// Find a chain of tiles from `start` to `destination` on `side`, with default
/// settings and no external budget.
pub fn search(
    start: Point,
    side: Side,
    destination: Point,
    tile_set: &ConnectionTileSet,
) -> Result<ConnectionChain, SearchError> {
    search_with(
        start,
        side,
        destination,
        tile_set,
        &SearchSettings::default(),
        &SearchBudget::unlimited(),
    )
}

/// Like [`search`], with explicit limits. Running out of `budget` yields
/// `SearchError::BudgetExhausted`.
pub fn search_with(
    start: Point,
    side: Side,
    destination: Point,
    tile_set: &ConnectionTileSet,
    settings: &SearchSettings,
    budget: &SearchBudget,
) -> Result<ConnectionChain, SearchError> {
    let mut search = PathSearch::new(tile_set, start, side, destination, settings.clone());
    search.step(budget);
    search.finish()
}
