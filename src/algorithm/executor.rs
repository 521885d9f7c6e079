//! Step-driven wave function collapse solver
//!
//! [`WaveFunction`] is a plain state machine. Each call to
//! [`WaveFunction::step`] performs one discrete unit of work (building an
//! attempt, one propagation pass, one collapse, or one restart) so a host can
//! interleave solving with its own loop. [`WaveFunction::run`] drives the
//! machine to completion.

use std::collections::VecDeque;

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::events::{SolverEvent, StepResult};
use crate::algorithm::propagation::{PropagationStrategy, propagate};
use crate::algorithm::selection::select_lowest_entropy;
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_ITERATION_LIMIT, DEFAULT_SEED, DEFAULT_WIDTH, MAX_GRID_DIMENSION,
    MAX_PRESETS,
};
use crate::io::error::{Result, SolverError};
use crate::math::random::{MersenneTwister, RandomSource};
use crate::spatial::catalog::TileCatalog;
use crate::spatial::cell::Cell;
use crate::spatial::grid::Grid;
use crate::spatial::partition::{GridPartitioner, Partition};
use crate::spatial::tiles::TileId;

/// Solver parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Seed of the first attempt
    pub seed: i32,
    /// Restarts allowed after contradictions; `0` allows a single attempt
    pub iteration_limit: usize,
    /// Propagation algorithm
    pub strategy: PropagationStrategy,
    /// Initial candidate sets: none, one for the whole grid, or three districts
    pub presets: Vec<TileBitset>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: DEFAULT_SEED,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            strategy: PropagationStrategy::default(),
            presets: Vec::new(),
        }
    }
}

impl SolverConfig {
    /// Default configuration for a `width × height` grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the first seed
    #[must_use]
    pub const fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the restart budget
    #[must_use]
    pub const fn with_iteration_limit(mut self, iteration_limit: usize) -> Self {
        self.iteration_limit = iteration_limit;
        self
    }

    /// Set the propagation algorithm
    #[must_use]
    pub const fn with_strategy(mut self, strategy: PropagationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the initial candidate presets
    #[must_use]
    pub fn with_presets(mut self, presets: Vec<TileBitset>) -> Self {
        self.presets = presets;
        self
    }

    /// Check the configuration against a catalog
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero or exceeds `MAX_GRID_DIMENSION`
    /// - The preset count is not 0, 1 or 3
    /// - A preset is empty or sized for a different catalog
    pub fn validate(&self, catalog: &TileCatalog) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(crate::io::error::invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        if !matches!(self.presets.len(), 0 | 1 | MAX_PRESETS) {
            return Err(crate::io::error::invalid_parameter(
                "presets",
                &self.presets.len(),
                &format!("expected 0, 1 or {MAX_PRESETS} presets"),
            ));
        }

        for preset in &self.presets {
            if preset.capacity() != catalog.len() {
                return Err(crate::io::error::invalid_parameter(
                    "presets",
                    &preset.capacity(),
                    &format!("preset must cover the catalog's {} tiles", catalog.len()),
                ));
            }
            if preset.is_empty() {
                return Err(crate::io::error::invalid_parameter(
                    "presets",
                    preset,
                    &"preset must contain at least one tile",
                ));
            }
        }

        Ok(())
    }
}

/// Where the solver is in its collapse–propagate cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SolverState {
    /// Not running
    #[default]
    Idle,
    /// Next step builds a fresh grid
    Initializing,
    /// Next step picks the lowest-entropy cell
    Selecting,
    /// A chosen cell is being committed
    Collapsing,
    /// Next step propagates the last collapse
    Propagating,
    /// Terminal: every cell is committed
    Collapsed,
    /// The current grid is unsatisfiable; next step restarts
    Contradicted,
    /// Terminal: retry budget exhausted
    Failed,
}

/// Fully collapsed grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolvedGrid {
    /// Committed tile per cell, indexed `[y, x]`
    tiles: Array2<TileId>,
    seed: i32,
    attempts: usize,
}

impl SolvedGrid {
    /// Width in cells
    pub fn width(&self) -> usize {
        self.tiles.ncols()
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.tiles.nrows()
    }

    /// Committed tile at `(x, y)`
    pub fn tile(&self, x: usize, y: usize) -> Option<TileId> {
        self.tiles.get([y, x]).copied()
    }

    /// Committed tiles, indexed `[y, x]`
    pub const fn tiles(&self) -> &Array2<TileId> {
        &self.tiles
    }

    /// Seed of the successful attempt
    pub const fn seed(&self) -> i32 {
        self.seed
    }

    /// Attempts made, including the successful one
    pub const fn attempts(&self) -> usize {
        self.attempts
    }
}

type Subscriber = Box<dyn FnMut(&SolverEvent)>;

/// Wave function collapse solver over one catalog
///
/// Owns its catalog, generator and the grid of the in-flight attempt. A
/// contradiction discards the grid and schedules a new attempt with the seed
/// incremented by one, up to `iteration_limit` restarts.
pub struct WaveFunction<R: RandomSource = MersenneTwister> {
    catalog: TileCatalog,
    config: SolverConfig,
    rng: R,
    state: SolverState,
    grid: Option<Grid>,
    partition: Option<Partition>,
    /// Seed passed to the last `start`
    run_seed: i32,
    /// Seed of the current attempt
    seed: i32,
    /// Attempts started since the last `start`
    attempts: usize,
    last_collapsed: (usize, usize),
    paused: bool,
    queue_events: bool,
    events: VecDeque<SolverEvent>,
    subscribers: Vec<Subscriber>,
}

impl WaveFunction<MersenneTwister> {
    /// Create a solver driven by a Mersenne Twister
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid for the catalog
    /// - The catalog's adjacency rules are not symmetric
    pub fn new(catalog: TileCatalog, config: SolverConfig) -> Result<Self> {
        let rng = MersenneTwister::new(config.seed);
        Self::with_generator(catalog, config, rng)
    }
}

impl<R: RandomSource> WaveFunction<R> {
    /// Create a solver driven by a caller-supplied generator
    ///
    /// The generator is reseeded at the start of every attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid for the catalog
    /// - The catalog's adjacency rules are not symmetric
    pub fn with_generator(catalog: TileCatalog, config: SolverConfig, rng: R) -> Result<Self> {
        config.validate(&catalog)?;
        catalog.verify_symmetry()?;

        let seed = config.seed;
        Ok(Self {
            catalog,
            config,
            rng,
            state: SolverState::Idle,
            grid: None,
            partition: None,
            run_seed: seed,
            seed,
            attempts: 0,
            last_collapsed: (0, 0),
            paused: false,
            queue_events: true,
            events: VecDeque::new(),
            subscribers: Vec::new(),
        })
    }

    /// Catalog being solved
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Active configuration
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Current state
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// Seed of the current attempt
    pub const fn seed(&self) -> i32 {
        self.seed
    }

    /// Seed the current run began with
    pub const fn run_seed(&self) -> i32 {
        self.run_seed
    }

    /// Attempts started since the last run began
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Whether stepping is suspended
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Grid of the current attempt, if one has been built
    pub const fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// District (0 = largest) of the cell at `(x, y)` when partitioned
    pub fn section_index(&self, x: usize, y: usize) -> Option<usize> {
        self.partition
            .as_ref()
            .and_then(|partition| partition.section_index(x, y))
    }

    /// Arm a fresh run from `seed` without performing any work
    pub fn start(&mut self, seed: i32) {
        self.run_seed = seed;
        self.seed = seed;
        self.attempts = 0;
        self.grid = None;
        self.partition = None;
        self.paused = false;
        self.state = SolverState::Initializing;
        tracing::info!(
            seed,
            width = self.config.width,
            height = self.config.height,
            tiles = self.catalog.len(),
            "solver run started"
        );
    }

    /// Solve from `seed` to completion
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Every attempt within the retry budget hits a contradiction
    /// - A candidate set has zero total weight
    pub fn run(&mut self, seed: i32) -> Result<SolvedGrid> {
        self.start(seed);
        while !self.step()?.is_terminal() {
            if self.paused || self.state == SolverState::Idle {
                break;
            }
        }
        self.result().ok_or(SolverError::RetryBudgetExhausted {
            attempts: self.attempts,
            last_seed: self.seed,
        })
    }

    /// Suspend stepping; `step` returns `Waiting` until resumed
    pub const fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue after `pause`
    pub const fn resume(&mut self) {
        self.paused = false;
    }

    /// Start over from scratch with the seed the run began with
    pub fn restart(&mut self) {
        self.start(self.run_seed);
    }

    /// Start over from the seed after the current attempt's
    pub fn rerun_with_next_seed(&mut self) {
        self.start(self.seed.wrapping_add(1));
    }

    /// Choose between exhaustive and incremental propagation
    pub const fn set_brute_force_propagation(&mut self, enabled: bool) {
        self.config.strategy = if enabled {
            PropagationStrategy::Exhaustive
        } else {
            PropagationStrategy::Incremental
        };
    }

    /// Return to `Idle`, leaving the current grid readable
    pub fn stop(&mut self) {
        if self.state != SolverState::Idle {
            tracing::debug!(seed = self.seed, state = ?self.state, "solver stopped");
        }
        self.state = SolverState::Idle;
    }

    /// Keep events for `drain_events`; subscribers are notified regardless
    pub fn set_event_queue(&mut self, enabled: bool) {
        self.queue_events = enabled;
        if !enabled {
            self.events.clear();
        }
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<SolverEvent> {
        self.events.drain(..).collect()
    }

    /// Call `subscriber` for every future event
    pub fn subscribe(&mut self, subscriber: impl FnMut(&SolverEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Iterator over step results until terminal, paused, idle or an error
    pub const fn steps(&mut self) -> Steps<'_, R> {
        Steps {
            solver: self,
            done: false,
        }
    }

    /// Final grid, available only once `Collapsed`
    pub fn result(&self) -> Option<SolvedGrid> {
        if self.state != SolverState::Collapsed {
            return None;
        }
        let grid = self.grid.as_ref()?;
        let committed: Option<Vec<TileId>> = grid.cells().map(Cell::committed).collect();
        let tiles = Array2::from_shape_vec((grid.height(), grid.width()), committed?).ok()?;
        Some(SolvedGrid {
            tiles,
            seed: self.seed,
            attempts: self.attempts,
        })
    }

    /// Perform one unit of work
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A contradiction occurs with no restarts left (`RetryBudgetExhausted`)
    /// - A candidate set has zero total weight
    pub fn step(&mut self) -> Result<StepResult> {
        if self.paused {
            return Ok(StepResult::Waiting);
        }

        match self.state {
            SolverState::Idle | SolverState::Collapsed | SolverState::Failed => {
                Ok(StepResult::Waiting)
            }
            SolverState::Initializing => self.begin_attempt(),
            SolverState::Propagating => Ok(self.propagate_step()),
            SolverState::Selecting | SolverState::Collapsing => self.collapse_next(),
            SolverState::Contradicted => self.retry(),
        }
    }

    fn begin_attempt(&mut self) -> Result<StepResult> {
        self.rng.reseed(self.seed);
        self.attempts += 1;
        tracing::debug!(seed = self.seed, attempt = self.attempts, "attempt started");

        let (width, height) = (self.config.width, self.config.height);
        let grid = match self.config.presets.as_slice() {
            [] => {
                self.partition = None;
                Grid::new(width, height, &self.catalog)
            }
            [preset] => {
                self.partition = None;
                Grid::with_candidates(width, height, &self.catalog, |_, _| preset.clone())
            }
            presets => {
                let partition = GridPartitioner::partition(width, height, &mut self.rng);
                let all = self.catalog.all_tiles();
                let grid = Grid::with_candidates(width, height, &self.catalog, |x, y| {
                    partition
                        .candidates_for(x, y, presets)
                        .unwrap_or(&all)
                        .clone()
                });
                self.partition = Some(partition);
                grid
            }
        };
        let grid = self.grid.insert(grid);

        let x = self.rng.next_below(dimension_bound(width)) as usize;
        let y = self.rng.next_below(dimension_bound(height)) as usize;
        let cell = grid.cell_mut(x, y).ok_or(SolverError::OutOfBounds { x, y })?;
        let tile = cell.collapse(&self.catalog, &mut self.rng)?;

        self.last_collapsed = (x, y);
        self.state = SolverState::Propagating;
        self.emit(SolverEvent::CellCollapsed { x, y, tile });
        Ok(StepResult::Initialized { seed: self.seed })
    }

    fn propagate_step(&mut self) -> StepResult {
        let Some(grid) = self.grid.as_mut() else {
            self.state = SolverState::Initializing;
            return StepResult::Waiting;
        };

        let outcome = propagate(grid, &self.catalog, self.config.strategy, self.last_collapsed);
        let satisfiable = grid.is_satisfiable();
        let finished = grid.is_fully_collapsed();
        let contradiction = grid.first_contradiction();

        for constrained in &outcome.constrained {
            self.emit(SolverEvent::CellConstrained {
                x: constrained.x,
                y: constrained.y,
                remaining: constrained.remaining,
            });
        }

        if !satisfiable {
            tracing::debug!(
                seed = self.seed,
                attempt = self.attempts,
                cell = ?contradiction,
                "contradiction detected"
            );
            self.state = SolverState::Contradicted;
            self.emit(SolverEvent::ContradictionDetected { seed: self.seed });
            return StepResult::Contradicted { seed: self.seed };
        }

        if finished {
            tracing::info!(seed = self.seed, attempts = self.attempts, "grid fully collapsed");
            self.state = SolverState::Collapsed;
            self.emit(SolverEvent::Finished { seed: self.seed });
            return StepResult::Finished { seed: self.seed };
        }

        self.state = SolverState::Selecting;
        StepResult::Propagated {
            constrained: outcome.constrained.len(),
        }
    }

    fn collapse_next(&mut self) -> Result<StepResult> {
        let Some(grid) = self.grid.as_mut() else {
            self.state = SolverState::Initializing;
            return Ok(StepResult::Waiting);
        };

        let Some((x, y)) = select_lowest_entropy(grid) else {
            // Nothing open means propagation already settled the grid
            self.state = SolverState::Propagating;
            return Ok(StepResult::Propagated { constrained: 0 });
        };

        self.state = SolverState::Collapsing;
        let cell = grid.cell_mut(x, y).ok_or(SolverError::OutOfBounds { x, y })?;
        let tile = cell.collapse(&self.catalog, &mut self.rng)?;

        self.last_collapsed = (x, y);
        self.state = SolverState::Propagating;
        self.emit(SolverEvent::CellCollapsed { x, y, tile });
        Ok(StepResult::Collapsed { x, y, tile })
    }

    fn retry(&mut self) -> Result<StepResult> {
        let restarts = self.attempts.saturating_sub(1);
        if restarts >= self.config.iteration_limit {
            tracing::warn!(
                attempts = self.attempts,
                last_seed = self.seed,
                "retry budget exhausted without a solution"
            );
            self.state = SolverState::Failed;
            return Err(SolverError::RetryBudgetExhausted {
                attempts: self.attempts,
                last_seed: self.seed,
            });
        }

        self.seed = self.seed.wrapping_add(1);
        self.grid = None;
        self.state = SolverState::Initializing;
        tracing::debug!(seed = self.seed, restart = restarts + 1, "restarting with next seed");
        Ok(StepResult::Restarted { seed: self.seed })
    }

    fn emit(&mut self, event: SolverEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
        if self.queue_events {
            self.events.push_back(event);
        }
    }
}

fn dimension_bound(extent: usize) -> u32 {
    u32::try_from(extent).unwrap_or(u32::MAX)
}

/// Iterator returned by [`WaveFunction::steps`]
pub struct Steps<'a, R: RandomSource> {
    solver: &'a mut WaveFunction<R>,
    done: bool,
}

impl<R: RandomSource> Iterator for Steps<'_, R> {
    type Item = Result<StepResult>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.solver.step();
        match result {
            Ok(StepResult::Waiting) => {
                self.done = true;
                None
            }
            Ok(step) if step.is_terminal() => {
                self.done = true;
                Some(Ok(step))
            }
            Ok(step) => Some(Ok(step)),
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}
