//! Interaction controller and puzzle state machine.

use tracing::{debug, info, trace};

use crate::adjacency::{AdjacencyResolver, Gate};
use crate::core::{
    Board, EngineConfig, Level, NetworkMode, PieceId, PieceKind, Result, Vec2,
};
use crate::propagation::{
    ChainReaction, Outcomes, PropagationEngine, PropagationStrategy, Reachability, SignedRatio,
};
use crate::rules::{Status, WinEvaluator};
use crate::schedule::{DominoRun, FlowReveal};

use super::progress::{Progress, ProgressObserver};
use super::snapshot::{PieceView, Snapshot};

/// One puzzle session: the level, its live pieces and the lifecycle.
///
/// The engine is the only owner of piece state. Hosts translate input
/// into `rotate`/`toggle`/`drag`/`release`/`trigger`, call `tick` once
/// per frame and draw from `snapshot`.
///
/// Actions that do not apply (locked piece, unknown id, wrong status,
/// wrong variant) are ignored and return `false`.
pub struct PuzzleEngine {
    level: Level,
    config: EngineConfig,
    /// Board as instantiated from the level, restored on reset.
    pristine: Board,
    board: Board,
    network: PropagationEngine,
    strategy: Box<dyn PropagationStrategy>,
    evaluator: WinEvaluator,
    outcomes: Outcomes,
    reveal: FlowReveal,
    dominoes: DominoRun,
    status: Status,
    moves: u32,
    dragging: Option<PieceId>,
    triggered: bool,
    observers: Vec<Box<dyn ProgressObserver>>,
}

impl PuzzleEngine {
    /// Validate `level` and set it up. The engine starts in `Setup`.
    pub fn load(level: Level, config: EngineConfig) -> Result<Self> {
        level.validate()?;
        let pristine = Board::from_level(&level);
        let network = PropagationEngine::new(AdjacencyResolver::new(config.mesh_tolerance));
        let strategy = strategy_for(&level, &config);
        let outcomes = Outcomes::at_rest(pristine.len(), strategy.rest());
        info!(level = %level.id, name = %level.name, topology = %level.topology, pieces = pristine.len(), "level loaded");

        Ok(Self {
            evaluator: WinEvaluator::new(level.goal.clone()),
            reveal: FlowReveal::new(config.reveal_delay_ticks.unwrap_or(0)),
            dominoes: DominoRun::new(ChainReaction::new(config.domino_reach), config.fall_ticks),
            board: pristine.clone(),
            pristine,
            network,
            strategy,
            outcomes,
            level,
            config,
            status: Status::Setup,
            moves: 0,
            dragging: None,
            triggered: false,
            observers: Vec::new(),
        })
    }

    /// Replace the adjacency gate (builder pattern).
    #[must_use]
    pub fn with_gate(mut self, gate: Box<dyn Gate>) -> Self {
        let resolver = AdjacencyResolver::new(self.config.mesh_tolerance).with_gate(gate);
        self.network = PropagationEngine::new(resolver);
        if self.status != Status::Setup && self.resolve() {
            self.emit();
        }
        self
    }

    /// Register a progress observer.
    pub fn subscribe(&mut self, observer: Box<dyn ProgressObserver>) {
        self.observers.push(observer);
    }

    // === Lifecycle ===

    /// `Setup -> Playing`: run the first propagation pass.
    pub fn start(&mut self) -> bool {
        if self.status != Status::Setup {
            trace!(status = %self.status, "start ignored");
            return false;
        }
        self.set_status(Status::Playing);
        self.resolve();
        self.emit();
        true
    }

    /// Throw away the attempt and start over on the same level.
    ///
    /// Every outstanding staged step becomes stale.
    pub fn reset(&mut self) {
        self.board = self.pristine.clone();
        self.reveal.cancel();
        let generation = self.dominoes.reset(self.board.len());
        self.outcomes = Outcomes::at_rest(self.board.len(), self.strategy.rest());
        self.moves = 0;
        self.dragging = None;
        self.triggered = false;
        info!(level = %self.level.id, generation = generation.0, "attempt reset");
        self.set_status(Status::Setup);
        self.start();
    }

    /// Replace the level and start a fresh attempt on it.
    ///
    /// On error the current level is kept untouched.
    pub fn load_level(&mut self, level: Level) -> Result<()> {
        level.validate()?;
        self.pristine = Board::from_level(&level);
        self.strategy = strategy_for(&level, &self.config);
        self.evaluator = WinEvaluator::new(level.goal.clone());
        info!(level = %level.id, name = %level.name, topology = %level.topology, pieces = self.pristine.len(), "level loaded");
        self.level = level;
        self.reset();
        Ok(())
    }

    // === Player actions ===

    /// Rotate a piece one step clockwise.
    pub fn rotate(&mut self, id: PieceId) -> bool {
        if !self.accepts_input() {
            trace!(piece = %id, status = %self.status, "rotate ignored");
            return false;
        }
        let rotated = self.board.get_mut(id).is_some_and(|p| p.rotate(1));
        if !rotated {
            trace!(piece = %id, "rotate ignored: locked, unknown or not rotatable");
            return false;
        }
        self.apply_move();
        true
    }

    /// Flip a switch piece.
    pub fn toggle(&mut self, id: PieceId) -> bool {
        if !self.accepts_input() {
            trace!(piece = %id, status = %self.status, "toggle ignored");
            return false;
        }
        match self.board.get_mut(id) {
            Some(piece) if piece.kind == PieceKind::Switch => {
                piece.aux.switch_on = !piece.aux.switch_on;
            }
            _ => {
                trace!(piece = %id, "toggle ignored: not a switch");
                return false;
            }
        }
        self.apply_move();
        true
    }

    /// Move a gear to `(x, y)` and recompute the train live.
    ///
    /// The move is counted when the drag is released.
    pub fn drag(&mut self, id: PieceId, x: f64, y: f64) -> bool {
        if !self.accepts_input() {
            trace!(piece = %id, status = %self.status, "drag ignored");
            return false;
        }
        let draggable = self
            .board
            .get(id)
            .is_some_and(|p| p.kind == PieceKind::Gear && !p.is_locked());
        if !draggable || !self.board.move_to(id, Vec2::new(x, y)) {
            trace!(piece = %id, "drag ignored: not a free gear");
            return false;
        }
        self.dragging = Some(id);
        if self.resolve() {
            self.emit();
        }
        true
    }

    /// Stop dragging. There is nothing to commit or roll back.
    pub fn release(&mut self) -> bool {
        let Some(id) = self.dragging.take() else {
            return false;
        };
        self.moves += 1;
        debug!(piece = %id, moves = self.moves, "drag released");
        self.emit();
        true
    }

    /// Push the source dominoes. Once per attempt.
    pub fn trigger(&mut self) -> bool {
        if !self.accepts_input() || self.triggered {
            trace!(status = %self.status, triggered = self.triggered, "trigger ignored");
            return false;
        }
        if self.level.goal.mode() != NetworkMode::ChainReaction {
            trace!("trigger ignored: no chain reaction in this level");
            return false;
        }
        self.triggered = true;
        self.moves += 1;
        self.dominoes.start(&self.board, &self.level.sources);
        self.sync_dominoes();
        self.set_status(Status::Resolving);
        self.settle();
        self.emit();
        true
    }

    // === Frame ===

    /// Advance animation and staged propagation by one render tick.
    pub fn tick(&mut self) {
        self.reveal.tick();
        self.spin_gears();

        if self.dominoes.is_running() {
            let knocked = self.dominoes.tick(&self.board, self.network.resolver());
            if !knocked.is_empty() {
                debug!(knocked = knocked.len(), "dominoes struck");
            }
            self.sync_dominoes();
            if self.settle() {
                self.emit();
            }
        }
    }

    /// Read model for the renderer.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let staged = self.level.goal.mode() == NetworkMode::Reachability;
        let pieces = self
            .board
            .iter()
            .map(|p| {
                let outcome = self.outcomes.get(p.id);
                PieceView {
                    id: p.id,
                    kind: p.kind,
                    position: p.position,
                    connectors: p.effective_connectors(),
                    angle: p.angle,
                    outcome,
                    aligned: p.is_aligned(),
                    revealed: if staged {
                        self.reveal.is_revealed(p.id)
                    } else {
                        outcome.is_active()
                    },
                }
            })
            .collect();
        Snapshot {
            level: self.level.id,
            status: self.status,
            moves: self.moves,
            pieces,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            level: self.level.id,
            moves: self.moves,
            status: self.status,
        }
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Network state of the last pass.
    #[must_use]
    pub fn outcomes(&self) -> &Outcomes {
        &self.outcomes
    }

    #[must_use]
    pub fn reveal(&self) -> &FlowReveal {
        &self.reveal
    }

    #[must_use]
    pub fn dominoes(&self) -> &DominoRun {
        &self.dominoes
    }

    #[must_use]
    pub fn dragging(&self) -> Option<PieceId> {
        self.dragging
    }

    // === Internals ===

    /// `Playing`, or an alignment `Won` that a further rotation may undo.
    fn accepts_input(&self) -> bool {
        self.status.accepts_input()
            || (self.status == Status::Won && !self.evaluator.goal().locks_on_win())
    }

    fn apply_move(&mut self) {
        self.moves += 1;
        self.resolve();
        self.emit();
    }

    /// Full propagation pass and win check. `Resolving` lasts for the
    /// duration of this call only. Returns whether the status changed.
    fn resolve(&mut self) -> bool {
        if self.level.goal.mode() == NetworkMode::ChainReaction {
            // Nothing propagates until the chain is triggered.
            return false;
        }
        self.outcomes = self
            .network
            .propagate(&self.board, &self.level.sources, self.strategy.as_ref());
        if self.level.goal.mode() == NetworkMode::Reachability {
            self.reveal.restart(&self.outcomes);
        }
        let solved = self
            .evaluator
            .is_solved(&self.board, &self.outcomes, self.network.resolver());
        self.set_status(if solved { Status::Won } else { Status::Playing })
    }

    /// Decide the chain once it has come to rest. Returns whether it did.
    fn settle(&mut self) -> bool {
        if self.status != Status::Resolving || !self.dominoes.is_settled() {
            return false;
        }
        let solved = self
            .evaluator
            .is_solved(&self.board, &self.outcomes, self.network.resolver());
        self.set_status(if solved { Status::Won } else { Status::Failed });
        true
    }

    fn sync_dominoes(&mut self) {
        self.outcomes = self.dominoes.outcomes().clone();
        let falling: Vec<PieceId> = self.board.ids().filter(|&id| self.dominoes.is_falling(id)).collect();
        for id in falling {
            let angle = self.dominoes.fall_angle(id);
            if let Some(piece) = self.board.get_mut(id) {
                piece.angle = angle;
            }
        }
    }

    fn spin_gears(&mut self) {
        if self.level.goal.mode() != NetworkMode::SignedRatio {
            return;
        }
        let step = self.config.gear_degrees_per_tick;
        let turning: Vec<(PieceId, f64)> = self
            .board
            .iter()
            .filter(|p| p.kind == PieceKind::Gear)
            .map(|p| (p.id, self.outcomes.value(p.id)))
            .filter(|&(_, v)| v != 0.0)
            .collect();
        for (id, velocity) in turning {
            if let Some(piece) = self.board.get_mut(id) {
                piece.angle = (piece.angle + velocity * step).rem_euclid(360.0);
            }
        }
    }

    fn set_status(&mut self, status: Status) -> bool {
        if self.status == status {
            return false;
        }
        info!(level = %self.level.id, from = %self.status, to = %status, moves = self.moves, "status changed");
        self.status = status;
        true
    }

    fn emit(&mut self) {
        let progress = self.progress();
        for observer in &mut self.observers {
            observer.on_progress(&progress);
        }
    }
}

fn strategy_for(level: &Level, config: &EngineConfig) -> Box<dyn PropagationStrategy> {
    match level.goal.mode() {
        NetworkMode::Reachability => Box::new(Reachability),
        NetworkMode::SignedRatio => Box::new(SignedRatio::new(level.drive)),
        NetworkMode::ChainReaction => Box::new(ChainReaction::new(config.domino_reach)),
    }
}
