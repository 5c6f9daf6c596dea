//! Game controller
//!
//! Owns the phase state machine and the tick loop. The host delivers key
//! presses, button clicks and animation-frame callbacks; the controller
//! turns them into simulation commands and decides when the next frame is
//! wanted. Ticks only flow while Running: leaving Running cancels the loop
//! and nothing re-requests a frame until the next start.

use crate::input::KeyBindings;
use crate::settings::Settings;
use crate::sim::{Field, GamePhase, Simulation, TickOutcome};
use crate::snapshot::Snapshot;

/// Commands the host can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Jump (Running only, ignored while airborne)
    Jump,
    /// Start from Idle or restart from GameOver
    StartOrRestart,
}

/// The presentation collaborator
pub trait Presenter {
    /// Call `Controller::on_frame` once on the next animation frame
    fn request_frame(&mut self);
    /// Drop any outstanding frame request
    fn cancel_frame(&mut self);
    /// Draw one frame
    fn present(&mut self, snapshot: &Snapshot);
}

/// Handle for the repeating tick task. Started on entering Running,
/// cancelled on leaving it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameLoop {
    active: bool,
    /// Incremented on every start; distinguishes runs
    generation: u32,
    /// Ticks delivered in the current generation
    frames: u64,
}

impl FrameLoop {
    pub fn start(&mut self) {
        self.active = true;
        self.generation = self.generation.wrapping_add(1);
        self.frames = 0;
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

pub struct Controller<P: Presenter> {
    sim: Simulation,
    keys: KeyBindings,
    frame_loop: FrameLoop,
    presenter: P,
}

impl<P: Presenter> Controller<P> {
    /// Wrap a simulation and draw the idle screen
    pub fn new(sim: Simulation, keys: KeyBindings, presenter: P) -> Self {
        let mut controller = Self {
            sim,
            keys,
            frame_loop: FrameLoop::default(),
            presenter,
        };
        controller.present();
        controller
    }

    pub fn from_settings(settings: &Settings, seed: u64, field: Field, presenter: P) -> Self {
        let sim = Simulation::new(seed, field, settings.tuning.clone());
        Self::new(sim, settings.keys.clone(), presenter)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn phase(&self) -> GamePhase {
        self.sim.phase()
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Apply a command. Returns false if the current phase dropped it.
    pub fn handle(&mut self, command: Command) -> bool {
        match (self.sim.phase(), command) {
            (GamePhase::Running, Command::Jump) => self.sim.jump(),
            (GamePhase::Idle | GamePhase::GameOver, Command::StartOrRestart) => {
                self.start_run();
                true
            }
            _ => false,
        }
    }

    /// Keyboard entry point
    pub fn key_down(&mut self, code: &str) -> bool {
        match self.keys.command_for(code, self.sim.phase()) {
            Some(command) => self.handle(command),
            None => false,
        }
    }

    /// The on-screen start button
    pub fn start_button(&mut self) -> bool {
        self.handle(Command::StartOrRestart)
    }

    /// Host resized the play field
    pub fn resize(&mut self, width: f32, height: f32) {
        self.sim.resize(width, height);
        // The running loop redraws on its own next frame
        if !self.frame_loop.is_active() {
            self.present();
        }
    }

    /// Host animation-frame callback
    pub fn on_frame(&mut self) -> TickOutcome {
        if !self.frame_loop.is_active() {
            return TickOutcome::Skipped;
        }

        let outcome = self.sim.tick();
        self.frame_loop.frames += 1;

        if let TickOutcome::Collision { obstacle_id } = outcome {
            self.sim.end_run();
            self.frame_loop.cancel();
            self.presenter.cancel_frame();
            log::info!(
                "Game over: hit obstacle {} after {} ticks, score {}",
                obstacle_id,
                self.frame_loop.frames,
                self.sim.state().score
            );
            self.present();
            return outcome;
        }

        self.present();
        self.presenter.request_frame();
        outcome
    }

    fn start_run(&mut self) {
        self.sim.begin_run();
        self.frame_loop.start();
        log::info!(
            "Run {} started (seed {})",
            self.frame_loop.generation,
            self.sim.seed()
        );
        self.present();
        self.presenter.request_frame();
    }

    fn present(&mut self) {
        let snapshot = self.sim.snapshot();
        self.presenter.present(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct Recorder {
        requests: u32,
        cancels: u32,
        frames: Vec<Snapshot>,
    }

    impl Presenter for Recorder {
        fn request_frame(&mut self) {
            self.requests += 1;
        }

        fn cancel_frame(&mut self) {
            self.cancels += 1;
        }

        fn present(&mut self, snapshot: &Snapshot) {
            self.frames.push(snapshot.clone());
        }
    }

    fn controller() -> Controller<Recorder> {
        let sim = Simulation::new(
            1,
            Field::new(800.0, 300.0),
            Tuning {
                spawn_chance: 0.0,
                ..Tuning::default()
            },
        );
        Controller::new(sim, KeyBindings::default(), Recorder::default())
    }

    /// Run frames until a collision ends the run
    fn crash(c: &mut Controller<Recorder>) {
        c.sim.spawn_obstacle();
        for _ in 0..1_000 {
            if c.on_frame().is_collision() {
                return;
            }
        }
        panic!("expected a collision");
    }

    #[test]
    fn test_idle_screen_presented_on_creation() {
        let c = controller();
        assert_eq!(c.presenter().frames.len(), 1);
        assert_eq!(c.presenter().frames[0].phase, GamePhase::Idle);
        assert_eq!(c.presenter().requests, 0);
    }

    #[test]
    fn test_frames_ignored_while_idle() {
        let mut c = controller();
        let before = c.simulation().state().clone();
        assert_eq!(c.on_frame(), TickOutcome::Skipped);
        assert_eq!(c.simulation().state(), &before);
        assert_eq!(c.presenter().requests, 0);
    }

    #[test]
    fn test_start_begins_loop() {
        let mut c = controller();
        assert!(c.start_button());
        assert_eq!(c.phase(), GamePhase::Running);
        assert!(c.frame_loop().is_active());
        assert_eq!(c.presenter().requests, 1);

        c.on_frame();
        assert_eq!(c.presenter().requests, 2);
        assert_eq!(c.frame_loop().frames(), 1);
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut c = controller();
        c.handle(Command::StartOrRestart);
        c.on_frame();
        let generation = c.frame_loop().generation();
        assert!(!c.start_button());
        assert!(!c.key_down("KeyQ"));
        assert_eq!(c.frame_loop().generation(), generation);
    }

    #[test]
    fn test_collision_ends_run_and_stops_loop() {
        let mut c = controller();
        c.start_button();
        crash(&mut c);

        assert_eq!(c.phase(), GamePhase::GameOver);
        assert!(!c.frame_loop().is_active());
        assert_eq!(c.presenter().cancels, 1);
        let last = c.presenter().frames.last().unwrap();
        assert_eq!(last.phase, GamePhase::GameOver);

        // No more ticks or requests after game over
        let requests = c.presenter().requests;
        let state = c.simulation().state().clone();
        assert_eq!(c.on_frame(), TickOutcome::Skipped);
        assert_eq!(c.presenter().requests, requests);
        assert_eq!(c.simulation().state(), &state);
    }

    #[test]
    fn test_jump_ignored_after_game_over() {
        let mut c = controller();
        c.start_button();
        crash(&mut c);
        let state = c.simulation().state().clone();
        assert!(!c.handle(Command::Jump));
        assert!(!c.key_down("ArrowUp"));
        assert_eq!(c.simulation().state(), &state);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut c = controller();
        c.start_button();
        crash(&mut c);
        assert!(!c.simulation().state().obstacles.is_empty());

        assert!(c.key_down("Space"));
        assert_eq!(c.phase(), GamePhase::Running);
        assert_eq!(c.simulation().state().score, 0);
        assert!(c.simulation().state().obstacles.is_empty());
        assert!(c.frame_loop().is_active());
        assert_eq!(c.frame_loop().generation(), 2);
    }

    #[test]
    fn test_space_jumps_while_running() {
        let mut c = controller();
        c.key_down("Space");
        assert!(c.key_down("Space"));
        assert!(c.simulation().state().player.jumping);
        // Already airborne
        assert!(!c.key_down("ArrowUp"));
    }

    #[test]
    fn test_resize_redraws_when_idle() {
        let mut c = controller();
        c.resize(1024.0, 300.0);
        assert_eq!(c.presenter().frames.len(), 2);
        assert_eq!(c.presenter().frames[1].field.width, 1024.0);
    }
}
