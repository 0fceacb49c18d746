//! Game state and the fixed-step update.
//!
//! A [`Game`] owns everything that changes while playing. The frame loop
//! drives it with [`Game::tick`] once per `tick_ms` and forwards the jump key
//! to [`Game::press`]. Pipe spawning runs off the same tick: the game counts
//! elapsed milliseconds and appends a pair whenever a spawn interval is due.

use crate::config::Config;
use crate::geometry::Rect;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bird {
    pub rect: Rect,
    pub velocity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeKind {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipe {
    pub rect: Rect,
    pub kind: PipeKind,
    /// Set once the bird has cleared this pipe and it has been scored.
    pub passed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Over,
}

/// What the jump key did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Jumped,
    Restarted,
}

/// Everything that happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Half points gained (one per pipe passed).
    pub half_points: u32,
    pub pairs_spawned: u32,
    pub pipes_pruned: usize,
    pub crashed: bool,
}

pub struct Game {
    config: Config,
    rng: StdRng,
    bird: Bird,
    pipes: Vec<Pipe>,
    half_points: u32,
    best: u32,
    phase: Phase,
    spawn_clock_ms: u64,
    ticks: u64,
}

impl Game {
    pub fn new(config: Config, rng: StdRng) -> Self {
        let bird = Self::starting_bird(&config);
        Game {
            config,
            rng,
            bird,
            pipes: Vec::new(),
            half_points: 0,
            best: 0,
            phase: Phase::Playing,
            spawn_clock_ms: 0,
            ticks: 0,
        }
    }

    pub fn seeded(config: Config, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    fn starting_bird(config: &Config) -> Bird {
        Bird {
            rect: Rect::new(
                config.bird.x,
                config.bird.y,
                config.bird.width,
                config.bird.height,
            ),
            velocity: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// Score in points; passing a single pipe is worth half a point.
    pub fn score(&self) -> f64 {
        self.half_points as f64 / 2.0
    }

    /// Completed pairs, as shown on screen.
    pub fn whole_score(&self) -> u32 {
        self.half_points / 2
    }

    /// Best whole score of this process.
    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Jump, or start over when the game has ended.
    pub fn press(&mut self) -> Press {
        match self.phase {
            Phase::Playing => {
                self.bird.velocity = self.config.bird.jump_velocity;
                Press::Jumped
            }
            Phase::Over => {
                self.restart();
                Press::Restarted
            }
        }
    }

    pub fn restart(&mut self) {
        self.bird = Self::starting_bird(&self.config);
        self.pipes.clear();
        self.half_points = 0;
        self.phase = Phase::Playing;
        self.spawn_clock_ms = 0;
        log::info!("restart (best so far {})", self.best);
    }

    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if self.phase == Phase::Over {
            return report;
        }
        self.ticks += 1;

        self.bird.velocity += self.config.physics.gravity;
        self.bird.rect.y = (self.bird.rect.y + self.bird.velocity).max(0);

        let bird = self.bird.rect;
        let mut crashed = false;
        for pipe in &mut self.pipes {
            pipe.rect.x += self.config.pipes.scroll_velocity;

            if !pipe.passed && bird.x > pipe.rect.right() {
                pipe.passed = true;
                self.half_points += 1;
                report.half_points += 1;
            }

            if bird.overlaps(&pipe.rect) {
                crashed = true;
            }
        }

        if bird.y > self.config.board.height {
            crashed = true;
        }

        let before = self.pipes.len();
        self.pipes.retain(|pipe| pipe.rect.right() >= 0);
        report.pipes_pruned = before - self.pipes.len();
        if report.pipes_pruned > 0 {
            log::debug!("pruned {} pipes, {} left", report.pipes_pruned, self.pipes.len());
        }

        if crashed {
            self.phase = Phase::Over;
            self.best = self.best.max(self.whole_score());
            report.crashed = true;
            log::info!(
                "game over after {} ticks, score {}",
                self.ticks,
                self.whole_score()
            );
            return report;
        }

        self.spawn_clock_ms += self.config.physics.tick_ms;
        while self.spawn_clock_ms >= self.config.pipes.spawn_interval_ms {
            self.spawn_clock_ms -= self.config.pipes.spawn_interval_ms;
            self.spawn_pair();
            report.pairs_spawned += 1;
        }

        report
    }

    /// Append a top/bottom pair at the right edge of the board with a random
    /// opening height.
    pub fn spawn_pair(&mut self) {
        let pipes = &self.config.pipes;
        let offset = self.rng.gen_range(0..(pipes.height / 2).max(1));
        let top_y = -pipes.height / 4 - offset;
        let x = self.config.board.width;

        self.pipes.push(Pipe {
            rect: Rect::new(x, top_y, pipes.width, pipes.height),
            kind: PipeKind::Top,
            passed: false,
        });
        self.pipes.push(Pipe {
            rect: Rect::new(x, top_y + pipes.height + pipes.gap, pipes.width, pipes.height),
            kind: PipeKind::Bottom,
            passed: false,
        });
        log::debug!("spawned pair at y {top_y}, {} pipes live", self.pipes.len());
    }
}
