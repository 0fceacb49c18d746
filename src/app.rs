use crate::assets::Assets;
use crate::audio::{Audio, Cue};
use crate::config::Config;
use crate::game::{Game, Press};
use crate::input::{self, Action};
use crate::render::{self, PixelBuf, Viewport};
use crossterm::{
    cursor,
    event::{self, Event},
    execute, terminal,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, Stdout, Write, stdout};
use std::time::{Duration, Instant};

/// Raw mode plus alternate screen for as long as it lives.
struct TerminalSession {
    out: Stdout,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        if let Err(err) = execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(TerminalSession { out })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

pub struct Options {
    pub seed: Option<u64>,
    pub mute: bool,
}

pub fn run(config: Config, opts: Options) -> anyhow::Result<()> {
    // Missing sprites are fatal; find out before touching the terminal.
    let assets = Assets::load()?;

    let audio = if opts.mute || !config.audio.enabled {
        log::info!("audio disabled");
        None
    } else {
        match Audio::open(config.audio.volume) {
            Ok(audio) => Some(audio),
            Err(err) => {
                log::warn!("{err}, playing without sound");
                None
            }
        }
    };

    let rng = match opts.seed {
        Some(seed) => {
            log::info!("pipe seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let frame_dur = Duration::from_millis(config.physics.tick_ms);
    let (board_w, board_h) = (config.board.width, config.board.height);
    let mut game = Game::new(config, rng);

    let mut session = TerminalSession::enter()?;
    let (cols, rows) = terminal::size()?;
    let mut buf = PixelBuf::for_terminal(cols, rows);
    let mut view = Viewport::fit(buf.width(), buf.height(), board_w, board_h);
    log::info!("terminal {cols}x{rows}, board {board_w}x{board_h}");

    let play = |cue: Cue| {
        if let Some(audio) = &audio {
            audio.play(cue);
        }
    };

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match input::action_for(&key) {
                    Some(Action::Quit) => {
                        log::info!("quit after {} ticks, best score {}", game.ticks(), game.best());
                        session.out.flush()?;
                        return Ok(());
                    }
                    Some(Action::Jump) => match game.press() {
                        Press::Jumped => play(Cue::Flap),
                        Press::Restarted => {}
                    },
                    None => {}
                },
                Event::Resize(c, r) => {
                    buf.resize(c as usize, r as usize * 2);
                    view = Viewport::fit(buf.width(), buf.height(), board_w, board_h);
                    log::debug!("resized to {c}x{r}");
                }
                _ => {}
            }
        }

        // Update
        let report = game.tick();
        if report.crashed {
            play(Cue::Crash);
        } else if report.half_points > 0 && game.score().fract() == 0.0 {
            play(Cue::Point);
        }

        // Render
        render::draw(&game, &assets, &view, &mut buf);
        buf.render(&mut session.out)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}
