//! Starfall entry point
//!
//! Terminal setup, the blocking 60 Hz frame loop, and the translation of
//! raw key events into the simulation's input alphabet.

use std::collections::HashMap;
use std::io::{BufWriter, Write, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal,
};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use starfall::audio::AudioManager;
use starfall::consts::TICK_RATE;
use starfall::settings::Settings;
use starfall::sim::{GamePhase, TickInput, World, tick};
use starfall::term::{self, Screen};

const FRAME: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// A key counts as "held" if its last press/repeat arrived within this many
/// frames. Covers terminals without key-release events: the OS key-repeat
/// rate refreshes the window before it expires.
const HOLD_WINDOW: u64 = 4;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let settings = Settings::load();
    let audio = AudioManager::new(&settings);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("starfall starting with seed {seed}");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread to blocking event reads so the frame loop never
    // waits on input I/O
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx, &settings, &audio, seed);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
    audio: &AudioManager,
    seed: u64,
) -> std::io::Result<()> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut world = World::new(&mut rng);

    audio.start_music();

    // Last frame each key was seen pressed or repeating
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let mut input = TickInput::default();

        // Drain pending events; one-shot actions are decoded per press,
        // movement and fire come from the held-key map below
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, .. }) => match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                        match decode_press(code, world.phase) {
                            Action::Start => input.start = true,
                            Action::Back => input.back = true,
                            Action::Quit => return Ok(()),
                            Action::None => {}
                        }
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(..) => {}
                _ => {}
            }
        }

        input.move_left = is_held(&key_frame, KeyCode::Left, frame)
            || is_held(&key_frame, KeyCode::Char('a'), frame);
        input.move_right = is_held(&key_frame, KeyCode::Right, frame)
            || is_held(&key_frame, KeyCode::Char('d'), frame);
        input.fire = is_held(&key_frame, KeyCode::Char(' '), frame);

        let events = tick(&mut world, &input, &mut rng);
        audio.play_events(&events);

        let (width, height) = terminal::size()?;
        term::render(out, &world, Screen::new(width, height), settings)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

enum Action {
    Start,
    Back,
    Quit,
    None,
}

/// One-shot key decoding, phase-sensitive the way the screens advertise it:
/// SPACE starts from the menu, R restarts after a game over, ESC backs out
/// of play and quits everywhere else.
fn decode_press(code: KeyCode, phase: GamePhase) -> Action {
    match (phase, code) {
        (_, KeyCode::Char('q')) | (_, KeyCode::Char('Q')) => Action::Quit,
        (GamePhase::Menu, KeyCode::Char(' ')) => Action::Start,
        (GamePhase::Menu, KeyCode::Esc) => Action::Quit,
        (GamePhase::Playing, KeyCode::Esc) => Action::Back,
        (GamePhase::GameOver, KeyCode::Char('r')) | (GamePhase::GameOver, KeyCode::Char('R')) => {
            Action::Start
        }
        (GamePhase::GameOver, KeyCode::Esc) => Action::Quit,
        _ => Action::None,
    }
}
