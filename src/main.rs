//! Pitfall headless runner
//!
//! Usage: `pitfall [settings.json] [input-script]`
//!
//! Without a script the autopilot plays for `demo_frames` frames. A script
//! holds one line per frame of whitespace-separated input tokens
//! (`+right`, `-space`, `quit`, ...).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pitfall::audio::LogAudio;
use pitfall::persistence::JsonFileStore;
use pitfall::platform::{InputEvent, Key, KeyEvent};
use pitfall::renderer::RecordingSurface;
use pitfall::screen::Screen;
use pitfall::settings::DEFAULT_SETTINGS_FILE;
use pitfall::sim::autopilot_keys;
use pitfall::{SessionError, SessionManager, Settings};

type Manager = SessionManager<JsonFileStore, LogAudio>;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Pitfall starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    let settings = Settings::load(&settings_path);

    let script = match args.next().map(|path| load_script(Path::new(&path))) {
        Some(Ok(script)) => Some(script),
        Some(Err(e)) => {
            log::error!("Could not read input script: {e}");
            return ExitCode::FAILURE;
        }
        None => None,
    };

    match run(settings, script) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: Settings, script: Option<Vec<Vec<InputEvent>>>) -> Result<(), SessionError> {
    let store = JsonFileStore::open(&settings.save_path)?;
    let audio = LogAudio::from_settings(&settings);
    let frames = match &script {
        Some(lines) => lines.len() as u64,
        None => settings.demo_frames,
    };
    let frame_time = settings.frame_time();

    let mut manager = SessionManager::new(settings, store, audio);
    let mut surface = RecordingSurface::new();

    let mut frame = 0;
    while frame < frames && manager.is_running() {
        let events = match &script {
            Some(lines) => lines[frame as usize].clone(),
            None => demo_input(&manager),
        };
        for event in events {
            manager.handle_event(event)?;
        }
        manager.update()?;
        manager.draw(&mut surface);
        frame += 1;
    }

    log::info!(
        "Ran {} frames ({:.1}s simulated), ended on the {} screen",
        surface.frames(),
        frame as f32 * frame_time,
        manager.screen().name()
    );
    manager.handle_event(InputEvent::Quit)
}

/// Start a session from the menu, let the autopilot play, replay on defeat
fn demo_input(manager: &Manager) -> Vec<InputEvent> {
    let keys = match manager.screen() {
        Screen::MainMenu(_) => vec![KeyEvent::pressed(Key::Enter)],
        Screen::Play(play) => autopilot_keys(play.state()),
        Screen::Lose(_) => vec![KeyEvent::released(Key::P)],
        Screen::Store(_) => vec![KeyEvent::released(Key::E)],
    };
    keys.into_iter().map(InputEvent::Key).collect()
}

fn load_script(path: &Path) -> std::io::Result<Vec<Vec<InputEvent>>> {
    let text = std::fs::read_to_string(path)?;
    let script = text
        .lines()
        .map(|line| {
            line.split_whitespace()
                .filter_map(|token| {
                    let event = InputEvent::parse(token);
                    if event.is_none() {
                        log::warn!("Ignoring unknown input token {token:?}");
                    }
                    event
                })
                .collect()
        })
        .collect();
    Ok(script)
}
