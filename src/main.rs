use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod constants;
mod deck;
mod document;
mod error;
mod input;
mod manifest;
mod navigator;
mod render;
mod schedule;
mod sections;
mod slide;
mod state;
mod texture_loader;

use crate::constants::*;
use crate::deck::Deck;
use crate::document::Document;
use crate::error::NavigationError;
use crate::input::{ControlAdapter, KeyboardAdapter, PointerAdapter, ResizeAdapter, TouchAdapter, VisibilityAdapter};
use crate::manifest::Manifest;
use crate::navigator::SlideNavigator;
use crate::render::Renderer;

#[derive(Parser, Debug)]
#[command(name = "slidedeck", version, about = "Present a folder of slides")]
struct Cli {
    /// Directory with the slide images, and optionally a deck.toml
    deck_dir: PathBuf,

    /// Manifest to use instead of <DECK_DIR>/deck.toml
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Slide to open on (1-based)
    #[arg(long, conflicts_with = "section")]
    start: Option<usize>,

    /// Named section to open on
    #[arg(long)]
    section: Option<String>,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    height: i32,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "slidedeck=info")]
    log_level: String,
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

// Logging and per-section notes are plain observers of the navigator
fn subscribe_observers(navigator: &mut SlideNavigator) {
    navigator.subscribe(|change| {
        info!(
            from = change.from,
            to = change.to,
            total = change.total,
            progress = change.progress.percentage,
            title = %change.title,
            "{}",
            change.announcement
        );
    });

    let sections = navigator.deck().sections().clone();
    navigator.subscribe(move |change| {
        if let Some(section) = sections.section_starting_at(change.to) {
            info!(section, slide = change.to, "entered section");
        }
    });
}

// Opening on the slide already shown is not an error
fn open_at(navigator: &mut SlideNavigator, start: usize) -> Result<(), NavigationError> {
    match navigator.jump_to_slide(start) {
        Ok(_) | Err(NavigationError::AlreadyCurrent(_)) => Ok(()),
        Err(e) => Err(e),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    // --- Load Deck ---
    let manifest = match &cli.manifest {
        Some(path) => Some(Manifest::load(path)?),
        None => Manifest::discover(&cli.deck_dir)?,
    };
    let deck = Deck::load(&cli.deck_dir, manifest)
        .with_context(|| format!("Failed to load deck from {}", cli.deck_dir.display()))?;
    let settings = deck.settings.clone();

    let (mut rl, thread) = raylib::init()
        .size(cli.width, cli.height)
        .title(&deck.title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    rl.set_exit_key(None);

    let renderer = Renderer::load(&mut rl, &thread, &deck);

    // --- Navigator ---
    let document = Document::for_deck(&deck, rl.get_screen_width() as f32, rl.get_screen_height() as f32);
    let mut navigator = SlideNavigator::new(deck, document);

    let missing = navigator.self_check();
    if missing.is_empty() {
        debug!("all slides and navigation controls found");
    }
    for role in missing {
        warn!(element = %role, "presentation element not found");
    }

    subscribe_observers(&mut navigator);
    let nav = navigator.into_handle();

    if let Some(start) = cli.start {
        if let Err(e) = open_at(&mut nav.borrow_mut(), start) {
            warn!("cannot start on slide {}: {}", start, e);
        }
    }
    if let Some(section) = &cli.section {
        if let Err(e) = nav.borrow_mut().go_to_section(section) {
            warn!("cannot start on section: {}", e);
        }
    }

    // --- Input Adapters ---
    let mut keyboard = KeyboardAdapter::new(nav.clone());
    let mut controls = ControlAdapter::new(nav.clone());
    let mut pointer = PointerAdapter::new(nav.clone());
    let mut touch = TouchAdapter::new(nav.clone(), settings.swipe_min_distance);
    let mut resize = ResizeAdapter::new(nav.clone(), settings.resize_debounce());
    let mut visibility = VisibilityAdapter::new(nav.clone());
    let mut press_origin: Option<Vector2> = None;

    info!(
        slides = nav.borrow().total_slides(),
        current = nav.borrow().current_slide(),
        "presentation ready"
    );

    // --- Main Loop ---
    while !rl.window_should_close() {
        let now = Instant::now();

        visibility.on_visibility(rl.is_window_minimized() || rl.is_window_hidden());
        if rl.is_window_resized() {
            resize.on_resize(rl.get_screen_width() as f32, rl.get_screen_height() as f32, now);
        }
        resize.poll(now);

        while let Some(key) = rl.get_key_pressed() {
            keyboard.handle_key(key);
        }
        while let Some(c) = rl.get_char_pressed() {
            keyboard.handle_char(c);
        }

        // Touch arrives as the primary pointer. A press released close to
        // where it started is a click, anything longer is a swipe.
        let pointer_position = rl.get_mouse_position();
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            press_origin = Some(pointer_position);
            touch.touch_start(pointer_position);
        }
        if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(origin) = press_origin.take() {
                let travel = (pointer_position.x - origin.x).hypot(pointer_position.y - origin.y);
                if travel <= settings.click_slop {
                    touch.cancel();
                    controls.handle_click(pointer_position);
                    pointer.handle_click(pointer_position);
                } else {
                    touch.touch_end(pointer_position);
                }
            }
        }

        // --- Render ---
        let mut d = rl.begin_drawing(&thread);
        renderer.draw(&mut d, nav.borrow().document());
    }

    Ok(())
}
