// What you SEE:
// • The bottom image fills the window.
// • A dense fan of rays follows your pointer; wherever a ray reaches an obstacle,
//   the strip between pointer and obstacle reveals the top image.
// • Click inside an obstacle (white box) to swap which image is revealed.
// • H toggles the HUD, O toggles obstacle outlines. ESC quits.

use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use env_logger::{Builder, Target};
use log::{debug, info, LevelFilter};

use raycast_reveal::composite::{load_layer, Layers};
use raycast_reveal::config::{Config, DEFAULT_CONFIG_PATH};
use raycast_reveal::draw::{draw_text_5x7, Drawer};
use raycast_reveal::error::Error;
use raycast_reveal::geometry::Obstacle;
use raycast_reveal::scene::{FrameStats, Scene};
use raycast_reveal::types::{FrameBuffer, Mask};

const LOG_LEVEL_ENV: &str = "REVEAL_LOG_LEVEL";

fn init_logging() {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Info).target(Target::Stderr);
    if let Ok(level_str) = env::var(LOG_LEVEL_ENV) {
        builder.parse_filters(&level_str);
    }
    builder.init();
}

fn main() -> Result<(), Error> {
    init_logging();

    /* --- Config ---
       First CLI argument, else ./reveal.toml, else built-in defaults. */
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load(&config_path)?;
    let (w, h) = (config.window.width, config.window.height);

    /* --- Layers ---
       Visual: both images are cropped/scaled once to fill the window. */
    let layers = Layers {
        revealed: load_layer(&config.images.top, w, h)?,
        base: load_layer(&config.images.bottom, w, h)?,
    };

    /* --- Obstacles ---
       Layout is given as window fractions; resolve to pixels once. */
    let obstacles: Vec<Obstacle> = config
        .obstacles
        .iter()
        .map(|&rect| Obstacle::from_fractions(rect, w, h))
        .collect();

    let mut scene = Scene::new(
        obstacles,
        config.rays.count,
        layers,
        config.stroke_style(),
    );
    info!(
        "{}x{} window, {} rays, {} obstacles",
        w,
        h,
        config.rays.count,
        scene.obstacles.len()
    );

    let mut drawer = Drawer::new(&config.window.title, w, h, config.window.target_fps)?;

    /* --- Reusable buffers ---
       `mask` is rebuilt every frame; `screen` is what you actually see. */
    let mut mask = Mask::new(w, h);
    let mut screen = FrameBuffer::new(w, h);

    /* --- HUD / FPS --- */
    let mut show_hud = config.hud.show;
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");
    let mut stats = FrameStats::default();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Inputs: toggles + click-to-swap. */
        if drawer.h_pressed_once() { show_hud = !show_hud; }
        if drawer.o_pressed_once() { scene.show_outlines = !scene.show_outlines; }

        let pointer = drawer.mouse_pos();
        if drawer.left_mouse_pressed_once() {
            if let Some((mx, my)) = pointer {
                if !scene.press(mx, my) {
                    debug!("click at ({mx:.0}, {my:.0}) missed every obstacle");
                }
            }
        }

        /* 2) Cast, stroke and composite.
           Visual: the fan follows the pointer; the top image shows through it. */
        stats = scene.render_frame(pointer, &mut mask, &mut screen)?;

        /* 3) HUD on top. */
        if show_hud {
            let mut hud = format!("{} | RAYS: {} | HITS: {}", hud_fps_text, stats.rays, stats.hits);
            if scene.swapped() { hud.push_str(" | SWAPPED"); }
            draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);
        }

        /* 4) Present to the window. */
        drawer.present(&screen)?;

        /* 5) FPS counter (log + HUD once per second). */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            info!("FPS: {:.1} ({} of {} rays hit)", fps, stats.hits, stats.rays);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("window closed; last frame {:?}", stats);
    Ok(())
}
