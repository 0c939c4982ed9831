// What you SEE:
// • A black window.
// • Left click: a bright ring grows out of the click, dims, and is gone after ~3 s.
// • With drag on (default build, or RIPPLE_DRAG=1), moving the mouse leaves a trail of rings.
// • ESC or closing the window quits.

mod config;
mod draw;
mod error;
mod input;
mod refresh;
mod ring;
mod ripple;
mod spawner;
mod surface;
mod types;

use config::Config;
use draw::Drawer;
use error::{Error, Result};
use log::{error, info};
use refresh::{FrontBuffer, RefreshTask};
use ripple::RippleContext;
use spawner::Spawner;
use surface::SharedSurface;
use types::{FrameBuffer, RunFlag};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Config::from_env()) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    info!(
        "starting: {}x{}, drag {}, lock per {:?}",
        config.width,
        config.height,
        if config.drag_enabled { "on" } else { "off" },
        config.lock_scope
    );

    /* --- Shared state ---
       Visual: nothing yet; one black framebuffer that every thread draws into. */
    let running = RunFlag::new();
    let surface = SharedSurface::new(FrameBuffer::new(config.width, config.height));
    let front = FrontBuffer::new(config.width, config.height);

    /* --- Window ---
       Visual: the window appears. If it can't, we stop here. */
    let mut drawer = Drawer::new(&config.title, front.clone())?;

    /* --- Refresh thread ---
       Visual: from now on the window shows the framebuffer ~60 times a second. */
    let refresh = RefreshTask::new(surface.clone(), front, running.clone(), config.frame_interval).spawn()?;

    /* --- Ripples ---
       Visual: clicks (and drags) start rings. */
    let spawner = Spawner::new(
        RippleContext {
            surface,
            running: running.clone(),
            frame_interval: config.frame_interval,
            lock_scope: config.lock_scope,
        },
        config.drag_enabled,
    );

    /* ------------------------------ Main loop ------------------------------ */
    let driven = input::drive(&mut drawer, &spawner, &running);

    /* --- Shutdown ---
       Ripple threads notice the flag at their next frame and exit on their own. */
    running.stop();
    let refreshed = refresh.join().map_err(|_| Error::TaskPanicked("refresh"))?;
    info!("stopped: {} ripples spawned, {} still winding down", spawner.spawned(), spawner.active());

    driven?;
    refreshed.map(|_| ())
}
