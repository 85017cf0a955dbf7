// src/main.rs
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gamelist::app::{GameListApp, Route};
use gamelist::config::{config_path, load_config};

fn pick_renderer() -> eframe::Renderer {
    match env::var("GAMELIST_RENDERER").as_deref() {
        Ok("glow") => eframe::Renderer::Glow,
        Ok("wgpu") => eframe::Renderer::Wgpu,
        _ => {
            // Default: Windows = WGPU (DX12), Others = Glow (GL)
            #[cfg(target_os = "windows")]
            { eframe::Renderer::Wgpu }
            #[cfg(not(target_os = "windows"))]
            { eframe::Renderer::Glow }
        }
    }
}

fn main() -> eframe::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    #[cfg(target_os = "linux")]
    {
        info!("XDG_SESSION_TYPE={:?}", env::var_os("XDG_SESSION_TYPE"));
        info!("WAYLAND_DISPLAY={:?}", env::var_os("WAYLAND_DISPLAY"));
        info!("DISPLAY={:?}", env::var_os("DISPLAY"));
    }

    let cfg = load_config();
    info!("config: {}", config_path().display());

    // Optional start location, e.g. `game-detail.html?id=12`.
    let route = env::args().nth(1).map_or(Route::Catalog, |loc| Route::parse(&loc));
    info!("start route: {route:?}");

    let options = eframe::NativeOptions {
        renderer: pick_renderer(),
        multisampling: 0,
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Game List")
            .with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    match eframe::run_native(
        "Game List",
        options,
        Box::new(move |_cc| Ok(Box::new(GameListApp::new(cfg, route)))),
    ) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("eframe failed to start: {e:?}");
            error!("Hint: on WSL use X/Wayland; on Windows try GAMELIST_RENDERER=wgpu or glow.");
            Err(e)
        }
    }
}
