#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod animator;
mod assets;
mod colors;
mod constants;
mod ui;

use animator::SurfaceAnimator;
use assets::{
    AssetLoadState, AssetRoot, SceneLoadError, load_and_decode_image, load_embedded_scene,
    load_scene_file,
};
use clap::Parser;
use constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use poi_viewer::{Scene, ViewController};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// Pan and zoom around an illustrated scene and explore its points of interest.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scene file (RON) to load instead of the bundled one. Images are
    /// resolved relative to its directory.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value_t = DEFAULT_WINDOW_WIDTH)]
    width: f32,

    /// Initial window height
    #[arg(long, default_value_t = DEFAULT_WINDOW_HEIGHT)]
    height: f32,
}

/// Main application state for the viewer.
pub struct PoiViewerApp {
    scene: Option<Scene>,
    controller: Option<ViewController<SurfaceAnimator>>,
    image: Option<AssetLoadState>,
    texture: Option<TextureHandle>,
    /// Set once the controller has seen the first window and image size.
    loaded: bool,
    /// Info card bounds from the last frame, in window coordinates.
    info_card_rect: Option<egui::Rect>,
    load_error: Option<String>,
    toasts: Toasts,
}

impl PoiViewerApp {
    fn new(cc: &eframe::CreationContext<'_>, scene_path: Option<PathBuf>) -> Self {
        let toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        let mut app = Self {
            scene: None,
            controller: None,
            image: None,
            texture: None,
            loaded: false,
            info_card_rect: None,
            load_error: None,
            toasts,
        };

        let (scene, root) = match load_scene(scene_path) {
            Ok(loaded) => loaded,
            Err(err) => {
                log::error!("{err}");
                app.report_error(err.to_string());
                return app;
            }
        };

        log::info!(
            "Loaded scene '{}' with {} points of interest",
            scene.title,
            scene.points.len()
        );

        match ViewController::new(SurfaceAnimator::default(), &scene.points) {
            Ok(controller) => app.controller = Some(controller),
            Err(err) => {
                app.report_error(err.to_string());
                return app;
            }
        }

        // Decode the background image in a background thread
        let (tx, rx) = mpsc::channel();
        let ctx = cc.egui_ctx.clone();
        let image_path = scene.image_path.clone();

        thread::spawn(move || {
            let result = load_and_decode_image(&root, &image_path);
            let _ = tx.send(result);
            ctx.request_repaint();
        });

        app.image = Some(AssetLoadState::Loading(rx));
        app.scene = Some(scene);
        app
    }

    /// Polls the background image and creates its texture once decoded.
    fn poll_image(&mut self, ctx: &egui::Context) {
        let Some(AssetLoadState::Loading(rx)) = &self.image else {
            return;
        };

        let new_state = match rx.try_recv() {
            Ok(Ok(decoded)) => AssetLoadState::Ready(decoded),
            Ok(Err(err)) => {
                log::error!("{err}");
                AssetLoadState::Error(err.to_string())
            }
            Err(mpsc::TryRecvError::Disconnected) => {
                AssetLoadState::Error("image loader disconnected".to_owned())
            }
            Err(mpsc::TryRecvError::Empty) => return,
        };

        match &new_state {
            AssetLoadState::Ready(decoded) => {
                let image = ColorImage::from_rgba_unmultiplied(
                    [decoded.width as usize, decoded.height as usize],
                    &decoded.pixels,
                );
                let texture = ctx.load_texture("scene", image, TextureOptions::LINEAR);
                log::info!("Background image ready ({}x{})", decoded.width, decoded.height);
                self.texture = Some(texture);
            }
            AssetLoadState::Error(msg) => self.report_error(msg.clone()),
            AssetLoadState::Loading(_) => {}
        }

        self.image = Some(new_state);
    }

    fn report_error(&mut self, message: String) {
        self.toasts.add(Toast {
            kind: ToastKind::Error,
            text: message.clone().into(),
            options: ToastOptions::default()
                .duration_in_seconds(10.0)
                .show_icon(true),
            ..Default::default()
        });
        self.load_error = Some(message);
    }
}

impl eframe::App for PoiViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image(ctx);
        self.show_viewer(ctx);

        // Show toasts
        self.toasts.show(ctx);
    }
}

fn load_scene(scene_path: Option<PathBuf>) -> Result<(Scene, AssetRoot), SceneLoadError> {
    match scene_path {
        Some(path) => {
            let scene = load_scene_file(&path)?;
            let dir = path
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((scene, AssetRoot::Directory(dir)))
        }
        None => Ok((load_embedded_scene()?, AssetRoot::Embedded)),
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "POI Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(PoiViewerApp::new(cc, args.scene)))),
    )
}
