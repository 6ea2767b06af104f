mod render;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use life_engine::{CellState, LifeConfig, SimulationController, Viewport};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::render::{CellInstance, Renderer};

const WINDOW_TITLE: &str = "Conway's Game of Life";
const ALIVE_COLOR: [f32; 3] = [0.0, 228.0 / 255.0, 48.0 / 255.0];
const DEAD_COLOR: [f32; 3] = [55.0 / 255.0, 55.0 / 255.0, 55.0 / 255.0];

/// Discrete inputs the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    ToggleRun,
    Randomize,
    Clear,
    Faster,
    Slower,
}

fn command_for(key: &Key) -> Option<Command> {
    match key {
        Key::Named(NamedKey::Enter) => Some(Command::ToggleRun),
        Key::Character(text) if text.eq_ignore_ascii_case("R") => Some(Command::Randomize),
        Key::Character(text) if text.eq_ignore_ascii_case("C") => Some(Command::Clear),
        Key::Character(text) if text.eq_ignore_ascii_case("F") => Some(Command::Faster),
        Key::Character(text) if text.eq_ignore_ascii_case("S") => Some(Command::Slower),
        _ => None,
    }
}

fn status_title(running: bool, rate: u32) -> String {
    if running {
        format!("Game of Life is Running at {rate}")
    } else {
        "Game of Life is Paused".to_owned()
    }
}

/// Lays out one quad per cell, `cell_size - 1` pixels wide so the background
/// shows through as grid lines.
fn cell_instances(
    cells: impl Iterator<Item = (usize, usize, CellState)>,
    cell_size: u32,
    window_size: PhysicalSize<u32>,
    out: &mut Vec<CellInstance>,
) {
    out.clear();
    let width = window_size.width.max(1) as f32;
    let height = window_size.height.max(1) as f32;
    let pitch = cell_size as f32;
    let extent = cell_size.saturating_sub(1).max(1) as f32;

    for (row, col, cell) in cells {
        let x = col as f32 * pitch;
        let y = row as f32 * pitch;
        let color = match cell {
            CellState::Alive => ALIVE_COLOR,
            CellState::Dead => DEAD_COLOR,
        };
        out.push(CellInstance {
            min: [to_ndc(x, width), to_ndc_y(y, height)],
            max: [to_ndc(x + extent, width), to_ndc_y(y + extent, height)],
            color,
            _pad: 0.0,
        });
    }
}

fn to_ndc(x: f32, width: f32) -> f32 {
    (x / width) * 2.0 - 1.0
}

fn to_ndc_y(y: f32, height: f32) -> f32 {
    1.0 - (y / height) * 2.0
}

struct GameOfLifeApp {
    sim: SimulationController,
    cell_size: u32,
    window_size: PhysicalSize<u32>,
    last_tick: Instant,
    title: String,
    instances: Vec<CellInstance>,
}

impl GameOfLifeApp {
    fn new(sim: SimulationController, cell_size: u32, window_size: PhysicalSize<u32>) -> Self {
        let cell_count = sim.grid().rows() * sim.grid().cols();
        Self {
            title: status_title(sim.is_running(), sim.current_rate()),
            sim,
            cell_size,
            window_size,
            last_tick: Instant::now(),
            instances: Vec::with_capacity(cell_count),
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.window_size = size;
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::ToggleRun => self.sim.toggle_run(),
            Command::Randomize => self.sim.request_randomize(),
            Command::Clear => self.sim.request_clear(),
            Command::Faster => self.sim.faster(),
            Command::Slower => self.sim.slower(),
        }
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.sim.current_rate().max(1)
    }

    fn next_frame(&self) -> Instant {
        self.last_tick + self.frame_interval()
    }

    /// Runs a tick once the frame interval has passed.
    fn update(&mut self) {
        if self.last_tick.elapsed() >= self.frame_interval() {
            self.sim.tick();
            self.last_tick = Instant::now();
        }
    }

    /// The new title if it changed since the last call.
    fn refresh_title(&mut self) -> Option<&str> {
        let title = status_title(self.sim.is_running(), self.sim.current_rate());
        if title == self.title {
            return None;
        }
        self.title = title;
        Some(&self.title)
    }

    fn build_frame(&mut self) -> &[CellInstance] {
        cell_instances(self.sim.cells(), self.cell_size, self.window_size, &mut self.instances);
        &self.instances
    }
}

struct LifeWindow {
    window_attrs: WindowAttributes,
    window: Option<Arc<Window>>,
    window_id: Option<WindowId>,
    renderer: Option<Renderer>,
    app: GameOfLifeApp,
    failure: Option<anyhow::Error>,
    frame_count: u32,
    last_fps_log: Instant,
}

impl LifeWindow {
    fn new(viewport: Viewport, sim: SimulationController) -> Self {
        let size = PhysicalSize::new(viewport.width, viewport.height);
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(size)
            .with_resizable(false);
        Self {
            window_attrs: attrs,
            window: None,
            window_id: None,
            renderer: None,
            app: GameOfLifeApp::new(sim, viewport.cell_size, size),
            failure: None,
            frame_count: 0,
            last_fps_log: Instant::now(),
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = event_loop
            .create_window(self.window_attrs.clone())
            .context("create window")?;
        let window = Arc::new(window);
        let grid = self.app.sim.grid();
        let renderer = pollster::block_on(Renderer::new(window.clone(), grid.rows() * grid.cols()))
            .context("create GPU state")?;
        self.app.resize(renderer.size());
        window.set_title(&self.app.title);
        window.request_redraw();

        self.window_id = Some(window.id());
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn sync_title(&mut self) {
        if let (Some(window), Some(title)) = (&self.window, self.app.refresh_title()) {
            window.set_title(title);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.app.update();
        self.sync_title();
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let instances = self.app.build_frame();
        if let Err(err) = renderer.render(instances) {
            match err {
                wgpu::SurfaceError::Lost => renderer.resize(renderer.size()),
                wgpu::SurfaceError::OutOfMemory => {
                    log::error!("surface out of memory, closing");
                    event_loop.exit();
                }
                _ => log::warn!("dropped frame: {err}"),
            }
            return;
        }

        self.frame_count += 1;
        let elapsed = self.last_fps_log.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            log::info!("fps: {:.1} (target {}), generation {}", fps, self.app.sim.current_rate(), self.app.sim.generation());
            self.frame_count = 0;
            self.last_fps_log = Instant::now();
        }
    }
}

impl ApplicationHandler<()> for LifeWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.open(event_loop) {
            self.failure = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if Some(window_id) != self.window_id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
                self.app.resize(size);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let Some(command) = command_for(&event.logical_key) {
                        log::debug!("key {:?} -> {:?}", event.logical_key, command);
                        self.app.apply(command);
                        self.sync_title();
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let next_frame = self.app.next_frame();
        if Instant::now() >= next_frame {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(next_frame));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = LifeConfig::default();
    let sim = SimulationController::from_config(&config).context("configure simulation")?;
    let event_loop = EventLoop::new()?;
    let mut app = LifeWindow::new(config.viewport, sim);
    event_loop.run_app(&mut app)?;
    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
