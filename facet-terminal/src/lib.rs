/// Terminal driver for the facet rasterizer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use facet_core::{render_frame, render_mesh, Frame, Mesh, Orientation, MAX_SUBDIVISION_DEPTH};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod renderer;

pub use config::Config;
pub use renderer::CellRenderer;

/// Heading/pitch change per key press, in degrees.
const ROTATE_STEP_DEG: f64 = 5.0;
/// Heading change per frame while spinning, in degrees.
const SPIN_STEP_DEG: f64 = 1.5;

/// What gets rasterized each frame.
pub enum Scene {
    /// The built-in tetrahedron.
    BaseSolid,
    /// A loaded mesh, already fitted to the base solid's extent, plus its
    /// subdivision at the last requested depth.
    Custom {
        source: Mesh,
        cached: Option<(u32, Mesh)>,
    },
}

impl Scene {
    pub fn custom(source: Mesh) -> Self {
        Scene::Custom {
            source,
            cached: None,
        }
    }

    /// Deepest subdivision this scene can render.
    pub fn max_depth(&self) -> u32 {
        match self {
            Scene::BaseSolid => MAX_SUBDIVISION_DEPTH,
            Scene::Custom { source, .. } => source.max_subdivision_depth(),
        }
    }

    /// Render one frame. Custom meshes are only re-subdivided when the depth
    /// changes.
    pub fn render(&mut self, view: &ViewState, size: usize) -> facet_core::Result<Frame> {
        let Orientation { heading, pitch } = view.orientation;
        match self {
            Scene::BaseSolid => render_frame(heading, pitch, size, size, view.depth),
            Scene::Custom { source, cached } => {
                let stale = cached.as_ref().map_or(true, |(depth, _)| *depth != view.depth);
                if stale {
                    *cached = Some((view.depth, source.subdivided(view.depth)?));
                }
                let mesh = match cached {
                    Some((_, mesh)) => &*mesh,
                    None => &*source,
                };
                render_mesh(mesh, &view.orientation.transform(), size, size)
            }
        }
    }
}

/// Input-driven state carried between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub orientation: Orientation,
    pub depth: u32,
    pub spin: bool,
    pub running: bool,
}

impl ViewState {
    pub fn new(depth: u32, spin: bool) -> Self {
        Self {
            orientation: Orientation::default(),
            depth,
            spin,
            running: true,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        let step = ROTATE_STEP_DEG.to_radians();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('w') | KeyCode::Up => self.orientation.rotate(0.0, step),
            KeyCode::Char('s') | KeyCode::Down => self.orientation.rotate(0.0, -step),
            KeyCode::Char('a') | KeyCode::Left => self.orientation.rotate(-step, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.orientation.rotate(step, 0.0),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.depth = (self.depth + 1).min(MAX_SUBDIVISION_DEPTH);
            }
            KeyCode::Char('-') => self.depth = self.depth.saturating_sub(1),
            KeyCode::Char(' ') => self.spin = !self.spin,
            KeyCode::Char('0') => self.orientation = Orientation::default(),
            _ => {}
        }
    }

    pub fn update(&mut self) {
        if self.spin {
            self.orientation.rotate(SPIN_STEP_DEG.to_radians(), 0.0);
        }
    }

    pub fn status(&self) -> String {
        format!(
            "heading {:+4.0}° pitch {:+3.0}° depth {}",
            self.orientation.heading.to_degrees(),
            self.orientation.pitch.to_degrees(),
            self.depth
        )
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    scene: Scene,
    view: ViewState,
    size: usize,
    renderer: CellRenderer,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene, config: &Config) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let depth = config.depth.min(scene.max_depth());

        Ok(Self {
            scene,
            view: ViewState::new(depth, config.spin),
            size: config.size,
            renderer: CellRenderer::new(cols as usize, status_rows(rows)),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.view.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.view.update();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => {
                self.view.handle_key(code);
                self.view.depth = self.view.depth.min(self.scene.max_depth());
            }
            Event::Resize(cols, rows) => {
                self.renderer.resize(cols as usize, status_rows(rows));
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self
            .scene
            .render(&self.view, self.size)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut stdout = stdout();
        self.renderer.draw(&frame.pixels, &mut stdout)?;

        // Status line below the image
        let (_, rows) = terminal::size()?;
        queue!(
            stdout,
            cursor::MoveTo(0, rows.saturating_sub(1)),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "{} | {} | FPS: {:.1} | WASD/Arrows=Rotate +/-=Depth Space=Spin 0=Reset Q=Quit",
                self.view.status(),
                frame.stats,
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Rows left for the image after the status line.
fn status_rows(rows: u16) -> usize {
    rows.saturating_sub(1) as usize
}
