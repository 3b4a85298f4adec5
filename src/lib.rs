pub mod config;
pub mod engine;
pub mod error;
pub mod view;

use speedy2d::color::Color;
use speedy2d::dimen::Vector2;
use speedy2d::window::{VirtualKeyCode, WindowHandler, WindowHelper, WindowStartupInfo};
use speedy2d::Graphics2D;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::engine::{ChaosGame, Pt, SpeedChange, StepOutcome};
use crate::view::Viewport;

pub const WIDTH: f32 = 900.0;
pub const HEIGHT: f32 = 900.0;
const TRACE_R: f32 = 1.5;
const CURRENT_R: f32 = 5.0;
const VERTEX_OUTER_R: f32 = 7.0;
const VERTEX_INNER_R: f32 = 3.0;
const HALO_R: f32 = 14.0;
const DASH: f32 = 8.0;
const DOT: f32 = 3.0;
const ANIM_INTERVAL: Duration = Duration::from_millis(40);

/// What a key press asks the app to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Step,
    StepToward(usize),
    TogglePlay,
    Speed(SpeedChange),
    Reset,
    Quit,
}

pub fn command_for_key(key: VirtualKeyCode) -> Option<Command> {
    use VirtualKeyCode::*;
    let cmd = match key {
        N | Space => Command::Step,
        Return | NumpadEnter => Command::TogglePlay,
        Up | Equals | NumpadAdd => Command::Speed(SpeedChange::Increase),
        Down | Minus | NumpadSubtract => Command::Speed(SpeedChange::Decrease),
        R => Command::Reset,
        Escape => Command::Quit,
        Key1 | Numpad1 => Command::StepToward(0),
        Key2 | Numpad2 => Command::StepToward(1),
        Key3 | Numpad3 => Command::StepToward(2),
        Key4 | Numpad4 => Command::StepToward(3),
        Key5 | Numpad5 => Command::StepToward(4),
        Key6 | Numpad6 => Command::StepToward(5),
        Key7 | Numpad7 => Command::StepToward(6),
        Key8 | Numpad8 => Command::StepToward(7),
        Key9 | Numpad9 => Command::StepToward(8),
        _ => return None,
    };
    Some(cmd)
}

pub struct App {
    game: ChaosGame,
    viewport: Viewport,
    window_size: Vector2<u32>,
    last_tick: Instant,
    last_step: Option<StepOutcome>,
}

impl App {
    pub fn new(game: ChaosGame) -> App {
        let viewport = Viewport::fit(game.vertices());
        App {
            game,
            viewport,
            window_size: Vector2::new(WIDTH as u32, HEIGHT as u32),
            last_tick: Instant::now(),
            last_step: None,
        }
    }

    pub fn game(&self) -> &ChaosGame {
        &self.game
    }

    /// The step to highlight: chosen vertex plus connector.
    pub fn last_step(&self) -> Option<StepOutcome> {
        self.last_step
    }

    pub fn title(&self) -> String {
        let state = if self.game.is_running() { "Playing" } else { "Paused" };
        format!(
            "Chaos game | Speed: {} step/frame | {} | N step, 1-{} toward vertex, \
             Enter play/pause, Up/Down speed, R reset, Esc quit",
            self.game.speed(),
            state,
            self.game.vertices().len().min(9),
        )
    }

    /// Applies a command and reports whether the title needs refreshing.
    /// `Quit` is left to the window handler.
    pub fn apply(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Step => {
                self.last_step = Some(self.game.step());
                false
            }
            Command::StepToward(index) => {
                match self.game.step_toward(index) {
                    Ok(outcome) => self.last_step = Some(outcome),
                    Err(e) => debug!(error = %e, "ignored key"),
                }
                false
            }
            Command::TogglePlay => {
                if self.game.toggle_running() {
                    self.last_tick = Instant::now();
                }
                true
            }
            Command::Speed(change) => {
                self.game.set_speed(change);
                true
            }
            Command::Reset => {
                self.game.reset();
                self.last_step = None;
                true
            }
            Command::Quit => false,
        }
    }

    /// Runs one engine tick if the interval has elapsed since the last one.
    pub fn advance(&mut self, now: Instant) {
        if !self.game.is_running() || now.duration_since(self.last_tick) < ANIM_INTERVAL {
            return;
        }
        self.last_tick = now;
        if let Some(outcome) = self.game.tick() {
            self.last_step = Some(outcome);
        }
    }

    fn screen(&self, p: Pt) -> Vector2<f32> {
        self.viewport.to_screen(p, self.window_size)
    }
}

impl WindowHandler for App {
    fn on_start(&mut self, helper: &mut WindowHelper, info: WindowStartupInfo) {
        self.window_size = *info.viewport_size_pixels();
        helper.set_title(self.title());
    }

    fn on_draw(&mut self, helper: &mut WindowHelper, graphics: &mut Graphics2D) {
        self.advance(Instant::now());

        graphics.clear_screen(Color::from_rgb(0.07, 0.07, 0.07));

        // dotted outline through the vertices
        let vertices = self.game.vertices();
        if vertices.len() >= 2 {
            for i in 0..vertices.len() {
                let a = self.screen(vertices[i]);
                let b = self.screen(vertices[(i + 1) % vertices.len()]);
                draw_dashed(graphics, a, b, DOT, 1.0, Color::from_rgb(0.4, 0.4, 0.4));
            }
        }

        for p in self.game.trace() {
            graphics.draw_circle(self.screen(*p), TRACE_R, Color::from_rgb(0.3, 0.6, 1.0));
        }

        for v in vertices {
            let center = self.screen(*v);
            graphics.draw_circle(center, VERTEX_OUTER_R, Color::WHITE);
            graphics.draw_circle(center, VERTEX_INNER_R, Color::from_rgb(0.12, 0.12, 0.12));
        }

        if let Some(step) = self.last_step {
            let vertex = self.screen(step.vertex);
            graphics.draw_circle(vertex, HALO_R, Color::from_rgba(1.0, 0.6, 0.1, 0.5));
            let from = self.screen(step.from);
            draw_dashed(graphics, from, vertex, DASH, 1.0, Color::from_rgb(1.0, 0.6, 0.1));
        }

        let current = self.screen(self.game.position());
        graphics.draw_circle(current, CURRENT_R, Color::from_rgb(1.0, 0.3, 0.3));

        helper.request_redraw();
    }

    fn on_key_down(
        &mut self,
        helper: &mut WindowHelper,
        virtual_key_code: Option<VirtualKeyCode>,
        _scancode: u32,
    ) {
        let Some(cmd) = virtual_key_code.and_then(command_for_key) else {
            return;
        };
        if cmd == Command::Quit {
            helper.terminate_loop();
            return;
        }
        if self.apply(cmd) {
            helper.set_title(self.title());
        }
    }

    fn on_resize(&mut self, _helper: &mut WindowHelper, size_pixels: Vector2<u32>) {
        self.window_size = size_pixels;
    }
}

/// Line broken into `dash`-long pieces with equal gaps.
fn draw_dashed(
    graphics: &mut Graphics2D,
    a: Vector2<f32>,
    b: Vector2<f32>,
    dash: f32,
    thickness: f32,
    color: Color,
) {
    for (start, end) in dash_segments(a, b, dash) {
        graphics.draw_line(start, end, thickness, color);
    }
}

fn dash_segments(a: Vector2<f32>, b: Vector2<f32>, dash: f32) -> Vec<(Vector2<f32>, Vector2<f32>)> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len <= f32::EPSILON {
        return Vec::new();
    }
    let (ux, uy) = (dx / len, dy / len);
    let mut out = Vec::with_capacity((len / (dash * 2.0)) as usize + 1);
    let mut t = 0.0;
    while t < len {
        let end = (t + dash).min(len);
        out.push((
            Vector2::new(a.x + ux * t, a.y + uy * t),
            Vector2::new(a.x + ux * end, a.y + uy * end),
        ));
        t += dash * 2.0;
    }
    out
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
