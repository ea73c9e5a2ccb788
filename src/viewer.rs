//! Terminal front-end: one-shot printing and the interactive viewer.
//!
//! Controls:
//! - `+`/`-`: Iterations
//! - `[`/`]`: Turn angle
//! - `j`: Toggle jitter
//! - `r`: Reseed
//! - `p`: Next preset
//! - Shift+0-5: Color scheme
//! - `?`: Help
//! - `q`/Esc: Quit

use crate::colors::ColorState;
use crate::config::{LSystemConfig, Preset};
use crate::error::Result;
use crate::fit::FitTransform;
use crate::help::render_help_overlay;
use crate::raster::BrailleCanvas;
use crate::settings::RenderSettings;
use crate::terminal::Terminal;
use crate::turtle::Drawing;
use crossterm::event::KeyCode;
use crossterm::style::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Upper bound for interactive iteration changes.
pub const MAX_INTERACTIVE_ITERATIONS: u32 = 12;

const HELP: &str = "\
L-SYSTEM
─────────────────
+/-    Iterations
[/]    Turn angle
j      Toggle jitter
r      Reseed
p      Next preset
Shift+0-5  Colors
?      Close help
q/Esc  Quit";

/// Seed from the config, or from the clock when none is given.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    })
}

/// Current grammar, its drawing, and the knobs the viewer can turn.
pub struct Scene {
    pub config: LSystemConfig,
    pub preset: Option<Preset>,
    pub seed: u64,
    pub drawing: Drawing,
    pub message: Option<String>,
    max_symbols: u64,
    // Jitter values to restore when jitter is toggled back on.
    saved_jitter: Option<(f64, f64)>,
}

impl Scene {
    pub fn new(config: LSystemConfig, preset: Option<Preset>, max_symbols: u64) -> Result<Self> {
        let seed = resolve_seed(config.seed);
        let drawing = build(&config, seed, max_symbols)?;
        Ok(Self {
            config,
            preset,
            seed,
            drawing,
            message: None,
            max_symbols,
            saved_jitter: None,
        })
    }

    pub fn jitter_enabled(&self) -> bool {
        self.saved_jitter.is_none()
    }

    /// Apply a control key. Returns true if the key was handled.
    ///
    /// Changes that fail to build (for example, exceeding the symbol budget) are rolled back
    /// and reported through `message`.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut candidate = self.config.clone();
        let mut seed = self.seed;
        let mut preset = self.preset;
        let mut saved_jitter = self.saved_jitter;

        match code {
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if candidate.iterations >= MAX_INTERACTIVE_ITERATIONS {
                    self.message = Some(format!("Iteration limit is {}", MAX_INTERACTIVE_ITERATIONS));
                    return true;
                }
                candidate.iterations += 1;
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                candidate.iterations = candidate.iterations.saturating_sub(1);
            }
            KeyCode::Char('[') => candidate.angle -= 1.0,
            KeyCode::Char(']') => candidate.angle += 1.0,
            KeyCode::Char('j') => match saved_jitter.take() {
                Some((angle, length)) => {
                    candidate.angle_jitter = angle;
                    candidate.length_jitter = length;
                }
                None => {
                    saved_jitter = Some((candidate.angle_jitter, candidate.length_jitter));
                    candidate.angle_jitter = 0.0;
                    candidate.length_jitter = 0.0;
                }
            },
            KeyCode::Char('r') => seed = seed.wrapping_add(1),
            KeyCode::Char('p') => {
                let next = preset.map_or(Preset::Plant, Preset::next);
                candidate = next.config();
                preset = Some(next);
                saved_jitter = None;
            }
            _ => return false,
        }

        match build(&candidate, seed, self.max_symbols) {
            Ok(drawing) => {
                self.config = candidate;
                self.seed = seed;
                self.preset = preset;
                self.saved_jitter = saved_jitter;
                self.drawing = drawing;
                self.message = None;
            }
            Err(e) => {
                tracing::debug!(error = %e, "keeping previous drawing");
                self.message = Some(e.to_string());
            }
        }
        true
    }

    fn status_line(&self) -> String {
        let name = self.preset.map_or("custom", Preset::name);
        let status = format!(
            " {}  n={}  angle={:.1}°  segments={}  seed={}  jitter={}  [?] help",
            name,
            self.config.iterations,
            self.config.angle,
            self.drawing.segments.len(),
            self.seed,
            if self.jitter_enabled() { "on" } else { "off" },
        );
        match &self.message {
            Some(msg) => format!("{}  | {}", status, msg),
            None => status,
        }
    }
}

fn build(config: &LSystemConfig, seed: u64, max_symbols: u64) -> Result<Drawing> {
    let mut rng = StdRng::seed_from_u64(seed);
    config.build(max_symbols, &mut rng)
}

/// Fit `drawing` into the top `rows` rows of the terminal buffer and shade it.
pub fn paint(
    term: &mut Terminal,
    drawing: &Drawing,
    colors: &ColorState,
    padding: f64,
    rows: u16,
) -> Result<()> {
    let (width, _) = term.size();
    let mut canvas = BrailleCanvas::new(width as usize, rows as usize);
    let fit = FitTransform::compute(&drawing.bounds, &canvas.viewport(padding)?);
    canvas.draw(&drawing.segments, &fit);

    let total = drawing.segments.len();
    for cell in canvas.cells() {
        let (fg, bold) = colors.shade(cell.order, total);
        term.set(cell.col as i32, cell.row as i32, cell.ch, Some(fg), bold);
    }
    Ok(())
}

/// Render the drawing for `config` into a `width x height` text block.
pub fn render_to_string(
    config: &LSystemConfig,
    render: &RenderSettings,
    width: u16,
    height: u16,
    color: bool,
) -> Result<String> {
    let drawing = build(config, resolve_seed(config.seed), render.max_symbols)?;
    let mut term = Terminal::with_size(width, height);
    let colors = ColorState::new(render.color_scheme);
    paint(&mut term, &drawing, &colors, render.padding, height)?;
    Ok(term.to_ansi_string(color))
}

/// Run the interactive viewer until the user quits.
pub fn run(config: LSystemConfig, preset: Option<Preset>, render: &RenderSettings) -> Result<()> {
    let mut scene = Scene::new(config, preset, render.max_symbols)?;
    let mut colors = ColorState::new(render.color_scheme);
    let mut term = Terminal::new(true)?;
    let mut show_help = false;
    let mut dirty = true;

    term.clear_screen()?;

    loop {
        if term.refresh_size()? {
            dirty = true;
        }

        if dirty {
            let (width, height) = term.size();
            term.clear();
            // Bottom row is the status line.
            let rows = height.saturating_sub(1);
            if let Err(e) = paint(&mut term, &scene.drawing, &colors, render.padding, rows) {
                term.set_str(0, 0, &e.to_string(), Some(Color::Red), false);
            }
            let status: String = scene.status_line().chars().take(width as usize).collect();
            term.set_str(0, height as i32 - 1, &status, Some(Color::DarkGrey), false);
            if show_help {
                render_help_overlay(&mut term, HELP);
            }
            term.render()?;
            dirty = false;
        }

        let Some(code) = term.wait_key(100)? else {
            continue;
        };

        match code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('?') => show_help = !show_help,
            _ if show_help => continue,
            _ => {
                if !colors.handle_key(code) && !scene.handle_key(code) {
                    continue;
                }
            }
        }
        dirty = true;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_SYMBOLS;

    fn scene() -> Scene {
        let config = LSystemConfig { seed: Some(7), ..Preset::Koch.config() };
        Scene::new(config, Some(Preset::Koch), DEFAULT_MAX_SYMBOLS).unwrap()
    }

    #[test]
    fn iteration_keys_regenerate() {
        let mut scene = scene();
        let before = scene.drawing.segments.len();
        assert!(scene.handle_key(KeyCode::Char('+')));
        assert_eq!(scene.config.iterations, 5);
        assert_eq!(scene.drawing.segments.len(), before * 5);
        assert!(scene.handle_key(KeyCode::Char('-')));
        assert_eq!(scene.drawing.segments.len(), before);
    }

    #[test]
    fn iterations_stop_at_zero() {
        let mut scene = scene();
        for _ in 0..10 {
            scene.handle_key(KeyCode::Char('-'));
        }
        assert_eq!(scene.config.iterations, 0);
        assert_eq!(scene.drawing.segments.len(), 1);
    }

    #[test]
    fn budget_overrun_keeps_previous_drawing() {
        let config = LSystemConfig { iterations: 4, seed: Some(1), ..Preset::Koch.config() };
        // Four iterations expand to 1249 symbols, five to 6249.
        let mut scene = Scene::new(config, None, 5_000).unwrap();
        let before = scene.drawing.clone();
        assert!(scene.handle_key(KeyCode::Char('+')));
        assert_eq!(scene.config.iterations, 4);
        assert_eq!(scene.drawing, before);
        assert!(scene.message.is_some());
    }

    #[test]
    fn jitter_toggle_restores_values() {
        let config = LSystemConfig { seed: Some(3), ..LSystemConfig::default() };
        let mut scene = Scene::new(config, Some(Preset::Plant), DEFAULT_MAX_SYMBOLS).unwrap();
        assert!(scene.jitter_enabled());
        scene.handle_key(KeyCode::Char('j'));
        assert!(!scene.jitter_enabled());
        assert_eq!(scene.config.angle_jitter, 0.0);
        scene.handle_key(KeyCode::Char('j'));
        assert_eq!(scene.config.angle_jitter, 3.0);
        assert_eq!(scene.config.length_jitter, 0.05);
    }

    #[test]
    fn preset_key_cycles() {
        let mut scene = scene();
        scene.handle_key(KeyCode::Char('p'));
        assert_eq!(scene.preset, Some(Preset::Snowflake));
        assert_eq!(scene.config, Preset::Snowflake.config());
    }

    #[test]
    fn reseed_changes_seed_only() {
        let mut scene = scene();
        let config = scene.config.clone();
        scene.handle_key(KeyCode::Char('r'));
        assert_eq!(scene.seed, 8);
        assert_eq!(scene.config, config);
    }

    #[test]
    fn unknown_keys_are_not_handled() {
        let mut scene = scene();
        assert!(!scene.handle_key(KeyCode::Char('z')));
    }

    #[test]
    fn render_fills_the_block() {
        let config = LSystemConfig { seed: Some(11), ..LSystemConfig::default() };
        let out = render_to_string(&config, &RenderSettings::default(), 40, 20, false).unwrap();
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 20);
        assert!(rows.iter().all(|r| r.chars().count() <= 40));
        assert!(out.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
    }

    #[test]
    fn render_is_reproducible_with_seed() {
        let config = LSystemConfig { seed: Some(5), ..LSystemConfig::default() };
        let render = RenderSettings::default();
        let a = render_to_string(&config, &render, 30, 15, true).unwrap();
        let b = render_to_string(&config, &render, 30, 15, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tiny_canvas_is_an_error() {
        let config = LSystemConfig { seed: Some(5), ..LSystemConfig::default() };
        assert!(render_to_string(&config, &RenderSettings::default(), 1, 1, false).is_err());
    }
}
