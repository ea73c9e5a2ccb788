//! Turtle interpretation of an expanded L-system sequence into line segments.
//!
//! Commands:
//! - `F`, `A`, `B`: draw forward
//! - `+` / `-`: turn by the configured angle (increasing / decreasing heading)
//! - `[` / `]`: push / pop position and heading
//!
//! Anything else is ignored. Headings are measured from +x with screen-space y pointing down,
//! so increasing heading sweeps counter-clockwise on screen.

use crate::error::{LsysError, Result};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A drawn line in turtle-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }
}

/// Axis-aligned bounding rectangle of the emitted segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn at(p: Point) -> Self {
        Self { min_x: p.x, min_y: p.y, max_x: p.x, max_y: p.y }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn min(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn max(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Widen any zero-extent axis by one unit.
    fn widen_degenerate(&mut self) {
        if self.min_x == self.max_x {
            self.max_x += 1.0;
        }
        if self.min_y == self.max_y {
            self.max_y += 1.0;
        }
    }
}

/// Position and heading (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleState {
    pub position: Point,
    pub heading: f64,
}

/// Largest turn jitter in degrees. A full turn already covers every heading.
pub const MAX_ANGLE_JITTER: f64 = 360.0;

/// Largest length jitter factor.
pub const MAX_LENGTH_JITTER: f64 = 1e3;

/// Largest jittered step. Keeps turtle coordinates finite for any sequence that fits in memory.
pub const MAX_STEP_LENGTH: f64 = 1e12;

/// Drawing parameters for one interpretation pass. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    pub turn_angle: f64,
    pub step_length: f64,
    /// Maximum deviation in degrees added to each turn.
    pub angle_jitter: f64,
    /// Each step is scaled by a factor drawn from `[1 - length_jitter, 1 + length_jitter]`.
    pub length_jitter: f64,
    pub start_angle: f64,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            turn_angle: 25.0,
            step_length: 5.0,
            angle_jitter: 0.0,
            length_jitter: 0.0,
            start_angle: 90.0,
        }
    }
}

impl DrawParams {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("angle", self.turn_angle), ("start_angle", self.start_angle)] {
            if !value.is_finite() {
                return Err(LsysError::InvalidAngle { name, value });
            }
        }
        for (name, value, max) in [
            ("angle_jitter", self.angle_jitter, MAX_ANGLE_JITTER),
            ("length_jitter", self.length_jitter, MAX_LENGTH_JITTER),
        ] {
            if !(0.0..=max).contains(&value) {
                return Err(LsysError::InvalidJitter { name, value, max });
            }
        }
        // The longest possible step, not just the nominal one, must stay in range.
        let longest = self.step_length * (1.0 + self.length_jitter);
        if !(self.step_length > 0.0 && longest <= MAX_STEP_LENGTH) {
            return Err(LsysError::InvalidStepLength(self.step_length));
        }
        Ok(())
    }
}

/// Result of interpreting a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub segments: Vec<Segment>,
    pub bounds: Bounds,
}

impl Drawing {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Reusable interpreter. Every call to [`Turtle::interpret`] starts from the configured
/// start position with an empty stack.
#[derive(Debug, Clone)]
pub struct Turtle {
    start: Point,
    state: TurtleState,
    stack: Vec<TurtleState>,
}

impl Default for Turtle {
    fn default() -> Self {
        Self::new()
    }
}

impl Turtle {
    pub fn new() -> Self {
        Self::at(Point::ORIGIN)
    }

    pub fn at(start: Point) -> Self {
        Self {
            start,
            state: TurtleState { position: start, heading: 0.0 },
            stack: Vec::new(),
        }
    }

    pub fn state(&self) -> TurtleState {
        self.state
    }

    fn reset(&mut self, start_angle: f64) {
        self.state = TurtleState { position: self.start, heading: start_angle.to_radians() };
        self.stack.clear();
    }

    /// Walk `sequence` and return the emitted segments with their bounds.
    ///
    /// Jitter is sampled from `rng` independently for every draw and turn command; with both
    /// jitter factors at zero the RNG is never touched.
    pub fn interpret<R: Rng + ?Sized>(
        &mut self,
        sequence: &str,
        params: &DrawParams,
        rng: &mut R,
    ) -> Result<Drawing> {
        params.validate()?;
        self.reset(params.start_angle);

        let mut segments = Vec::new();
        let mut bounds = Bounds::at(self.start);

        for command in sequence.chars() {
            match command {
                'F' | 'A' | 'B' => {
                    let length = params.step_length * (1.0 + spread(rng, params.length_jitter));
                    if length > 0.0 {
                        let segment = self.forward(length);
                        bounds.include(segment.end);
                        segments.push(segment);
                    }
                }
                '+' => self.state.heading += turn(rng, params),
                '-' => self.state.heading -= turn(rng, params),
                '[' => self.stack.push(self.state),
                ']' => {
                    // Returning to a branch point draws nothing, so bounds are untouched.
                    if let Some(saved) = self.stack.pop() {
                        self.state = saved;
                    }
                }
                _ => {}
            }
        }

        bounds.widen_degenerate();
        tracing::debug!(segments = segments.len(), ?bounds, "interpreted sequence");

        Ok(Drawing { segments, bounds })
    }

    fn forward(&mut self, length: f64) -> Segment {
        let start = self.state.position;
        let heading = self.state.heading;
        let end = Point::new(start.x + length * heading.cos(), start.y - length * heading.sin());
        self.state.position = end;
        Segment { start, end }
    }
}

/// Jittered turn in radians.
fn turn<R: Rng + ?Sized>(rng: &mut R, params: &DrawParams) -> f64 {
    (params.turn_angle + spread(rng, params.angle_jitter)).to_radians()
}

/// Uniform sample in `[-width, width]`; zero without sampling when `width` is zero.
fn spread<R: Rng + ?Sized>(rng: &mut R, width: f64) -> f64 {
    if width > 0.0 {
        rng.gen_range(-width..=width)
    } else {
        0.0
    }
}
