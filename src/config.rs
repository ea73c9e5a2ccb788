use crate::error::{LsysError, Result};
use crate::grammar::LSystem;
use crate::rules::RuleTable;
use crate::turtle::{DrawParams, Drawing, Turtle};
use rand::Rng;

/// Default cap on the length of an expanded sequence.
pub const DEFAULT_MAX_SYMBOLS: u64 = 2_000_000;

/// Everything needed to produce a drawing from a grammar.
#[derive(Clone, Debug, PartialEq)]
pub struct LSystemConfig {
    pub axiom: String,
    pub rules: String, // Compact rule text, e.g. "F:FF,X:F+[X]"
    pub iterations: u32,
    pub angle: f64, // Turn angle in degrees
    pub start_angle: f64, // Initial heading in degrees (90 = up)
    pub length: f64,
    pub angle_jitter: f64, // Max degrees added to each turn
    pub length_jitter: f64, // Step length factor spread
    pub seed: Option<u64>,
}

impl Default for LSystemConfig {
    fn default() -> Self {
        Self {
            axiom: "X".to_string(),
            rules: "X:F+[[X]-X]-F[-FX]+X,F:FF".to_string(),
            iterations: 5,
            angle: 25.0,
            start_angle: 90.0,
            length: 5.0,
            angle_jitter: 3.0,
            length_jitter: 0.05,
            seed: None,
        }
    }
}

impl LSystemConfig {
    pub fn rule_table(&self) -> RuleTable {
        RuleTable::parse(&self.rules)
    }

    pub fn lsystem(&self) -> LSystem {
        LSystem::new(self.axiom.clone(), self.rule_table())
    }

    pub fn draw_params(&self) -> DrawParams {
        DrawParams {
            turn_angle: self.angle,
            step_length: self.length,
            angle_jitter: self.angle_jitter,
            length_jitter: self.length_jitter,
            start_angle: self.start_angle,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.draw_params().validate()
    }

    /// Predicted expansion length, or an error if it exceeds `max_symbols`.
    pub fn check_budget(&self, max_symbols: u64) -> Result<u64> {
        let predicted = self.lsystem().expanded_len(self.iterations);
        if predicted > max_symbols {
            return Err(LsysError::TooManySymbols { predicted, limit: max_symbols });
        }
        Ok(predicted)
    }

    /// Expand the grammar and interpret the result.
    pub fn build<R: Rng + ?Sized>(&self, max_symbols: u64, rng: &mut R) -> Result<Drawing> {
        self.validate()?;
        self.check_budget(max_symbols)?;
        let sequence = self.lsystem().generate(self.iterations);
        Turtle::new().interpret(&sequence, &self.draw_params(), rng)
    }
}

/// Built-in grammars
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    Plant, // Fractal plant
    Bush, // Bushy weed
    Koch, // Quadratic Koch curve
    Snowflake, // Koch snowflake
    Sierpinski, // Sierpinski arrowhead
    Dragon, // Heighway dragon
    Hilbert, // Hilbert curve
    Gosper, // Gosper flowsnake
    Levy, // Lévy C curve
}

impl Preset {
    pub const ALL: [Preset; 9] = [
        Preset::Plant,
        Preset::Bush,
        Preset::Koch,
        Preset::Snowflake,
        Preset::Sierpinski,
        Preset::Dragon,
        Preset::Hilbert,
        Preset::Gosper,
        Preset::Levy,
    ];

    pub fn from_name(name: &str) -> Result<Self> {
        let preset = match name.to_lowercase().as_str() {
            "plant" | "fern" | "tree" => Preset::Plant,
            "bush" | "weed" => Preset::Bush,
            "koch" | "koch-curve" => Preset::Koch,
            "snowflake" | "koch-snowflake" => Preset::Snowflake,
            "sierpinski" | "arrowhead" => Preset::Sierpinski,
            "dragon" | "heighway" => Preset::Dragon,
            "hilbert" => Preset::Hilbert,
            "gosper" | "flowsnake" => Preset::Gosper,
            "levy" | "levy-c" => Preset::Levy,
            _ => return Err(LsysError::UnknownPreset(name.to_string())),
        };
        Ok(preset)
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Plant => "plant",
            Preset::Bush => "bush",
            Preset::Koch => "koch",
            Preset::Snowflake => "snowflake",
            Preset::Sierpinski => "sierpinski",
            Preset::Dragon => "dragon",
            Preset::Hilbert => "hilbert",
            Preset::Gosper => "gosper",
            Preset::Levy => "levy",
        }
    }

    /// The preset after this one, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn config(self) -> LSystemConfig {
        let (axiom, rules, iterations, angle, start_angle) = match self {
            Preset::Plant => return LSystemConfig::default(),
            Preset::Bush => ("F", "F:FF+[+F-F-F]-[-F+F+F]", 4, 22.5, 90.0),
            Preset::Koch => ("F", "F:F+F-F-F+F", 4, 90.0, 0.0),
            Preset::Snowflake => ("F--F--F", "F:F+F--F+F", 4, 60.0, 0.0),
            Preset::Sierpinski => ("A", "A:B-A-B,B:A+B+A", 6, 60.0, 0.0),
            Preset::Dragon => ("FX", "X:X+YF+,Y:-FX-Y", 10, 90.0, 0.0),
            Preset::Hilbert => ("X", "X:+YF-XFX-FY+,Y:-XF+YFY-FX-", 5, 90.0, 0.0),
            Preset::Gosper => ("A", "A:A-B--B+A++AA+B-,B:+A-BB--B-A++A+B", 4, 60.0, 0.0),
            Preset::Levy => ("F", "F:+F--F+", 10, 45.0, 0.0),
        };

        LSystemConfig {
            axiom: axiom.to_string(),
            rules: rules.to_string(),
            iterations,
            angle,
            start_angle,
            length: 5.0,
            angle_jitter: 0.0,
            length_jitter: 0.0,
            seed: None,
        }
    }
}
