use clap::{Args, Parser, Subcommand};
use lsysart::settings::{RenderSettings, Settings};
use lsysart::{viewer, LSystemConfig, Preset, Result};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lsysart")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "lsysart: L-system fractals drawn in the terminal with braille", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive viewer (+/- iterations, [/] angle, p presets, ? help)
    Draw {
        #[command(flatten)]
        grammar: GrammarArgs,

        /// Color scheme (0=green, 1=fire, 2=ice, 3=pink, 4=gold, 5=mono)
        #[arg(short = 'c', long)]
        scheme: Option<u8>,
    },

    /// Render once to stdout
    Print {
        #[command(flatten)]
        grammar: GrammarArgs,

        /// Output width in characters (default: terminal width)
        #[arg(short = 'W', long)]
        width: Option<u16>,

        /// Output height in lines (default: terminal height)
        #[arg(short = 'H', long)]
        height: Option<u16>,

        /// Color scheme (0=green, 1=fire, 2=ice, 3=pink, 4=gold, 5=mono)
        #[arg(short = 'c', long)]
        scheme: Option<u8>,

        /// Disable ANSI colors
        #[arg(long)]
        plain: bool,
    },

    /// Print the expanded symbol sequence
    Expand {
        #[command(flatten)]
        grammar: GrammarArgs,

        /// Print the length of every generation instead of the sequence
        #[arg(long)]
        stats: bool,
    },

    /// List built-in presets
    Presets,
}

#[derive(Args)]
struct GrammarArgs {
    /// Built-in grammar: plant, bush, koch, snowflake, sierpinski, dragon, hilbert, gosper, levy
    #[arg(short = 'P', long)]
    preset: Option<String>,

    /// Initial symbol sequence
    #[arg(short = 'x', long)]
    axiom: Option<String>,

    /// Production rules, e.g. "X:F+[[X]-X]-F[-FX]+X,F:FF"
    #[arg(short, long)]
    rules: Option<String>,

    /// Number of rewriting generations
    #[arg(short = 'n', long)]
    iterations: Option<u32>,

    /// Turn angle in degrees
    #[arg(short, long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// Initial heading in degrees (90 = up)
    #[arg(long, allow_negative_numbers = true)]
    start_angle: Option<f64>,

    /// Step length
    #[arg(short, long)]
    length: Option<f64>,

    /// Random deviation added to each turn, in degrees
    #[arg(long)]
    angle_jitter: Option<f64>,

    /// Random step length spread (0.1 = +/-10%)
    #[arg(long)]
    length_jitter: Option<f64>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Refuse expansions longer than this many symbols
    #[arg(long)]
    max_symbols: Option<u64>,
}

impl GrammarArgs {
    /// Defaults, then preset, then settings file, then flags.
    fn resolve(&self, settings: &Settings) -> Result<(LSystemConfig, Option<Preset>)> {
        let preset_name = self.preset.as_deref().or(settings.lsystem.preset.as_deref());
        let preset = preset_name.map(Preset::from_name).transpose()?;

        let mut config = preset.map_or_else(LSystemConfig::default, Preset::config);
        settings.lsystem.apply(&mut config);

        if let Some(ref axiom) = self.axiom {
            config.axiom = axiom.clone();
        }
        if let Some(ref rules) = self.rules {
            config.rules = rules.clone();
        }
        if let Some(v) = self.iterations {
            config.iterations = v;
        }
        if let Some(v) = self.angle {
            config.angle = v;
        }
        if let Some(v) = self.start_angle {
            config.start_angle = v;
        }
        if let Some(v) = self.length {
            config.length = v;
        }
        if let Some(v) = self.angle_jitter {
            config.angle_jitter = v;
        }
        if let Some(v) = self.length_jitter {
            config.length_jitter = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        tracing::debug!(?config, "resolved configuration");

        // A hand-edited grammar is no longer the preset.
        let custom = self.axiom.is_some() || self.rules.is_some();
        Ok((config, if custom { None } else { preset }))
    }

    fn render_settings(&self, settings: &Settings, scheme: Option<u8>) -> RenderSettings {
        RenderSettings {
            padding: settings.render.padding,
            color_scheme: scheme.unwrap_or(settings.render.color_scheme),
            max_symbols: self.max_symbols.unwrap_or(settings.render.max_symbols),
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load();

    match cli.command {
        Commands::Draw { grammar, scheme } => {
            let (config, preset) = grammar.resolve(&settings)?;
            let render = grammar.render_settings(&settings, scheme);
            viewer::run(config, preset, &render)?;
        }
        Commands::Print {
            grammar,
            width,
            height,
            scheme,
            plain,
        } => {
            let (config, _) = grammar.resolve(&settings)?;
            let render = grammar.render_settings(&settings, scheme);
            // Leave a line for the shell prompt.
            let (term_w, term_h) = crossterm::terminal::size().unwrap_or((80, 25));
            let width = width.unwrap_or(term_w);
            let height = height.unwrap_or(term_h.saturating_sub(1));
            let out = viewer::render_to_string(&config, &render, width, height, !plain)?;
            print!("{}", out);
        }
        Commands::Expand { grammar, stats } => {
            let (config, _) = grammar.resolve(&settings)?;
            let render = grammar.render_settings(&settings, None);
            config.check_budget(render.max_symbols)?;

            let system = config.lsystem();
            if stats {
                let generations = system.generations().take(config.iterations as usize + 1);
                for (n, sequence) in generations.enumerate() {
                    println!("generation {}: {} symbols", n, sequence.chars().count());
                }
            } else {
                println!("{}", system.generate(config.iterations));
            }
        }
        Commands::Presets => {
            for preset in Preset::ALL {
                let c = preset.config();
                println!(
                    "{:<11} axiom={:<8} n={:<2} angle={:<5} rules={}",
                    preset.name(),
                    c.axiom,
                    c.iterations,
                    c.angle,
                    c.rules
                );
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    lsysart::init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
