mod core;
mod drawing;
mod renderer;
mod ui;
mod utils;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use image::ImageFormat;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};

use crate::core::config::CourtConfig;
use crate::core::sectors::Half;
use crate::core::selection::{parse_zone_pair, PointRecord};
use crate::core::session::CourtSession;
use crate::drawing::{paint_strokes, StrokeDocument};
use crate::renderer::DisplayMode;

#[derive(Parser)]
#[command(author, version, about = "Volleyball court with attack/defense sectors", long_about = None)]
struct Cli {
    /// Log file; `show` and `interactive` default to debug.log since they
    /// own the terminal, everything else logs to stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the court to a PNG file
    Render {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Attack zone as COLUMN,ROW; marks the point together with --defense
        #[arg(short, long, value_parser = parse_zone_pair)]
        attack: Option<(u32, u32)>,
        /// Landing zone as COLUMN,ROW
        #[arg(short, long, value_parser = parse_zone_pair)]
        defense: Option<(u32, u32)>,
        /// Stroke document (JSON) to paint over the court
        #[arg(short, long)]
        strokes: Option<PathBuf>,
        /// Re-render whenever the config file changes, until Ctrl-C
        #[arg(short, long, default_value_t = false, requires = "config")]
        watch: bool,
    },
    /// Show the court in the terminal until a key is pressed
    Show {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, value_parser = parse_zone_pair)]
        attack: Option<(u32, u32)>,
        #[arg(short, long, value_parser = parse_zone_pair)]
        defense: Option<(u32, u32)>,
        #[arg(short, long, value_enum, default_value_t = DisplayMode::Rgb)]
        mode: DisplayMode,
    },
    /// Print the record-point message for two zones
    Record {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, value_parser = parse_zone_pair)]
        attack: (u32, u32),
        #[arg(short, long, value_parser = parse_zone_pair)]
        defense: (u32, u32),
    },
    /// Interactive Mode (Menu)
    Interactive {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = DisplayMode::Rgb)]
        mode: DisplayMode,
    },
    /// Print the built-in configuration as JSON
    DefaultConfig,
}

impl Cli {
    fn log_target(&self) -> Option<PathBuf> {
        let owns_terminal = matches!(self.command, Commands::Show { .. } | Commands::Interactive { .. });
        self.log_file
            .clone()
            .or_else(|| owns_terminal.then(|| PathBuf::from("debug.log")))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::logger::init(cli.log_target().as_deref())?;

    match cli.command {
        Commands::Render { output, config, attack, defense, strokes, watch } => {
            let strokes = strokes.as_deref().map(load_strokes).transpose()?;
            if watch {
                // `requires = "config"` guarantees the path
                let config = config.as_deref().context("--watch needs --config")?;
                watch_and_render(config, attack, defense, strokes.as_ref(), &output)?;
            } else {
                let session = build_session(&CourtConfig::load(config.as_deref())?, attack, defense)?;
                render_to_file(&session, strokes.as_ref(), &output)?;
                println!("✅ {}", output.display());
            }
        }
        Commands::Show { config, attack, defense, mode } => {
            let session = build_session(&CourtConfig::load(config.as_deref())?, attack, defense)?;
            let status = match session.last_record() {
                Some(record) => format!("{} | premi un tasto per uscire", record),
                None => "premi un tasto per uscire".to_string(),
            };
            ui::viewer::show_court(&session.render(), mode, &status)?;
        }
        Commands::Record { config, attack, defense } => {
            let layout = CourtConfig::load(config.as_deref())?.validate()?;
            let record = PointRecord::new(
                layout.attack.coordinate(attack.0, attack.1)?,
                layout.defense.coordinate(defense.0, defense.1)?,
            );
            log::info!("{}", record);
            println!("{}", record);
        }
        Commands::Interactive { config, mode } => {
            ui::interactive::run_interactive_mode(config, mode)?;
        }
        Commands::DefaultConfig => {
            println!("{}", CourtConfig::default().to_json()?);
        }
    }

    Ok(())
}

/// Session with the given zones selected; a point is recorded only when
/// both are present.
fn build_session(config: &CourtConfig, attack: Option<(u32, u32)>, defense: Option<(u32, u32)>) -> Result<CourtSession> {
    let mut session = CourtSession::new(config).context("Invalid court configuration")?;
    match (attack, defense) {
        (Some(a), Some(d)) => {
            session.select(Half::Attack, a.0, a.1)?;
            session.select(Half::Defense, d.0, d.1)?;
            session.record_point();
        }
        (None, None) => {}
        _ => bail!("--attack and --defense must be given together"),
    }
    Ok(session)
}

fn load_strokes(path: &Path) -> Result<StrokeDocument> {
    let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read strokes {}", path.display()))?;
    StrokeDocument::from_json(&json).with_context(|| format!("Failed to parse strokes {}", path.display()))
}

fn render_to_file(session: &CourtSession, strokes: Option<&StrokeDocument>, output: &Path) -> Result<()> {
    let mut image = session.render();
    if let Some(doc) = strokes {
        paint_strokes(&mut image, doc);
    }
    image
        .save_with_format(output, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Court written to {} ({}x{})", output.display(), image.width(), image.height());
    Ok(())
}

/// Poll the config file and re-render on every change. A broken edit is
/// reported and the previous image stays in place.
fn watch_and_render(
    config_path: &Path,
    attack: Option<(u32, u32)>,
    defense: Option<(u32, u32)>,
    strokes: Option<&StrokeDocument>,
    output: &Path,
) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("Error registering Ctrl-C handler")?;

    println!("👀 {} → {} (Ctrl-C per uscire)", config_path.display(), output.display());
    let mut last_modified: Option<SystemTime> = None;

    while running.load(Ordering::SeqCst) {
        let modified = std::fs::metadata(config_path).and_then(|m| m.modified()).ok();
        if modified.is_some() && modified != last_modified {
            last_modified = modified;
            let result = CourtConfig::from_file(config_path)
                .and_then(|config| build_session(&config, attack, defense))
                .and_then(|session| render_to_file(&session, strokes, output));
            match result {
                Ok(()) => println!("✅ {}", output.display()),
                Err(e) => {
                    eprintln!("❌ {:#}", e);
                    log::warn!("Render after config change failed: {:#}", e);
                }
            }
        }
        thread::sleep(Duration::from_millis(250));
    }

    Ok(())
}
