use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::menu::{self, MenuAction};
use super::viewer;
use crate::core::config::CourtConfig;
use crate::core::sectors::Half;
use crate::core::session::CourtSession;
use crate::drawing::{DrawingCanvas, StrokeDocument};
use crate::renderer::DisplayMode;

fn status_line(session: &CourtSession) -> String {
    let mut line = format!(
        "Attacco: Zona {} | Caduta: Zona {}",
        session.selection(Half::Attack),
        session.selection(Half::Defense)
    );
    if let Some(record) = session.last_record() {
        line.push_str(" | ");
        line.push_str(&record.to_string());
    }
    line.push_str(" | premi un tasto per tornare al menu");
    line
}

fn draw(session: &CourtSession, previous: Option<StrokeDocument>, mode: DisplayMode) -> Result<StrokeDocument> {
    let layout = session.layout();
    let mut canvas = DrawingCanvas::new(&session.render(), &layout.drawing, layout.spec.style().fill_color)?;
    if let Some(doc) = previous {
        canvas.resume(doc);
    }
    viewer::draw_on_court(&mut canvas, mode)?;
    Ok(canvas.into_document())
}

fn export_drawing(doc: &StrokeDocument) -> Result<()> {
    let path = menu::ask_path("File di destinazione", "disegno.json")?;
    std::fs::write(&path, doc.to_json()?).with_context(|| format!("Failed to write {}", path))?;
    println!("💾 Disegno salvato in {}", path);
    log::info!("Drawing exported to {} ({} strokes)", path, doc.objects.len());
    Ok(())
}

fn reload(session: &mut CourtSession, config_path: Option<&Path>) -> Result<()> {
    let config = CourtConfig::load(config_path)?;
    session.reconfigure(&config)?;
    println!(
        "🔄 Configurazione ricaricata: griglia attacco {}x{}, difesa {}x{}",
        session.layout().attack.columns(),
        session.layout().attack.rows(),
        session.layout().defense.columns(),
        session.layout().defense.rows()
    );
    Ok(())
}

/// Menu-driven session: pick zones, record points, look at and draw on
/// the court. Every action re-renders from the current state.
pub fn run_interactive_mode(config_path: Option<PathBuf>, mode: DisplayMode) -> Result<()> {
    let config = CourtConfig::load(config_path.as_deref())?;
    let mut session = CourtSession::new(&config).context("Invalid court configuration")?;
    let mut drawing: Option<StrokeDocument> = None;
    let mut last_action = MenuAction::ShowCourt;

    println!("🏐 Campo da Pallavolo Interattivo");

    loop {
        println!(
            "\nAttacco: Zona {} | Caduta: Zona {}",
            session.selection(Half::Attack),
            session.selection(Half::Defense)
        );

        let action = menu::main_menu(menu::menu_index(last_action))?;
        last_action = action;

        match action {
            MenuAction::ShowCourt => {
                viewer::show_court(&session.render(), mode, &status_line(&session))?;
            }
            MenuAction::PickZone(half) => {
                let grid = *session.layout().grid(half);
                let (column, row) = menu::pick_zone(&grid, session.selection(half))?;
                let zone = session.select(half, column, row)?;
                log::debug!("Selected {} zone {}", zone.half(), zone);
            }
            MenuAction::RecordPoint => {
                let record = session.record_point();
                println!("✅ {}", record);
            }
            MenuAction::Draw => {
                let doc = draw(&session, drawing.take(), mode)?;
                println!("\nDati del Disegno (JSON)");
                println!("{}", doc.to_json()?);
                drawing = Some(doc);
            }
            MenuAction::ExportDrawing => match &drawing {
                Some(doc) => export_drawing(doc)?,
                None => println!("⚠️  Nessun disegno da esportare"),
            },
            MenuAction::ReloadConfig => {
                if let Err(e) = reload(&mut session, config_path.as_deref()) {
                    // keep the running configuration
                    println!("❌ {:#}", e);
                    log::warn!("Config reload failed: {:#}", e);
                }
            }
            MenuAction::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_shows_selection_and_record() {
        let mut session = CourtSession::new(&CourtConfig::default()).unwrap();
        session.select(Half::Attack, 2, 1).unwrap();
        session.select(Half::Defense, 1, 4).unwrap();
        assert!(status_line(&session).starts_with("Attacco: Zona (2, 1) | Caduta: Zona (1, 4)"));

        session.record_point();
        assert!(status_line(&session).contains("Attacco da: Zona (2, 1), Caduta in: Zona (1, 4)"));
    }
}
