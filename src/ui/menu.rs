use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::core::sectors::{Half, SectorCoordinate, SectorGrid};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuAction {
    ShowCourt,
    PickZone(Half),
    RecordPoint,
    Draw,
    ExportDrawing,
    ReloadConfig,
    Quit,
}

const MAIN_MENU: &[(&str, MenuAction)] = &[
    ("🏐 Visualizza il campo", MenuAction::ShowCourt),
    ("🎯 Seleziona zona di attacco", MenuAction::PickZone(Half::Attack)),
    ("📍 Seleziona zona di caduta", MenuAction::PickZone(Half::Defense)),
    ("✅ Registra punto", MenuAction::RecordPoint),
    ("✏️  Disegna sul campo", MenuAction::Draw),
    ("💾 Esporta disegno (JSON)", MenuAction::ExportDrawing),
    ("🔄 Ricarica configurazione", MenuAction::ReloadConfig),
    ("🚪 Esci", MenuAction::Quit),
];

pub fn main_menu(default: usize) -> Result<MenuAction> {
    let labels: Vec<&str> = MAIN_MENU.iter().map(|(label, _)| *label).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Cosa vuoi fare?")
        .default(default.min(labels.len() - 1))
        .items(&labels)
        .interact()?;
    Ok(MAIN_MENU[selection].1)
}

pub fn menu_index(action: MenuAction) -> usize {
    MAIN_MENU.iter().position(|(_, a)| *a == action).unwrap_or(0)
}

fn labels(half: Half) -> (&'static str, &'static str) {
    match half {
        Half::Attack => ("Attacco X", "Attacco Y"),
        Half::Defense => ("Difesa X", "Difesa Y"),
    }
}

/// Two dropdowns, column then row, each listing `1..=n` of the grid.
pub fn pick_zone(grid: &SectorGrid, current: SectorCoordinate) -> Result<(u32, u32)> {
    let (label_x, label_y) = labels(grid.half());
    let column = pick_index(label_x, grid.columns(), current.column())?;
    let row = pick_index(label_y, grid.rows(), current.row())?;
    Ok((column, row))
}

fn pick_index(prompt: &str, count: u32, current: u32) -> Result<u32> {
    let items: Vec<String> = (1..=count).map(|i| i.to_string()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(current.saturating_sub(1) as usize)
        .items(&items)
        .interact()?;
    Ok(selection as u32 + 1)
}

pub fn ask_path(prompt: &str, default: &str) -> Result<String> {
    let path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_reachable() {
        for (i, (_, action)) in MAIN_MENU.iter().enumerate() {
            assert_eq!(menu_index(*action), i);
        }
        assert_eq!(MAIN_MENU.last().map(|(_, a)| *a), Some(MenuAction::Quit));
    }
}
