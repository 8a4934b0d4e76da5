pub mod hash;
pub mod verify;

use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::config::Config;

/// Table with the shared preset and a cyan header row.
pub(crate) fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(header.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}

pub fn show_config(config: &Config) {
    let mut table = table(&["Setting", "Value"]);
    table.add_row(vec![
        "Directory".to_string(),
        config.discover.directory.display().to_string(),
    ]);
    table.add_row(vec!["Input extension".to_string(), config.discover.in_ext.clone()]);
    table.add_row(vec!["Output extension".to_string(), config.discover.out_ext.clone()]);
    table.add_row(vec!["Pattern".to_string(), config.discover.pattern()]);
    table.add_row(vec!["Jobs".to_string(), config.verify.jobs.to_string()]);

    eprintln!("\n{table}");
}
