use crate::core::columns::{DisplayContent, Tone};
use crate::core::format::format_percent_change;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Error,
    Warning,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Error => style(text).red(),
        StyleType::Warning => style(text).yellow(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Text of a rendered cell as it appears in the terminal.
pub fn cell_text(content: &DisplayContent) -> String {
    let mut text = content.text.clone();
    if let Some(delta) = content.delta {
        text.push(' ');
        text.push_str(&format_percent_change(delta));
    }
    if let Some(tooltip) = &content.tooltip {
        text.push(' ');
        text.push_str(tooltip);
    }
    text
}

/// Converts rendered content into a table cell, colouring 24h changes.
pub fn display_cell(content: &DisplayContent) -> Cell {
    let cell = Cell::new(cell_text(content));
    let cell = match content.tone {
        Tone::Muted => cell.fg(Color::DarkGrey),
        Tone::Warning => cell.fg(Color::Yellow),
        Tone::Plain => match content.delta {
            Some(delta) if delta >= 0.0 => cell.fg(Color::Green),
            Some(_) => cell.fg(Color::Red),
            None => cell,
        },
    };
    if content.link.is_some() {
        cell.add_attribute(Attribute::Bold)
    } else if content.delta.is_some() || content.tone == Tone::Muted {
        cell.set_alignment(CellAlignment::Right)
    } else {
        cell
    }
}

/// Spinner shown while a query is in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
