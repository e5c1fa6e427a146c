use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::widget::{ConverterWidget, Side, Theme};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Result,
    Error,
    Subtle,
    Prompt,
}

/// Applies a consistent style to a string, brighter on the dark theme.
pub fn style_text(text: &str, style_type: StyleType, theme: Theme) -> String {
    let styled = match (style_type, theme) {
        (StyleType::Title, _) => style(text).bold().underlined(),
        (StyleType::Result, Theme::Light) => style(text).green().bold(),
        (StyleType::Result, Theme::Dark) => style(text).cyan().bright().bold(),
        (StyleType::Error, Theme::Light) => style(text).red(),
        (StyleType::Error, Theme::Dark) => style(text).red().bright(),
        (StyleType::Subtle, _) => style(text).dim(),
        (StyleType::Prompt, Theme::Light) => style(text).blue().bold(),
        (StyleType::Prompt, Theme::Dark) => style(text).yellow().bold(),
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
pub fn header_cell(text: &str, theme: Theme) -> Cell {
    let color = if theme.is_dark() {
        Color::Yellow
    } else {
        Color::Cyan
    };
    Cell::new(text).fg(color).add_attribute(Attribute::Bold)
}

/// Spinner shown while a rate fetch is outstanding.
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

/// Styles the message region: results and failures look different.
pub fn message_line(message: &str, failed: bool, theme: Theme) -> String {
    if failed {
        style_text(message, StyleType::Error, theme)
    } else {
        style_text(message, StyleType::Result, theme)
    }
}

/// Plain-text view of the widget state.
pub fn render_widget(widget: &ConverterWidget) -> String {
    let theme = widget.theme();
    let side_line = |label: &str, side: Side| {
        format!(
            "{label} {} {}",
            style_text(widget.selected(side).as_str(), StyleType::Title, theme),
            style_text(widget.flag_url(side), StyleType::Subtle, theme)
        )
    };

    let mut lines = vec![
        side_line("From:  ", Side::From),
        side_line("To:    ", Side::To),
        format!("Amount: {}", widget.amount_input()),
        format!("Theme:  {} {}", theme, theme.icon()),
    ];
    if let Some(message) = widget.message() {
        lines.push(message_line(message, widget.last_error().is_some(), theme));
    }
    lines.join("\n")
}
