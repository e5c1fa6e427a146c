use super::ui;
use crate::core::currency::flag_url;
use crate::core::widget::{ConverterWidget, Side};
use comfy_table::{Cell, Table};

/// Prints every selectable currency with its country and flag.
pub fn run(widget: &ConverterWidget) -> anyhow::Result<()> {
    println!(
        "\n{}",
        ui::style_text("Currencies", ui::StyleType::Title, widget.theme())
    );
    println!("{}", build_table(widget));
    Ok(())
}

/// One row per selector option, in selector order.
pub fn build_table(widget: &ConverterWidget) -> Table {
    let theme = widget.theme();
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code", theme),
        ui::header_cell("Country", theme),
        ui::header_cell("Flag", theme),
        ui::header_cell("Selected", theme),
    ]);
    for (code, country) in widget.currencies().iter() {
        table.add_row(vec![
            Cell::new(code.as_str()),
            Cell::new(country),
            Cell::new(flag_url(widget.flag_base(), country)),
            Cell::new(selection_marker(widget, code.as_str())),
        ]);
    }
    table
}

fn selection_marker(widget: &ConverterWidget, code: &str) -> &'static str {
    match (
        widget.selected(Side::From).as_str() == code,
        widget.selected(Side::To).as_str() == code,
    ) {
        (true, true) => "from, to",
        (true, false) => "from",
        (false, true) => "to",
        (false, false) => "",
    }
}
