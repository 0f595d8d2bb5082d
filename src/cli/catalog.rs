use super::state::AppState;
use super::ui;
use comfy_table::Cell;

pub fn render_countries(state: &AppState) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Country")]);
    for country in &state.countries {
        table.add_row(vec![Cell::new(country.code()), Cell::new(country.name())]);
    }
    format!(
        "{}\n\n{}",
        ui::style_text("Countries", ui::StyleType::Title),
        table
    )
}

/// Lists the commodity types a token can be created with.
pub fn render_token_types(state: &AppState) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Type"),
        ui::header_cell("Name"),
        ui::header_cell("Icon"),
    ]);
    for commodity in &state.token_types {
        let (name, emoji) = commodity.display_info();
        table.add_row(vec![
            Cell::new(commodity.as_str()),
            Cell::new(format!("{emoji} {name}")),
            Cell::new(commodity.icon_path()),
        ]);
    }
    format!(
        "{}\n\n{}",
        ui::style_text("Token Types", ui::StyleType::Title),
        table
    )
}
