use super::state::AppState;
use super::ui;
use crate::core::leaderboard::{Category, LeaderboardFilter};
use crate::core::token::Token;
use comfy_table::{Cell, CellAlignment, Color};

pub const NO_MATCHES: &str = "No tokens found";

/// Renders one leaderboard as a titled table.
pub fn render(category: Category, tokens: &[&Token]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Token"),
        ui::header_cell("Commodity"),
        ui::header_cell("Country"),
        ui::header_cell("Price"),
        ui::header_cell("24h"),
        ui::header_cell("Market Cap"),
    ]);

    if tokens.is_empty() {
        table.add_row(vec![
            Cell::new(""),
            Cell::new(NO_MATCHES)
                .fg(Color::DarkGrey)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    for (rank, token) in tokens.iter().enumerate() {
        let (commodity_name, emoji) = token.commodity.display_info();
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(format!(
                "{}\n{}",
                token.name,
                ui::style_text(&token.symbol, ui::StyleType::Subtle)
            )),
            Cell::new(format!("{emoji} {commodity_name}")),
            Cell::new(token.country.name()),
            ui::number_cell(format!("${:.2}", token.price)),
            ui::change_cell(token.price_change_24h),
            ui::number_cell(format!("${}", ui::format_number(token.market_cap))),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text(category.title(), ui::StyleType::Title),
        table
    )
}

/// Prints the requested leaderboard, or both, restricted to `filter`.
pub fn run(state: &AppState, category: Option<Category>, filter: &LeaderboardFilter) {
    let categories: Vec<Category> = match category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    if !filter.is_empty() {
        let commodity = filter
            .commodity
            .as_ref()
            .map_or("All types", |c| c.display_name());
        let country = filter.country.as_ref().map_or("All countries", |c| c.name());
        println!(
            "{}\n",
            ui::style_text(
                &format!("Filter: {commodity} / {country}"),
                ui::StyleType::Subtle
            )
        );
    }

    let count = categories.len();
    for (i, category) in categories.into_iter().enumerate() {
        let tokens = state.leaderboard.filter(category, filter);
        println!("{}", render(category, &tokens));
        if i < count - 1 {
            ui::print_separator();
        }
    }
}
