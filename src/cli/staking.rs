use super::state::AppState;
use super::ui;
use crate::core::commodity::CommodityType;
use crate::core::market::{MarketplaceActions, StakeReceipt, StakeRequest};
use crate::core::token::Staking;
use crate::core::yield_calculator::{StakingQuote, compute_quote, parse_principal};
use crate::providers::FallbackMarketData;
use anyhow::Result;
use comfy_table::{Attribute, Cell, Color};
use tracing::info;

/// Renders the APY table, one row per commodity type.
pub fn render_rates(state: &AppState) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Type"), ui::header_cell("APY")]);

    if state.apy_rates.is_empty() {
        table.add_row(vec![
            Cell::new("No rates available").fg(Color::DarkGrey),
            Cell::new(""),
        ]);
    }
    for (commodity, rate) in state.apy_rates.iter() {
        let (name, emoji) = commodity.display_info();
        table.add_row(vec![
            Cell::new(format!("{emoji} {name}")),
            ui::number_cell(ui::format_rate(rate)),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Staking APY", ui::StyleType::Title),
        table
    )
}

pub fn render_quote(commodity: &CommodityType, quote: &StakingQuote) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Staking"), ui::header_cell("")]);
    table.add_row(vec![
        Cell::new("Initial investment"),
        ui::number_cell(format!("{:.2} AGROX", quote.principal)),
    ]);
    table.add_row(vec![
        Cell::new("Type"),
        ui::number_cell(commodity.display_name().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("APY"),
        ui::number_cell(format!("{:.0}%", quote.rate_percent())),
    ]);
    table.add_row(vec![
        Cell::new("Duration"),
        ui::number_cell(format!("{} days", quote.duration_days)),
    ]);
    table.add_row(vec![
        Cell::new("Projected yield"),
        ui::number_cell(format!("{:.2} AGROX", quote.projected_yield)).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Total return").add_attribute(Attribute::Bold),
        ui::number_cell(format!("{:.2} AGROX", quote.total_return))
            .add_attribute(Attribute::Bold),
    ]);
    table.to_string()
}

/// Computes a quote from user input against the loaded rate table.
pub fn quote(
    state: &AppState,
    amount: &str,
    commodity: &CommodityType,
    duration_days: u32,
) -> Result<StakingQuote> {
    let principal = parse_principal(amount)?;
    let quote = compute_quote(principal, commodity, duration_days, &state.apy_rates)?;
    if !state.apy_rates.contains(commodity) {
        info!(
            "No APY published for {}, using the fallback rate",
            commodity
        );
    }
    Ok(quote)
}

/// Locks a stake for the connected user.
pub async fn stake(
    state: &AppState,
    amount: &str,
    commodity: &CommodityType,
    duration_days: u32,
    api: &dyn MarketplaceActions,
) -> Result<StakeReceipt> {
    let (user, _) = state.connected("stake")?;
    let quote = quote(state, amount, commodity, duration_days)?;

    let request = StakeRequest::from_quote(user.id, commodity.clone(), &quote);
    let receipt = api.lock_stake(&request).await?;
    info!(
        staking_id = ?receipt.staking_id,
        "Locked {} AGROX in {} staking",
        quote.principal,
        commodity
    );

    println!("{}", render_quote(commodity, &quote));
    let message = receipt.message.as_deref().unwrap_or("Staking locked");
    println!("{}", ui::style_text(message, ui::StyleType::Success));
    if let Some(end_date) = receipt.end_date {
        println!("Unlocks on {}", end_date.format("%Y-%m-%d"));
    }
    Ok(receipt)
}

pub fn render_stakings(stakings: &[Staking]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Type"),
        ui::header_cell("Amount"),
        ui::header_cell("APY"),
        ui::header_cell("Start"),
        ui::header_cell("End"),
        ui::header_cell("Rewards"),
        ui::header_cell("Status"),
    ]);

    if stakings.is_empty() {
        table.add_row(vec![Cell::new(""), Cell::new("No stakings yet").fg(Color::DarkGrey)]);
    }

    for staking in stakings {
        let rewards = staking
            .current_rewards
            .or(staking.rewards_earned)
            .unwrap_or(0.0);
        let status = if staking.is_active {
            Cell::new("Active").fg(Color::Green)
        } else {
            Cell::new("Closed").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(staking.id),
            Cell::new(staking.apy_type.display_name()),
            ui::number_cell(format!("{:.2}", staking.amount)),
            ui::number_cell(ui::format_rate(staking.apy_rate)),
            Cell::new(staking.start_date.format("%Y-%m-%d")),
            Cell::new(staking.end_date.format("%Y-%m-%d")),
            ui::number_cell(format!("{rewards:.2}")),
            status,
        ]);
    }
    table.to_string()
}

/// Lists the connected user's stakings.
pub async fn list(state: &AppState, market: &FallbackMarketData) -> Result<Vec<Staking>> {
    let (user, _) = state.connected("view your stakings")?;
    let stakings = market.user_stakings(user.id).await?;
    println!(
        "{}\n\n{}",
        ui::style_text("My Stakings", ui::StyleType::Title),
        render_stakings(&stakings)
    );
    Ok(stakings)
}
