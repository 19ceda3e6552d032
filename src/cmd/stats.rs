use crate::context::AppContext;
use crate::error::AppResult;
use crate::render;
use crate::workflow::stats::{StatsPanel, StatsState};

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let mut panel = StatsPanel::new();
    // Unlike the dashboard panel, a failed fetch ends the command.
    panel.refresh(ctx.store.as_ref()).await?;

    println!("{}", render::stats_panel(&panel));
    if let StatsState::Loaded(stats) = panel.state() {
        println!("By category: {}", render::category_breakdown(stats));
    }
    Ok(())
}
