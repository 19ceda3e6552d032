use tokio::io::BufReader;

use crate::context::AppContext;
use crate::dashboard::Dashboard;
use crate::error::AppResult;

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let input = BufReader::new(tokio::io::stdin());
    Dashboard::new(ctx, std::io::stdout()).run(input).await
}
