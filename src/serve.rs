//! Serve command handler.

use roster_server::ServeArgs;

/// Run the serve command.
pub async fn run_serve(args: ServeArgs) -> anyhow::Result<()> {
    roster_server::serve(args).await
}
