use color_eyre::Result;
use toplist_core::SyncOrchestrator;

use crate::output::Output;

pub async fn run_auth(force: bool, output: &Output) -> Result<()> {
    let (config, store) = super::load_environment()?;
    let token_path = store.path().display().to_string();

    let mut orchestrator = SyncOrchestrator::new(config, store);
    if let Err(e) = orchestrator.authenticate(force).await {
        output.error(format!("{}", e));
        return Err(e.into());
    }

    output.success(format!("Token valid and persisted at {}", token_path));
    Ok(())
}
