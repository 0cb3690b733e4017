use color_eyre::Result;
use toplist_core::SyncOrchestrator;
use toplist_models::StreamingService;

use crate::output::Output;

pub async fn run_sync(service_slugs: Vec<String>, output: &Output) -> Result<()> {
    let (config, store) = super::load_environment()?;

    let configured = config.services.clone();
    let services: Vec<StreamingService> = if service_slugs.is_empty() {
        configured
    } else {
        let mut selected = Vec::new();
        for slug in &service_slugs {
            let service: StreamingService = slug
                .parse()
                .map_err(|e: String| color_eyre::eyre::eyre!(e))?;
            if !configured.contains(&service) {
                return Err(color_eyre::eyre::eyre!(
                    "Service '{}' is not in the configured service list",
                    slug
                ));
            }
            if !selected.contains(&service) {
                selected.push(service);
            }
        }
        selected
    };

    let mut orchestrator = SyncOrchestrator::new(config, store);
    let summary = match orchestrator.run(&services).await {
        Ok(summary) => summary,
        Err(e) => {
            output.error(format!("{}", e));
            return Err(e.into());
        }
    };

    for (service, outcome) in &summary.services {
        output.info(format!(
            "{}: +{} -{} ({} unmatched)",
            service, outcome.added, outcome.removed, outcome.skipped
        ));
    }
    output.success(format!(
        "Synced {} list(s): {} added, {} removed, {} unmatched",
        summary.services.len(),
        summary.total_added(),
        summary.total_removed(),
        summary.total_skipped()
    ));

    Ok(())
}
