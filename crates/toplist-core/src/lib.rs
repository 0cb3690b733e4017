pub mod diff;
pub mod error;
pub mod matching;
pub mod reconcile;
pub mod sync;

pub use diff::ListDiff;
pub use error::RunError;
pub use reconcile::{ListReconciler, ReconcileSummary};
pub use sync::{RunSummary, SyncOrchestrator};
