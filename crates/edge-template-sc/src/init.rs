//!
//! # Initialization routines for the edge template controller
//!
//! All processing engines are hooked up here: the backing client, the
//! revision dispatcher and the shared context handed to services.
//!
use tracing::info;

use crate::config::ControllerConfig;
use crate::controllers::RevisionController;
use crate::core::{Context, SharedContext};
use crate::dispatcher::RevisionDispatcher;
use crate::stores::MemoryClient;

/// wire the controller against the in-memory backing store and start the
/// dispatch loop
pub async fn start_main_loop(config: ControllerConfig) -> SharedContext<MemoryClient> {
    info!(namespace = config.namespace, "starting controller");

    let client = MemoryClient::new_shared();
    let controller = RevisionController::new(client.clone(), client.clone());
    let revision_events = RevisionDispatcher::start(controller);

    Context::shared(client, config, revision_events)
}
