use std::time::Duration;

use async_channel::{Receiver, Sender, bounded};
use fluvio_future::task::spawn;
use fluvio_future::timer::sleep;
use tracing::{debug, error, info, instrument};

use edge_template_metadata::revision::DeviceTemplateRevision;

use crate::StoreError;
use crate::controllers::RevisionController;
use crate::stores::{RevisionClient, TemplateClient};

/// backlog of revision events before senders start to block
const CHANNEL_BUFFER: usize = 100;

#[cfg(not(test))]
const RETRY_WAIT: Duration = Duration::from_secs(10);
#[cfg(test)]
const RETRY_WAIT: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
pub enum RevisionEvent {
    Changed(DeviceTemplateRevision),
    Removed(DeviceTemplateRevision),
}

/// Feeds revision events to the [`RevisionController`], one at a time in
/// arrival order. A failed event is logged and requeued after a pause so a
/// transient store error does not drop the reconcile.
pub struct RevisionDispatcher<T, R> {
    controller: RevisionController<T, R>,
    events: Receiver<RevisionEvent>,
    requeue: Sender<RevisionEvent>,
}

impl<T, R> RevisionDispatcher<T, R>
where
    T: TemplateClient + 'static,
    R: RevisionClient + 'static,
{
    /// start the dispatch loop, returns the sender for feeding events
    pub fn start(controller: RevisionController<T, R>) -> Sender<RevisionEvent> {
        let (sender, receiver) = bounded(CHANNEL_BUFFER);
        let dispatcher = Self {
            controller,
            events: receiver,
            requeue: sender.clone(),
        };
        spawn(dispatcher.dispatch_loop());
        sender
    }

    #[instrument(skip(self), name = "RevisionDispatcherLoop")]
    async fn dispatch_loop(self) {
        info!("started revision dispatcher");
        while let Ok(event) = self.events.recv().await {
            if let Err(err) = self.process(event.clone()).await {
                error!("revision reconcile failed: {err}, requeueing");
                sleep(RETRY_WAIT).await;
                if self.requeue.send(event).await.is_err() {
                    break;
                }
            }
        }
        info!("revision dispatcher terminated");
    }

    async fn process(&self, event: RevisionEvent) -> Result<(), StoreError> {
        match event {
            RevisionEvent::Changed(revision) => {
                let key = revision.store_key();
                debug!(key, "revision changed");
                self.controller.on_changed(&key, Some(revision)).await?;
            }
            RevisionEvent::Removed(revision) => {
                let key = revision.store_key();
                debug!(key, "revision removed");
                self.controller.on_removed(&key, Some(revision)).await?;
            }
        }
        Ok(())
    }
}
