use super::CatalogSnapshot;
use crate::error::PrismError;
use prism_filter_core::{DerivedSubsets, EngineStats, FilterEngine, FilterSelection};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
pub enum CatalogActorMessage {
    /// Swap in a new snapshot and drop every memoized subset. Replies with the model count.
    Replace(Box<CatalogSnapshot>, RpcReplyPort<usize>),

    /// Current snapshot, if one has been loaded.
    Snapshot(RpcReplyPort<Option<Arc<CatalogSnapshot>>>),

    /// Derived subsets of the current snapshot under a selection.
    Query(FilterSelection, RpcReplyPort<Result<CatalogView, PrismError>>),

    /// Engine memo hit/miss counters.
    Stats(RpcReplyPort<EngineStats>),
}

/// A snapshot together with the subsets one selection derives from it.
///
/// Indices in `derived` refer to `snapshot.models`, so the two always travel together.
#[derive(Debug, Clone)]
pub struct CatalogView {
    pub snapshot: Arc<CatalogSnapshot>,
    pub derived: DerivedSubsets,
}

#[derive(Clone)]
pub struct CatalogHandle {
    actor: ActorRef<CatalogActorMessage>,
}

impl CatalogHandle {
    pub async fn replace(&self, snapshot: CatalogSnapshot) -> Result<usize, PrismError> {
        ractor::call!(self.actor, CatalogActorMessage::Replace, Box::new(snapshot))
            .map_err(|e| PrismError::RactorError(format!("CatalogActor Replace RPC failed: {e}")))
    }

    pub async fn snapshot(&self) -> Result<Option<Arc<CatalogSnapshot>>, PrismError> {
        ractor::call!(self.actor, CatalogActorMessage::Snapshot).map_err(|e| {
            PrismError::RactorError(format!("CatalogActor Snapshot RPC failed: {e}"))
        })
    }

    pub async fn query(&self, selection: FilterSelection) -> Result<CatalogView, PrismError> {
        ractor::call!(self.actor, CatalogActorMessage::Query, selection)
            .map_err(|e| PrismError::RactorError(format!("CatalogActor Query RPC failed: {e}")))?
    }

    pub async fn stats(&self) -> Result<EngineStats, PrismError> {
        ractor::call!(self.actor, CatalogActorMessage::Stats)
            .map_err(|e| PrismError::RactorError(format!("CatalogActor Stats RPC failed: {e}")))
    }
}

struct CatalogActorState {
    snapshot: Option<Arc<CatalogSnapshot>>,
    engine: FilterEngine,
}

struct CatalogActor;

#[ractor::async_trait]
impl Actor for CatalogActor {
    type Msg = CatalogActorMessage;
    type State = CatalogActorState;
    type Arguments = u64;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        cache_capacity: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        info!(cache_capacity, "CatalogActor initialized");
        Ok(CatalogActorState {
            snapshot: None,
            engine: FilterEngine::new(cache_capacity),
        })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            CatalogActorMessage::Replace(snapshot, reply) => {
                let count = snapshot.len();
                state.engine.invalidate_all();
                state.snapshot = Some(Arc::from(snapshot));
                debug!(model_count = count, "Catalog snapshot replaced");
                let _ = reply.send(count);
            }
            CatalogActorMessage::Snapshot(reply) => {
                let _ = reply.send(state.snapshot.clone());
            }
            CatalogActorMessage::Query(selection, reply) => {
                let res = match state.snapshot.as_ref() {
                    Some(snapshot) => Ok(CatalogView {
                        derived: state.engine.derive(&snapshot.models, &selection),
                        snapshot: Arc::clone(snapshot),
                    }),
                    None => Err(PrismError::CatalogUnavailable),
                };
                let _ = reply.send(res);
            }
            CatalogActorMessage::Stats(reply) => {
                let _ = reply.send(state.engine.stats());
            }
        }
        Ok(())
    }
}

/// Spawns an unnamed catalog actor with an empty snapshot.
pub async fn spawn(cache_capacity: u64) -> Result<CatalogHandle, PrismError> {
    let (actor, _jh) = Actor::spawn(None, CatalogActor, cache_capacity)
        .await
        .map_err(|e| PrismError::RactorError(format!("failed to spawn CatalogActor: {e}")))?;

    Ok(CatalogHandle { actor })
}
