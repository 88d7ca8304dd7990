//! Headless folder core (events/engine/host ports).

pub mod bus;
pub mod constructor;
pub mod deferred;
pub mod engine;
pub mod event;
pub mod folder_state;
pub mod services;
pub mod ungroup;

pub use bus::{event_bus, EventBusReceiver, EventBusSender};
pub use constructor::effective_selection;
pub use deferred::{DeferredQueue, DeferredTask};
pub use engine::FolderEngine;
pub use event::{CommandDisposition, CommandEvent, EventKind, HostCommand, LifecycleEvent};
pub use ungroup::{InterceptId, InterceptTable};
