//! Scripted host sessions: a JSON list of host actions replayed against a
//! `LocalTabHost` with the folder engine attached.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::kernel::services::adapters::{LocalTabHost, RecordingShell};
use crate::kernel::services::ports::{FolderSettings, TabHost};
use crate::kernel::{event_bus, CommandDisposition, CommandEvent, FolderEngine, HostCommand};
use crate::models::{NodeId, TabTree};

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default = "default_true")]
    pub pinned_region: bool,
    pub steps: Vec<Step>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Open {
        name: String,
        #[serde(default)]
        pinned: bool,
    },
    Close {
        name: String,
    },
    Select {
        names: Vec<String>,
    },
    Focus {
        name: String,
    },
    Pin {
        name: String,
    },
    Unpin {
        name: String,
    },
    Group {
        label: String,
        #[serde(default)]
        pinned: bool,
        names: Vec<String>,
    },
    UngroupItem {
        name: String,
    },
    RemoveGroup {
        group: String,
    },
    NewFolder,
    UngroupFolder {
        group: String,
    },
    AdvanceMs {
        ms: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    UnknownItem(String),
    UnknownGroup(String),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::UnknownItem(name) => write!(f, "unknown item: {}", name),
            ReplayError::UnknownGroup(id) => write!(f, "unknown group: {}", id),
        }
    }
}

impl std::error::Error for ReplayError {}

pub struct Session {
    pub host: LocalTabHost,
    pub engine: FolderEngine,
    pub shell: RecordingShell,
    now: Instant,
}

impl Session {
    pub fn new(settings: FolderSettings, pinned_region: bool) -> Self {
        let tree = if pinned_region {
            TabTree::with_pinned_region()
        } else {
            TabTree::new()
        };
        let (tx, rx) = event_bus();
        let mut shell = RecordingShell::new();
        let mut engine = FolderEngine::new(settings, rx);
        engine.start(&mut shell);
        Self {
            host: LocalTabHost::new(tree, tx),
            engine,
            shell,
            now: Instant::now(),
        }
    }

    fn item(&self, name: &str) -> Result<NodeId, ReplayError> {
        self.host
            .tree()
            .find_item(name)
            .ok_or_else(|| ReplayError::UnknownItem(name.to_string()))
    }

    fn group(&self, id: &str) -> Result<NodeId, ReplayError> {
        self.host
            .tree()
            .find_group(id)
            .ok_or_else(|| ReplayError::UnknownGroup(id.to_string()))
    }

    /// Applies one step and lets the engine observe the resulting events.
    /// Host-side failures are logged; only unresolvable names are errors.
    pub fn apply(&mut self, step: &Step) -> Result<(), ReplayError> {
        let result = match step {
            Step::Open { name, pinned } => {
                self.host.open_item(name, *pinned);
                Ok(())
            }
            Step::Close { name } => {
                let item = self.item(name)?;
                self.host.close_item(item)
            }
            Step::Select { names } => {
                let items = names
                    .iter()
                    .map(|n| self.item(n))
                    .collect::<Result<Vec<_>, _>>()?;
                self.host.set_multiselected(&items);
                Ok(())
            }
            Step::Focus { name } => {
                let item = self.item(name)?;
                self.host.focus(item);
                Ok(())
            }
            Step::Pin { name } => {
                let item = self.item(name)?;
                self.host.pin(item)
            }
            Step::Unpin { name } => {
                let item = self.item(name)?;
                self.host.unpin(item)
            }
            Step::Group {
                label,
                pinned,
                names,
            } => {
                let items = names
                    .iter()
                    .map(|n| self.item(n))
                    .collect::<Result<Vec<_>, _>>()?;
                self.host.create_group(label, *pinned, &items).map(|_| ())
            }
            Step::UngroupItem { name } => {
                let item = self.item(name)?;
                self.host.ungroup_single(item)
            }
            Step::RemoveGroup { group } => {
                let group = self.group(group)?;
                self.host.remove_group(group)
            }
            Step::NewFolder => {
                let event = CommandEvent::new(HostCommand::NewFolder, None);
                self.engine.dispatch_command(&mut self.host, event);
                Ok(())
            }
            Step::UngroupFolder { group } => {
                let group = self.group(group)?;
                let event = CommandEvent::new(HostCommand::UngroupTabs, Some(group));
                if self.engine.dispatch_command(&mut self.host, event)
                    == CommandDisposition::Default
                {
                    self.ungroup_by_default(group);
                }
                Ok(())
            }
            Step::AdvanceMs { ms } => {
                self.now += Duration::from_millis(*ms);
                Ok(())
            }
        };
        if let Err(e) = result {
            tracing::warn!(?step, error = %e, "host step failed");
        }
        self.engine.pump(&mut self.host);
        self.engine.tick(&mut self.host, self.now);
        Ok(())
    }

    /// The host's own ungroup: every item leaves, whatever the nesting.
    fn ungroup_by_default(&mut self, group: NodeId) {
        let items: Vec<NodeId> = self
            .host
            .tree()
            .children(group)
            .iter()
            .copied()
            .filter(|c| self.host.tree().item(*c).is_some())
            .collect();
        for item in items {
            if let Err(e) = self.host.ungroup_single(item) {
                tracing::warn!(?item, error = %e, "default ungroup failed");
            }
        }
    }

    /// Runs pending deferred work regardless of the script clock.
    pub fn settle(&mut self) {
        self.engine.pump(&mut self.host);
        let delay = Duration::from_millis(self.engine.settings().label_reassert_delay_ms);
        let now = Instant::now().max(self.now) + delay;
        self.engine.tick(&mut self.host, now);
    }

    pub fn outline(&self) -> String {
        let mut out = String::new();
        for row in self.host.tree().flatten_for_view() {
            out.push_str(&"  ".repeat(row.depth as usize));
            out.push_str(&row.text);
            out.push('\n');
        }
        out
    }

    pub fn shutdown(&mut self) {
        self.engine.stop(&mut self.shell);
    }
}

pub fn run_script(script: &Script, settings: FolderSettings) -> Result<Session, ReplayError> {
    let mut session = Session::new(settings, script.pinned_region);
    for step in &script.steps {
        session.apply(step)?;
    }
    session.settle();
    Ok(session)
}

#[cfg(test)]
#[path = "../tests/unit/replay.rs"]
mod tests;
