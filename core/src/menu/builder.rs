use crate::config::MenuLabels;
use crate::error::HostError;
use crate::host::ContextualIdentities;
use crate::host::MenuHost;
use folder_containers_protocol::MenuEntry;
use folder_containers_protocol::menus::NO_CONTAINER_MENU_ID;
use folder_containers_protocol::menus::NO_CONTAINERS_WARNING_MENU_ID;
use folder_containers_protocol::menus::ROOT_MENU_ID;
use folder_containers_protocol::menus::container_menu_id;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use tracing::info;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuilderState {
    Idle,
    Building { rebuild_requested: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// This request ran `passes` build passes (more than one when requests
    /// arrived while it was building).
    Built {
        passes: usize,
        last: Option<MenuBuildSummary>,
    },
    /// A build was already running; it will run one more pass for this request.
    Coalesced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuBuildSummary {
    pub containers: usize,
}

/// Rebuilds the "Always Open in Container" menu from the host's container list.
///
/// At most one build runs at a time. Requests that arrive during a build are
/// folded into a single follow-up pass.
pub struct ContextMenuBuilder {
    menus: Arc<dyn MenuHost>,
    identities: Arc<dyn ContextualIdentities>,
    labels: MenuLabels,
    state: Mutex<BuilderState>,
}

impl ContextMenuBuilder {
    pub fn new(
        menus: Arc<dyn MenuHost>,
        identities: Arc<dyn ContextualIdentities>,
        labels: MenuLabels,
    ) -> Self {
        Self {
            menus,
            identities,
            labels,
            state: Mutex::new(BuilderState::Idle),
        }
    }

    pub fn is_building(&self) -> bool {
        matches!(*self.lock_state(), BuilderState::Building { .. })
    }

    pub async fn request_rebuild(&self) -> RebuildOutcome {
        {
            let mut state = self.lock_state();
            match *state {
                BuilderState::Idle => {
                    *state = BuilderState::Building {
                        rebuild_requested: false,
                    };
                }
                BuilderState::Building { .. } => {
                    *state = BuilderState::Building {
                        rebuild_requested: true,
                    };
                    info!("Menu build already running; queued one more pass");
                    return RebuildOutcome::Coalesced;
                }
            }
        }
        let mut guard = BuildingGuard {
            state: &self.state,
            finished: false,
        };

        let mut passes = 0;
        loop {
            passes += 1;
            let last = match self.build_once().await {
                Ok(summary) => Some(summary),
                Err(err) => {
                    warn!(error = %err, "Failed to clear existing menu entries");
                    None
                }
            };

            let mut state = self.lock_state();
            match *state {
                BuilderState::Building {
                    rebuild_requested: true,
                } => {
                    *state = BuilderState::Building {
                        rebuild_requested: false,
                    };
                }
                BuilderState::Building {
                    rebuild_requested: false,
                }
                | BuilderState::Idle => {
                    *state = BuilderState::Idle;
                    guard.finished = true;
                    return RebuildOutcome::Built { passes, last };
                }
            }
        }
    }

    /// One full pass. Only a failing `remove_all` aborts the pass; every
    /// other failure is logged and the remaining entries are still created.
    async fn build_once(&self) -> Result<MenuBuildSummary, HostError> {
        self.menus.remove_all().await?;

        self.create_logged(MenuEntry::item(ROOT_MENU_ID, &self.labels.root_title))
            .await;
        self.create_logged(
            MenuEntry::item(NO_CONTAINER_MENU_ID, &self.labels.no_container_title)
                .under(ROOT_MENU_ID),
        )
        .await;
        self.create_logged(MenuEntry::separator().under(ROOT_MENU_ID))
            .await;

        let identities = match self.identities.query().await {
            Ok(identities) => identities,
            Err(err) => {
                warn!(error = %err, "Failed to enumerate containers");
                return Ok(MenuBuildSummary { containers: 0 });
            }
        };

        if identities.is_empty() {
            warn!("No containers found");
            self.create_logged(
                MenuEntry::item(
                    NO_CONTAINERS_WARNING_MENU_ID,
                    &self.labels.no_containers_title,
                )
                .under(ROOT_MENU_ID)
                .disabled(),
            )
            .await;
        }

        for identity in &identities {
            self.create_logged(
                MenuEntry::item(container_menu_id(&identity.cookie_store_id), &identity.name)
                    .under(ROOT_MENU_ID),
            )
            .await;
        }

        info!(containers = identities.len(), "Built container menu");
        Ok(MenuBuildSummary {
            containers: identities.len(),
        })
    }

    async fn create_logged(&self, entry: MenuEntry) {
        let id = entry.id.clone();
        if let Err(err) = self.menus.create(entry).await {
            warn!(menu_id = ?id, error = %err, "Failed to create menu entry");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, BuilderState> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<BuilderState>) -> MutexGuard<'_, BuilderState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the builder to `Idle` when a build ends without reaching its
/// normal exit (the future was dropped or a host call panicked).
struct BuildingGuard<'a> {
    state: &'a Mutex<BuilderState>,
    finished: bool,
}

impl Drop for BuildingGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        *lock(self.state) = BuilderState::Idle;
        warn!("Menu build interrupted; next request starts a fresh build");
    }
}
