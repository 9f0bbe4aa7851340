//! # Module: Dashboard Controller
//!
//! ## Responsibility
//! Wires the store to its views. Holds the single long-lived store
//! subscription and feeds every snapshot to the table adapter and the chart
//! renderer; opens the user form and applies its result back to the store.
//!
//! ## Guarantees
//! - At most one modal is open at a time
//! - A rejected submit never reaches the store and leaves the modal open
//! - A successful submit calls the store exactly once, then closes the modal
//! - Feature load failures are surfaced in the activity log, never panic
//!
//! ## NOT Responsible For
//! - Key handling and drawing (that belongs to `tui`)
//! - Validation rules (that belongs to `form`)

use tokio::sync::watch;
use tracing::{info, warn};

use crate::activity::ActivityLog;
use crate::chart::{ChartRenderer, ChartUpdate};
use crate::config::DashboardConfig;
use crate::features::FeatureRegistry;
use crate::form::{self, FormError, FormMode, UserForm};
use crate::model::UserId;
use crate::store::{Subscription, UpdateOutcome, UserStore};
use crate::table::TableView;

/// Viewport width assumed until the front end reports the real one.
pub const DEFAULT_VIEWPORT_WIDTH: u16 = 120;

/// Which modal, if any, is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    /// No modal.
    Closed,
    /// Form open for a new user.
    Creating,
    /// Form open for the user with this id.
    Editing(UserId),
}

/// Result of [`Dashboard::submit_form`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No modal was open.
    NoModal,
    /// Validation failed; the modal stays open.
    Rejected(Vec<FormError>),
    /// A new user was added with this id.
    Added(UserId),
    /// An existing user was updated (or the id had vanished).
    Updated(UserId, UpdateOutcome),
}

/// The dashboard view-model.
#[derive(Debug)]
pub struct Dashboard {
    store: UserStore,
    subscription: Subscription,
    table: TableView,
    chart: ChartRenderer,
    features: FeatureRegistry,
    modal: Option<UserForm>,
    viewport: watch::Sender<u16>,
    activity: ActivityLog,
}

impl Dashboard {
    /// Builds a dashboard from configuration, seeding any configured users.
    pub fn new(config: &DashboardConfig) -> Self {
        Self::with_features(config, FeatureRegistry::from_config(config))
    }

    /// Builds a dashboard with an explicit feature registry.
    pub fn with_features(config: &DashboardConfig, features: FeatureRegistry) -> Self {
        let mut store = UserStore::new();
        let mut skipped = Vec::new();
        for (i, seed) in config.seed.iter().enumerate() {
            match form::validate(&seed.name, &seed.email, Some(seed.role)) {
                Ok(fields) => {
                    store.add(fields);
                }
                Err(errors) => {
                    warn!(index = i, ?errors, "invalid seed user skipped");
                    skipped.push(i);
                }
            }
        }
        let seeded = store.len();

        let subscription = store.subscribe();
        let (viewport, _) = watch::channel(DEFAULT_VIEWPORT_WIDTH);

        let mut dashboard = Self {
            store,
            subscription,
            table: TableView::new(
                config.table.page_size,
                config.table.page_size_options.clone(),
            ),
            chart: ChartRenderer::new(features.chart()),
            features,
            modal: None,
            viewport,
            activity: ActivityLog::new(),
        };
        if seeded > 0 {
            dashboard.activity.info(format!("Seeded {seeded} users"));
        }
        for i in skipped {
            dashboard
                .activity
                .warn(format!("Seed user {} skipped: invalid fields", i + 1));
        }
        dashboard.sync();
        dashboard
    }

    /// Feeds every pending store snapshot to the table and chart, and lets an
    /// open form react to viewport changes.
    ///
    /// # Returns
    /// `true` if at least one snapshot was processed.
    pub fn sync(&mut self) -> bool {
        let mut processed = false;
        while let Some(snapshot) = self.subscription.try_next() {
            processed = true;
            self.table.set_snapshot(snapshot.clone());
            match self.chart.render(&snapshot) {
                Ok(ChartUpdate::Created) => info!(users = snapshot.len(), "role chart created"),
                Ok(ChartUpdate::Updated) | Ok(ChartUpdate::Skipped) => {}
                Err(e) => self.activity.error(format!("Chart unavailable: {e}")),
            }
        }
        if let Some(form) = self.modal.as_mut() {
            form.sync_layout();
        }
        processed
    }

    /// Opens the form to create a user.
    ///
    /// # Returns
    /// `true` if the modal opened.
    pub fn open_create(&mut self) -> bool {
        if self.modal.is_some() {
            return false;
        }
        let module = match self.features.form().get() {
            Ok(module) => module,
            Err(e) => {
                self.activity.error(format!("Form unavailable: {e}"));
                return false;
            }
        };
        self.modal = Some(module.open_create(self.viewport.subscribe()));
        true
    }

    /// Opens the form pre-populated with the user `id`.
    ///
    /// # Returns
    /// `true` if the modal opened.
    pub fn open_edit(&mut self, id: UserId) -> bool {
        if self.modal.is_some() {
            return false;
        }
        let Some(user) = self.store.get(id).cloned() else {
            warn!(id = id.get(), "edit requested for unknown user");
            self.activity.warn(format!("No user {id} to edit"));
            return false;
        };
        let module = match self.features.form().get() {
            Ok(module) => module,
            Err(e) => {
                self.activity.error(format!("Form unavailable: {e}"));
                return false;
            }
        };
        self.modal = Some(module.open_edit(&user, self.viewport.subscribe()));
        true
    }

    /// Opens the edit form for the table's selected row.
    pub fn open_selected(&mut self) -> bool {
        match self.table.selected().map(|u| u.id) {
            Some(id) => self.open_edit(id),
            None => false,
        }
    }

    /// Submits the open form. A valid form is applied to the store and then
    /// closed; an invalid one stays open.
    pub fn submit_form(&mut self) -> SubmitOutcome {
        let Some(form) = self.modal.as_mut() else {
            return SubmitOutcome::NoModal;
        };
        let fields = match form.submit() {
            Ok(fields) => fields,
            Err(errors) => return SubmitOutcome::Rejected(errors),
        };
        let mode = form.mode();
        let name = fields.name.clone();

        let outcome = match mode {
            FormMode::Create => {
                let id = self.store.add(fields);
                self.activity.info(format!("Added {name} ({id})"));
                SubmitOutcome::Added(id)
            }
            FormMode::Edit(id) => {
                let result = self.store.update(id, fields);
                match result {
                    UpdateOutcome::Applied => self.activity.info(format!("Updated {name} ({id})")),
                    UpdateOutcome::NotFound => {
                        self.activity.warn(format!("Update ignored: no user {id}"))
                    }
                }
                SubmitOutcome::Updated(id, result)
            }
        };

        if let Some(form) = self.modal.take() {
            form.close();
        }
        self.sync();
        outcome
    }

    /// Closes the open form without touching the store.
    ///
    /// # Returns
    /// `true` if a modal was open.
    pub fn cancel_form(&mut self) -> bool {
        match self.modal.take() {
            Some(form) => {
                form.close();
                true
            }
            None => false,
        }
    }

    /// Publishes the current viewport width to an open form.
    pub fn set_viewport_width(&mut self, width: u16) {
        self.viewport.send_replace(width);
        if let Some(form) = self.modal.as_mut() {
            form.sync_layout();
        }
    }

    /// Current viewport width.
    pub fn viewport_width(&self) -> u16 {
        *self.viewport.borrow()
    }

    /// Number of live viewport observers (0 or 1: the open form).
    pub fn viewport_observers(&self) -> usize {
        self.viewport.receiver_count()
    }

    /// Modal state machine position.
    pub fn modal_state(&self) -> ModalState {
        match self.modal.as_ref().map(UserForm::mode) {
            None => ModalState::Closed,
            Some(FormMode::Create) => ModalState::Creating,
            Some(FormMode::Edit(id)) => ModalState::Editing(id),
        }
    }

    /// The open form.
    pub fn modal(&self) -> Option<&UserForm> {
        self.modal.as_ref()
    }

    /// The open form, mutably.
    pub fn modal_mut(&mut self) -> Option<&mut UserForm> {
        self.modal.as_mut()
    }

    /// The user store.
    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// The table adapter.
    pub fn table(&self) -> &TableView {
        &self.table
    }

    /// The table adapter, mutably (filter and paging controls).
    pub fn table_mut(&mut self) -> &mut TableView {
        &mut self.table
    }

    /// The chart renderer.
    pub fn chart(&self) -> &ChartRenderer {
        &self.chart
    }

    /// Lazily loaded feature modules.
    pub fn features(&self) -> &FeatureRegistry {
        &self.features
    }

    /// Activity log.
    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }
}
