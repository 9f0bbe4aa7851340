//! # Module: Lazy Feature Registry
//!
//! ## Responsibility
//! Defers construction of non-critical UI modules (the chart primitive and
//! the user form) until first use, then caches them for the session.
//!
//! ## Guarantees
//! - A module's loader runs at most once on success
//! - A failed load is not cached; the next access retries
//! - Load failures are returned as [`DashboardError::FeatureLoad`], never panics
//!
//! ## NOT Responsible For
//! - What the modules do once loaded (`chart`, `form`)
//! - Surfacing failures to the user (that belongs to `controller`)

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use once_cell::unsync::OnceCell;
use tracing::{error, info};

use crate::chart::ChartModule;
use crate::config::DashboardConfig;
use crate::form::FormModule;
use crate::DashboardError;

/// Registry name of the charting module.
pub const CHART_FEATURE: &str = "chart";

/// Registry name of the user form module.
pub const FORM_FEATURE: &str = "user-form";

type Loader<T> = Box<dyn Fn() -> Result<T, DashboardError>>;

/// A module constructed on first access and reused afterwards.
pub struct LazyModule<T> {
    name: &'static str,
    loader: Loader<T>,
    cell: OnceCell<Rc<T>>,
    attempts: Cell<usize>,
}

impl<T> fmt::Debug for LazyModule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyModule")
            .field("name", &self.name)
            .field("loaded", &self.is_loaded())
            .field("attempts", &self.attempts.get())
            .finish()
    }
}

impl<T> LazyModule<T> {
    /// Wraps `loader` so it runs on the first call to [`get`](Self::get).
    pub fn new(
        name: &'static str,
        loader: impl Fn() -> Result<T, DashboardError> + 'static,
    ) -> Self {
        Self {
            name,
            loader: Box::new(loader),
            cell: OnceCell::new(),
            attempts: Cell::new(0),
        }
    }

    /// Returns the module, loading it first if needed.
    ///
    /// # Errors
    /// Whatever the loader returned; the failure is not cached.
    pub fn get(&self) -> Result<Rc<T>, DashboardError> {
        self.cell
            .get_or_try_init(|| {
                self.attempts.set(self.attempts.get() + 1);
                match (self.loader)() {
                    Ok(module) => {
                        info!(feature = self.name, "feature module loaded");
                        Ok(Rc::new(module))
                    }
                    Err(e) => {
                        error!(feature = self.name, error = %e, "feature module failed to load");
                        Err(e)
                    }
                }
            })
            .map(Rc::clone)
    }

    /// Registry name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether a successful load has happened.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// How many times the loader has run (successes and failures).
    pub fn load_attempts(&self) -> usize {
        self.attempts.get()
    }
}

/// The session's lazily loaded feature modules, keyed by name.
#[derive(Debug, Clone)]
pub struct FeatureRegistry {
    chart: Rc<LazyModule<ChartModule>>,
    form: Rc<LazyModule<FormModule>>,
}

impl FeatureRegistry {
    /// Builds the registry with loaders derived from the configuration.
    /// Nothing is loaded yet.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let colors = config.chart.colors.clone();
        let handset_max_width = config.form.handset_max_width;
        Self::with_loaders(
            move || ChartModule::from_hex(&colors),
            move || FormModule::new(handset_max_width),
        )
    }

    /// Builds the registry from explicit loaders.
    pub fn with_loaders(
        chart: impl Fn() -> Result<ChartModule, DashboardError> + 'static,
        form: impl Fn() -> Result<FormModule, DashboardError> + 'static,
    ) -> Self {
        Self {
            chart: Rc::new(LazyModule::new(CHART_FEATURE, chart)),
            form: Rc::new(LazyModule::new(FORM_FEATURE, form)),
        }
    }

    /// Shared handle to the chart module slot.
    pub fn chart(&self) -> Rc<LazyModule<ChartModule>> {
        Rc::clone(&self.chart)
    }

    /// Shared handle to the form module slot.
    pub fn form(&self) -> Rc<LazyModule<FormModule>> {
        Rc::clone(&self.form)
    }

    /// Whether the feature named `name` has been loaded. Unknown names are
    /// never loaded.
    pub fn is_loaded(&self, name: &str) -> bool {
        match name {
            CHART_FEATURE => self.chart.is_loaded(),
            FORM_FEATURE => self.form.is_loaded(),
            _ => false,
        }
    }

    /// Names of the features loaded so far.
    pub fn loaded_features(&self) -> Vec<&'static str> {
        [
            (self.chart.name(), self.chart.is_loaded()),
            (self.form.name(), self.form.is_loaded()),
        ]
        .into_iter()
        .filter_map(|(name, loaded)| loaded.then_some(name))
        .collect()
    }
}
