//! # Module: Role Chart
//!
//! ## Responsibility
//! Derives the three-bucket role histogram from a snapshot and keeps a pie
//! chart in sync with it. The chart primitive ([`ChartModule`]) is loaded
//! lazily, the first time a non-empty snapshot is seen.
//!
//! ## Guarantees
//! - Histogram counts always sum to the snapshot length
//! - An empty snapshot is a no-op: nothing loads, an existing chart is kept
//! - Repeated updates mutate the existing chart's dataset in place
//!
//! ## NOT Responsible For
//! - Terminal drawing (that belongs to `tui::widgets::chart`)

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::features::{LazyModule, CHART_FEATURE};
use crate::model::{Role, User};
use crate::DashboardError;

/// Default slice colors for Admin, Editor, Viewer.
pub const DEFAULT_COLORS: [&str; 3] = ["#f093fb", "#4facfe", "#43e97b"];

/// Per-role user counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleHistogram {
    counts: [usize; 3],
}

impl RoleHistogram {
    /// Counts users per role.
    pub fn from_users(users: &[User]) -> Self {
        let mut counts = [0; 3];
        for user in users {
            counts[user.role.index()] += 1;
        }
        Self { counts }
    }

    /// Count for one role.
    pub fn count(&self, role: Role) -> usize {
        self.counts[role.index()]
    }

    /// Counts in canonical order (Admin, Editor, Viewer).
    pub fn counts(&self) -> [usize; 3] {
        self.counts
    }

    /// Sum of all buckets.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `count / total * 100`, or 0.0 for an empty histogram.
    pub fn percentage(&self, role: Role) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(role) as f64 / total as f64 * 100.0
    }

    /// Legend label, e.g. `"Admin: 1 (50.0%)"`.
    pub fn label(&self, role: Role) -> String {
        format!(
            "{}: {} ({:.1}%)",
            role.label(),
            self.count(role),
            self.percentage(role)
        )
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#rrggbb`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// The charting primitive: slice palette and chart factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartModule {
    colors: [Rgb; 3],
}

impl ChartModule {
    /// Builds the module from three `#rrggbb` colors (Admin, Editor, Viewer).
    ///
    /// # Errors
    /// [`DashboardError::FeatureLoad`] if there are not exactly three colors
    /// or one does not parse.
    pub fn from_hex(colors: &[String]) -> Result<Self, DashboardError> {
        let fail = |reason: String| DashboardError::FeatureLoad {
            feature: CHART_FEATURE,
            reason,
        };
        if colors.len() != 3 {
            return Err(fail(format!("expected 3 colors, got {}", colors.len())));
        }
        let mut parsed = [Rgb(0, 0, 0); 3];
        for (slot, raw) in parsed.iter_mut().zip(colors) {
            *slot = Rgb::parse_hex(raw).ok_or_else(|| fail(format!("invalid color '{raw}'")))?;
        }
        Ok(Self { colors: parsed })
    }

    /// Slice color for `role`.
    pub fn color(&self, role: Role) -> Rgb {
        self.colors[role.index()]
    }

    /// Creates a new pie chart showing `histogram`.
    pub fn create(&self, histogram: RoleHistogram) -> PieChart {
        PieChart {
            colors: self.colors,
            data: histogram,
            revision: 0,
        }
    }
}

/// One slice of the pie, in turns (0.0 – 1.0) starting at twelve o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Bucket this slice represents.
    pub role: Role,
    /// Number of users in the bucket.
    pub count: usize,
    /// Share of the total, 0 – 100.
    pub percentage: f64,
    /// Fill color.
    pub color: Rgb,
    /// Start of the slice, in turns.
    pub start: f64,
    /// Angular size of the slice, in turns.
    pub sweep: f64,
}

/// A pie chart instance whose dataset is updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    colors: [Rgb; 3],
    data: RoleHistogram,
    revision: u64,
}

impl PieChart {
    /// Replaces the dataset without recreating the chart.
    pub fn update(&mut self, histogram: RoleHistogram) {
        self.data = histogram;
        self.revision += 1;
    }

    /// Current dataset.
    pub fn data(&self) -> RoleHistogram {
        self.data
    }

    /// Number of in-place updates since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Slices in canonical role order, including empty ones.
    pub fn slices(&self) -> Vec<PieSlice> {
        let total = self.data.total();
        let mut start = 0.0;
        Role::ALL
            .iter()
            .map(|&role| {
                let count = self.data.count(role);
                let sweep = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                };
                let slice = PieSlice {
                    role,
                    count,
                    percentage: self.data.percentage(role),
                    color: self.colors[role.index()],
                    start,
                    sweep,
                };
                start += sweep;
                slice
            })
            .collect()
    }

    /// Which slice covers the angle `turn` (0.0 – 1.0), if any.
    pub fn slice_at(&self, turn: f64) -> Option<Role> {
        self.slices()
            .into_iter()
            .find(|s| s.sweep > 0.0 && turn >= s.start && turn < s.start + s.sweep)
            .map(|s| s.role)
            .or_else(|| {
                // Rounding can leave the very end of the circle uncovered.
                self.slices().into_iter().rev().find(|s| s.sweep > 0.0).map(|s| s.role)
            })
    }
}

/// What a call to [`ChartRenderer::render`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartUpdate {
    /// Empty snapshot: nothing drawn, existing chart untouched.
    Skipped,
    /// First non-empty snapshot: module loaded and chart created.
    Created,
    /// Existing chart's dataset replaced in place.
    Updated,
}

/// Keeps a pie chart in sync with store snapshots.
#[derive(Debug)]
pub struct ChartRenderer {
    module: Rc<LazyModule<ChartModule>>,
    chart: Option<PieChart>,
}

impl ChartRenderer {
    /// Creates a renderer that loads its charting module from `module`.
    pub fn new(module: Rc<LazyModule<ChartModule>>) -> Self {
        Self {
            module,
            chart: None,
        }
    }

    /// Feeds a snapshot to the chart.
    ///
    /// # Errors
    /// [`DashboardError::FeatureLoad`] if the chart module cannot be loaded.
    /// No chart is created in that case and the next non-empty snapshot
    /// retries the load.
    pub fn render(&mut self, users: &[User]) -> Result<ChartUpdate, DashboardError> {
        if users.is_empty() {
            return Ok(ChartUpdate::Skipped);
        }

        let histogram = RoleHistogram::from_users(users);
        debug!(counts = ?histogram.counts(), "role histogram");

        match self.chart.as_mut() {
            Some(chart) => {
                chart.update(histogram);
                Ok(ChartUpdate::Updated)
            }
            None => {
                let module = self.module.get()?;
                self.chart = Some(module.create(histogram));
                Ok(ChartUpdate::Created)
            }
        }
    }

    /// The chart, once one has been created.
    pub fn chart(&self) -> Option<&PieChart> {
        self.chart.as_ref()
    }

    /// Whether the charting module has been loaded.
    pub fn is_module_loaded(&self) -> bool {
        self.module.is_loaded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{UserFields, UserId};

    fn user(id: u64, role: Role) -> User {
        User::from_fields(
            UserId(id),
            UserFields::new(format!("u{id}"), format!("u{id}@x.com"), role),
        )
    }

    fn default_module() -> Rc<LazyModule<ChartModule>> {
        Rc::new(LazyModule::new(CHART_FEATURE, || {
            let colors: Vec<String> = DEFAULT_COLORS.iter().map(|c| c.to_string()).collect();
            ChartModule::from_hex(&colors)
        }))
    }

    #[test]
    fn test_histogram_counts_sum_to_total() {
        let users: Vec<User> = (0..17).map(|i| user(i, Role::ALL[(i as usize * 7) % 3])).collect();
        let hist = RoleHistogram::from_users(&users);
        assert_eq!(hist.total(), users.len());
        assert_eq!(hist.counts().iter().sum::<usize>(), 17);
    }

    #[test]
    fn test_histogram_ann_and_bo() {
        let hist = RoleHistogram::from_users(&[user(1, Role::Admin), user(2, Role::Editor)]);
        assert_eq!(hist.counts(), [1, 1, 0]);
        assert_eq!(hist.label(Role::Admin), "Admin: 1 (50.0%)");
        assert_eq!(hist.label(Role::Viewer), "Viewer: 0 (0.0%)");
    }

    #[test]
    fn test_histogram_empty_percentage_is_zero() {
        let hist = RoleHistogram::default();
        assert_eq!(hist.percentage(Role::Admin), 0.0);
    }

    #[test]
    fn test_percentage_one_decimal_rounding() {
        let users = [user(1, Role::Admin), user(2, Role::Editor), user(3, Role::Editor)];
        let hist = RoleHistogram::from_users(&users);
        assert_eq!(hist.label(Role::Admin), "Admin: 1 (33.3%)");
        assert_eq!(hist.label(Role::Editor), "Editor: 2 (66.7%)");
    }

    #[test]
    fn test_rgb_parse_hex() {
        assert_eq!(Rgb::parse_hex("#f093fb"), Some(Rgb(0xf0, 0x93, 0xfb)));
        assert_eq!(Rgb::parse_hex("#F093FB"), Some(Rgb(0xf0, 0x93, 0xfb)));
        assert_eq!(Rgb::parse_hex("f093fb"), None);
        assert_eq!(Rgb::parse_hex("#f093f"), None);
        assert_eq!(Rgb::parse_hex("#zz93fb"), None);
        assert_eq!(Rgb(0x43, 0xe9, 0x7b).to_string(), "#43e97b");
    }

    #[test]
    fn test_chart_module_rejects_wrong_color_count() {
        let err = ChartModule::from_hex(&["#000000".to_string()]);
        assert!(matches!(err, Err(DashboardError::FeatureLoad { .. })));
    }

    #[test]
    fn test_chart_module_rejects_bad_color() {
        let colors = vec!["#000000".to_string(), "red".to_string(), "#ffffff".to_string()];
        assert!(ChartModule::from_hex(&colors).is_err());
    }

    #[test]
    fn test_render_empty_snapshot_skips_and_does_not_load() {
        let mut renderer = ChartRenderer::new(default_module());
        assert_eq!(renderer.render(&[]).expect("test: render"), ChartUpdate::Skipped);
        assert!(renderer.chart().is_none());
        assert!(!renderer.is_module_loaded());
    }

    #[test]
    fn test_render_creates_then_updates_in_place() {
        let module = default_module();
        let mut renderer = ChartRenderer::new(Rc::clone(&module));

        let first = renderer.render(&[user(1, Role::Admin)]).expect("test: create");
        assert_eq!(first, ChartUpdate::Created);
        assert_eq!(renderer.chart().map(PieChart::revision), Some(0));

        let second = renderer
            .render(&[user(1, Role::Admin), user(2, Role::Viewer)])
            .expect("test: update");
        assert_eq!(second, ChartUpdate::Updated);
        let chart = renderer.chart().expect("test: chart exists");
        assert_eq!(chart.revision(), 1);
        assert_eq!(chart.data().counts(), [1, 0, 1]);
        assert_eq!(module.load_attempts(), 1);
    }

    #[test]
    fn test_render_empty_after_chart_keeps_existing_chart() {
        let mut renderer = ChartRenderer::new(default_module());
        renderer.render(&[user(1, Role::Editor)]).expect("test: create");
        let before = renderer.chart().cloned();

        assert_eq!(renderer.render(&[]).expect("test: empty"), ChartUpdate::Skipped);
        assert_eq!(renderer.chart().cloned(), before);
    }

    #[test]
    fn test_render_load_failure_creates_nothing_and_retries() {
        let module = Rc::new(LazyModule::new(CHART_FEATURE, || {
            ChartModule::from_hex(&["nope".to_string()])
        }));
        let mut renderer = ChartRenderer::new(Rc::clone(&module));

        assert!(renderer.render(&[user(1, Role::Admin)]).is_err());
        assert!(renderer.chart().is_none());
        assert!(renderer.render(&[user(1, Role::Admin)]).is_err());
        assert_eq!(module.load_attempts(), 2);
    }

    #[test]
    fn test_slices_cover_full_circle() {
        let module = ChartModule::from_hex(
            &DEFAULT_COLORS.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        )
        .expect("test: module");
        let chart = module.create(RoleHistogram::from_users(&[
            user(1, Role::Admin),
            user(2, Role::Editor),
            user(3, Role::Editor),
            user(4, Role::Viewer),
        ]));
        let slices = chart.slices();
        assert_eq!(slices.len(), 3);
        assert!((slices[0].sweep - 0.25).abs() < 1e-9);
        assert!((slices[1].start - 0.25).abs() < 1e-9);
        assert!((slices[1].sweep - 0.5).abs() < 1e-9);
        let total: f64 = slices.iter().map(|s| s.sweep).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(slices[2].color, Rgb(0x43, 0xe9, 0x7b));
    }

    #[test]
    fn test_slice_at_finds_covering_role() {
        let module = ChartModule::from_hex(
            &DEFAULT_COLORS.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        )
        .expect("test: module");
        let chart = module.create(RoleHistogram::from_users(&[
            user(1, Role::Admin),
            user(2, Role::Viewer),
        ]));
        assert_eq!(chart.slice_at(0.1), Some(Role::Admin));
        assert_eq!(chart.slice_at(0.75), Some(Role::Viewer));
        assert_eq!(chart.slice_at(1.0), Some(Role::Viewer));
    }
}
