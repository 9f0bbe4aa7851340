//! # Module: User Form
//!
//! ## Responsibility
//! The modal dialog that creates or edits a single user. Holds the field
//! values and focus, validates on submit, and produces the id-less
//! [`UserFields`] for its opener. Its layout reacts to the viewport width
//! while it is open.
//!
//! ## Guarantees
//! - An invalid submit produces no fields and leaves the form open
//! - Name and email are trimmed before validation and emission
//! - The viewport subscription is released when the form is closed or dropped
//!
//! ## NOT Responsible For
//! - Applying the result to the store (that belongs to `controller`)
//! - Drawing the modal (that belongs to `tui::widgets::form`)

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

use crate::features::FORM_FEATURE;
use crate::model::{Role, User, UserFields, UserId};
use crate::DashboardError;

/// Default handset breakpoint: viewports narrower than this get one column.
pub const DEFAULT_HANDSET_MAX_WIDTH: u16 = 80;

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;

static EMAIL_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .ok()
});

/// Basic email shape check.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN {
        return false;
    }
    match email.split_once('@') {
        Some((local, _)) if local.len() <= MAX_LOCAL_PART_LEN => {}
        _ => return false,
    }
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// A single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// Name is empty.
    #[error("Name is required")]
    MissingName,
    /// Email is empty.
    #[error("Email is required")]
    MissingEmail,
    /// Email does not look like an address.
    #[error("Enter a valid email")]
    MalformedEmail,
    /// No role selected.
    #[error("Role is required")]
    MissingRole,
}

impl FormError {
    /// The field this error belongs to.
    pub fn field(self) -> FormField {
        match self {
            Self::MissingName => FormField::Name,
            Self::MissingEmail | Self::MalformedEmail => FormField::Email,
            Self::MissingRole => FormField::Role,
        }
    }
}

/// Validates raw field values.
///
/// # Returns
/// The trimmed fields, or every failing constraint.
pub fn validate(name: &str, email: &str, role: Option<Role>) -> Result<UserFields, Vec<FormError>> {
    let name = name.trim();
    let email = email.trim();
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(FormError::MissingName);
    }
    if email.is_empty() {
        errors.push(FormError::MissingEmail);
    } else if !is_valid_email(email) {
        errors.push(FormError::MalformedEmail);
    }
    match role {
        Some(role) if errors.is_empty() => Ok(UserFields::new(name, email, role)),
        Some(_) => Err(errors),
        None => {
            errors.push(FormError::MissingRole);
            Err(errors)
        }
    }
}

/// Whether the form creates a new user or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Creating a new user.
    Create,
    /// Editing the user with this id.
    Edit(UserId),
}

/// Focusable elements of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Name text input.
    Name,
    /// Email text input.
    Email,
    /// Role selector.
    Role,
    /// Save button.
    Submit,
    /// Cancel button.
    Cancel,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Role,
        FormField::Submit,
        FormField::Cancel,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|&f| f == self).unwrap_or(0)
    }

    /// Next element in tab order, wrapping.
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// Previous element in tab order, wrapping.
    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Column count for a viewport width: 1 below the handset breakpoint.
pub fn columns_for_width(width: u16, handset_max_width: u16) -> u8 {
    if width < handset_max_width {
        1
    } else {
        2
    }
}

/// The loaded form module: opens form instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModule {
    handset_max_width: u16,
}

impl FormModule {
    /// Creates the module.
    ///
    /// # Errors
    /// [`DashboardError::FeatureLoad`] if the breakpoint is zero.
    pub fn new(handset_max_width: u16) -> Result<Self, DashboardError> {
        if handset_max_width == 0 {
            return Err(DashboardError::FeatureLoad {
                feature: FORM_FEATURE,
                reason: "handset breakpoint must be at least 1 column".into(),
            });
        }
        Ok(Self { handset_max_width })
    }

    /// Opens an empty form for creating a user.
    pub fn open_create(&self, viewport: watch::Receiver<u16>) -> UserForm {
        UserForm::new(FormMode::Create, None, viewport, self.handset_max_width)
    }

    /// Opens a form pre-populated from `user`.
    pub fn open_edit(&self, user: &User, viewport: watch::Receiver<u16>) -> UserForm {
        UserForm::new(
            FormMode::Edit(user.id),
            Some(user),
            viewport,
            self.handset_max_width,
        )
    }
}

/// An open user form.
#[derive(Debug)]
pub struct UserForm {
    mode: FormMode,
    name: String,
    email: String,
    role: Option<Role>,
    focus: FormField,
    touched: bool,
    cols: u8,
    handset_max_width: u16,
    viewport: watch::Receiver<u16>,
}

impl UserForm {
    fn new(
        mode: FormMode,
        initial: Option<&User>,
        mut viewport: watch::Receiver<u16>,
        handset_max_width: u16,
    ) -> Self {
        let width = *viewport.borrow_and_update();
        debug!(?mode, width, "user form opened");
        Self {
            mode,
            name: initial.map(|u| u.name.clone()).unwrap_or_default(),
            email: initial.map(|u| u.email.clone()).unwrap_or_default(),
            role: initial.map(|u| u.role),
            focus: FormField::Name,
            touched: false,
            cols: columns_for_width(width, handset_max_width),
            handset_max_width,
            viewport,
        }
    }

    /// Create or edit.
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Dialog title.
    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add user",
            FormMode::Edit(_) => "Edit user",
        }
    }

    /// Current name input.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current email input.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Current role selection.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Current raw values as `(name, email, role)`, before trimming.
    pub fn values(&self) -> (&str, &str, Option<Role>) {
        (&self.name, &self.email, self.role)
    }

    /// Replaces the name input.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replaces the email input.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Selects a role.
    pub fn set_role(&mut self, role: Option<Role>) {
        self.role = role;
    }

    /// Focused element.
    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Moves focus forward.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Moves focus backward.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Types a character into the focused text field.
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            FormField::Name => self.name.push(c),
            FormField::Email => self.email.push(c),
            FormField::Role | FormField::Submit | FormField::Cancel => {}
        }
    }

    /// Deletes the last character of the focused text field.
    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Email => {
                self.email.pop();
            }
            FormField::Role | FormField::Submit | FormField::Cancel => {}
        }
    }

    /// Selects the next role; no selection starts at the first role.
    pub fn next_role(&mut self) {
        self.role = Some(self.role.map_or(Role::ALL[0], Role::next));
    }

    /// Selects the previous role; no selection starts at the last role.
    pub fn prev_role(&mut self) {
        self.role = Some(self.role.map_or(Role::ALL[Role::ALL.len() - 1], Role::prev));
    }

    /// Every constraint the current values violate.
    pub fn errors(&self) -> Vec<FormError> {
        validate(&self.name, &self.email, self.role).err().unwrap_or_default()
    }

    /// Whether submit would succeed.
    pub fn can_submit(&self) -> bool {
        self.errors().is_empty()
    }

    /// Inline error for `field`, shown only after a submit attempt.
    pub fn field_error(&self, field: FormField) -> Option<FormError> {
        if !self.touched {
            return None;
        }
        self.errors().into_iter().find(|e| e.field() == field)
    }

    /// Whether a submit has been attempted.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Attempts to submit.
    ///
    /// # Returns
    /// The validated fields to hand to the opener, or every failing
    /// constraint. On failure the form stays usable and starts showing
    /// inline errors.
    pub fn submit(&mut self) -> Result<UserFields, Vec<FormError>> {
        self.touched = true;
        let result = validate(&self.name, &self.email, self.role);
        if let Err(errors) = &result {
            debug!(?errors, "user form submit rejected");
        }
        result
    }

    /// Re-reads the viewport if it changed and updates the column count.
    ///
    /// # Returns
    /// `true` if the column count changed.
    pub fn sync_layout(&mut self) -> bool {
        if !self.viewport.has_changed().unwrap_or(false) {
            return false;
        }
        let width = *self.viewport.borrow_and_update();
        let cols = columns_for_width(width, self.handset_max_width);
        let changed = cols != self.cols;
        self.cols = cols;
        changed
    }

    /// Layout column count: 1 on handset widths, otherwise 2.
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Closes the form, releasing the viewport subscription.
    pub fn close(self) {
        debug!(mode = ?self.mode, "user form closed");
    }
}
