// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Create-activity form screen.

use crate::error::{AppError, Result};
use crate::models::{ActivityForm, ActivityType};
use crate::routes::{Navigator, Route};
use crate::services::StravaClient;
use crate::store::SessionStore;
use std::collections::{BTreeMap, BTreeSet};
use validator::{Validate, ValidationErrors};

/// Text inputs of the form. These are the only fields that can be invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Type,
    StartDateLocal,
    ElapsedTime,
    Description,
    Distance,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Type,
        FormField::StartDateLocal,
        FormField::ElapsedTime,
        FormField::Description,
        FormField::Distance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Type => "Activity Type",
            FormField::StartDateLocal => "Start Date",
            FormField::ElapsedTime => "Elapsed Time (in hours)",
            FormField::Description => "Description",
            FormField::Distance => "Distance (in miles)",
        }
    }

    /// Keys the validator may report this field under.
    fn error_keys(&self) -> &'static [&'static str] {
        match self {
            FormField::Name => &["name"],
            FormField::Type => &["type", "activity_type"],
            FormField::StartDateLocal => &["start_date_local"],
            FormField::ElapsedTime => &["elapsed_time"],
            FormField::Description => &["description"],
            FormField::Distance => &["distance"],
        }
    }
}

/// Boolean switches of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSwitch {
    Trainer,
    Commute,
}

/// Values, touched fields and current errors of the form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: ActivityForm,
    touched: BTreeSet<FormField>,
    errors: BTreeMap<FormField, String>,
}

impl FormState {
    pub fn values(&self) -> &ActivityForm {
        &self.values
    }

    pub fn set_text(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            FormField::Name => &mut self.values.name,
            FormField::Type => &mut self.values.activity_type,
            FormField::StartDateLocal => &mut self.values.start_date_local,
            FormField::ElapsedTime => &mut self.values.elapsed_time,
            FormField::Description => &mut self.values.description,
            FormField::Distance => &mut self.values.distance,
        };
        *slot = value;
        self.revalidate().ok();
    }

    /// Pick an activity type from the fixed set.
    pub fn select_type(&mut self, activity_type: ActivityType) {
        self.set_text(FormField::Type, activity_type.as_str());
        // Choosing from the picker counts as touching it.
        self.touched.insert(FormField::Type);
    }

    pub fn set_switch(&mut self, switch: FormSwitch, on: bool) {
        match switch {
            FormSwitch::Trainer => self.values.trainer = on,
            FormSwitch::Commute => self.values.commute = on,
        }
    }

    /// Leave a field: its error, if any, becomes visible.
    pub fn blur(&mut self, field: FormField) {
        self.touched.insert(field);
        self.revalidate().ok();
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    /// Error to display next to `field`; untouched fields show none.
    pub fn visible_error(&self, field: FormField) -> Option<&str> {
        if !self.is_touched(field) {
            return None;
        }
        self.errors.get(&field).map(String::as_str)
    }

    /// Current error for `field`, touched or not.
    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Validate every field and mark them all touched, as on submit.
    pub fn validate_all(&mut self) -> std::result::Result<(), ValidationErrors> {
        self.touched.extend(FormField::ALL);
        self.revalidate()
    }

    fn revalidate(&mut self) -> std::result::Result<(), ValidationErrors> {
        self.errors.clear();
        let result = self.values.validate();
        if let Err(errors) = &result {
            let by_key = errors.field_errors();
            for field in FormField::ALL {
                let message = field
                    .error_keys()
                    .iter()
                    .find_map(|key| by_key.get(*key))
                    .and_then(|errs| errs.first())
                    .map(|err| {
                        err.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| err.code.to_string())
                    });
                if let Some(message) = message {
                    self.errors.insert(field, message);
                }
            }
        }
        result
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateState {
    /// Reading the session store.
    Loading,
    /// No session: sent to login without showing the form.
    Redirected,
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
}

/// Transient notification shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }
}

/// Drives the create-activity form.
pub struct CreateActivityFlow {
    session: SessionStore,
    client: StravaClient,
    token: Option<String>,
    form: FormState,
    state: CreateState,
}

impl CreateActivityFlow {
    pub fn new(session: SessionStore, client: StravaClient) -> Self {
        Self {
            session,
            client,
            token: None,
            form: FormState::default(),
            state: CreateState::Loading,
        }
    }

    pub fn state(&self) -> CreateState {
        self.state
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Load the session; without one, go to login.
    pub async fn mount(&mut self, nav: &mut Navigator) -> CreateState {
        self.state = CreateState::Loading;
        self.token = self.session.get_or_logged_out().await;

        self.state = match self.token {
            Some(_) => CreateState::Editing,
            None => {
                tracing::info!("No session, returning to login");
                nav.navigate(Route::Home);
                CreateState::Redirected
            }
        };
        self.state
    }

    /// Validate and post the form.
    ///
    /// Invalid input returns [`AppError::Validation`] without any network
    /// call. A failed post keeps the entered values so the user can retry.
    pub async fn submit(&mut self, nav: &mut Navigator) -> Result<Notice> {
        if self.state != CreateState::Editing {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Form is not accepting submissions ({:?})",
                self.state
            )));
        }

        self.form.validate_all()?;

        let Some(token) = self.token.as_deref() else {
            nav.navigate(Route::Home);
            self.state = CreateState::Redirected;
            return Err(AppError::Auth("No session".to_string()));
        };

        self.state = CreateState::Submitting;
        match self.client.create_activity(token, self.form.values()).await {
            Ok(_) => {
                self.state = CreateState::Submitted;
                nav.navigate(Route::Activities);
                Ok(Notice::success("Activity Added Successfully"))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create activity");
                self.state = CreateState::Editing;
                Err(e)
            }
        }
    }
}
