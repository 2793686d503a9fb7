//! Fieldset actions
//!
//! Actions are inert data: a closed union of six kinds, each carrying the
//! minimal payload its transition needs. On the wire they are tagged by a
//! `type` discriminant with fixed camelCase literals (`changeField`,
//! `startValidatingField`, `reportInvalidField`, `reportValidField`,
//! `resetFields`, `commitFields`), matching the original protocol of the
//! form layer.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::state::{FieldError, FieldMap};

fn default_mark_as_dirty() -> bool {
    true
}

/// One state mutation, as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldsetAction<T> {
    /// Change one field's working value.
    #[serde(rename_all = "camelCase")]
    ChangeField {
        field_name: String,
        value: T,
        #[serde(default = "default_mark_as_dirty")]
        mark_as_dirty: bool,
    },
    /// Mark an external validation as in flight.
    #[serde(rename_all = "camelCase")]
    StartValidatingField { field_name: String },
    /// Report a validation failure with one or more messages.
    #[serde(rename_all = "camelCase")]
    ReportInvalidField {
        field_name: String,
        errors: FieldError,
    },
    /// Report a validation success.
    #[serde(rename_all = "camelCase")]
    ReportValidField { field_name: String },
    /// Reinitialize, optionally with a replacement field-value record.
    #[serde(rename_all = "camelCase")]
    ResetFields {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next_values: Option<FieldMap<T>>,
    },
    /// Promote working values to the new baseline.
    CommitFields,
}

impl<T> FieldsetAction<T> {
    /// The wire discriminant of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldsetAction::ChangeField { .. } => "changeField",
            FieldsetAction::StartValidatingField { .. } => "startValidatingField",
            FieldsetAction::ReportInvalidField { .. } => "reportInvalidField",
            FieldsetAction::ReportValidField { .. } => "reportValidField",
            FieldsetAction::ResetFields { .. } => "resetFields",
            FieldsetAction::CommitFields => "commitFields",
        }
    }
}

/// One factory per action kind, applying the same default-argument rules as
/// the transition counterparts (`mark_as_dirty` defaults to true, reset
/// defaults to the committed baseline).
pub struct FieldsetActionCreators<T> {
    _fields: PhantomData<fn() -> T>,
}

impl<T> Default for FieldsetActionCreators<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FieldsetActionCreators<T> {
    pub fn new() -> Self {
        Self {
            _fields: PhantomData,
        }
    }

    /// `changeField` with the default dirty-marking.
    pub fn change_field(&self, field_name: impl Into<String>, value: T) -> FieldsetAction<T> {
        self.change_field_with(field_name, value, true)
    }

    /// `changeField` with explicit dirty-marking.
    pub fn change_field_with(
        &self,
        field_name: impl Into<String>,
        value: T,
        mark_as_dirty: bool,
    ) -> FieldsetAction<T> {
        FieldsetAction::ChangeField {
            field_name: field_name.into(),
            value,
            mark_as_dirty,
        }
    }

    pub fn start_validating_field(&self, field_name: impl Into<String>) -> FieldsetAction<T> {
        FieldsetAction::StartValidatingField {
            field_name: field_name.into(),
        }
    }

    pub fn report_invalid_field(
        &self,
        field_name: impl Into<String>,
        errors: impl Into<FieldError>,
    ) -> FieldsetAction<T> {
        FieldsetAction::ReportInvalidField {
            field_name: field_name.into(),
            errors: errors.into(),
        }
    }

    pub fn report_valid_field(&self, field_name: impl Into<String>) -> FieldsetAction<T> {
        FieldsetAction::ReportValidField {
            field_name: field_name.into(),
        }
    }

    /// `resetFields` back to the committed baseline.
    pub fn reset_fields(&self) -> FieldsetAction<T> {
        FieldsetAction::ResetFields { next_values: None }
    }

    /// `resetFields` to a caller-supplied field-value record.
    pub fn reset_fields_to(&self, next_values: FieldMap<T>) -> FieldsetAction<T> {
        FieldsetAction::ResetFields {
            next_values: Some(next_values),
        }
    }

    pub fn commit_fields(&self) -> FieldsetAction<T> {
        FieldsetAction::CommitFields
    }
}

/// Build the set of action factories for a field value type.
pub fn create_action_creators<T>() -> FieldsetActionCreators<T> {
    FieldsetActionCreators::new()
}

/// Convenience methods bound to a dispatch function.
///
/// Each method constructs the action via the matching factory and
/// immediately invokes `dispatch` with it, exactly once. This is the only
/// side-effecting layer of the crate.
pub struct FieldsetMethods<T, D: FnMut(FieldsetAction<T>)> {
    creators: FieldsetActionCreators<T>,
    dispatch: D,
}

impl<T, D: FnMut(FieldsetAction<T>)> FieldsetMethods<T, D> {
    pub fn change_field(&mut self, field_name: impl Into<String>, value: T) {
        let action = self.creators.change_field(field_name, value);
        (self.dispatch)(action);
    }

    pub fn change_field_with(
        &mut self,
        field_name: impl Into<String>,
        value: T,
        mark_as_dirty: bool,
    ) {
        let action = self
            .creators
            .change_field_with(field_name, value, mark_as_dirty);
        (self.dispatch)(action);
    }

    pub fn start_validating_field(&mut self, field_name: impl Into<String>) {
        let action = self.creators.start_validating_field(field_name);
        (self.dispatch)(action);
    }

    pub fn report_invalid_field(
        &mut self,
        field_name: impl Into<String>,
        errors: impl Into<FieldError>,
    ) {
        let action = self.creators.report_invalid_field(field_name, errors);
        (self.dispatch)(action);
    }

    pub fn report_valid_field(&mut self, field_name: impl Into<String>) {
        let action = self.creators.report_valid_field(field_name);
        (self.dispatch)(action);
    }

    pub fn reset_fields(&mut self) {
        let action = self.creators.reset_fields();
        (self.dispatch)(action);
    }

    pub fn reset_fields_to(&mut self, next_values: FieldMap<T>) {
        let action = self.creators.reset_fields_to(next_values);
        (self.dispatch)(action);
    }

    pub fn commit_fields(&mut self) {
        let action = self.creators.commit_fields();
        (self.dispatch)(action);
    }
}

/// Bind the action factories to a dispatch function.
pub fn bind_action_creators<T, D: FnMut(FieldsetAction<T>)>(
    creators: FieldsetActionCreators<T>,
    dispatch: D,
) -> FieldsetMethods<T, D> {
    FieldsetMethods { creators, dispatch }
}
