//! Fieldset reducer
//!
//! The single point translating a dispatched action into the matching pure
//! transition. The action union is closed, so the match is exhaustive and
//! no kind can be silently dropped; malformed input never reaches this
//! function because it fails at the wire boundary instead.

use tracing::trace;

use crate::action::FieldsetAction;
use crate::state::{
    change_field, commit_fields, report_invalid_field, report_valid_field, reset_fields,
    start_validating_field, FieldsetState,
};

/// Reduction function signature driving whatever state-holding mechanism
/// the caller employs.
pub type FieldsetReducer<T> = fn(&FieldsetState<T>, FieldsetAction<T>) -> FieldsetState<T>;

/// Apply one action to a state, producing the next state.
pub fn fieldset_reducer<T: Clone + PartialEq>(
    state: &FieldsetState<T>,
    action: FieldsetAction<T>,
) -> FieldsetState<T> {
    trace!(action = action.kind(), "fieldset dispatch");
    match action {
        FieldsetAction::ChangeField {
            field_name,
            value,
            mark_as_dirty,
        } => change_field(state, &field_name, value, mark_as_dirty),
        FieldsetAction::StartValidatingField { field_name } => {
            start_validating_field(state, &field_name)
        }
        FieldsetAction::ReportInvalidField { field_name, errors } => {
            report_invalid_field(state, &field_name, errors)
        }
        FieldsetAction::ReportValidField { field_name } => report_valid_field(state, &field_name),
        FieldsetAction::ResetFields { next_values } => reset_fields(state, next_values),
        FieldsetAction::CommitFields => commit_fields(state),
    }
}
