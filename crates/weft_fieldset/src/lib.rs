//! Weft fieldset state engine
//!
//! A reducer-based form-field-state manager:
//!
//! - **State**: per-field maps for values, errors, touched, dirty and
//!   validating flags, mutated exclusively through pure transitions
//! - **Actions**: a closed union of six mutation descriptors with a fixed
//!   wire format, plus factories and a dispatch binder
//! - **Reducer**: `(state, action) -> state`, the only entry point a
//!   state-holding integration layer needs
//!
//! The crate tracks field-level status flags only; validation logic itself
//! is driven externally and reported back via `startValidatingField` /
//! `reportInvalidField` / `reportValidField`.
//!
//! # Example
//!
//! ```rust
//! use weft_fieldset::{fields, fieldset_reducer, init_state, is_sound, FieldsetAction};
//!
//! let mut state = init_state(fields! { "name" => String::new() });
//!
//! state = fieldset_reducer(
//!     &state,
//!     FieldsetAction::ChangeField {
//!         field_name: "name".into(),
//!         value: "Ada".into(),
//!         mark_as_dirty: true,
//!     },
//! );
//! assert!(state.touched["name"]);
//! assert!(!is_sound(&state));
//! ```

mod action;
mod reducer;
mod state;

pub use action::{
    bind_action_creators, create_action_creators, FieldsetAction, FieldsetActionCreators,
    FieldsetMethods,
};
pub use reducer::{fieldset_reducer, FieldsetReducer};
pub use state::{
    change_field, commit_fields, every_field_equals, get_field_state, has_errors,
    init_field_errors, init_field_flags, init_state, is_dirty, is_sound, is_touched,
    is_validating, report_invalid_field, report_valid_field, reset_fields, some_field_equals,
    start_validating_field, update_field_error, update_field_flag, update_field_value,
    update_state, FieldError, FieldMap, FieldState, FieldsetState, FieldsetStateUpdate,
};
