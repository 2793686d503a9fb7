//! Fieldset state and pure transitions
//!
//! The state is a record of per-field maps (values, errors, touched, dirty,
//! validating) sharing one key set. Every transition returns a brand-new
//! state; prior states are never mutated, so callers can keep old snapshots
//! around for change detection. Maps that a transition does not touch are
//! carried over unchanged.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Per-field mapping keyed by field name, in declaration order.
pub type FieldMap<V> = IndexMap<String, V, FxBuildHasher>;

/// Validation failure reported for a single field.
///
/// Absence of an error is modeled as `Option::None` in the `errors` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldError {
    /// A single error message.
    Single(String),
    /// An ordered list of error messages.
    Many(SmallVec<[String; 2]>),
}

impl From<&str> for FieldError {
    fn from(msg: &str) -> Self {
        FieldError::Single(msg.to_string())
    }
}

impl From<String> for FieldError {
    fn from(msg: String) -> Self {
        FieldError::Single(msg)
    }
}

impl From<Vec<String>> for FieldError {
    fn from(msgs: Vec<String>) -> Self {
        FieldError::Many(msgs.into())
    }
}

impl<const N: usize> From<[&str; N]> for FieldError {
    fn from(msgs: [&str; N]) -> Self {
        FieldError::Many(msgs.iter().map(|m| m.to_string()).collect())
    }
}

/// Full fieldset state over a field value type `T`.
///
/// All five per-field maps contain exactly one entry for every key present
/// in `initial_values`/`values`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldsetState<T> {
    /// Snapshot of values at the last commit/reset.
    pub initial_values: FieldMap<T>,
    /// Current working values.
    pub values: FieldMap<T>,
    /// Per-field validation outcome; `None` means "no error".
    pub errors: FieldMap<Option<FieldError>>,
    /// True iff the current value differs from `initial_values` for that field.
    pub touched: FieldMap<bool>,
    /// True iff the field changed via a dirty-marking mutation and has not
    /// since been revalidated or reverted to its initial value.
    pub dirty: FieldMap<bool>,
    /// True while an external validation is in flight for that field.
    pub validating: FieldMap<bool>,
}

impl<T: Clone> FieldsetState<T> {
    /// Initialize a state from a field set; equivalent to [`init_state`].
    pub fn new(fields: FieldMap<T>) -> Self {
        init_state(fields)
    }
}

/// Per-field view assembled by indexing each substate map at one name.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState<'a, T> {
    pub value: &'a T,
    pub errors: Option<&'a FieldError>,
    pub dirty: bool,
    pub touched: bool,
    pub validating: bool,
}

/// Partial state used by [`update_state`] to replace named substates only.
#[derive(Debug, Clone)]
pub struct FieldsetStateUpdate<T> {
    pub initial_values: Option<FieldMap<T>>,
    pub values: Option<FieldMap<T>>,
    pub errors: Option<FieldMap<Option<FieldError>>>,
    pub touched: Option<FieldMap<bool>>,
    pub dirty: Option<FieldMap<bool>>,
    pub validating: Option<FieldMap<bool>>,
}

impl<T> Default for FieldsetStateUpdate<T> {
    fn default() -> Self {
        Self {
            initial_values: None,
            values: None,
            errors: None,
            touched: None,
            dirty: None,
            validating: None,
        }
    }
}

impl<T> FieldsetStateUpdate<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_values(mut self, initial_values: FieldMap<T>) -> Self {
        self.initial_values = Some(initial_values);
        self
    }

    pub fn values(mut self, values: FieldMap<T>) -> Self {
        self.values = Some(values);
        self
    }

    pub fn errors(mut self, errors: FieldMap<Option<FieldError>>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn touched(mut self, touched: FieldMap<bool>) -> Self {
        self.touched = Some(touched);
        self
    }

    pub fn dirty(mut self, dirty: FieldMap<bool>) -> Self {
        self.dirty = Some(dirty);
        self
    }

    pub fn validating(mut self, validating: FieldMap<bool>) -> Self {
        self.validating = Some(validating);
        self
    }
}

fn expect_field<'a, V>(map: &'a FieldMap<V>, name: &str) -> &'a V {
    map.get(name)
        .unwrap_or_else(|| panic!("unknown field `{name}`"))
}

fn replace_entry<V: Clone>(map: &FieldMap<V>, name: &str, value: V) -> FieldMap<V> {
    let mut next = map.clone();
    match next.get_mut(name) {
        Some(slot) => *slot = value,
        None => panic!("unknown field `{name}`"),
    }
    next
}

/// New values map with only `name` replaced.
///
/// # Panics
///
/// Panics if `name` is not a key of `values`.
pub fn update_field_value<T: Clone>(values: &FieldMap<T>, name: &str, value: T) -> FieldMap<T> {
    replace_entry(values, name, value)
}

/// New errors map with only `name` replaced.
pub fn update_field_error(
    errors: &FieldMap<Option<FieldError>>,
    name: &str,
    error: Option<FieldError>,
) -> FieldMap<Option<FieldError>> {
    replace_entry(errors, name, error)
}

/// Errors map covering every key of `fields`, all set to `error`.
pub fn init_field_errors<T>(
    fields: &FieldMap<T>,
    error: Option<FieldError>,
) -> FieldMap<Option<FieldError>> {
    fields.keys().map(|k| (k.clone(), error.clone())).collect()
}

/// New flags map with only `name` replaced.
pub fn update_field_flag(flags: &FieldMap<bool>, name: &str, flag: bool) -> FieldMap<bool> {
    replace_entry(flags, name, flag)
}

/// Flags map covering every key of `fields`, all set to `flag`.
pub fn init_field_flags<T>(fields: &FieldMap<T>, flag: bool) -> FieldMap<bool> {
    fields.keys().map(|k| (k.clone(), flag)).collect()
}

/// True when any entry of `map` equals `value`.
pub fn some_field_equals<V: PartialEq>(map: &FieldMap<V>, value: &V) -> bool {
    map.values().any(|v| v == value)
}

/// True when every entry of `map` equals `value`.
pub fn every_field_equals<V: PartialEq>(map: &FieldMap<V>, value: &V) -> bool {
    map.values().all(|v| v == value)
}

/// Fresh state: `initial_values = values = fields`, all errors cleared, all
/// flags false.
pub fn init_state<T: Clone>(fields: FieldMap<T>) -> FieldsetState<T> {
    FieldsetState {
        errors: init_field_errors(&fields, None),
        touched: init_field_flags(&fields, false),
        dirty: init_field_flags(&fields, false),
        validating: init_field_flags(&fields, false),
        initial_values: fields.clone(),
        values: fields,
    }
}

/// Shallow merge of `updates` into `state`.
///
/// Only the named substates are replaced; the rest are carried over, so
/// untouched substates of the result compare equal (and cheaply clone)
/// from the previous state.
pub fn update_state<T: Clone>(
    state: &FieldsetState<T>,
    updates: FieldsetStateUpdate<T>,
) -> FieldsetState<T> {
    FieldsetState {
        initial_values: updates
            .initial_values
            .unwrap_or_else(|| state.initial_values.clone()),
        values: updates.values.unwrap_or_else(|| state.values.clone()),
        errors: updates.errors.unwrap_or_else(|| state.errors.clone()),
        touched: updates.touched.unwrap_or_else(|| state.touched.clone()),
        dirty: updates.dirty.unwrap_or_else(|| state.dirty.clone()),
        validating: updates
            .validating
            .unwrap_or_else(|| state.validating.clone()),
    }
}

/// Set `values[name]` and recompute `touched[name]` from a strict comparison
/// against `initial_values[name]`.
///
/// When `mark_as_dirty` is set, `dirty[name]` mirrors the touched result
/// (a value reverted to its initial state is simultaneously un-touched and
/// un-dirtied); otherwise `dirty[name]` is left unchanged. No other field
/// is affected.
pub fn change_field<T: Clone + PartialEq>(
    state: &FieldsetState<T>,
    name: &str,
    value: T,
    mark_as_dirty: bool,
) -> FieldsetState<T> {
    let touched = *expect_field(&state.initial_values, name) != value;
    let next = update_state(
        state,
        FieldsetStateUpdate::new()
            .values(update_field_value(&state.values, name, value))
            .touched(update_field_flag(&state.touched, name, touched)),
    );
    if !mark_as_dirty {
        return next;
    }
    let dirty = update_field_flag(&next.dirty, name, touched);
    update_state(&next, FieldsetStateUpdate::new().dirty(dirty))
}

/// Mark an external validation as in flight for `name`.
pub fn start_validating_field<T: Clone>(state: &FieldsetState<T>, name: &str) -> FieldsetState<T> {
    update_state(
        state,
        FieldsetStateUpdate::new().validating(update_field_flag(&state.validating, name, true)),
    )
}

/// Record a validation failure: clears `validating` and `dirty` for `name`
/// and stores the supplied errors.
pub fn report_invalid_field<T: Clone>(
    state: &FieldsetState<T>,
    name: &str,
    errors: FieldError,
) -> FieldsetState<T> {
    update_state(
        state,
        FieldsetStateUpdate::new()
            .validating(update_field_flag(&state.validating, name, false))
            .dirty(update_field_flag(&state.dirty, name, false))
            .errors(update_field_error(&state.errors, name, Some(errors))),
    )
}

/// Record a validation success: clears `validating`, `dirty` and any error
/// for `name`.
pub fn report_valid_field<T: Clone>(state: &FieldsetState<T>, name: &str) -> FieldsetState<T> {
    update_state(
        state,
        FieldsetStateUpdate::new()
            .validating(update_field_flag(&state.validating, name, false))
            .dirty(update_field_flag(&state.dirty, name, false))
            .errors(update_field_error(&state.errors, name, None)),
    )
}

/// Full reinitialization from `next_values`, or from the state's own last
/// committed baseline when `None`. All flags are discarded.
pub fn reset_fields<T: Clone>(
    state: &FieldsetState<T>,
    next_values: Option<FieldMap<T>>,
) -> FieldsetState<T> {
    init_state(next_values.unwrap_or_else(|| state.initial_values.clone()))
}

/// Promote the current working values to be the new baseline, discarding
/// all flags.
pub fn commit_fields<T: Clone>(state: &FieldsetState<T>) -> FieldsetState<T> {
    init_state(state.values.clone())
}

/// Any field currently validating.
pub fn is_validating<T>(state: &FieldsetState<T>) -> bool {
    some_field_equals(&state.validating, &true)
}

/// Any field's value differs from its initial value.
pub fn is_touched<T>(state: &FieldsetState<T>) -> bool {
    some_field_equals(&state.touched, &true)
}

/// Any field awaiting revalidation after a dirty-marking change.
pub fn is_dirty<T>(state: &FieldsetState<T>) -> bool {
    some_field_equals(&state.dirty, &true)
}

/// Any field carrying a validation error.
pub fn has_errors<T>(state: &FieldsetState<T>) -> bool {
    !every_field_equals(&state.errors, &None)
}

/// Not dirty, not validating and error-free. Touched is deliberately
/// excluded: a field may be touched yet sound.
pub fn is_sound<T>(state: &FieldsetState<T>) -> bool {
    !is_dirty(state) && !is_validating(state) && !has_errors(state)
}

/// Per-field view of one field's value and flags.
///
/// # Panics
///
/// Panics if `name` is not a key of the state's field set.
pub fn get_field_state<'a, T>(state: &'a FieldsetState<T>, name: &str) -> FieldState<'a, T> {
    FieldState {
        value: expect_field(&state.values, name),
        errors: expect_field(&state.errors, name).as_ref(),
        dirty: *expect_field(&state.dirty, name),
        touched: *expect_field(&state.touched, name),
        validating: *expect_field(&state.validating, name),
    }
}

/// Build a [`FieldMap`] from `name => value` pairs.
///
/// ```
/// use weft_fieldset::fields;
///
/// let map = fields! { "a" => 0, "b" => 1 };
/// assert_eq!(map.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    ($($name:expr => $value:expr),* $(,)?) => {{
        let mut map = $crate::FieldMap::default();
        $(map.insert(::std::string::String::from($name), $value);)*
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Value {
        Num(i64),
        Text(&'static str),
        List(Vec<&'static str>),
    }

    fn sample_fields() -> FieldMap<Value> {
        fields! {
            "a" => Value::Num(0),
            "b" => Value::Text("foo"),
            "c" => Value::List(vec!["bar", "baz"]),
        }
    }

    #[test]
    fn some_field_equals_matches_any_entry() {
        let flags = fields! { "a" => false, "b" => false, "c" => true };
        assert!(some_field_equals(&flags, &true));

        let flags = fields! { "a" => false, "b" => false, "c" => false };
        assert!(!some_field_equals(&flags, &true));
    }

    #[test]
    fn every_field_equals_requires_all_entries() {
        let flags = fields! { "a" => false, "b" => false, "c" => false };
        assert!(every_field_equals(&flags, &false));

        let flags = fields! { "a" => false, "b" => false, "c" => true };
        assert!(!every_field_equals(&flags, &false));
    }

    #[test]
    fn init_state_starts_clean() {
        let state = init_state(sample_fields());

        assert_eq!(state.initial_values, sample_fields());
        assert_eq!(state.values, sample_fields());
        assert!(every_field_equals(&state.errors, &None));
        assert!(every_field_equals(&state.touched, &false));
        assert!(every_field_equals(&state.dirty, &false));
        assert!(every_field_equals(&state.validating, &false));
    }

    #[test]
    fn update_field_value_replaces_one_entry() {
        let state = init_state(sample_fields());
        let next = update_field_value(&state.values, "a", Value::Num(1));

        assert_eq!(next["a"], Value::Num(1));
        assert_eq!(next["b"], Value::Text("foo"));
    }

    #[test]
    fn update_field_error_sets_and_clears() {
        let state = init_state(sample_fields());

        let with_msg = update_field_error(&state.errors, "a", Some("Foo".into()));
        assert_eq!(with_msg["a"], Some(FieldError::Single("Foo".into())));

        let with_list = update_field_error(&with_msg, "a", Some(["Foo", "Bar"].into()));
        assert_eq!(
            with_list["a"],
            Some(FieldError::Many(["Foo".to_string(), "Bar".to_string()].into()))
        );

        let cleared = update_field_error(&with_list, "a", None);
        assert_eq!(cleared["a"], None);
    }

    #[test]
    fn init_field_helpers_cover_every_key() {
        let errors = init_field_errors(&sample_fields(), Some("nope".into()));
        assert_eq!(errors.len(), 3);
        assert!(every_field_equals(
            &errors,
            &Some(FieldError::Single("nope".into()))
        ));

        let flags = init_field_flags(&sample_fields(), true);
        assert_eq!(flags.len(), 3);
        assert!(every_field_equals(&flags, &true));
    }

    #[test]
    #[should_panic(expected = "unknown field `nope`")]
    fn update_field_value_panics_on_unknown_key() {
        let state = init_state(sample_fields());
        update_field_value(&state.values, "nope", Value::Num(1));
    }

    #[test]
    fn update_state_replaces_named_substates_only() {
        let state = init_state(sample_fields());
        let next = update_state(
            &state,
            FieldsetStateUpdate::new().dirty(update_field_flag(&state.dirty, "a", true)),
        );

        assert!(next.dirty["a"]);
        assert_eq!(next.values, state.values);
        assert_eq!(next.errors, state.errors);
        assert_eq!(next.touched, state.touched);
        assert_eq!(next.validating, state.validating);
    }

    #[test]
    fn change_field_updates_value_and_touched() {
        let state = init_state(sample_fields());
        let next = change_field(&state, "a", Value::Num(42), true);

        assert_eq!(next.values["a"], Value::Num(42));
        assert!(next.touched["a"]);
        assert!(next.dirty["a"]);

        // Prior state is untouched.
        assert_eq!(state.values["a"], Value::Num(0));
        assert!(!state.touched["a"]);

        // Other fields are unaffected.
        assert_eq!(next.values["b"], Value::Text("foo"));
        assert!(!next.touched["b"]);
        assert!(!next.dirty["b"]);
    }

    #[test]
    fn change_field_without_dirty_marking_leaves_dirty_alone() {
        let state = init_state(sample_fields());
        let next = change_field(&state, "a", Value::Num(42), false);

        assert_eq!(next.values["a"], Value::Num(42));
        assert!(next.touched["a"]);
        assert!(!next.dirty["a"]);
    }

    #[test]
    fn change_field_reverting_clears_touched_and_dirty() {
        let state = init_state(sample_fields());
        let changed = change_field(&state, "a", Value::Num(42), true);
        let reverted = change_field(&changed, "a", Value::Num(0), true);

        assert!(!reverted.touched["a"]);
        assert!(!reverted.dirty["a"]);
    }

    #[test]
    fn change_field_compares_structurally_for_compound_values() {
        let state = init_state(sample_fields());
        let next = change_field(&state, "c", Value::List(vec!["x", "y"]), true);

        assert!(next.touched["c"]);
        assert!(next.dirty["c"]);
        assert!(!next.touched["a"]);
        assert!(!next.dirty["b"]);
    }

    #[test]
    fn start_validating_field_sets_only_the_flag() {
        let state = init_state(sample_fields());
        let next = start_validating_field(&state, "b");

        assert!(next.validating["b"]);
        assert!(!next.validating["a"]);
        assert_eq!(next.values, state.values);
        assert_eq!(next.errors, state.errors);
    }

    #[test]
    fn report_invalid_field_records_errors_and_settles_flags() {
        let state = init_state(sample_fields());
        let validating = start_validating_field(&state, "b");
        let next = report_invalid_field(&validating, "b", "Foobar".into());

        assert!(!next.validating["b"]);
        assert!(!next.dirty["b"]);
        assert_eq!(next.errors["b"], Some(FieldError::Single("Foobar".into())));
    }

    #[test]
    fn report_valid_field_clears_errors_and_settles_flags() {
        let state = init_state(sample_fields());
        let invalid = report_invalid_field(&state, "b", "Foobar".into());
        let next = report_valid_field(&invalid, "b");

        assert!(!next.validating["b"]);
        assert!(!next.dirty["b"]);
        assert_eq!(next.errors["b"], None);
    }

    #[test]
    fn reset_fields_restores_the_baseline() {
        let state = init_state(sample_fields());
        let changed = change_field(&state, "a", Value::Num(42), true);

        assert_eq!(reset_fields(&changed, None), init_state(sample_fields()));
    }

    #[test]
    fn reset_fields_accepts_replacement_values() {
        let state = init_state(sample_fields());
        let replacement = fields! { "a" => Value::Num(7), "b" => Value::Text("bar") };

        assert_eq!(
            reset_fields(&state, Some(replacement.clone())),
            init_state(replacement)
        );
    }

    #[test]
    fn commit_fields_promotes_working_values() {
        let state = init_state(sample_fields());
        let changed = change_field(&state, "a", Value::Num(42), true);
        let committed = commit_fields(&changed);

        assert_eq!(committed, init_state(changed.values.clone()));
        assert_eq!(committed.initial_values["a"], Value::Num(42));
        assert!(!committed.touched["a"]);
        assert!(!committed.dirty["a"]);
    }

    #[test]
    fn aggregates_follow_any_field() {
        let state = init_state(sample_fields());
        assert!(!is_touched(&state));
        assert!(!is_dirty(&state));
        assert!(!is_validating(&state));
        assert!(!has_errors(&state));

        let changed = change_field(&state, "a", Value::Num(1), true);
        assert!(is_touched(&changed));
        assert!(is_dirty(&changed));

        let validating = start_validating_field(&state, "b");
        assert!(is_validating(&validating));

        let invalid = report_invalid_field(&state, "c", "bad".into());
        assert!(has_errors(&invalid));
    }

    #[test]
    fn soundness_ignores_touched() {
        let state = init_state(sample_fields());
        assert!(is_sound(&state));

        // Changed without dirty-marking: touched but still sound.
        let touched_only = change_field(&state, "a", Value::Num(1), false);
        assert!(is_touched(&touched_only));
        assert!(is_sound(&touched_only));

        let dirty = change_field(&state, "a", Value::Num(1), true);
        assert!(!is_sound(&dirty));

        let validating = start_validating_field(&state, "b");
        assert!(!is_sound(&validating));

        let invalid = report_invalid_field(&state, "c", "bad".into());
        assert!(!is_sound(&invalid));
    }

    #[test]
    fn get_field_state_assembles_the_per_field_view() {
        let state = init_state(sample_fields());
        let changed = change_field(&state, "a", Value::Num(42), true);
        let view = get_field_state(&changed, "a");

        assert_eq!(view.value, &Value::Num(42));
        assert_eq!(view.errors, None);
        assert!(view.touched);
        assert!(view.dirty);
        assert!(!view.validating);
    }
}
