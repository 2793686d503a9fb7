//! Class lists and clsx-style joining.

use smallvec::SmallVec;

/// One class string or an ordered list of class strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classes {
    One(String),
    Many(SmallVec<[String; 4]>),
}

impl Classes {
    /// Append this class list to `out`, space-separated, skipping empty
    /// segments.
    pub(crate) fn append_to(&self, out: &mut String) {
        match self {
            Classes::One(class) => push_segment(out, class),
            Classes::Many(classes) => {
                for class in classes {
                    push_segment(out, class);
                }
            }
        }
    }
}

fn push_segment(out: &mut String, segment: &str) {
    let segment = segment.trim();
    if segment.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(segment);
}

impl From<&str> for Classes {
    fn from(class: &str) -> Self {
        Classes::One(class.to_string())
    }
}

impl From<String> for Classes {
    fn from(class: String) -> Self {
        Classes::One(class)
    }
}

impl From<Vec<String>> for Classes {
    fn from(classes: Vec<String>) -> Self {
        Classes::Many(classes.into())
    }
}

impl<const N: usize> From<[&str; N]> for Classes {
    fn from(classes: [&str; N]) -> Self {
        Classes::Many(classes.iter().map(|c| c.to_string()).collect())
    }
}

/// Conversion into an optional class list; `None` contributes nothing to a
/// join.
pub trait IntoClassSpec {
    fn into_spec(self) -> Option<Classes>;
}

impl IntoClassSpec for Classes {
    fn into_spec(self) -> Option<Classes> {
        Some(self)
    }
}

impl IntoClassSpec for &str {
    fn into_spec(self) -> Option<Classes> {
        if self.trim().is_empty() {
            None
        } else {
            Some(self.into())
        }
    }
}

impl IntoClassSpec for String {
    fn into_spec(self) -> Option<Classes> {
        if self.trim().is_empty() {
            None
        } else {
            Some(Classes::One(self))
        }
    }
}

impl<C: IntoClassSpec> IntoClassSpec for Option<C> {
    fn into_spec(self) -> Option<Classes> {
        self.and_then(IntoClassSpec::into_spec)
    }
}

/// Guarded classes: included only when the flag is set.
impl<C: IntoClassSpec> IntoClassSpec for (bool, C) {
    fn into_spec(self) -> Option<Classes> {
        let (flag, classes) = self;
        if flag {
            classes.into_spec()
        } else {
            None
        }
    }
}

/// Join class specs with single spaces, skipping empties. Returns `None`
/// when nothing remains, so callers can drop the attribute entirely.
pub fn join<I: IntoIterator<Item = Option<Classes>>>(parts: I) -> Option<String> {
    let mut out = String::new();
    for part in parts.into_iter().flatten() {
        part.append_to(&mut out);
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// clsx-style variadic join over anything implementing [`IntoClassSpec`].
///
/// ```
/// use weft_cn::cn;
///
/// let classes = cn!("btn", (true, "btn-primary"), (false, "hidden"), Some("mt-2"));
/// assert_eq!(classes.as_deref(), Some("btn btn-primary mt-2"));
/// ```
#[macro_export]
macro_rules! cn {
    () => {
        $crate::join(::core::iter::empty::<::core::option::Option<$crate::Classes>>())
    };
    ($($part:expr),+ $(,)?) => {
        $crate::join([$($crate::IntoClassSpec::into_spec($part)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn join_skips_empty_and_missing_parts() {
        assert_eq!(cn!("a", "", "b"), Some("a b".to_string()));
        assert_eq!(cn!("", "   "), None);
        assert_eq!(cn!(None::<Classes>, "a"), Some("a".to_string()));
    }

    #[test]
    fn bool_guards_gate_their_classes() {
        assert_eq!(
            cn!((true, "on"), (false, "off"), "base"),
            Some("on base".to_string())
        );
    }

    #[test]
    fn class_lists_flatten_in_order() {
        let many: Classes = ["px-2", "py-1"].into();
        assert_eq!(cn!(many, "rounded"), Some("px-2 py-1 rounded".to_string()));
    }

    #[test]
    fn empty_invocation_yields_none() {
        assert_eq!(cn!(), None);
    }
}
