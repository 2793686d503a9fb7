//! Weft pipe
//!
//! Left-to-right function composition:
//!
//! - [`compose2`]: the base combinator, `g(f(x))` as a new function
//! - [`pipe!`]: compose any number of unary functions into one closure
//! - [`Pipe`]: pipe a value through a function in method position
//!
//! # Example
//!
//! ```rust
//! use weft_pipe::{pipe, Pipe};
//!
//! let normalize = pipe!(str::trim, str::to_lowercase, |s: String| s.replace(' ', "-"));
//! assert_eq!(normalize("  Weft UI  "), "weft-ui");
//!
//! let n = 3.pipe(|x| x * 2).pipe(|x| x + 1);
//! assert_eq!(n, 7);
//! ```

/// Compose two functions left to right: `compose2(f, g)(x) == g(f(x))`.
pub fn compose2<A, B, C>(f: impl Fn(A) -> B, g: impl Fn(B) -> C) -> impl Fn(A) -> C {
    move |a| g(f(a))
}

/// Compose two or more unary functions left to right into one closure.
///
/// The original variadic form accepted an n-ary first function; Rust has no
/// variadic closures, so the chain here is unary end to end.
#[macro_export]
macro_rules! pipe {
    ($only:expr $(,)?) => {
        $only
    };
    ($first:expr, $second:expr $(, $rest:expr)* $(,)?) => {
        $crate::pipe!($crate::compose2($first, $second) $(, $rest)*)
    };
}

/// Pipe a value through a function in method position.
pub trait Pipe: Sized {
    fn pipe<R>(self, f: impl FnOnce(Self) -> R) -> R {
        f(self)
    }
}

impl<T> Pipe for T {}
