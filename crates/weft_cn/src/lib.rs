//! Weft className composition
//!
//! Utilities for assembling class strings the way a component layer wants
//! to consume them:
//!
//! - [`cn!`] / [`join`]: clsx-style joining with bool guards and options
//! - [`OptionClasses`], [`FlagClasses`], [`StaticClasses`]: resolvers
//!   mapping one prop (variant name, flag, or nothing) to classes merged
//!   in front of an existing class string

mod classes;
mod resolve;

pub use classes::{join, Classes, IntoClassSpec};
pub use resolve::{FlagClasses, OptionClasses, StaticClasses};
