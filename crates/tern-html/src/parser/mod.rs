//! Tree construction: element classification, end-tag-omission rules, and
//! the recursive-descent parser itself.

pub(crate) mod classify;
pub(crate) mod core;
pub(crate) mod omission;

pub(crate) use self::core::Parser;
