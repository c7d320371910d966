//! Presence or absence of a value, without a sentinel.

use std::fmt;

use crate::common::error::ConstructionError;
use crate::monad::result::ResultE;

/// `Just(value)` or `Nothing`. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Maybe<T> {
    Just(T),
    Nothing,
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Self::Nothing
    }
}

impl<T> Maybe<T> {
    /// Wrap a value that is known to be present.
    pub fn just(value: T) -> Self {
        Self::Just(value)
    }

    pub fn nothing() -> Self {
        Self::Nothing
    }

    /// Null-coalescing factory: `Some` becomes `Just`, `None` becomes `Nothing`.
    pub fn maybe(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Just(v),
            None => Self::Nothing,
        }
    }

    /// Explicit wrap. An absent value is rejected.
    pub fn try_just(value: Option<T>) -> Result<Self, ConstructionError> {
        value.map(Self::Just).ok_or(ConstructionError::NullJust)
    }

    pub fn is_some(&self) -> bool {
        matches!(self, Self::Just(_))
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }

    /// `pred(value)` for `Just`, `false` for `Nothing`.
    pub fn is_some_and(&self, pred: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Self::Just(v) => pred(v),
            Self::Nothing => false,
        }
    }

    /// `pred()` for `Nothing`, `false` for `Just`.
    pub fn is_none_and(&self, pred: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Just(_) => false,
            Self::Nothing => pred(),
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics on `Nothing`. There is no value to return, so this is an
    /// assertion failure rather than a recoverable error.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Self::Just(v) => v,
            Self::Nothing => {
                tracing::error!("Nothing.unwrap()");
                panic!("called `Maybe::unwrap()` on a `Nothing` value")
            }
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Just(v) => v,
            Self::Nothing => default,
        }
    }

    /// The contained value, or `T::default()` when no fallback is given.
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(T::default)
    }

    pub fn unwrap_or_else(self, f: impl FnOnce() -> T) -> T {
        match self {
            Self::Just(v) => v,
            Self::Nothing => f(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        match self {
            Self::Just(v) => Maybe::Just(f(v)),
            Self::Nothing => Maybe::Nothing,
        }
    }

    pub fn map_or<U>(self, default: U, f: impl FnOnce(T) -> U) -> U {
        match self {
            Self::Just(v) => f(v),
            Self::Nothing => default,
        }
    }

    pub fn map_or_else<U>(self, default: impl FnOnce() -> U, f: impl FnOnce(T) -> U) -> U {
        match self {
            Self::Just(v) => f(v),
            Self::Nothing => default(),
        }
    }

    /// `Just(v)` -> `Ok(v)`, `Nothing` -> `Err(err)`.
    pub fn ok_or<E>(self, err: E) -> ResultE<T, E> {
        match self {
            Self::Just(v) => ResultE::Ok(v),
            Self::Nothing => ResultE::Err(err),
        }
    }

    pub fn ok_or_else<E>(self, err: impl FnOnce() -> E) -> ResultE<T, E> {
        match self {
            Self::Just(v) => ResultE::Ok(v),
            Self::Nothing => ResultE::Err(err()),
        }
    }

    /// `Nothing` if this is `Nothing`, otherwise `other` unchanged.
    pub fn and<U>(self, other: Maybe<U>) -> Maybe<U> {
        match self {
            Self::Just(_) => other,
            Self::Nothing => Maybe::Nothing,
        }
    }

    /// Monadic bind. Some languages call this flatmap.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Maybe<U>) -> Maybe<U> {
        match self {
            Self::Just(v) => f(v),
            Self::Nothing => Maybe::Nothing,
        }
    }

    pub fn or(self, other: Maybe<T>) -> Maybe<T> {
        match self {
            Self::Just(_) => self,
            Self::Nothing => other,
        }
    }

    pub fn or_else(self, f: impl FnOnce() -> Maybe<T>) -> Maybe<T> {
        match self {
            Self::Just(_) => self,
            Self::Nothing => f(),
        }
    }

    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Self::Just(v) => Maybe::Just(v),
            Self::Nothing => Maybe::Nothing,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Just(v) => Some(v),
            Self::Nothing => None,
        }
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        Self::maybe(value)
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(value: Maybe<T>) -> Self {
        value.into_option()
    }
}

impl<T: fmt::Display> fmt::Display for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Just(v) => write!(f, "Some {}", v),
            Self::Nothing => write!(f, "None"),
        }
    }
}
