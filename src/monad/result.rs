//! Success-with-value or failure-with-error, as a tagged sum.
//!
//! [`ResultE<T, E>`] is the canonical representation of the algebra. The
//! fixed-error form [`Result<T>`] uses the crate [`Error`] taxonomy, whose
//! [`Missing`] kind signals absence rather than failure. The constructors
//! and folds that do not belong to a value (`ok`, `err`, `all`, `missing`,
//! `wrap`, `wrap_res`) are free functions of this module.

use std::any::Any;
use std::fmt;

use crate::common::error::{ConstructionError, Error, Missing, MissingKind, UnwrapError, UnwrapOrigin};
use crate::monad::maybe::Maybe;
use crate::monad::res::Res;

/// `Ok(value)` or `Err(error)`. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "this `ResultE` may be an `Err` variant, which should be handled"]
pub enum ResultE<T, E> {
    Ok(T),
    Err(E),
}

/// The fixed-error specialisation over the crate [`Error`].
pub type Result<T> = ResultE<T, Error>;

/// Handlers for [`ResultE::case_of`].
///
/// The `Missing` handler is optional; without it, `Missing` errors go to
/// the `Err` handler like every other error.
pub struct ResultPatterns<'a, T, E, R> {
    ok: Box<dyn FnOnce(T) -> R + 'a>,
    err: Box<dyn FnOnce(E) -> R + 'a>,
    missing: Option<Box<dyn FnOnce(Missing) -> R + 'a>>,
}

impl<'a, T, E, R> ResultPatterns<'a, T, E, R> {
    pub fn new(ok: impl FnOnce(T) -> R + 'a, err: impl FnOnce(E) -> R + 'a) -> Self {
        Self {
            ok: Box::new(ok),
            err: Box::new(err),
            missing: None,
        }
    }

    pub fn missing(mut self, missing: impl FnOnce(Missing) -> R + 'a) -> Self {
        self.missing = Some(Box::new(missing));
        self
    }
}

impl<T, E> ResultE<T, E> {
    /// Contract-checked `Ok`: an absent value is rejected.
    pub fn try_ok(value: Option<T>) -> std::result::Result<Self, ConstructionError> {
        value.map(Self::Ok).ok_or(ConstructionError::NullOk)
    }

    /// Contract-checked `Err`: an absent error is rejected.
    pub fn try_err(error: Option<E>) -> std::result::Result<Self, ConstructionError> {
        error.map(Self::Err).ok_or(ConstructionError::NullErr)
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// True iff this is an `Err` carrying a [`Missing`].
    pub fn is_missing(&self) -> bool
    where
        E: MissingKind,
    {
        match self {
            Self::Ok(_) => false,
            Self::Err(e) => e.as_missing().is_some(),
        }
    }

    /// Converts into a `Maybe<T>`, discarding the error, if any.
    pub fn ok(self) -> Maybe<T> {
        match self {
            Self::Ok(v) => Maybe::Just(v),
            Self::Err(_) => Maybe::Nothing,
        }
    }

    /// Converts into a `Maybe<E>`, discarding the value, if any.
    pub fn err(self) -> Maybe<E> {
        match self {
            Self::Ok(_) => Maybe::Nothing,
            Self::Err(e) => Maybe::Just(e),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResultE<U, E> {
        match self {
            Self::Ok(v) => ResultE::Ok(f(v)),
            Self::Err(e) => ResultE::Err(e),
        }
    }

    pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> ResultE<T, F> {
        match self {
            Self::Ok(v) => ResultE::Ok(v),
            Self::Err(e) => ResultE::Err(f(e)),
        }
    }

    /// `next` if this is `Ok`, otherwise this error relabelled.
    pub fn and<U>(self, next: ResultE<U, E>) -> ResultE<U, E> {
        match self {
            Self::Ok(_) => next,
            Self::Err(e) => ResultE::Err(e),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> ResultE<U, E>) -> ResultE<U, E> {
        match self {
            Self::Ok(v) => f(v),
            Self::Err(e) => ResultE::Err(e),
        }
    }

    pub fn or<F>(self, next: ResultE<T, F>) -> ResultE<T, F> {
        match self {
            Self::Ok(v) => ResultE::Ok(v),
            Self::Err(_) => next,
        }
    }

    pub fn or_else<F>(self, f: impl FnOnce(E) -> ResultE<T, F>) -> ResultE<T, F> {
        match self {
            Self::Ok(v) => ResultE::Ok(v),
            Self::Err(e) => f(e),
        }
    }

    /// Returns the `Ok` payload.
    ///
    /// # Panics
    ///
    /// On `Err`, panics with an [`UnwrapError`] payload that keeps the
    /// original error and the backtrace of the unwrap site.
    pub fn unwrap(self) -> T
    where
        E: fmt::Debug,
    {
        match self {
            Self::Ok(v) => v,
            Self::Err(e) => UnwrapError::new(UnwrapOrigin::Result, &e).raise(),
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Ok(v) => v,
            Self::Err(_) => default,
        }
    }

    pub fn unwrap_or_else(self, f: impl FnOnce(E) -> T) -> T {
        match self {
            Self::Ok(v) => v,
            Self::Err(e) => f(e),
        }
    }

    /// Exhaustive dispatch over `Ok`, `Err` and `Missing`.
    pub fn case_of<R>(self, patterns: ResultPatterns<'_, T, E, R>) -> R
    where
        E: MissingKind,
    {
        let ResultPatterns { ok, err, missing } = patterns;
        match self {
            Self::Ok(v) => ok(v),
            Self::Err(e) => match missing {
                Some(on_missing) => match e.into_missing() {
                    Ok(m) => on_missing(m),
                    Err(e) => err(e),
                },
                None => err(e),
            },
        }
    }

    /// Structural equality: same variant, equal payload.
    pub fn equals(&self, other: &Self) -> bool
    where
        T: PartialEq,
        E: PartialEq,
    {
        self == other
    }

    /// Relabels the success type without touching the representation.
    ///
    /// The caller vouches that the payload already is a `U`. An `Err` is
    /// relabelled unconditionally.
    ///
    /// # Panics
    ///
    /// Panics if an `Ok` payload is not a `U`.
    pub fn unsafe_cast<U: 'static>(self) -> ResultE<U, E>
    where
        T: 'static,
    {
        match self {
            Self::Ok(v) => {
                let boxed: Box<dyn Any> = Box::new(v);
                match boxed.downcast::<U>() {
                    Ok(u) => ResultE::Ok(*u),
                    Err(_) => {
                        let message = format!(
                            "unsafe_cast: Ok payload is not a `{}`",
                            std::any::type_name::<U>()
                        );
                        tracing::error!("{}", message);
                        panic!("{}", message)
                    }
                }
            }
            Self::Err(e) => ResultE::Err(e),
        }
    }

    /// Projects into the unwrapped [`Res`] encoding.
    pub fn res(self) -> Res<T>
    where
        E: Into<Error>,
    {
        match self {
            Self::Ok(v) => Ok(v),
            Self::Err(e) => Err(e.into()),
        }
    }

    pub fn as_ref(&self) -> ResultE<&T, &E> {
        match self {
            Self::Ok(v) => ResultE::Ok(v),
            Self::Err(e) => ResultE::Err(e),
        }
    }

    pub fn into_std(self) -> std::result::Result<T, E> {
        match self {
            Self::Ok(v) => Ok(v),
            Self::Err(e) => Err(e),
        }
    }
}

impl<T, E> From<std::result::Result<T, E>> for ResultE<T, E> {
    fn from(value: std::result::Result<T, E>) -> Self {
        match value {
            Ok(v) => Self::Ok(v),
            Err(e) => Self::Err(e),
        }
    }
}

impl<T, E> From<ResultE<T, E>> for std::result::Result<T, E> {
    fn from(value: ResultE<T, E>) -> Self {
        value.into_std()
    }
}

impl<T: fmt::Display, E: fmt::Display> fmt::Display for ResultE<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(v) => write!(f, "Ok {}", v),
            Self::Err(e) => write!(f, "Err {}", e),
        }
    }
}

pub fn ok<T, E>(value: T) -> ResultE<T, E> {
    ResultE::Ok(value)
}

pub fn err<T, E>(error: E) -> ResultE<T, E> {
    ResultE::Err(error)
}

/// `Ok` of all values in input order, or the first `Err` encountered.
///
/// The scan stops at the first failure; later items are not pulled from
/// the iterator.
pub fn all<T, E, I>(results: I) -> ResultE<Vec<T>, E>
where
    I: IntoIterator<Item = ResultE<T, E>>,
{
    let mut values = Vec::new();
    for result in results {
        match result {
            ResultE::Ok(v) => values.push(v),
            ResultE::Err(e) => return ResultE::Err(e),
        }
    }
    ResultE::Ok(values)
}

/// `Ok(value)` when present, `Err(Missing(msg))` otherwise.
pub fn missing<T>(value: Option<T>, msg: impl Into<String>) -> Result<T> {
    match value {
        Some(v) => ResultE::Ok(v),
        None => ResultE::Err(Missing::new(msg).into()),
    }
}

/// Like [`missing`], attaching a diagnostic payload to the error.
pub fn missing_with_info<T>(
    value: Option<T>,
    msg: impl Into<String>,
    info: serde_json::Value,
) -> Result<T> {
    match value {
        Some(v) => ResultE::Ok(v),
        None => ResultE::Err(Missing::new(msg).with_info(info).into()),
    }
}

/// An error becomes `Err`; anything else follows [`missing`] semantics.
pub fn wrap<T>(value: Option<Res<T>>) -> Result<T> {
    match value {
        Some(Err(e)) => ResultE::Err(e),
        Some(Ok(v)) => missing(Some(v), ""),
        None => missing(None, ""),
    }
}

/// Converts the unwrapped encoding into the wrapped one.
pub fn wrap_res<T>(value: Res<T>) -> Result<T> {
    value.into()
}
