//! The unwrapped encoding: `Res<T>` is a plain `std::result::Result<T, Error>`.
//!
//! Call sites that prefer not to build a [`ResultE`] use these free
//! functions instead of methods. Every combinator converts into the
//! canonical [`ResultE`], applies the same operation there, and projects
//! back, so both encodings obey one set of laws.

use crate::common::error::{Error, UnwrapError, UnwrapOrigin};
use crate::monad::maybe::Maybe;
use crate::monad::result::{self, ResultE};

/// `T` on success, the crate [`Error`] on failure.
pub type Res<T> = std::result::Result<T, Error>;

fn wrapped<T>(res: Res<T>) -> ResultE<T, Error> {
    result::wrap_res(res)
}

pub fn is_ok<T>(res: &Res<T>) -> bool {
    res.is_ok()
}

pub fn is_err<T>(res: &Res<T>) -> bool {
    res.is_err()
}

/// True iff the failure is a [`crate::common::error::Missing`].
pub fn is_missing<T>(res: &Res<T>) -> bool {
    matches!(res, Err(Error::Missing(_)))
}

pub fn ok<T>(res: Res<T>) -> Maybe<T> {
    wrapped(res).ok()
}

pub fn err<T>(res: Res<T>) -> Maybe<Error> {
    wrapped(res).err()
}

pub fn map<T, U>(res: Res<T>, f: impl FnOnce(T) -> U) -> Res<U> {
    wrapped(res).map(f).res()
}

pub fn map_err<T>(res: Res<T>, f: impl FnOnce(Error) -> Error) -> Res<T> {
    wrapped(res).map_err(f).res()
}

pub fn and<T, U>(current: Res<T>, next: Res<U>) -> Res<U> {
    wrapped(current).and(wrapped(next)).res()
}

pub fn and_then<T, U>(res: Res<T>, f: impl FnOnce(T) -> Res<U>) -> Res<U> {
    wrapped(res).and_then(|v| wrapped(f(v))).res()
}

pub fn or<T>(current: Res<T>, next: Res<T>) -> Res<T> {
    wrapped(current).or(wrapped(next)).res()
}

pub fn or_else<T>(res: Res<T>, f: impl FnOnce(Error) -> Res<T>) -> Res<T> {
    wrapped(res).or_else(|e| wrapped(f(e))).res()
}

/// Returns the success value.
///
/// # Panics
///
/// On failure, panics with an [`UnwrapError`] whose origin is
/// [`UnwrapOrigin::Res`].
pub fn unwrap<T>(res: Res<T>) -> T {
    match res {
        Ok(v) => v,
        Err(e) => UnwrapError::new(UnwrapOrigin::Res, &e).raise(),
    }
}

pub fn unwrap_or<T>(res: Res<T>, default: T) -> T {
    wrapped(res).unwrap_or(default)
}

pub fn unwrap_or_else<T>(res: Res<T>, f: impl FnOnce(Error) -> T) -> T {
    wrapped(res).unwrap_or_else(f)
}

pub fn all<T>(results: impl IntoIterator<Item = Res<T>>) -> Res<Vec<T>> {
    result::all(results.into_iter().map(wrapped)).res()
}

pub fn missing<T>(value: Option<T>, msg: impl Into<String>) -> Res<T> {
    result::missing(value, msg).res()
}

/// Like [`missing`], attaching a diagnostic payload to the error.
pub fn missing_with_info<T>(
    value: Option<T>,
    msg: impl Into<String>,
    info: serde_json::Value,
) -> Res<T> {
    result::missing_with_info(value, msg, info).res()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn test_predicates() {
        let good: Res<i32> = Ok(1);
        let bad: Res<i32> = Err(Error::failure("e"));
        let absent: Res<i32> = missing(None, "x");

        assert!(is_ok(&good) && !is_err(&good));
        assert!(is_err(&bad) && !is_missing(&bad));
        assert!(is_missing(&absent));
        assert!(!is_missing(&good));
    }

    #[test]
    fn test_combinators_match_wrapped_encoding() {
        assert_eq!(map(Ok(2), |v: i32| v * 2), Ok(4));
        assert_eq!(
            map_err::<i32>(Err(Error::failure("a")), |_| Error::failure("b")),
            Err(Error::failure("b"))
        );
        assert_eq!(and::<i32, &str>(Ok(1), Ok("n")), Ok("n"));
        assert_eq!(
            and::<i32, &str>(Err(Error::failure("a")), Ok("n")),
            Err(Error::failure("a"))
        );
        assert_eq!(or(Err(Error::failure("a")), Ok(5)), Ok(5));
        assert_eq!(or_else(Err(Error::failure("a")), |_| Ok(6)), Ok(6));
        assert_eq!(and_then(Ok(3), |v: i32| Ok(v + 1)), Ok(4));
    }

    #[test]
    fn test_projections() {
        assert_eq!(ok::<i32>(Ok(1)), Maybe::just(1));
        assert_eq!(err::<i32>(Ok(1)), Maybe::Nothing);
        assert_eq!(
            err::<i32>(Err(Error::failure("e"))),
            Maybe::just(Error::failure("e"))
        );
    }

    #[test]
    fn test_all_and_missing() {
        assert_eq!(all(vec![Ok(1), Ok(2)]), Ok(vec![1, 2]));
        assert_eq!(
            all(vec![Ok(1), Err(Error::failure("first")), Err(Error::failure("second"))]),
            Err(Error::failure("first"))
        );
        assert_eq!(missing(Some(5), "x"), Ok(5));
    }

    #[test]
    fn test_missing_with_info_keeps_payload() {
        let absent: Res<i32> = missing_with_info(None, "repo", json!({ "index": 3 }));
        assert!(is_missing(&absent));
        match absent {
            Err(Error::Missing(m)) => {
                assert_eq!(m.message, "repo");
                assert_eq!(m.info, Some(json!({ "index": 3 })));
            }
            other => panic!("expected Missing, got {:?}", other),
        }
        assert_eq!(missing_with_info(Some(1), "repo", json!(null)), Ok(1));
    }

    #[test]
    fn test_unwrap_or_family() {
        assert_eq!(unwrap_or(Err(Error::failure("e")), 0), 0);
        assert_eq!(unwrap_or_else(Err(Error::missing("abc")), |e| e.to_string().len()), 12);
    }

    #[test]
    fn test_unwrap_reports_res_origin() {
        let outcome = catch_unwind(AssertUnwindSafe(|| unwrap::<i32>(Err(Error::failure("bad")))));
        let payload = outcome.expect_err("unwrap on Err must panic");
        let unwrap_error = payload
            .downcast::<UnwrapError>()
            .expect("payload should be an UnwrapError");
        assert_eq!(unwrap_error.origin(), UnwrapOrigin::Res);
        assert!(unwrap_error.to_string().starts_with("Res.Err was unwrapped."));
    }
}
