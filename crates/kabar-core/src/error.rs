//! Type-erased errors with tracing functionalities.

use crate::SharedString;
use std::{error, fmt};

/// An error type backed by an allocation-optimized string.
#[derive(Debug)]
pub struct Error {
    /// Error message.
    message: SharedString,
    /// Error source.
    source: Option<Box<Error>>,
}

impl Error {
    /// Creates a new instance with the supplied message.
    #[inline]
    pub fn new(message: impl Into<SharedString>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new instance with the supplied message and the error source.
    #[inline]
    pub fn with_source(message: impl Into<SharedString>, source: impl Into<Error>) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source.into())),
        }
    }

    /// Returns a new instance with the supplied message and `self` as the error source.
    #[inline]
    pub fn wrap(self, message: impl Into<SharedString>) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(self)),
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the error source.
    #[inline]
    pub fn source(&self) -> Option<&Error> {
        self.source.as_deref()
    }

    /// Returns an iterator over the chain of source errors, starting with `self`.
    #[inline]
    pub fn sources(&self) -> Sources<'_> {
        Sources { next: Some(self) }
    }
}

impl<E: error::Error + 'static> From<E> for Error {
    #[inline]
    fn from(err: E) -> Self {
        Self {
            message: err.to_string().into(),
            source: err.source().map(|err| Box::new(Self::new(err.to_string()))),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = &self.message;
        if let Some(source) = &self.source {
            tracing::error!(source = source.message(), "{message}");
            write!(f, "{message}: {source}")
        } else {
            tracing::error!("{message}");
            write!(f, "{message}")
        }
    }
}

/// Iterator over a chain of source errors created by [`sources()`](Error::sources).
#[derive(Debug)]
pub struct Sources<'a> {
    /// Next source error.
    next: Option<&'a Error>,
}

impl<'a> Iterator for Sources<'a> {
    type Item = &'a Error;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let error = self.next?;
        self.next = error.source();
        Some(error)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn it_chains_error_sources() {
        let root = Error::new("connection refused");
        let err = root.wrap("failed to query the `articles` collection");
        assert_eq!(err.message(), "failed to query the `articles` collection");

        let messages = err.sources().map(|e| e.message()).collect::<Vec<_>>();
        assert_eq!(
            messages,
            vec!["failed to query the `articles` collection", "connection refused"]
        );
    }

    #[test]
    fn it_converts_std_errors() {
        let err = Error::from("not a number".parse::<i64>().unwrap_err());
        assert_eq!(err.message(), "invalid digit found in string");
    }
}
