/*
 * Copyright (c) 2023 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Errors reported by graph operations and algorithms.

use thiserror::Error;

/// Error returned by graph mutations and algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A node or edge required by the operation does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// A precondition of the operation is violated.
    ///
    /// Examples are mutating a frozen graph or negative edge weights
    /// passed to Dijkstra's algorithm.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
    /// The problem has no solution for the given input.
    #[error("unfeasible: {0}")]
    Unfeasible(String),
    /// There is no path between the requested source and target.
    #[error("no path: {0}")]
    NoPath(String),
    /// The algorithm terminated unexpectedly.
    #[error("algorithm error: {0}")]
    AlgorithmError(String),
}

impl Error {
    /// Return `true` if this error states that the problem has no solution.
    ///
    /// `NoPath` is a special case of unfeasibility.
    pub fn is_unfeasible(&self) -> bool {
        matches!(self, Error::Unfeasible(_) | Error::NoPath(_))
    }

    pub(crate) fn frozen() -> Error {
        Error::PreconditionViolation("frozen graph can't be modified".to_string())
    }

    pub(crate) fn node_not_found<N: std::fmt::Debug>(n: &N) -> Error {
        Error::NotFound(format!("node {:?} is not in the graph", n))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_nopath_is_unfeasible() {
        assert!(Error::NoPath("x".into()).is_unfeasible());
        assert!(Error::Unfeasible("x".into()).is_unfeasible());
        assert!(!Error::AlgorithmError("x".into()).is_unfeasible());
    }

    #[test]
    fn test_display() {
        let e = Error::node_not_found(&42);
        assert_eq!(e.to_string(), "not found: node 42 is not in the graph");
    }
}
