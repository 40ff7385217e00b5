// Copyright (c) 2023 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Shortest paths with optional source, target and weight.
//!
//! Without a weight attribute paths are computed by breadth-first search,
//! otherwise by Dijkstra's algorithm. The shape of the result depends on
//! which of source and target are given, see [`ShortestPaths`].
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{classes, Graph};
//! use rs_netgraph::shortestpath::{shortest_path, shortest_path_length};
//!
//! let g: Graph<usize> = classes::path_graph(5);
//! let p = shortest_path(&g, Some(&0), Some(&4), None).unwrap();
//! assert_eq!(p.single(), Some(vec![0, 1, 2, 3, 4]));
//!
//! let l = shortest_path_length(&g, None, Some(&4), None).unwrap();
//! assert_eq!(l.to_target().unwrap()[&1], 3.0);
//! ```

use super::dijkstra::{self, check_weights};
use super::unweighted::{self, path_to_keys, to_keys};
use crate::error::{Error, Result};
use crate::graph::{BaseGraph, NodeId};
use crate::search::Direction;
use crate::traits::{EdgeType, Multiplicity, NodeKey};

use std::collections::HashMap;
use std::hash::Hash;

/// The result of a shortest path query.
#[derive(Clone, Debug)]
pub enum ShortestPaths<N, T> {
    /// Source and target given: the path or length between them.
    Single(T),
    /// Only source given: map from each reachable target.
    FromSource(HashMap<N, T>),
    /// Only target given: map from each source that reaches the target.
    ToTarget(HashMap<N, T>),
    /// Neither given: map from source to map from target.
    AllPairs(HashMap<N, HashMap<N, T>>),
}

impl<N, T> ShortestPaths<N, T> {
    pub fn single(self) -> Option<T> {
        match self {
            ShortestPaths::Single(x) => Some(x),
            _ => None,
        }
    }

    pub fn from_source(self) -> Option<HashMap<N, T>> {
        match self {
            ShortestPaths::FromSource(m) => Some(m),
            _ => None,
        }
    }

    pub fn to_target(self) -> Option<HashMap<N, T>> {
        match self {
            ShortestPaths::ToTarget(m) => Some(m),
            _ => None,
        }
    }

    pub fn all_pairs(self) -> Option<HashMap<N, HashMap<N, T>>> {
        match self {
            ShortestPaths::AllPairs(m) => Some(m),
            _ => None,
        }
    }
}

impl<N, T> PartialEq for ShortestPaths<N, T>
where
    N: Eq + Hash,
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        use ShortestPaths::*;
        match (self, other) {
            (Single(a), Single(b)) => a == b,
            (FromSource(a), FromSource(b)) | (ToTarget(a), ToTarget(b)) => a == b,
            (AllPairs(a), AllPairs(b)) => a == b,
            _ => false,
        }
    }
}

/// Paths from every node to `snk`, computed by searching backwards.
fn paths_to<N, D, M>(g: &BaseGraph<N, D, M>, snk: NodeId, weight: Option<&str>) -> Result<HashMap<N, Vec<N>>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let paths = match weight {
        None => unweighted::paths_from(g, snk, Direction::Incoming, None),
        Some(weight) => dijkstra::search(g, snk, Direction::Incoming, weight, None, None)?.paths,
    };
    Ok(paths
        .into_iter()
        .map(|(u, mut path)| {
            path.reverse();
            (g.id2node(u).clone(), path_to_keys(g, &path))
        })
        .collect())
}

fn lengths_to<N, D, M>(g: &BaseGraph<N, D, M>, snk: NodeId, weight: Option<&str>) -> Result<HashMap<N, f64>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let dist = match weight {
        None => unweighted::lengths_from(g, snk, Direction::Incoming, None)
            .into_iter()
            .map(|(u, d)| (u, d as f64))
            .collect(),
        Some(weight) => dijkstra::search(g, snk, Direction::Incoming, weight, None, None)?.dist,
    };
    Ok(to_keys(g, dist))
}

/// Compute shortest paths.
///
/// | source | target | result |
/// |--------|--------|--------|
/// | given  | given  | [`ShortestPaths::Single`] |
/// | given  | absent | [`ShortestPaths::FromSource`] |
/// | absent | given  | [`ShortestPaths::ToTarget`] |
/// | absent | absent | [`ShortestPaths::AllPairs`] |
///
/// If `weight` is `None`, each edge has length 1. Otherwise the edge
/// attribute `weight` is used as edge length (missing attributes count as
/// 1).
///
/// Fails with [`Error::NoPath`] if source and target are given but not
/// connected, and with [`Error::NotFound`] if one of them is not in the
/// graph.
pub fn shortest_path<N, D, M>(
    g: &BaseGraph<N, D, M>,
    source: Option<&N>,
    target: Option<&N>,
    weight: Option<&str>,
) -> Result<ShortestPaths<N, Vec<N>>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    if let Some(w) = weight {
        check_weights(g, w, 0.0, false)?;
    }
    Ok(match (source, target) {
        (Some(s), Some(t)) => ShortestPaths::Single(match weight {
            None => unweighted::bidirectional_shortest_path(g, s, t)?,
            Some(w) => dijkstra::dijkstra_path(g, s, t, w)?,
        }),
        (Some(s), None) => ShortestPaths::FromSource(match weight {
            None => unweighted::single_source_shortest_path(g, s, None)?,
            Some(w) => dijkstra::single_source_dijkstra_path(g, s, None, w)?,
        }),
        (None, Some(t)) => ShortestPaths::ToTarget(paths_to(g, g.require(t)?, weight)?),
        (None, None) => ShortestPaths::AllPairs(match weight {
            None => unweighted::all_pairs_shortest_path(g, None),
            Some(w) => dijkstra::all_pairs_dijkstra_path(g, None, w)?,
        }),
    })
}

/// Compute shortest path lengths.
///
/// The result has the same shape as for [`shortest_path`], lengths of
/// unweighted paths are the number of edges.
pub fn shortest_path_length<N, D, M>(
    g: &BaseGraph<N, D, M>,
    source: Option<&N>,
    target: Option<&N>,
    weight: Option<&str>,
) -> Result<ShortestPaths<N, f64>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let count = |m: HashMap<N, usize>| m.into_iter().map(|(u, d)| (u, d as f64)).collect::<HashMap<_, _>>();
    if let Some(w) = weight {
        check_weights(g, w, 0.0, false)?;
    }
    Ok(match (source, target) {
        (Some(s), Some(t)) => ShortestPaths::Single(match weight {
            None => (unweighted::bidirectional_shortest_path(g, s, t)?.len() - 1) as f64,
            Some(w) => dijkstra::dijkstra_path_length(g, s, t, w)?,
        }),
        (Some(s), None) => ShortestPaths::FromSource(match weight {
            None => count(unweighted::single_source_shortest_path_length(g, s, None)?),
            Some(w) => dijkstra::single_source_dijkstra_path_length(g, s, None, w)?,
        }),
        (None, Some(t)) => ShortestPaths::ToTarget(lengths_to(g, g.require(t)?, weight)?),
        (None, None) => ShortestPaths::AllPairs(match weight {
            None => unweighted::all_pairs_shortest_path_length(g, None)
                .into_iter()
                .map(|(u, m)| (u, count(m)))
                .collect(),
            Some(w) => dijkstra::all_pairs_dijkstra_path_length(g, None, w)?,
        }),
    })
}

/// Return `true` if there is a path from `source` to `target`.
pub fn has_path<N, D, M>(g: &BaseGraph<N, D, M>, source: &N, target: &N) -> Result<bool>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    match unweighted::bidirectional_shortest_path(g, source, target) {
        Ok(_) => Ok(true),
        Err(Error::NoPath(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes;
    use crate::{DiGraph, Graph};

    #[test]
    fn test_path_graph() {
        let g: Graph<usize> = classes::path_graph(5);
        assert_eq!(
            shortest_path(&g, Some(&0), Some(&4), None).unwrap(),
            ShortestPaths::Single(vec![0, 1, 2, 3, 4])
        );
        assert_eq!(
            shortest_path_length(&g, Some(&0), Some(&4), None).unwrap(),
            ShortestPaths::Single(4.0)
        );
        assert_eq!(
            shortest_path_length(&g, Some(&0), Some(&4), Some("weight")).unwrap(),
            ShortestPaths::Single(4.0)
        );
    }

    #[test]
    fn test_shapes_directed() {
        let g: DiGraph<usize> = classes::path_graph(4);

        let from = shortest_path(&g, Some(&1), None, None).unwrap().from_source().unwrap();
        assert_eq!(from.len(), 3);
        assert_eq!(from[&3], vec![1, 2, 3]);

        let to = shortest_path(&g, None, Some(&2), None).unwrap().to_target().unwrap();
        assert_eq!(to.len(), 3);
        assert_eq!(to[&0], vec![0, 1, 2]);
        assert!(!to.contains_key(&3));

        let to = shortest_path(&g, None, Some(&2), Some("weight")).unwrap().to_target().unwrap();
        assert_eq!(to[&0], vec![0, 1, 2]);

        let lengths = shortest_path_length(&g, None, Some(&3), None).unwrap().to_target().unwrap();
        assert_eq!(lengths[&0], 3.0);

        let all = shortest_path_length(&g, None, None, None).unwrap().all_pairs().unwrap();
        assert_eq!(all[&0][&3], 3.0);
        assert!(!all[&3].contains_key(&0));

        assert!(matches!(
            shortest_path(&g, Some(&3), Some(&0), None),
            Err(Error::NoPath(_))
        ));
        assert!(matches!(
            shortest_path(&g, Some(&3), Some(&0), Some("weight")),
            Err(Error::NoPath(_))
        ));
    }

    #[test]
    fn test_has_path() {
        let g: DiGraph<usize> = classes::path_graph(3);
        assert_eq!(has_path(&g, &0, &2), Ok(true));
        assert_eq!(has_path(&g, &2, &0), Ok(false));
        assert!(has_path(&g, &0, &9).is_err());
    }
}
