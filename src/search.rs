// Copyright (c) 2016-2023 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! # Graph search algorithms.
//!
//! Search algorithms are implemented as iterators over node handles. The
//! iterators produce the nodes in the order in which they are visited by
//! the particular search strategy, together with algorithm specific
//! additional information.

pub mod bfs;

use crate::graph::{Adjacency, BaseGraph, NodeId};
use crate::traits::{EdgeType, Multiplicity, NodeKey};

use std::iter::Iterator;

/// The direction in which edges are traversed.
///
/// For undirected graphs both directions are the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Follow edges from source to sink.
    Outgoing,
    /// Follow edges from sink to source.
    Incoming,
}

/// Return the adjacency of `u` in the given direction.
pub(crate) fn adjacency<N, D, M>(g: &BaseGraph<N, D, M>, u: NodeId, dir: Direction) -> &Adjacency
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    match dir {
        Direction::Outgoing => g.out_adj(u),
        Direction::Incoming => g.in_adj(u),
    }
}

/// Compute a path from a map of incoming nodes for each node.
///
/// # Parameters
/// - `dst`: the destination node
/// - `incomings(v)`: return the preceding node for node `v` (or `None` if it
///   does not exist)
///
/// # Return
/// An iterator over the nodes of the path starting from `dst`, i.e. the
/// path in reverse order.
///
/// # Example
///
/// ```
/// // Breadth-first-search on a directed cycle with 7 nodes.
///
/// use rs_netgraph::{classes, DiGraph};
/// use rs_netgraph::search::{path_from_incomings, bfs};
///
/// let g: DiGraph<usize> = classes::cycle_graph(7);
/// let src = g.node_id(&0).unwrap();
///
/// let mut search = bfs::start(&g, src);
/// search.run();
///
/// let path: Vec<_> = path_from_incomings(g.node_id(&3).unwrap(), |u| search.parent(u))
///     .map(|u| *g.id2node(u))
///     .collect();
/// assert_eq!(path, vec![3, 2, 1, 0]);
/// ```
pub fn path_from_incomings<T, I>(dst: T, incomings: I) -> impl Iterator<Item = T>
where
    T: Copy,
    I: Fn(T) -> Option<T>,
{
    PathIter {
        incomings,
        u: Some(dst),
    }
}

#[doc(hidden)]
struct PathIter<T, I>
where
    I: Fn(T) -> Option<T>,
{
    incomings: I,
    u: Option<T>,
}

impl<T, I> Iterator for PathIter<T, I>
where
    T: Copy,
    I: Fn(T) -> Option<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let u = self.u?;
        self.u = (self.incomings)(u);
        Some(u)
    }
}
