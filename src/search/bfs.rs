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

//! Breadth-first-search.
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{classes, Graph};
//! use rs_netgraph::search::bfs;
//!
//! let g: Graph<usize> = classes::petersen_graph();
//! let src = g.node_id(&0).unwrap();
//! let mut cnt = 0;
//! for (u, _parent) in bfs::start(&g, src) {
//!     assert_ne!(*g.id2node(u), 0);
//!     cnt += 1;
//! }
//! assert_eq!(cnt, g.number_of_nodes() - 1);
//! ```

use super::{adjacency, Direction};
use crate::graph::{BaseGraph, EdgeId, NodeId};
use crate::traits::{EdgeType, Multiplicity, NodeKey};

use std::collections::btree_map::Keys;
use std::collections::{HashMap, VecDeque};

/// Start a BFS following outgoing edges without depth limit.
pub fn start<N, D, M>(g: &BaseGraph<N, D, M>, src: NodeId) -> Bfs<'_, N, D, M>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    start_with(g, src, Direction::Outgoing, None)
}

/// Start and return a BFS iterator.
///
/// The returned iterator traverses the nodes in breadth-first order, one
/// layer after another. The iterator returns the next node and its parent
/// in the BFS tree, i.e. the node from which it has been reached first.
///
/// Note that the start node is *not* returned by the iterator.
///
/// # Parameter
/// - `g`: the graph
/// - `src`: the source node at which the search should start.
/// - `dir`: the direction in which edges are followed
/// - `cutoff`: nodes with a distance larger than `cutoff` from `src` are
///   not visited.
pub fn start_with<N, D, M>(
    g: &BaseGraph<N, D, M>,
    src: NodeId,
    dir: Direction,
    cutoff: Option<usize>,
) -> Bfs<'_, N, D, M>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let mut queue = VecDeque::new();
    queue.push_back(src);
    Bfs {
        g,
        dir,
        cutoff,
        src,
        seen: HashMap::new(),
        queue,
        cur: (src, 0),
        it: None,
    }
}

/// The BFS iterator.
pub struct Bfs<'a, N, D, M> {
    g: &'a BaseGraph<N, D, M>,
    dir: Direction,
    cutoff: Option<usize>,
    src: NodeId,
    /// Parent and distance of each visited node except the source.
    seen: HashMap<NodeId, (NodeId, usize)>,
    queue: VecDeque<NodeId>,
    cur: (NodeId, usize),
    it: Option<Keys<'a, NodeId, Vec<EdgeId>>>,
}

impl<'a, N, D, M> Iterator for Bfs<'a, N, D, M>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    type Item = (NodeId, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(it) = self.it.as_mut() {
                let (u, d) = self.cur;
                for &v in it.by_ref() {
                    if v != self.src && !self.seen.contains_key(&v) {
                        self.seen.insert(v, (u, d + 1));
                        self.queue.push_back(v);
                        return Some((v, u));
                    }
                }
            }
            let u = self.queue.pop_front()?;
            let d = self.distance(u).unwrap_or(0);
            if self.cutoff.map_or(false, |c| d >= c) {
                self.it = None;
                continue;
            }
            self.cur = (u, d);
            self.it = Some(adjacency(self.g, u, self.dir).keys());
        }
    }
}

impl<'a, N, D, M> Bfs<'a, N, D, M>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    /// Run the bfs completely.
    pub fn run(&mut self) {
        while self.next().is_some() {}
    }

    /// Return the parents and distances of all visited nodes except the source.
    pub fn into_data(self) -> HashMap<NodeId, (NodeId, usize)> {
        self.seen
    }

    /// Return the parent of a visited node.
    pub fn parent(&self, u: NodeId) -> Option<NodeId> {
        self.seen.get(&u).map(|&(p, _)| p)
    }

    /// Return the distance of a visited node from the source.
    pub fn distance(&self, u: NodeId) -> Option<usize> {
        if u == self.src {
            Some(0)
        } else {
            self.seen.get(&u).map(|&(_, d)| d)
        }
    }
}
