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

//! Maximal cliques.
//!
//! Maximal cliques are enumerated by the algorithm of Bron and Kerbosch
//! with the pivot rule of Tomita, Tanaka and Takahashi: in each step the
//! pivot is the candidate with the most neighbors among the remaining
//! candidates, and only candidates not adjacent to the pivot are expanded.
//!
//! Self-loops and parallel edges are ignored. Finding a maximum clique is
//! NP-hard, so the enumeration may take exponential time.
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{clique, Graph};
//!
//! let mut g = Graph::new();
//! g.add_edges_from(vec![(1, 2), (1, 3), (2, 3), (3, 4)]).unwrap();
//!
//! let mut cliques: Vec<Vec<i32>> = clique::find_cliques(&g).collect();
//! for c in &mut cliques {
//!     c.sort();
//! }
//! cliques.sort();
//! assert_eq!(cliques, vec![vec![1, 2, 3], vec![3, 4]]);
//! assert_eq!(clique::graph_clique_number(&g, None), 3);
//! ```

use crate::error::Result;
use crate::graph::{BaseGraph, NodeId};
use crate::traits::{Indexable, Multiplicity, NodeKey, Undirected};

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

/// Neighbor sets of all nodes without self-loops, indexed by node handle.
fn neighbor_sets<N, M>(g: &BaseGraph<N, Undirected, M>) -> Vec<BTreeSet<NodeId>>
where
    N: NodeKey,
    M: Multiplicity,
{
    let mut adj = vec![BTreeSet::new(); g.node_bound()];
    for u in g.node_ids() {
        adj[u.index()] = g.neighbor_ids(u).filter(|&v| v != u).collect();
    }
    adj
}

/// The node of `subg` with the most neighbors in `cand`.
fn pivot(adj: &[BTreeSet<NodeId>], subg: &BTreeSet<NodeId>, cand: &BTreeSet<NodeId>) -> Option<NodeId> {
    let mut best = None;
    let mut best_cnt = 0;
    for &u in subg {
        let cnt = cand.intersection(&adj[u.index()]).count();
        if best.is_none() || cnt > best_cnt {
            best = Some(u);
            best_cnt = cnt;
        }
    }
    best
}

/// Candidates that are not adjacent to the pivot.
fn extension(adj: &[BTreeSet<NodeId>], subg: &BTreeSet<NodeId>, cand: &BTreeSet<NodeId>) -> BTreeSet<NodeId> {
    match pivot(adj, subg, cand) {
        Some(u) => cand.difference(&adj[u.index()]).copied().collect(),
        None => BTreeSet::new(),
    }
}

/// Iterator over the maximal cliques of a graph.
///
/// Created by [`find_cliques`].
pub struct FindCliques<'a, N, M> {
    g: &'a BaseGraph<N, Undirected, M>,
    adj: Vec<BTreeSet<NodeId>>,
    /// The current partial clique.
    q: Vec<NodeId>,
    subg: BTreeSet<NodeId>,
    cand: BTreeSet<NodeId>,
    ext: BTreeSet<NodeId>,
    stack: Vec<(BTreeSet<NodeId>, BTreeSet<NodeId>, BTreeSet<NodeId>)>,
    done: bool,
}

/// Return an iterator over all maximal cliques of `g`.
///
/// Each clique is returned as a list of its nodes. The cliques are computed
/// lazily with an explicit stack, so the depth of the search is not limited
/// by the call stack.
pub fn find_cliques<N, M>(g: &BaseGraph<N, Undirected, M>) -> FindCliques<'_, N, M>
where
    N: NodeKey,
    M: Multiplicity,
{
    debug!(nodes = g.number_of_nodes(), edges = g.number_of_edges(), "find cliques");
    let adj = neighbor_sets(g);
    let subg: BTreeSet<NodeId> = g.node_ids().collect();
    let cand = subg.clone();
    let ext = extension(&adj, &subg, &cand);
    FindCliques {
        g,
        adj,
        q: vec![],
        done: subg.is_empty(),
        subg,
        cand,
        ext,
        stack: vec![],
    }
}

impl<'a, N, M> Iterator for FindCliques<'a, N, M>
where
    N: NodeKey,
    M: Multiplicity,
{
    type Item = Vec<N>;

    fn next(&mut self) -> Option<Vec<N>> {
        if self.done {
            return None;
        }
        loop {
            if let Some(q) = self.ext.pop_first() {
                self.cand.remove(&q);
                self.q.push(q);
                let adj_q = &self.adj[q.index()];
                let subg_q: BTreeSet<NodeId> = self.subg.intersection(adj_q).copied().collect();
                if subg_q.is_empty() {
                    let clique = self.q.iter().map(|&u| self.g.id2node(u).clone()).collect();
                    self.q.pop();
                    return Some(clique);
                }
                let cand_q: BTreeSet<NodeId> = self.cand.intersection(adj_q).copied().collect();
                if cand_q.is_empty() {
                    self.q.pop();
                    continue;
                }
                let ext_q = extension(&self.adj, &subg_q, &cand_q);
                let subg = std::mem::replace(&mut self.subg, subg_q);
                let cand = std::mem::replace(&mut self.cand, cand_q);
                let ext = std::mem::replace(&mut self.ext, ext_q);
                self.stack.push((subg, cand, ext));
            } else if let Some((subg, cand, ext)) = self.stack.pop() {
                self.q.pop();
                self.subg = subg;
                self.cand = cand;
                self.ext = ext;
            } else {
                self.done = true;
                return None;
            }
        }
    }
}

/// Return all maximal cliques of `g`, computed recursively.
///
/// The set of cliques is the same as for [`find_cliques`], the order may
/// differ. The recursion depth is the size of the largest clique.
pub fn find_cliques_recursive<N, M>(g: &BaseGraph<N, Undirected, M>) -> std::vec::IntoIter<Vec<N>>
where
    N: NodeKey,
    M: Multiplicity,
{
    fn expand(
        adj: &[BTreeSet<NodeId>],
        subg: &BTreeSet<NodeId>,
        cand: &mut BTreeSet<NodeId>,
        q: &mut Vec<NodeId>,
        cliques: &mut Vec<Vec<NodeId>>,
    ) {
        for u in extension(adj, subg, cand) {
            cand.remove(&u);
            q.push(u);
            let adj_u = &adj[u.index()];
            let subg_u: BTreeSet<NodeId> = subg.intersection(adj_u).copied().collect();
            if subg_u.is_empty() {
                cliques.push(q.clone());
            } else {
                let mut cand_u: BTreeSet<NodeId> = cand.intersection(adj_u).copied().collect();
                if !cand_u.is_empty() {
                    expand(adj, &subg_u, &mut cand_u, q, cliques);
                }
            }
            q.pop();
        }
    }

    debug!(nodes = g.number_of_nodes(), edges = g.number_of_edges(), "find cliques recursively");
    let adj = neighbor_sets(g);
    let subg: BTreeSet<NodeId> = g.node_ids().collect();
    let mut cand = subg.clone();
    let mut cliques = vec![];
    if !subg.is_empty() {
        expand(&adj, &subg, &mut cand, &mut vec![], &mut cliques);
    }
    cliques
        .into_iter()
        .map(|c| c.into_iter().map(|u| g.id2node(u).clone()).collect())
        .collect::<Vec<_>>()
        .into_iter()
}

/// Return the size of the largest clique of `g`.
///
/// If `cliques` is given, it must contain the maximal cliques of `g` and
/// is used instead of enumerating them again. The empty graph has clique
/// number 0.
pub fn graph_clique_number<N, M>(g: &BaseGraph<N, Undirected, M>, cliques: Option<&[Vec<N>]>) -> usize
where
    N: NodeKey,
    M: Multiplicity,
{
    match cliques {
        Some(cliques) => cliques.iter().map(Vec::len).max().unwrap_or(0),
        None => find_cliques(g).map(|c| c.len()).max().unwrap_or(0),
    }
}

/// Return the number of maximal cliques of `g`.
pub fn graph_number_of_cliques<N, M>(g: &BaseGraph<N, Undirected, M>, cliques: Option<&[Vec<N>]>) -> usize
where
    N: NodeKey,
    M: Multiplicity,
{
    match cliques {
        Some(cliques) => cliques.len(),
        None => find_cliques(g).count(),
    }
}

/// Return the number of maximal cliques containing the node `n`.
pub fn node_number_of_cliques<N, M>(
    g: &BaseGraph<N, Undirected, M>,
    n: &N,
    cliques: Option<&[Vec<N>]>,
) -> Result<usize>
where
    N: NodeKey,
    M: Multiplicity,
{
    g.require(n)?;
    Ok(match cliques {
        Some(cliques) => cliques.iter().filter(|c| c.contains(n)).count(),
        None => find_cliques(g).filter(|c| c.contains(n)).count(),
    })
}

/// Return the number of maximal cliques containing each node.
///
/// If `nbunch` is `None` all nodes are reported, otherwise the nodes of
/// `nbunch` that are in the graph.
pub fn number_of_cliques<N, M>(
    g: &BaseGraph<N, Undirected, M>,
    nbunch: Option<&[N]>,
    cliques: Option<&[Vec<N>]>,
) -> HashMap<N, usize>
where
    N: NodeKey,
    M: Multiplicity,
{
    let mut counts: HashMap<N, usize> = match nbunch {
        Some(nbunch) => g.nbunch_iter(nbunch).map(|u| (u.clone(), 0)).collect(),
        None => g.nodes().map(|u| (u.clone(), 0)).collect(),
    };
    let mut count = |c: &[N]| {
        for u in c {
            if let Some(cnt) = counts.get_mut(u) {
                *cnt += 1;
            }
        }
    };
    match cliques {
        Some(cliques) => cliques.iter().for_each(|c| count(c.as_slice())),
        None => find_cliques(g).for_each(|c| count(c.as_slice())),
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes;
    use crate::{Graph, MultiGraph};

    fn normalized<I: Iterator<Item = Vec<usize>>>(cliques: I) -> Vec<Vec<usize>> {
        let mut cliques: Vec<_> = cliques
            .map(|mut c| {
                c.sort();
                c
            })
            .collect();
        cliques.sort();
        cliques
    }

    fn sample() -> Graph<usize> {
        let mut g = Graph::new();
        g.add_edges_from(vec![
            (1, 2),
            (1, 3),
            (1, 10),
            (2, 3),
            (2, 4),
            (2, 6),
            (3, 4),
            (3, 6),
            (4, 5),
            (4, 6),
            (5, 6),
            (7, 8),
            (9, 9),
        ])
        .unwrap();
        g
    }

    #[test]
    fn test_complete() {
        let g: Graph<usize> = classes::complete_graph(5);
        let cliques: Vec<_> = find_cliques(&g).collect();
        assert_eq!(cliques.len(), 1);
        assert_eq!(normalized(cliques.into_iter()), vec![vec![0, 1, 2, 3, 4]]);
        assert_eq!(graph_clique_number(&g, None), 5);
        assert_eq!(graph_number_of_cliques(&g, None), 1);
    }

    #[test]
    fn test_find_cliques() {
        let g = sample();
        let expected = vec![
            vec![1, 2, 3],
            vec![1, 10],
            vec![2, 3, 4, 6],
            vec![4, 5, 6],
            vec![7, 8],
            vec![9],
        ];
        assert_eq!(normalized(find_cliques(&g)), expected);
        assert_eq!(normalized(find_cliques_recursive(&g)), expected);
    }

    #[test]
    fn test_empty() {
        let g: Graph<usize> = Graph::new();
        assert_eq!(find_cliques(&g).next(), None);
        assert_eq!(find_cliques_recursive(&g).next(), None);
        assert_eq!(graph_clique_number(&g, None), 0);
    }

    #[test]
    fn test_counts() {
        let g = sample();
        let cliques: Vec<_> = find_cliques(&g).collect();
        assert_eq!(graph_clique_number(&g, Some(&cliques[..])), 4);
        assert_eq!(graph_number_of_cliques(&g, Some(&cliques[..])), 6);
        assert_eq!(node_number_of_cliques(&g, &1, None), Ok(2));
        assert_eq!(node_number_of_cliques(&g, &4, Some(&cliques[..])), Ok(2));
        assert!(node_number_of_cliques(&g, &42, None).is_err());

        let counts = number_of_cliques(&g, Some(&[2, 9, 42][..]), None);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&2], 2);
        assert_eq!(counts[&9], 1);
        assert_eq!(number_of_cliques(&g, None, Some(&cliques[..]))[&6], 2);
    }

    #[test]
    fn test_parallel_edges() {
        let mut g = MultiGraph::new();
        g.add_edges_from(vec![(0, 1), (0, 1), (1, 2), (2, 0), (2, 2)]).unwrap();
        assert_eq!(normalized(find_cliques(&g)), vec![vec![0, 1, 2]]);
    }
}
