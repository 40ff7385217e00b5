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

//! Directed acyclic graphs.
//!
//! A topological order of a directed graph is an order of its nodes such
//! that each edge `(u, v)` has `u` before `v`. It exists if and only if the
//! graph has no directed cycle. Sorting a graph with a cycle fails with
//! [`Error::AlgorithmError`], no partial order is returned.
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{dag, DiGraph};
//!
//! let mut g = DiGraph::new();
//! g.add_edges_from(vec![("shirt", "tie"), ("tie", "jacket"), ("trousers", "shoes"), ("trousers", "jacket")]).unwrap();
//! let order = dag::topological_sort(&g, None).unwrap();
//! assert_eq!(order, vec!["shirt", "trousers", "tie", "shoes", "jacket"]);
//! assert!(dag::is_directed_acyclic_graph(&g));
//!
//! g.add_edge("jacket", "shirt").unwrap();
//! assert!(dag::topological_sort(&g, None).is_err());
//! assert!(!dag::is_directed_acyclic_graph(&g));
//! ```

use crate::error::{Error, Result};
use crate::graph::{BaseGraph, NodeId};
use crate::search::bfs;
use crate::shortestpath::unweighted::path_to_keys;
use crate::traits::{Directed, EdgeType, Indexable, Multiplicity, NodeKey};

use num_integer::gcd;
use std::collections::VecDeque;

use tracing::debug;

/// Nodes reachable from `seeds` in order of discovery.
fn reachable<N, D, M>(g: &BaseGraph<N, D, M>, seeds: &[NodeId]) -> Vec<NodeId>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let mut seen = vec![false; g.node_bound()];
    let mut order = Vec::with_capacity(g.number_of_nodes());
    for &s in seeds {
        if seen[s.index()] {
            continue;
        }
        seen[s.index()] = true;
        order.push(s);
        for (v, _) in bfs::start(g, s) {
            if !seen[v.index()] {
                seen[v.index()] = true;
                order.push(v);
            }
        }
    }
    order
}

/// Kahn's algorithm on the nodes reachable from `seeds`.
fn kahn<N, D, M>(g: &BaseGraph<N, D, M>, seeds: &[NodeId]) -> Result<Vec<NodeId>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let nodes = reachable(g, seeds);
    // Successors of reachable nodes are reachable, so counting the edges
    // leaving `nodes` counts all incoming edges of `nodes`.
    let mut indeg = vec![0usize; g.node_bound()];
    for &u in &nodes {
        for (v, es) in g.out_adj(u) {
            indeg[v.index()] += es.len();
        }
    }

    let mut queue: VecDeque<NodeId> = nodes.iter().copied().filter(|u| indeg[u.index()] == 0).collect();
    let mut order = Vec::with_capacity(nodes.len());
    while let Some(u) = queue.pop_front() {
        order.push(u);
        for (&v, es) in g.out_adj(u) {
            indeg[v.index()] -= es.len();
            if indeg[v.index()] == 0 {
                queue.push_back(v);
            }
        }
    }

    if order.len() < nodes.len() {
        debug!(sorted = order.len(), nodes = nodes.len(), "topological sort failed");
        return Err(Error::AlgorithmError("graph contains a cycle".to_string()));
    }
    Ok(order)
}

fn seeds<N, M>(g: &BaseGraph<N, Directed, M>, nbunch: Option<&[N]>) -> Vec<NodeId>
where
    N: NodeKey,
    M: Multiplicity,
{
    match nbunch {
        Some(nbunch) => g.nbunch_ids(nbunch),
        None => g.node_ids().collect(),
    }
}

/// Return the nodes in topological order.
///
/// Nodes whose predecessors have all been output are output first-in
/// first-out, starting from the nodes without predecessors in order of
/// discovery. If `nbunch` is given, only the nodes
/// reachable from `nbunch` are sorted and ties are broken by the order of
/// discovery from `nbunch`.
pub fn topological_sort<N, M>(g: &BaseGraph<N, Directed, M>, nbunch: Option<&[N]>) -> Result<Vec<N>>
where
    N: NodeKey,
    M: Multiplicity,
{
    let order = kahn(g, &seeds(g, nbunch))?;
    Ok(path_to_keys(g, &order))
}

/// Return the nodes in topological order, computed by a recursive
/// depth-first search.
///
/// The recursion depth is the length of the longest path.
pub fn topological_sort_recursive<N, M>(g: &BaseGraph<N, Directed, M>, nbunch: Option<&[N]>) -> Result<Vec<N>>
where
    N: NodeKey,
    M: Multiplicity,
{
    fn visit<N, M>(
        g: &BaseGraph<N, Directed, M>,
        u: NodeId,
        ancestors: &mut [bool],
        explored: &mut [bool],
        order: &mut Vec<NodeId>,
    ) -> Result<()>
    where
        N: NodeKey,
        M: Multiplicity,
    {
        ancestors[u.index()] = true;
        for v in g.neighbor_ids(u) {
            if ancestors[v.index()] {
                debug!(node = ?g.id2node(v), "topological sort found a cycle");
                return Err(Error::AlgorithmError("graph contains a cycle".to_string()));
            }
            if !explored[v.index()] {
                visit(g, v, ancestors, explored, order)?;
            }
        }
        ancestors[u.index()] = false;
        explored[u.index()] = true;
        order.push(u);
        Ok(())
    }

    let mut ancestors = vec![false; g.node_bound()];
    let mut explored = vec![false; g.node_bound()];
    let mut order = Vec::with_capacity(g.number_of_nodes());
    for u in seeds(g, nbunch) {
        if !explored[u.index()] {
            visit(g, u, &mut ancestors, &mut explored, &mut order)?;
        }
    }
    order.reverse();
    Ok(path_to_keys(g, &order))
}

/// Return `true` if `g` is a directed graph without directed cycles.
///
/// Undirected graphs are never acyclic in this sense.
pub fn is_directed_acyclic_graph<N, D, M>(g: &BaseGraph<N, D, M>) -> bool
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    if !D::is_directed() {
        return false;
    }
    let all: Vec<_> = g.node_ids().collect();
    kahn(g, &all).is_ok()
}

/// Return `true` if `g` is aperiodic.
///
/// A directed graph is aperiodic if no integer `k > 1` divides the length
/// of every cycle. An acyclic graph is *not* aperiodic. The test labels the
/// nodes with their breadth-first search levels, each non-tree edge `(u, v)`
/// contributes `level(u) - level(v) + 1` to the greatest common divisor.
/// Nodes not reached from the first search are tested recursively.
///
/// Fails with [`Error::PreconditionViolation`] on the empty graph.
pub fn is_aperiodic<N, M>(g: &BaseGraph<N, Directed, M>) -> Result<bool>
where
    N: NodeKey,
    M: Multiplicity,
{
    if g.number_of_nodes() == 0 {
        return Err(Error::PreconditionViolation(
            "aperiodicity of the empty graph is undefined".to_string(),
        ));
    }
    if is_directed_acyclic_graph(g) {
        return Ok(false);
    }

    // nodes of previous rounds are removed from the graph
    let mut removed = vec![false; g.node_bound()];
    let mut level: Vec<Option<i64>> = vec![None; g.node_bound()];
    for s in g.node_ids() {
        if removed[s.index()] {
            continue;
        }
        level[s.index()] = Some(0);
        let mut this_level = vec![s];
        let mut reached = vec![s];
        let mut period = 0;
        let mut lev = 1;
        while !this_level.is_empty() {
            let mut next_level = vec![];
            for &u in &this_level {
                let lu = level[u.index()].unwrap_or(0);
                for v in g.neighbor_ids(u).filter(|v| !removed[v.index()]) {
                    match level[v.index()] {
                        Some(lv) => period = gcd(period, lu - lv + 1),
                        None => {
                            level[v.index()] = Some(lev);
                            next_level.push(v);
                            reached.push(v);
                        }
                    }
                }
            }
            this_level = next_level;
            lev += 1;
        }
        debug!(source = ?g.id2node(s), reached = reached.len(), period, "aperiodicity round");
        if period != 1 {
            return Ok(false);
        }
        for u in reached {
            removed[u.index()] = true;
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes;
    use crate::{DiGraph, Graph, MultiDiGraph};

    fn check_order(g: &DiGraph<usize>, order: &[usize]) {
        let pos = |n: &usize| order.iter().position(|u| u == n).unwrap();
        for (u, v) in g.edges() {
            assert!(pos(u) < pos(v), "edge {}-{} violates order {:?}", u, v, order);
        }
    }

    #[test]
    fn test_topological_sort() {
        let mut g = DiGraph::new();
        g.add_edges_from(vec![(1, 2), (1, 3), (2, 3), (4, 5), (5, 3), (0, 4)]).unwrap();
        let order = topological_sort(&g, None).unwrap();
        assert_eq!(order, vec![1, 0, 2, 4, 5, 3]);
        check_order(&g, &order);
        let order = topological_sort_recursive(&g, None).unwrap();
        assert_eq!(order.len(), 6);
        check_order(&g, &order);
    }

    #[test]
    fn test_nbunch() {
        let g: DiGraph<usize> = classes::path_graph(5);
        assert_eq!(topological_sort(&g, Some(&[2][..])).unwrap(), vec![2, 3, 4]);
        assert_eq!(topological_sort_recursive(&g, Some(&[3, 1][..])).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(topological_sort(&g, Some(&[3, 1][..])).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_cycle() {
        let g: DiGraph<usize> = classes::cycle_graph(4);
        assert!(!is_directed_acyclic_graph(&g));
        assert!(matches!(topological_sort(&g, None), Err(Error::AlgorithmError(_))));
        assert!(matches!(topological_sort_recursive(&g, None), Err(Error::AlgorithmError(_))));

        let mut g = DiGraph::new();
        g.add_edge(0, 0).unwrap();
        assert!(!is_directed_acyclic_graph(&g));
    }

    #[test]
    fn test_undirected_and_multi() {
        let g: Graph<usize> = classes::path_graph(3);
        assert!(!is_directed_acyclic_graph(&g));

        let mut g = MultiDiGraph::new();
        g.add_edges_from(vec![(0, 1), (0, 1), (1, 2)]).unwrap();
        assert!(is_directed_acyclic_graph(&g));
        assert_eq!(topological_sort(&g, None).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_aperiodic() {
        let g: DiGraph<usize> = classes::cycle_graph(4);
        assert_eq!(is_aperiodic(&g), Ok(false));

        let mut g: DiGraph<usize> = classes::cycle_graph(4);
        g.add_edge(0, 2).unwrap();
        // cycles of lengths 4 and 3
        assert_eq!(is_aperiodic(&g), Ok(true));

        let mut g: DiGraph<usize> = classes::cycle_graph(2);
        g.add_cycle(vec![2, 3, 4, 5]).unwrap();
        g.add_edge(1, 2).unwrap();
        // cycles of lengths 2 and 4
        assert_eq!(is_aperiodic(&g), Ok(false));

        let g: DiGraph<usize> = classes::path_graph(3);
        assert_eq!(is_aperiodic(&g), Ok(false));

        let g: DiGraph<usize> = DiGraph::new();
        assert!(matches!(is_aperiodic(&g), Err(Error::PreconditionViolation(_))));
    }
}
