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

//! Shortest paths in unweighted graphs.
//!
//! All functions are based on breadth-first search. The `cutoff` parameter
//! restricts the search to paths with at most `cutoff` edges. Nodes that
//! cannot be reached are simply missing from the returned maps.
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{classes, Graph};
//! use rs_netgraph::shortestpath::unweighted;
//!
//! let g: Graph<usize> = classes::path_graph(5);
//! let lengths = unweighted::single_source_shortest_path_length(&g, &0, Some(2)).unwrap();
//! assert_eq!(lengths.len(), 3);
//! assert_eq!(lengths[&2], 2);
//!
//! assert_eq!(unweighted::bidirectional_shortest_path(&g, &4, &1).unwrap(), vec![4, 3, 2, 1]);
//! ```

use crate::error::{Error, Result};
use crate::graph::{BaseGraph, NodeId};
use crate::search::{adjacency, bfs, path_from_incomings, Direction};
use crate::traits::{EdgeType, Multiplicity, NodeKey};

use std::collections::HashMap;

use tracing::debug;

/// Distances of all nodes reachable from `src`, including `src` itself.
pub(crate) fn lengths_from<N, D, M>(
    g: &BaseGraph<N, D, M>,
    src: NodeId,
    dir: Direction,
    cutoff: Option<usize>,
) -> HashMap<NodeId, usize>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let mut search = bfs::start_with(g, src, dir, cutoff);
    search.run();
    let mut lengths: HashMap<_, _> = search.into_data().into_iter().map(|(v, (_, d))| (v, d)).collect();
    lengths.insert(src, 0);
    lengths
}

/// Shortest paths from `src` to all reachable nodes.
///
/// Each path starts at `src` and follows edges in direction `dir`.
pub(crate) fn paths_from<N, D, M>(
    g: &BaseGraph<N, D, M>,
    src: NodeId,
    dir: Direction,
    cutoff: Option<usize>,
) -> HashMap<NodeId, Vec<NodeId>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let mut search = bfs::start_with(g, src, dir, cutoff);
    let mut paths = HashMap::new();
    paths.insert(src, vec![src]);
    while let Some((v, u)) = search.next() {
        let mut path = paths.get(&u).cloned().unwrap_or_default();
        path.push(v);
        paths.insert(v, path);
    }
    paths
}

pub(crate) fn to_keys<N, D, M, T>(g: &BaseGraph<N, D, M>, map: HashMap<NodeId, T>) -> HashMap<N, T>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    map.into_iter().map(|(u, x)| (g.id2node(u).clone(), x)).collect()
}

pub(crate) fn path_to_keys<N, D, M>(g: &BaseGraph<N, D, M>, path: &[NodeId]) -> Vec<N>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    path.iter().map(|&u| g.id2node(u).clone()).collect()
}

/// Return the lengths of the shortest paths from `source` to all reachable
/// nodes.
pub fn single_source_shortest_path_length<N, D, M>(
    g: &BaseGraph<N, D, M>,
    source: &N,
    cutoff: Option<usize>,
) -> Result<HashMap<N, usize>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let src = g.require(source)?;
    Ok(to_keys(g, lengths_from(g, src, Direction::Outgoing, cutoff)))
}

/// Return shortest paths from `source` to all reachable nodes.
pub fn single_source_shortest_path<N, D, M>(
    g: &BaseGraph<N, D, M>,
    source: &N,
    cutoff: Option<usize>,
) -> Result<HashMap<N, Vec<N>>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let src = g.require(source)?;
    let paths = paths_from(g, src, Direction::Outgoing, cutoff);
    Ok(paths
        .into_iter()
        .map(|(v, path)| (g.id2node(v).clone(), path_to_keys(g, &path)))
        .collect())
}

/// Return the lengths of the shortest paths between all pairs of nodes.
///
/// Pairs without connecting path are omitted.
pub fn all_pairs_shortest_path_length<N, D, M>(
    g: &BaseGraph<N, D, M>,
    cutoff: Option<usize>,
) -> HashMap<N, HashMap<N, usize>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    debug!(nodes = g.number_of_nodes(), ?cutoff, "all pairs shortest path lengths");
    g.node_ids()
        .map(|u| {
            let lengths = lengths_from(g, u, Direction::Outgoing, cutoff);
            (g.id2node(u).clone(), to_keys(g, lengths))
        })
        .collect()
}

/// Return shortest paths between all pairs of nodes.
pub fn all_pairs_shortest_path<N, D, M>(g: &BaseGraph<N, D, M>, cutoff: Option<usize>) -> HashMap<N, HashMap<N, Vec<N>>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    debug!(nodes = g.number_of_nodes(), ?cutoff, "all pairs shortest paths");
    g.node_ids()
        .map(|u| {
            let paths = paths_from(g, u, Direction::Outgoing, cutoff)
                .into_iter()
                .map(|(v, path)| (g.id2node(v).clone(), path_to_keys(g, &path)))
                .collect();
            (g.id2node(u).clone(), paths)
        })
        .collect()
}

/// Meet-in-the-middle search from `src` and `snk`.
///
/// Returns the predecessors of the forward search, the successors of the
/// backward search and a node in which both searches met. The smaller of
/// the two frontiers is expanded in each step.
fn bidirectional_pred_succ<N, D, M>(
    g: &BaseGraph<N, D, M>,
    src: NodeId,
    snk: NodeId,
) -> Option<(HashMap<NodeId, Option<NodeId>>, HashMap<NodeId, Option<NodeId>>, NodeId)>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let mut pred = HashMap::new();
    let mut succ = HashMap::new();
    pred.insert(src, None);
    succ.insert(snk, None);
    if src == snk {
        return Some((pred, succ, src));
    }

    let mut forward_fringe = vec![src];
    let mut reverse_fringe = vec![snk];
    while !forward_fringe.is_empty() && !reverse_fringe.is_empty() {
        if forward_fringe.len() <= reverse_fringe.len() {
            for v in std::mem::take(&mut forward_fringe) {
                for &w in adjacency(g, v, Direction::Outgoing).keys() {
                    if !pred.contains_key(&w) {
                        forward_fringe.push(w);
                        pred.insert(w, Some(v));
                    }
                    if succ.contains_key(&w) {
                        return Some((pred, succ, w));
                    }
                }
            }
        } else {
            for v in std::mem::take(&mut reverse_fringe) {
                for &w in adjacency(g, v, Direction::Incoming).keys() {
                    if !succ.contains_key(&w) {
                        succ.insert(w, Some(v));
                        reverse_fringe.push(w);
                    }
                    if pred.contains_key(&w) {
                        return Some((pred, succ, w));
                    }
                }
            }
        }
    }
    None
}

/// Return a shortest path from `source` to `target`.
///
/// The search alternates between a forward search from `source` and a
/// backward search from `target`. If there are several shortest paths, the
/// one found first by the expansion order is returned.
pub fn bidirectional_shortest_path<N, D, M>(g: &BaseGraph<N, D, M>, source: &N, target: &N) -> Result<Vec<N>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let src = g.require(source)?;
    let snk = g.require(target)?;
    let (pred, succ, w) = bidirectional_pred_succ(g, src, snk)
        .ok_or_else(|| Error::NoPath(format!("no path between {:?} and {:?}", source, target)))?;

    let mut path: Vec<NodeId> = path_from_incomings(w, |u| pred.get(&u).copied().flatten()).collect();
    path.reverse();
    path.extend(path_from_incomings(w, |u| succ.get(&u).copied().flatten()).skip(1));
    Ok(path_to_keys(g, &path))
}

/// Return the predecessors of all nodes on shortest paths from `source`.
///
/// A node `u` is a predecessor of `v` if some shortest path from `source`
/// to `v` ends with the edge `(u, v)`.
pub fn predecessor<N, D, M>(g: &BaseGraph<N, D, M>, source: &N, cutoff: Option<usize>) -> Result<HashMap<N, Vec<N>>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let src = g.require(source)?;
    let mut level = 0;
    let mut nextlevel = vec![src];
    let mut seen = HashMap::new();
    let mut pred: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    seen.insert(src, 0);
    pred.insert(src, vec![]);
    while !nextlevel.is_empty() {
        level += 1;
        for v in std::mem::take(&mut nextlevel) {
            for &w in g.out_adj(v).keys() {
                match seen.get(&w) {
                    None => {
                        pred.insert(w, vec![v]);
                        seen.insert(w, level);
                        nextlevel.push(w);
                    }
                    Some(&l) if l == level => pred.entry(w).or_default().push(v),
                    _ => {}
                }
            }
        }
        if cutoff.map_or(false, |c| c <= level) {
            break;
        }
    }
    Ok(pred
        .into_iter()
        .map(|(v, us)| (g.id2node(v).clone(), path_to_keys(g, &us)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes;
    use crate::{DiGraph, Graph};

    #[test]
    fn test_path_graph() {
        let g: Graph<usize> = classes::path_graph(5);
        assert_eq!(bidirectional_shortest_path(&g, &0, &4).unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(bidirectional_shortest_path(&g, &2, &2).unwrap(), vec![2]);
        let paths = single_source_shortest_path(&g, &0, None).unwrap();
        assert_eq!(paths[&4], vec![0, 1, 2, 3, 4]);
        assert_eq!(paths[&0], vec![0]);
        let lengths = single_source_shortest_path_length(&g, &0, None).unwrap();
        assert_eq!(lengths[&4], 4);
    }

    #[test]
    fn test_directed_no_path() {
        let g: DiGraph<usize> = classes::path_graph(3);
        assert!(matches!(bidirectional_shortest_path(&g, &2, &0), Err(Error::NoPath(_))));
        assert!(matches!(bidirectional_shortest_path(&g, &0, &7), Err(Error::NotFound(_))));
        assert_eq!(bidirectional_shortest_path(&g, &0, &2).unwrap(), vec![0, 1, 2]);

        let all = all_pairs_shortest_path_length(&g, None);
        assert_eq!(all[&2].len(), 1);
        assert_eq!(all[&0][&2], 2);
        assert!(!all[&1].contains_key(&0));
    }

    #[test]
    fn test_cycle_paths() {
        let g: Graph<usize> = classes::cycle_graph(6);
        let p = bidirectional_shortest_path(&g, &0, &3).unwrap();
        assert_eq!(p.len(), 4);
        assert_eq!(p.first(), Some(&0));
        assert_eq!(p.last(), Some(&3));

        let all = all_pairs_shortest_path(&g, Some(1));
        assert_eq!(all[&0].len(), 3);
    }

    #[test]
    fn test_predecessor() {
        let g: Graph<usize> = classes::cycle_graph(4);
        let pred = predecessor(&g, &0, None).unwrap();
        assert_eq!(pred[&0], Vec::<usize>::new());
        assert_eq!(pred[&1], vec![0]);
        assert_eq!(pred[&2], vec![1, 3]);

        let pred = predecessor(&g, &0, Some(1)).unwrap();
        assert!(!pred.contains_key(&2));
    }
}
