// Copyright (c) 2015-2023 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Dijkstra's shortest path algorithm.
//!
//! Dijkstra's algorithm computes the shortest path from some start node $s \in
//! V$ to all other nodes in (directed or undirected) graph. Each edge is
//! assigned a non-negative weight (or length) $w \colon E \to \mathbb{R}_+$,
//! given by an edge attribute. Edges without this attribute have weight 1,
//! parallel edges of multigraphs contribute their minimal weight.
//!
//! The weights are checked before the search starts. Negative or
//! non-numeric weights are rejected with
//! [`Error::PreconditionViolation`].
//!
//! # Example
//!
//! ```
//! use rs_netgraph::Graph;
//! use rs_netgraph::shortestpath::dijkstra;
//!
//! let mut g = Graph::new();
//! g.add_weighted_edges_from("w", vec![
//!     ('a', 'b', 9.0), ('a', 'c', 2.0), ('a', 'e', 14.0), ('b', 'd', 6.0),
//!     ('c', 'd', 8.0), ('c', 'e', 9.0), ('c', 'f', 10.0), ('d', 'f', 15.0),
//!     ('e', 'f', 7.0),
//! ]).unwrap();
//!
//! let (dist, paths) = dijkstra::single_source_dijkstra(&g, &'e', None, None, "w").unwrap();
//! assert_eq!(dist[&'f'], 7.0);
//! assert_eq!(dist[&'a'], 11.0);
//! assert_eq!(dist[&'b'], 20.0);
//! assert_eq!(paths[&'b'], vec!['e', 'c', 'a', 'b']);
//!
//! assert_eq!(dijkstra::dijkstra_path_length(&g, &'e', &'b', "w").unwrap(), 20.0);
//! ```

use crate::attributes::weight_of;
use crate::error::{Error, Result};
use crate::graph::{BaseGraph, NodeId};
use crate::search::{adjacency, Direction};
use crate::traits::{EdgeType, Multiplicity, NodeKey};

use super::unweighted::{path_to_keys, to_keys};

use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace};

/// Ensure that all edge weights are numbers not smaller than `lower`.
///
/// If `strict` is true, weights must be strictly larger than `lower`.
pub(crate) fn check_weights<N, D, M>(g: &BaseGraph<N, D, M>, weight: &str, lower: f64, strict: bool) -> Result<()>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    for (u, v, attrs) in g.edges_with_data() {
        let w = weight_of(&attrs.borrow(), weight)?;
        if w < lower || (strict && w == lower) || w.is_nan() {
            return Err(Error::PreconditionViolation(format!(
                "invalid weight {} on edge {:?}-{:?}",
                w, u, v
            )));
        }
    }
    Ok(())
}

/// The result of a single Dijkstra run on node handles.
pub(crate) struct Tree {
    pub(crate) dist: HashMap<NodeId, f64>,
    pub(crate) paths: HashMap<NodeId, Vec<NodeId>>,
}

/// Run Dijkstra's algorithm from `src`.
///
/// Weights must have been checked already. The search stops once `snk` is
/// finalized, nodes farther away than `cutoff` are not visited. Only
/// finalized nodes are contained in the result.
pub(crate) fn search<N, D, M>(
    g: &BaseGraph<N, D, M>,
    src: NodeId,
    dir: Direction,
    weight: &str,
    snk: Option<NodeId>,
    cutoff: Option<f64>,
) -> Result<Tree>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let mut dist = HashMap::new();
    let mut paths = HashMap::new();
    let mut seen = HashMap::new();
    let mut heap = BinaryHeap::new();
    let mut cnt = 0usize;

    paths.insert(src, vec![src]);
    seen.insert(src, 0.0);
    heap.push(Reverse((OrderedFloat(0.0), cnt, src)));

    while let Some(Reverse((OrderedFloat(d), _, v))) = heap.pop() {
        if dist.contains_key(&v) {
            continue;
        }
        dist.insert(v, d);
        if Some(v) == snk {
            break;
        }
        for (&w, es) in adjacency(g, v, dir) {
            let vw_dist = d + g.min_weight(es, weight)?;
            if cutoff.map_or(false, |c| vw_dist > c) {
                continue;
            }
            if let Some(&dw) = dist.get(&w) {
                if vw_dist < dw {
                    return Err(Error::AlgorithmError(
                        "contradictory paths found, negative weights?".to_string(),
                    ));
                }
            } else if seen.get(&w).map_or(true, |&sw| vw_dist < sw) {
                seen.insert(w, vw_dist);
                cnt += 1;
                heap.push(Reverse((OrderedFloat(vw_dist), cnt, w)));
                let mut path = paths.get(&v).cloned().unwrap_or_default();
                path.push(w);
                paths.insert(w, path);
            }
        }
    }
    trace!(finalized = dist.len(), "dijkstra search finished");

    paths.retain(|u, _| dist.contains_key(u));
    Ok(Tree { dist, paths })
}

/// Compute shortest paths and their lengths from `source`.
///
/// If `target` is given, the search stops as soon as the distance to
/// `target` is known. Nodes at distance larger than `cutoff` are ignored.
///
/// Returns the distances and the paths to all nodes reached.
#[allow(clippy::type_complexity)]
pub fn single_source_dijkstra<N, D, M>(
    g: &BaseGraph<N, D, M>,
    source: &N,
    target: Option<&N>,
    cutoff: Option<f64>,
    weight: &str,
) -> Result<(HashMap<N, f64>, HashMap<N, Vec<N>>)>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let src = g.require(source)?;
    let snk = target.map(|t| g.require(t)).transpose()?;
    check_weights(g, weight, 0.0, false)?;
    let tree = search(g, src, Direction::Outgoing, weight, snk, cutoff)?;
    let paths = tree
        .paths
        .into_iter()
        .map(|(u, path)| (g.id2node(u).clone(), path_to_keys(g, &path)))
        .collect();
    Ok((to_keys(g, tree.dist), paths))
}

/// Return the weighted shortest paths from `source` to all reachable nodes.
pub fn single_source_dijkstra_path<N, D, M>(
    g: &BaseGraph<N, D, M>,
    source: &N,
    cutoff: Option<f64>,
    weight: &str,
) -> Result<HashMap<N, Vec<N>>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    single_source_dijkstra(g, source, None, cutoff, weight).map(|(_, paths)| paths)
}

/// Return the weighted distances from `source` to all reachable nodes.
pub fn single_source_dijkstra_path_length<N, D, M>(
    g: &BaseGraph<N, D, M>,
    source: &N,
    cutoff: Option<f64>,
    weight: &str,
) -> Result<HashMap<N, f64>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    single_source_dijkstra(g, source, None, cutoff, weight).map(|(dist, _)| dist)
}

/// Return a weighted shortest path from `source` to `target`.
pub fn dijkstra_path<N, D, M>(g: &BaseGraph<N, D, M>, source: &N, target: &N, weight: &str) -> Result<Vec<N>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let (_, mut paths) = single_source_dijkstra(g, source, Some(target), None, weight)?;
    paths
        .remove(target)
        .ok_or_else(|| Error::NoPath(format!("node {:?} not reachable from {:?}", target, source)))
}

/// Return the weighted distance from `source` to `target`.
pub fn dijkstra_path_length<N, D, M>(g: &BaseGraph<N, D, M>, source: &N, target: &N, weight: &str) -> Result<f64>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let (dist, _) = single_source_dijkstra(g, source, Some(target), None, weight)?;
    dist.get(target)
        .copied()
        .ok_or_else(|| Error::NoPath(format!("node {:?} not reachable from {:?}", target, source)))
}

/// Return weighted shortest paths between all pairs of nodes.
pub fn all_pairs_dijkstra_path<N, D, M>(
    g: &BaseGraph<N, D, M>,
    cutoff: Option<f64>,
    weight: &str,
) -> Result<HashMap<N, HashMap<N, Vec<N>>>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    debug!(nodes = g.number_of_nodes(), ?cutoff, weight, "all pairs dijkstra paths");
    check_weights(g, weight, 0.0, false)?;
    let mut result = HashMap::new();
    for u in g.node_ids() {
        let tree = search(g, u, Direction::Outgoing, weight, None, cutoff)?;
        let paths = tree
            .paths
            .into_iter()
            .map(|(v, path)| (g.id2node(v).clone(), path_to_keys(g, &path)))
            .collect();
        result.insert(g.id2node(u).clone(), paths);
    }
    Ok(result)
}

/// Return weighted distances between all pairs of nodes.
pub fn all_pairs_dijkstra_path_length<N, D, M>(
    g: &BaseGraph<N, D, M>,
    cutoff: Option<f64>,
    weight: &str,
) -> Result<HashMap<N, HashMap<N, f64>>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    debug!(nodes = g.number_of_nodes(), ?cutoff, weight, "all pairs dijkstra lengths");
    check_weights(g, weight, 0.0, false)?;
    let mut result = HashMap::new();
    for u in g.node_ids() {
        let tree = search(g, u, Direction::Outgoing, weight, None, cutoff)?;
        result.insert(g.id2node(u).clone(), to_keys(g, tree.dist));
    }
    Ok(result)
}
