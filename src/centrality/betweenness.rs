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

//! Betweenness centrality.
//!
//! The betweenness of a node $v$ is
//! $$c_B(v) = \sum_{s,t \in V} \frac{\sigma(s, t|v)}{\sigma(s, t)},$$
//! where $\sigma(s, t)$ is the number of shortest $s$-$t$-paths and
//! $\sigma(s, t|v)$ the number of those paths passing through $v$ (other
//! than $s$ and $t$). The betweenness of edges is defined analogously.
//!
//! The values are computed by Brandes' algorithm. For each source a single
//! source shortest path search (breadth-first search or, if a weight
//! attribute is given, Dijkstra's algorithm) counts the shortest paths, then
//! the dependencies are accumulated in reverse order of discovery.
//!
//! If `k` is given, only `k` randomly chosen sources are used and the
//! result is scaled by `n/k`.
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{classes, Graph};
//! use rs_netgraph::centrality::{betweenness_centrality, BetweennessParams};
//!
//! let g: Graph<usize> = classes::path_graph(3);
//! let bc = betweenness_centrality(&g, &BetweennessParams::default()).unwrap();
//! assert_eq!(bc[&1], 1.0);
//! assert_eq!(bc[&0], 0.0);
//!
//! let params = BetweennessParams { normalized: false, ..Default::default() };
//! let bc = betweenness_centrality(&g, &params).unwrap();
//! assert_eq!(bc[&1], 1.0);
//! ```

use crate::error::{Error, Result};
use crate::graph::{BaseGraph, NodeId};
use crate::shortestpath::dijkstra::check_weights;
use crate::traits::{EdgeType, Indexable, Multiplicity, NodeKey};

use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use tracing::{debug, trace};

/// Options of [`betweenness_centrality`].
#[derive(Clone, Debug)]
pub struct BetweennessParams {
    /// Number of sampled source nodes, all nodes if `None`.
    pub k: Option<usize>,
    /// Normalize by the number of node pairs.
    pub normalized: bool,
    /// The edge attribute used as edge length.
    pub weight: Option<String>,
    /// Count the end points of the paths.
    pub endpoints: bool,
    /// Seed of the random generator used for sampling.
    pub seed: Option<u64>,
}

impl Default for BetweennessParams {
    fn default() -> Self {
        BetweennessParams {
            k: None,
            normalized: true,
            weight: None,
            endpoints: false,
            seed: None,
        }
    }
}

/// Options of [`edge_betweenness_centrality`].
#[derive(Clone, Debug, Default)]
pub struct EdgeBetweennessParams {
    /// Number of sampled source nodes, all nodes if `None`.
    pub k: Option<usize>,
    /// Normalize by the number of node pairs.
    pub normalized: bool,
    /// The edge attribute used as edge length.
    pub weight: Option<String>,
    /// Seed of the random generator used for sampling.
    pub seed: Option<u64>,
}

/// Shortest path counts of a single source.
struct Sssp {
    /// Nodes in order of non-decreasing distance.
    stack: Vec<NodeId>,
    /// Predecessors on shortest paths.
    pred: Vec<Vec<NodeId>>,
    /// Number of shortest paths.
    sigma: Vec<f64>,
}

fn sssp_bfs<N, D, M>(g: &BaseGraph<N, D, M>, s: NodeId) -> Sssp
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let n = g.node_bound();
    let mut stack = Vec::with_capacity(g.number_of_nodes());
    let mut pred = vec![vec![]; n];
    let mut sigma = vec![0.0; n];
    let mut dist: Vec<Option<usize>> = vec![None; n];

    sigma[s.index()] = 1.0;
    dist[s.index()] = Some(0);
    let mut queue = VecDeque::new();
    queue.push_back(s);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        let dv = dist[v.index()].unwrap_or(0);
        let sigmav = sigma[v.index()];
        for w in g.neighbor_ids(v) {
            if dist[w.index()].is_none() {
                queue.push_back(w);
                dist[w.index()] = Some(dv + 1);
            }
            if dist[w.index()] == Some(dv + 1) {
                sigma[w.index()] += sigmav;
                pred[w.index()].push(v);
            }
        }
    }

    Sssp { stack, pred, sigma }
}

fn sssp_dijkstra<N, D, M>(g: &BaseGraph<N, D, M>, s: NodeId, weight: &str) -> Result<Sssp>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let n = g.node_bound();
    let mut stack = Vec::with_capacity(g.number_of_nodes());
    let mut pred = vec![vec![]; n];
    let mut sigma = vec![0.0; n];
    let mut dist: Vec<Option<f64>> = vec![None; n];
    let mut seen: Vec<Option<f64>> = vec![None; n];
    let mut heap = BinaryHeap::new();
    let mut cnt = 0usize;

    sigma[s.index()] = 1.0;
    seen[s.index()] = Some(0.0);
    heap.push(Reverse((OrderedFloat(0.0), cnt, s, s)));

    while let Some(Reverse((OrderedFloat(d), _, p, v))) = heap.pop() {
        if dist[v.index()].is_some() {
            continue;
        }
        if p != v {
            sigma[v.index()] += sigma[p.index()];
        }
        stack.push(v);
        dist[v.index()] = Some(d);
        for (&w, es) in g.out_adj(v) {
            let vw_dist = d + g.min_weight(es, weight)?;
            let sw = seen[w.index()];
            if dist[w.index()].is_none() && sw.map_or(true, |sw| vw_dist < sw) {
                seen[w.index()] = Some(vw_dist);
                cnt += 1;
                heap.push(Reverse((OrderedFloat(vw_dist), cnt, v, w)));
                sigma[w.index()] = 0.0;
                pred[w.index()] = vec![v];
            } else if sw == Some(vw_dist) {
                sigma[w.index()] += sigma[v.index()];
                pred[w.index()].push(v);
            }
        }
    }

    Ok(Sssp { stack, pred, sigma })
}

fn sssp<N, D, M>(g: &BaseGraph<N, D, M>, s: NodeId, weight: Option<&str>) -> Result<Sssp>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    match weight {
        None => Ok(sssp_bfs(g, s)),
        Some(w) => sssp_dijkstra(g, s, w),
    }
}

/// Select the source nodes, all or `k` random ones.
fn sources<N, D, M>(g: &BaseGraph<N, D, M>, k: Option<usize>, seed: Option<u64>) -> Result<Vec<NodeId>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let nodes: Vec<NodeId> = g.node_ids().collect();
    match k {
        None => Ok(nodes),
        Some(k) if k > nodes.len() => Err(Error::PreconditionViolation(format!(
            "sample size {} larger than number of nodes {}",
            k,
            nodes.len()
        ))),
        Some(k) => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Ok(nodes.choose_multiple(&mut rng, k).copied().collect())
        }
    }
}

fn check<N, D, M>(g: &BaseGraph<N, D, M>, weight: Option<&str>) -> Result<()>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    match weight {
        Some(w) => check_weights(g, w, 0.0, true),
        None => Ok(()),
    }
}

/// Compute the betweenness centrality of all nodes.
///
/// Normalized values are divided by $(n-1)(n-2)$ for directed and by
/// $(n-1)(n-2)/2$ for undirected graphs. Unnormalized values of undirected
/// graphs count each pair of end points once.
///
/// Weighted betweenness requires all weights to be positive, otherwise
/// [`Error::PreconditionViolation`] is returned.
pub fn betweenness_centrality<N, D, M>(g: &BaseGraph<N, D, M>, params: &BetweennessParams) -> Result<HashMap<N, f64>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let weight = params.weight.as_deref();
    check(g, weight)?;
    let srcs = sources(g, params.k, params.seed)?;
    debug!(
        nodes = g.number_of_nodes(),
        sources = srcs.len(),
        weighted = weight.is_some(),
        endpoints = params.endpoints,
        "betweenness centrality"
    );

    let mut bc = vec![0.0; g.node_bound()];
    let mut delta = vec![0.0; g.node_bound()];
    for &s in &srcs {
        let Sssp { mut stack, pred, sigma } = sssp(g, s, weight)?;
        trace!(source = ?g.id2node(s), reached = stack.len(), "accumulate dependencies");
        if params.endpoints {
            bc[s.index()] += (stack.len() - 1) as f64;
        }
        for &v in &stack {
            delta[v.index()] = 0.0;
        }
        while let Some(w) = stack.pop() {
            let coeff = (1.0 + delta[w.index()]) / sigma[w.index()];
            for &v in &pred[w.index()] {
                delta[v.index()] += sigma[v.index()] * coeff;
            }
            if w != s {
                bc[w.index()] += delta[w.index()];
                if params.endpoints {
                    bc[w.index()] += 1.0;
                }
            }
        }
    }

    let n = g.number_of_nodes();
    let scale = if params.normalized {
        (n > 2).then(|| 1.0 / ((n - 1) * (n - 2)) as f64)
    } else if D::is_directed() {
        Some(1.0)
    } else {
        Some(0.5)
    };
    // tiny graphs keep their raw values, sampled or not
    let scale = match scale {
        Some(scale) if params.k.is_some() && !srcs.is_empty() => scale * n as f64 / srcs.len() as f64,
        Some(scale) => scale,
        None => 1.0,
    };

    Ok(g.node_ids().map(|u| (g.id2node(u).clone(), bc[u.index()] * scale)).collect())
}

/// Compute the betweenness centrality of all edges.
///
/// The keys of the result are the edges as reported by
/// [`BaseGraph::edges`], parallel edges share one entry. Normalized values
/// are divided by $n(n-1)$ for directed and by $n(n-1)/2$ for undirected
/// graphs.
///
/// # Example
///
/// ```
/// use rs_netgraph::{classes, Graph};
/// use rs_netgraph::centrality::{edge_betweenness_centrality, EdgeBetweennessParams};
///
/// let g: Graph<usize> = classes::path_graph(3);
/// let eb = edge_betweenness_centrality(&g, &EdgeBetweennessParams::default()).unwrap();
/// assert_eq!(eb[&(0, 1)], 2.0);
/// assert_eq!(eb[&(1, 2)], 2.0);
/// ```
pub fn edge_betweenness_centrality<N, D, M>(
    g: &BaseGraph<N, D, M>,
    params: &EdgeBetweennessParams,
) -> Result<HashMap<(N, N), f64>>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    let weight = params.weight.as_deref();
    check(g, weight)?;
    let srcs = sources(g, params.k, params.seed)?;
    debug!(
        nodes = g.number_of_nodes(),
        edges = g.number_of_edges(),
        sources = srcs.len(),
        weighted = weight.is_some(),
        "edge betweenness centrality"
    );

    let mut eb: HashMap<(NodeId, NodeId), f64> = g.edge_triples().map(|(u, v, _)| ((u, v), 0.0)).collect();
    let mut delta = vec![0.0; g.node_bound()];
    for &s in &srcs {
        let Sssp { mut stack, pred, sigma } = sssp(g, s, weight)?;
        for &v in &stack {
            delta[v.index()] = 0.0;
        }
        while let Some(w) = stack.pop() {
            let coeff = (1.0 + delta[w.index()]) / sigma[w.index()];
            for &v in &pred[w.index()] {
                let c = sigma[v.index()] * coeff;
                let key = if eb.contains_key(&(v, w)) { (v, w) } else { (w, v) };
                *eb.entry(key).or_insert(0.0) += c;
                delta[v.index()] += c;
            }
        }
    }

    let n = g.number_of_nodes();
    let scale = if params.normalized {
        (n > 1).then(|| 1.0 / (n * (n - 1)) as f64)
    } else if D::is_directed() {
        Some(1.0)
    } else {
        Some(0.5)
    };
    // tiny graphs keep their raw values, sampled or not
    let scale = match scale {
        Some(scale) if params.k.is_some() && !srcs.is_empty() => scale * n as f64 / srcs.len() as f64,
        Some(scale) => scale,
        None => 1.0,
    };

    Ok(eb
        .into_iter()
        .map(|((u, v), b)| ((g.id2node(u).clone(), g.id2node(v).clone()), b * scale))
        .collect())
}
