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

//! Eigenvector centrality.
//!
//! The eigenvector centrality of the nodes is the eigenvector of the
//! largest eigenvalue of the (weighted) adjacency matrix. It is computed by
//! power iteration. In directed graphs the centrality of a node is
//! determined by its predecessors.
//!
//! Power iteration need not converge (e.g. on bipartite graphs), in this
//! case [`Error::AlgorithmError`] is returned after `max_iter` iterations.
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{classes, Graph};
//! use rs_netgraph::centrality::eigenvector_centrality;
//!
//! let g: Graph<usize> = classes::complete_graph(4);
//! let x = eigenvector_centrality(&g, &Default::default()).unwrap();
//! for u in 0..4 {
//!     assert!((x[&u] - 0.5).abs() < 1e-6);
//! }
//! ```

use crate::attributes::weight_of;
use crate::error::{Error, Result};
use crate::graph::BaseGraph;
use crate::traits::{EdgeType, Indexable, NodeKey, Simple};

use std::collections::HashMap;

use tracing::{debug, trace};

/// Options of [`eigenvector_centrality`].
#[derive(Clone, Debug)]
pub struct EigenvectorParams<N> {
    /// Maximal number of iterations.
    pub max_iter: usize,
    /// Convergence is reached if the total change of all values is below
    /// `n * tolerance`.
    pub tolerance: f64,
    /// Start vector, uniform if `None`. Missing nodes start with 0.
    pub nstart: Option<HashMap<N, f64>>,
    /// The edge attribute used as edge weight.
    pub weight: Option<String>,
}

impl<N> Default for EigenvectorParams<N> {
    fn default() -> Self {
        EigenvectorParams {
            max_iter: 100,
            tolerance: 1e-6,
            nstart: None,
            weight: None,
        }
    }
}

/// Compute the eigenvector centrality of all nodes.
///
/// The result is normalized to Euclidean length 1.
pub fn eigenvector_centrality<N, D>(
    g: &BaseGraph<N, D, Simple>,
    params: &EigenvectorParams<N>,
) -> Result<HashMap<N, f64>>
where
    N: NodeKey,
    D: EdgeType,
{
    let n = g.number_of_nodes();
    if n == 0 {
        return Err(Error::PreconditionViolation(
            "eigenvector centrality of the empty graph is undefined".to_string(),
        ));
    }

    let ids: Vec<_> = g.node_ids().collect();
    // pos[u] is the position of node u in `ids`
    let mut pos = vec![0; g.node_bound()];
    for (i, u) in ids.iter().enumerate() {
        pos[u.index()] = i;
    }
    let mut adj = Vec::with_capacity(n);
    for &u in &ids {
        let mut nbrs = Vec::with_capacity(g.out_adj(u).len());
        for (v, es) in g.out_adj(u) {
            let w = match params.weight.as_deref() {
                Some(weight) => weight_of(&g.edge_data(es[0]).attrs.borrow(), weight)?,
                None => 1.0,
            };
            nbrs.push((pos[v.index()], w));
        }
        adj.push(nbrs);
    }

    let mut x: Vec<f64> = match &params.nstart {
        None => vec![1.0 / n as f64; n],
        Some(nstart) => ids
            .iter()
            .map(|&u| nstart.get(g.id2node(u)).copied().unwrap_or(0.0))
            .collect(),
    };
    let total: f64 = x.iter().sum();
    if total == 0.0 {
        return Err(Error::PreconditionViolation(
            "start vector of eigenvector centrality must not sum to zero".to_string(),
        ));
    }
    for xi in x.iter_mut() {
        *xi /= total;
    }

    debug!(nodes = n, max_iter = params.max_iter, tolerance = params.tolerance, "eigenvector centrality");
    for iter in 0..params.max_iter {
        let xlast = x;
        x = vec![0.0; n];
        for (i, nbrs) in adj.iter().enumerate() {
            for &(j, w) in nbrs {
                x[j] += xlast[i] * w;
            }
        }
        let norm = x.iter().map(|xi| xi * xi).sum::<f64>().sqrt();
        let s = if norm == 0.0 { 1.0 } else { 1.0 / norm };
        for xi in x.iter_mut() {
            *xi *= s;
        }
        let err: f64 = x.iter().zip(&xlast).map(|(a, b)| (a - b).abs()).sum();
        trace!(iter, err, "power iteration");
        if err < n as f64 * params.tolerance {
            debug!(iterations = iter + 1, "eigenvector centrality converged");
            return Ok(ids.iter().zip(x).map(|(&u, xi)| (g.id2node(u).clone(), xi)).collect());
        }
    }

    Err(Error::AlgorithmError(format!(
        "power iteration failed to converge in {} iterations",
        params.max_iter
    )))
}
