/*
 * Copyright (c) 2017-2023 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Operations specific to directed graphs.

use super::{BaseGraph, EdgeId, NodeId};
use crate::attributes::weight_of;
use crate::error::Result;
use crate::traits::{Directed, Multiplicity, NodeKey, Undirected};

use std::mem;

impl<N, M> BaseGraph<N, Directed, M>
where
    N: NodeKey,
    M: Multiplicity,
{
    /// Return the successors of a node.
    pub fn successors(&self, n: &N) -> Result<impl Iterator<Item = &N> + '_> {
        self.neighbors(n)
    }

    /// Return the predecessors of a node.
    pub fn predecessors(&self, n: &N) -> Result<impl Iterator<Item = &N> + '_> {
        let id = self.require(n)?;
        Ok(self.in_adj(id).keys().map(move |&u| self.id2node(u)))
    }

    /// Return the handles of the predecessors of a node.
    pub fn predecessor_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.in_adj(id).keys().copied()
    }

    /// Return `true` if `v` is a successor of `u`.
    pub fn has_successor(&self, u: &N, v: &N) -> bool {
        self.has_edge(u, v)
    }

    /// Return `true` if `v` is a predecessor of `u`.
    pub fn has_predecessor(&self, u: &N, v: &N) -> bool {
        self.has_edge(v, u)
    }

    pub fn in_degree(&self, n: &N) -> Result<usize> {
        let id = self.require(n)?;
        Ok(self.in_adj(id).values().map(Vec::len).sum())
    }

    pub fn out_degree(&self, n: &N) -> Result<usize> {
        let id = self.require(n)?;
        Ok(self.out_adj(id).values().map(Vec::len).sum())
    }

    fn weight_sum<'a, I>(&self, es: I, weight: &str) -> Result<f64>
    where
        I: Iterator<Item = &'a EdgeId>,
    {
        let mut sum = 0.0;
        for &e in es {
            sum += weight_of(&self.edge_data(e).attrs.borrow(), weight)?;
        }
        Ok(sum)
    }

    pub fn weighted_in_degree(&self, n: &N, weight: &str) -> Result<f64> {
        let id = self.require(n)?;
        self.weight_sum(self.in_adj(id).values().flatten(), weight)
    }

    pub fn weighted_out_degree(&self, n: &N, weight: &str) -> Result<f64> {
        let id = self.require(n)?;
        self.weight_sum(self.out_adj(id).values().flatten(), weight)
    }

    /// Return the edges `(u, v)` with `v` in `nbunch`.
    pub fn in_edges<'a, I>(&'a self, nbunch: I) -> Vec<(&'a N, &'a N)>
    where
        I: IntoIterator<Item = &'a N>,
    {
        let mut result = vec![];
        for v in self.nbunch_ids(nbunch) {
            for (&u, es) in self.in_adj(v) {
                result.extend(es.iter().map(|_| (self.id2node(u), self.id2node(v))));
            }
        }
        result
    }

    /// Return the edges `(u, v)` with `u` in `nbunch`.
    pub fn out_edges<'a, I>(&'a self, nbunch: I) -> Vec<(&'a N, &'a N)>
    where
        I: IntoIterator<Item = &'a N>,
    {
        self.edges_of(nbunch)
    }

    /// Return a copy of this graph with all edges reversed.
    pub fn reverse(&self) -> Self {
        let mut h = self.copy();
        h.flip();
        h
    }

    /// Reverse all edges of this graph.
    pub fn reverse_in_place(&mut self) -> Result<()> {
        self.check_mutable()?;
        self.flip();
        Ok(())
    }

    fn flip(&mut self) {
        for data in self.nodes.iter_mut().flatten() {
            mem::swap(&mut data.out, &mut data.inc);
        }
        for data in self.edges.iter_mut().flatten() {
            mem::swap(&mut data.src, &mut data.snk);
        }
    }

    /// Return an independent copy of this graph.
    pub fn to_directed(&self) -> Self {
        self.copy()
    }

    /// Return an undirected copy of this graph.
    ///
    /// If `reciprocal` is true, only edges that exist in both directions
    /// (with the same key for multigraphs) are kept.
    ///
    /// Otherwise the attributes of both orientations are merged into a
    /// single undirected edge. Edges are visited in node order, so for
    /// `(u, v)` and `(v, u)` with `u` inserted before `v` the values of
    /// `(v, u)` overwrite those of `(u, v)`. Attributes present in only one
    /// orientation are kept.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_netgraph::{DiGraph, attributes::attrs};
    /// use serde_json::json;
    ///
    /// let mut g = DiGraph::new();
    /// g.add_edge_with(1, 2, attrs(json!({"a": 1, "b": 1}))).unwrap();
    /// g.add_edge_with(2, 1, attrs(json!({"a": 2, "c": 2}))).unwrap();
    /// g.add_edge(2, 3).unwrap();
    ///
    /// let h = g.to_undirected(false);
    /// assert_eq!(h.number_of_edges(), 2);
    /// assert_eq!(*h.get_edge_data(&1, &2).unwrap().borrow(),
    ///            attrs(json!({"a": 2, "b": 1, "c": 2})));
    ///
    /// let r = g.to_undirected(true);
    /// assert_eq!(r.number_of_edges(), 1);
    /// assert!(r.has_node(&3));
    /// ```
    pub fn to_undirected(&self, reciprocal: bool) -> BaseGraph<N, Undirected, M> {
        let mut h = BaseGraph::<N, Undirected, M>::new();
        h.attrs = self.attrs.deep_copy();
        let mut map = vec![None; self.node_bound()];
        for id in self.node_ids() {
            let data = self.node_data(id);
            map[id.0] = Some(h.insert_node(data.key.clone(), data.attrs.deep_copy()));
        }
        for (u, v, e) in self.edge_triples() {
            let data = self.edge_data(e);
            if reciprocal && self.edge_with_key(v, u, &data.key).is_none() {
                continue;
            }
            if let (Some(nu), Some(nv)) = (map[u.0], map[v.0]) {
                match h.edge_with_key(nu, nv, &data.key) {
                    Some(f) => h.edge_data(f).attrs.update(&data.attrs.borrow()),
                    None => {
                        h.insert_edge(nu, nv, data.key.clone(), data.attrs.deep_copy());
                    }
                }
            }
        }
        h
    }
}
