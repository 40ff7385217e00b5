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

//! The attributed graph data structure.
//!
//! All four graph variants are instances of [`BaseGraph`], which is
//! parameterized by an edge type ([`Undirected`] or [`Directed`]) and a
//! multiplicity ([`Simple`] or [`Multi`]).
//!
//! Nodes are arbitrary hashable values. Internally every node is stored in
//! an arena and addressed by a [`NodeId`]. Handles are never reused, so the
//! order of node ids is the insertion order of the nodes. All iteration
//! orders of the graph (nodes, neighbors, edges) are derived from it, which
//! makes every algorithm in this crate deterministic for a fixed sequence
//! of insertions.
//!
//! # Example
//!
//! ```
//! use rs_netgraph::{Graph, attributes::attrs};
//! use serde_json::json;
//!
//! let mut g = Graph::new();
//! g.add_edge("a", "b").unwrap();
//! g.add_edge_with("b", "c", attrs(json!({"weight": 2}))).unwrap();
//!
//! assert_eq!(g.number_of_nodes(), 3);
//! assert_eq!(g.number_of_edges(), 2);
//! assert_eq!(g.degree(&"b").unwrap(), 2);
//! assert_eq!(g.weighted_degree(&"b", "weight").unwrap(), 3.0);
//! assert!(g.has_edge(&"c", &"b"));
//! ```

mod directed;
mod multi;

use crate::attributes::{weight_of, AttrMap, Attrs, EdgeKey, Value};
use crate::error::{Error, Result};
use crate::traits::{Directed, EdgeType, Indexable, Multi, Multiplicity, NodeKey, Simple, Undirected};

use std::collections::{BTreeMap, HashMap, HashSet};
use std::marker::PhantomData;

use tracing::trace;

/// Handle of a node in a graph.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

impl Indexable for NodeId {
    fn index(&self) -> usize {
        self.0
    }
}

/// Handle of an edge in a graph.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub(crate) struct EdgeId(usize);

impl Indexable for EdgeId {
    fn index(&self) -> usize {
        self.0
    }
}

/// Adjacent nodes of some node with the edges leading to them.
pub(crate) type Adjacency = BTreeMap<NodeId, Vec<EdgeId>>;

#[derive(Debug)]
struct NodeData<N> {
    key: N,
    attrs: Attrs,
    /// Neighbors (undirected) or successors (directed).
    out: Adjacency,
    /// Predecessors, only used by directed graphs.
    inc: Adjacency,
}

#[derive(Debug)]
pub(crate) struct EdgeData {
    pub(crate) src: NodeId,
    pub(crate) snk: NodeId,
    pub(crate) key: EdgeKey,
    pub(crate) attrs: Attrs,
}

/// An attributed graph.
///
/// Undirected edges are stored once and are visible from both end
/// points. A self-loop is visible once in the adjacency of its node (for
/// directed graphs once in the successors and once in the predecessors).
#[derive(Debug)]
pub struct BaseGraph<N, D = Undirected, M = Simple> {
    nodes: Vec<Option<NodeData<N>>>,
    index: HashMap<N, NodeId>,
    edges: Vec<Option<EdgeData>>,
    nnodes: usize,
    nedges: usize,
    attrs: Attrs,
    frozen: bool,
    phantom: PhantomData<(D, M)>,
}

/// An undirected graph without parallel edges.
pub type Graph<N> = BaseGraph<N, Undirected, Simple>;
/// A directed graph without parallel edges.
pub type DiGraph<N> = BaseGraph<N, Directed, Simple>;
/// An undirected graph with parallel edges.
pub type MultiGraph<N> = BaseGraph<N, Undirected, Multi>;
/// A directed graph with parallel edges.
pub type MultiDiGraph<N> = BaseGraph<N, Directed, Multi>;

impl<N, D, M> Default for BaseGraph<N, D, M>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    fn default() -> Self {
        Self::new()
    }
}

fn detach(adj: &mut Adjacency, v: NodeId, e: EdgeId) {
    if let Some(es) = adj.get_mut(&v) {
        es.retain(|&x| x != e);
        if es.is_empty() {
            adj.remove(&v);
        }
    }
}

impl<N, D, M> BaseGraph<N, D, M>
where
    N: NodeKey,
    D: EdgeType,
    M: Multiplicity,
{
    /// Create a new empty graph.
    pub fn new() -> Self {
        BaseGraph {
            nodes: vec![],
            index: HashMap::new(),
            edges: vec![],
            nnodes: 0,
            nedges: 0,
            attrs: Attrs::default(),
            frozen: false,
            phantom: PhantomData,
        }
    }

    /// Create a new empty graph with the given graph attributes.
    pub fn with_attrs(attrs: AttrMap) -> Self {
        let mut g = Self::new();
        g.attrs = Attrs::new(attrs);
        g
    }

    /// Return `true` if the edges of this graph are directed.
    pub fn is_directed(&self) -> bool {
        D::is_directed()
    }

    /// Return `true` if this graph may contain parallel edges.
    pub fn is_multigraph(&self) -> bool {
        M::is_multi()
    }

    /// Return the graph attributes.
    pub fn graph_attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Return the value of the graph attribute `name` (or the empty string).
    pub fn name(&self) -> String {
        self.attrs
            .get("name")
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_default()
    }

    /// Set the graph attribute `name`.
    ///
    /// This is an attribute change, so it is allowed on frozen graphs.
    pub fn set_name(&mut self, name: &str) {
        self.attrs.borrow_mut().insert("name".to_string(), Value::from(name));
    }

    /// Make the structure of this graph immutable.
    ///
    /// There is no way to unfreeze a graph, but [`copy`](Self::copy)
    /// returns a mutable copy.
    pub fn freeze(&mut self) {
        trace!(nodes = self.nnodes, edges = self.nedges, "freeze graph");
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn check_mutable(&self) -> Result<()> {
        if self.frozen {
            Err(Error::frozen())
        } else {
            Ok(())
        }
    }

    /// Return the handle of a node.
    pub fn node_id(&self, n: &N) -> Option<NodeId> {
        self.index.get(n).copied()
    }

    /// Return the node with the given handle.
    ///
    /// # Panics
    ///
    /// If `id` is not a handle of a node of this graph.
    pub fn id2node(&self, id: NodeId) -> &N {
        &self.node_data(id).key
    }

    /// Return an upper bound on the indices of the node handles.
    ///
    /// This is useful for storing per-node data in vectors.
    pub fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    /// Return an iterator over the handles of all nodes in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| NodeId(i))
    }

    /// Return an iterator over the handles of the neighbors of a node.
    ///
    /// For directed graphs these are the successors.
    pub fn neighbor_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_adj(id).keys().copied()
    }

    fn node_data(&self, id: NodeId) -> &NodeData<N> {
        match self.nodes.get(id.0) {
            Some(Some(data)) => data,
            _ => panic!("invalid node handle {:?}", id),
        }
    }

    fn node_data_mut(&mut self, id: NodeId) -> &mut NodeData<N> {
        match self.nodes.get_mut(id.0) {
            Some(Some(data)) => data,
            _ => panic!("invalid node handle {:?}", id),
        }
    }

    pub(crate) fn require(&self, n: &N) -> Result<NodeId> {
        self.node_id(n).ok_or_else(|| Error::node_not_found(n))
    }

    /// Neighbors (undirected) or successors (directed) of a node.
    pub(crate) fn out_adj(&self, id: NodeId) -> &Adjacency {
        &self.node_data(id).out
    }

    /// Neighbors (undirected) or predecessors (directed) of a node.
    pub(crate) fn in_adj(&self, id: NodeId) -> &Adjacency {
        let data = self.node_data(id);
        if D::is_directed() {
            &data.inc
        } else {
            &data.out
        }
    }

    pub(crate) fn edge_data(&self, e: EdgeId) -> &EdgeData {
        match self.edges.get(e.0) {
            Some(Some(data)) => data,
            _ => panic!("invalid edge handle {:?}", e),
        }
    }

    /// Return all edges as `(u, v, e)`.
    ///
    /// Edges are ordered by `u`, then by `v`, then by insertion. Undirected
    /// edges are reported once, from the end point that comes first.
    pub(crate) fn edge_triples(&self) -> impl Iterator<Item = (NodeId, NodeId, EdgeId)> + '_ {
        self.node_ids().flat_map(move |u| {
            self.out_adj(u)
                .iter()
                .filter(move |(v, _)| D::is_directed() || **v >= u)
                .flat_map(move |(&v, es)| es.iter().map(move |&e| (u, v, e)))
        })
    }

    /// Return the edge from `u` to `v` with the given key.
    pub(crate) fn edge_with_key(&self, u: NodeId, v: NodeId, key: &EdgeKey) -> Option<EdgeId> {
        self.out_adj(u)
            .get(&v)
            .and_then(|es| es.iter().copied().find(|&e| self.edge_data(e).key == *key))
    }

    /// The minimal weight of a set of parallel edges.
    pub(crate) fn min_weight(&self, es: &[EdgeId], weight: &str) -> Result<f64> {
        let mut w = f64::INFINITY;
        for &e in es {
            w = w.min(weight_of(&self.edge_data(e).attrs.borrow(), weight)?);
        }
        Ok(w)
    }

    /// Handles of the nodes of `nbunch` that are in the graph.
    ///
    /// Duplicates are removed, the order of first occurrence is kept.
    pub(crate) fn nbunch_ids<'a, I>(&self, nbunch: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        let mut seen = HashSet::new();
        nbunch
            .into_iter()
            .filter_map(|n| self.node_id(n))
            .filter(|&id| seen.insert(id))
            .collect()
    }

    pub(crate) fn ensure_node(&mut self, n: N) -> NodeId {
        if let Some(&id) = self.index.get(&n) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(NodeData {
            key: n.clone(),
            attrs: Attrs::default(),
            out: Adjacency::new(),
            inc: Adjacency::new(),
        }));
        self.index.insert(n, id);
        self.nnodes += 1;
        id
    }

    /// Add a node with the given attribute storage, replacing the storage
    /// of an existing node.
    pub(crate) fn insert_node(&mut self, n: N, attrs: Attrs) -> NodeId {
        let id = self.ensure_node(n);
        self.node_data_mut(id).attrs = attrs;
        id
    }

    /// Add a new edge without any checks.
    pub(crate) fn insert_edge(&mut self, u: NodeId, v: NodeId, key: EdgeKey, attrs: Attrs) -> EdgeId {
        let e = EdgeId(self.edges.len());
        self.edges.push(Some(EdgeData {
            src: u,
            snk: v,
            key,
            attrs,
        }));
        self.node_data_mut(u).out.entry(v).or_default().push(e);
        if D::is_directed() {
            self.node_data_mut(v).inc.entry(u).or_default().push(e);
        } else if u != v {
            self.node_data_mut(v).out.entry(u).or_default().push(e);
        }
        self.nedges += 1;
        e
    }

    fn unlink_edge(&mut self, e: EdgeId) {
        let data = match self.edges.get_mut(e.0).and_then(Option::take) {
            Some(data) => data,
            None => return,
        };
        let (u, v) = (data.src, data.snk);
        detach(&mut self.node_data_mut(u).out, v, e);
        if D::is_directed() {
            detach(&mut self.node_data_mut(v).inc, u, e);
        } else if u != v {
            detach(&mut self.node_data_mut(v).out, u, e);
        }
        self.nedges -= 1;
    }

    /// The smallest unused integer key for edges from `u` to `v`.
    pub(crate) fn next_key(&self, u: NodeId, v: NodeId) -> EdgeKey {
        if !M::is_multi() {
            return EdgeKey::Int(0);
        }
        let used: HashSet<usize> = self
            .out_adj(u)
            .get(&v)
            .into_iter()
            .flatten()
            .filter_map(|&e| match self.edge_data(e).key {
                EdgeKey::Int(i) => Some(i),
                EdgeKey::Name(_) => None,
            })
            .collect();
        EdgeKey::Int((0..).find(|i| !used.contains(i)).unwrap_or(0))
    }

    /// Add a node.
    ///
    /// Adding an existing node does nothing.
    pub fn add_node(&mut self, n: N) -> Result<()> {
        self.add_node_with(n, AttrMap::new())
    }

    /// Add a node with attributes.
    ///
    /// If the node exists, its attributes are updated.
    pub fn add_node_with(&mut self, n: N, attrs: AttrMap) -> Result<()> {
        self.check_mutable()?;
        let id = self.ensure_node(n);
        self.node_data(id).attrs.update(&attrs);
        Ok(())
    }

    pub fn add_nodes_from<I>(&mut self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = N>,
    {
        self.check_mutable()?;
        for n in nodes {
            self.ensure_node(n);
        }
        Ok(())
    }

    pub fn add_nodes_from_with<I>(&mut self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, AttrMap)>,
    {
        self.check_mutable()?;
        for (n, attrs) in nodes {
            let id = self.ensure_node(n);
            self.node_data(id).attrs.update(&attrs);
        }
        Ok(())
    }

    /// Remove a node and all its incident edges.
    pub fn remove_node(&mut self, n: &N) -> Result<()> {
        self.check_mutable()?;
        let id = self.require(n)?;
        let data = self.node_data(id);
        let mut es: Vec<EdgeId> = data.out.values().chain(data.inc.values()).flatten().copied().collect();
        es.sort_unstable();
        es.dedup();
        for e in es {
            self.unlink_edge(e);
        }
        if let Some(data) = self.nodes[id.0].take() {
            self.index.remove(&data.key);
        }
        self.nnodes -= 1;
        Ok(())
    }

    /// Remove several nodes, nodes not in the graph are ignored.
    pub fn remove_nodes_from<'a, I>(&mut self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        self.check_mutable()?;
        for n in nodes {
            if self.has_node(n) {
                self.remove_node(n)?;
            }
        }
        Ok(())
    }

    pub fn has_node(&self, n: &N) -> bool {
        self.index.contains_key(n)
    }

    /// Same as [`has_node`](Self::has_node).
    pub fn contains_node(&self, n: &N) -> bool {
        self.has_node(n)
    }

    /// Return an iterator over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.iter().flatten().map(|data| &data.key)
    }

    pub fn nodes_with_data(&self) -> impl Iterator<Item = (&N, &Attrs)> + '_ {
        self.nodes.iter().flatten().map(|data| (&data.key, &data.attrs))
    }

    pub fn node_attrs(&self, n: &N) -> Option<&Attrs> {
        self.node_id(n).map(|id| &self.node_data(id).attrs)
    }

    pub fn number_of_nodes(&self) -> usize {
        self.nnodes
    }

    /// Same as [`number_of_nodes`](Self::number_of_nodes).
    pub fn order(&self) -> usize {
        self.nnodes
    }

    /// Return the nodes of `nbunch` that are contained in the graph.
    pub fn nbunch_iter<'a, I>(&'a self, nbunch: I) -> impl Iterator<Item = &'a N> + 'a
    where
        I: IntoIterator<Item = &'a N>,
        I::IntoIter: 'a,
    {
        nbunch
            .into_iter()
            .filter_map(move |n| self.node_id(n))
            .map(move |id| self.id2node(id))
    }

    /// Return the neighbors of a node.
    ///
    /// For directed graphs these are the successors.
    pub fn neighbors(&self, n: &N) -> Result<impl Iterator<Item = &N> + '_> {
        let id = self.require(n)?;
        Ok(self.out_adj(id).keys().map(move |&v| self.id2node(v)))
    }

    /// Add an edge, inserting missing end points.
    ///
    /// In a simple graph adding an existing edge does nothing. In a
    /// multigraph a new parallel edge is added.
    pub fn add_edge(&mut self, u: N, v: N) -> Result<()> {
        self.add_edge_with(u, v, AttrMap::new())
    }

    /// Add an edge with attributes, inserting missing end points.
    ///
    /// In a simple graph the attributes of an existing edge are updated,
    /// new values overwrite old ones. In a multigraph a new parallel edge
    /// with the smallest unused integer key is added.
    pub fn add_edge_with(&mut self, u: N, v: N, attrs: AttrMap) -> Result<()> {
        self.check_mutable()?;
        self.put_edge(u, v, attrs);
        Ok(())
    }

    /// Add an edge ignoring the frozen flag.
    pub(crate) fn put_edge(&mut self, u: N, v: N, attrs: AttrMap) {
        let uid = self.ensure_node(u);
        let vid = self.ensure_node(v);
        if !M::is_multi() {
            let existing = self.out_adj(uid).get(&vid).and_then(|es| es.first()).copied();
            if let Some(e) = existing {
                self.edge_data(e).attrs.update(&attrs);
                return;
            }
        }
        let key = self.next_key(uid, vid);
        self.insert_edge(uid, vid, key, Attrs::new(attrs));
    }

    pub fn add_edges_from<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        self.check_mutable()?;
        for (u, v) in edges {
            self.add_edge(u, v)?;
        }
        Ok(())
    }

    pub fn add_edges_from_with<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, N, AttrMap)>,
    {
        self.check_mutable()?;
        for (u, v, attrs) in edges {
            self.add_edge_with(u, v, attrs)?;
        }
        Ok(())
    }

    /// Add edges `(u, v, w)` storing `w` in the attribute `weight`.
    pub fn add_weighted_edges_from<I>(&mut self, weight: &str, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, N, f64)>,
    {
        self.check_mutable()?;
        for (u, v, w) in edges {
            let mut attrs = AttrMap::new();
            attrs.insert(weight.to_string(), Value::from(w));
            self.add_edge_with(u, v, attrs)?;
        }
        Ok(())
    }

    /// Add the nodes and an edge between each pair of consecutive nodes.
    pub fn add_path<I>(&mut self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = N>,
    {
        self.check_mutable()?;
        let nodes: Vec<N> = nodes.into_iter().collect();
        self.add_nodes_from(nodes.iter().cloned())?;
        for w in nodes.windows(2) {
            self.add_edge(w[0].clone(), w[1].clone())?;
        }
        Ok(())
    }

    /// Add a path and an edge from its last to its first node.
    pub fn add_cycle<I>(&mut self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = N>,
    {
        self.check_mutable()?;
        let nodes: Vec<N> = nodes.into_iter().collect();
        self.add_path(nodes.iter().cloned())?;
        if let (Some(first), Some(last)) = (nodes.first(), nodes.last()) {
            if nodes.len() > 1 {
                self.add_edge(last.clone(), first.clone())?;
            }
        }
        Ok(())
    }

    /// Add edges from the first node to all other nodes.
    pub fn add_star<I>(&mut self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = N>,
    {
        self.check_mutable()?;
        let mut nodes = nodes.into_iter();
        if let Some(center) = nodes.next() {
            self.ensure_node(center.clone());
            for v in nodes {
                self.add_edge(center.clone(), v)?;
            }
        }
        Ok(())
    }

    fn edge_ids_between(&self, u: &N, v: &N) -> Option<&[EdgeId]> {
        let uid = self.node_id(u)?;
        let vid = self.node_id(v)?;
        self.out_adj(uid).get(&vid).map(Vec::as_slice)
    }

    /// Remove the edge between `u` and `v`.
    ///
    /// In a multigraph the most recently added parallel edge is removed.
    pub fn remove_edge(&mut self, u: &N, v: &N) -> Result<()> {
        self.check_mutable()?;
        let e = self
            .edge_ids_between(u, v)
            .and_then(|es| es.last().copied())
            .ok_or_else(|| Error::NotFound(format!("edge {:?}-{:?} is not in the graph", u, v)))?;
        self.unlink_edge(e);
        Ok(())
    }

    /// Remove several edges, edges not in the graph are ignored.
    pub fn remove_edges_from<'a, I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a N, &'a N)>,
        N: 'a,
    {
        self.check_mutable()?;
        for (u, v) in edges {
            if self.has_edge(u, v) {
                self.remove_edge(u, v)?;
            }
        }
        Ok(())
    }

    /// Return `true` if there is an edge from `u` to `v`.
    pub fn has_edge(&self, u: &N, v: &N) -> bool {
        self.edge_ids_between(u, v).is_some()
    }

    /// Return the attributes of the edge between `u` and `v`.
    ///
    /// In a multigraph these are the attributes of the first of the
    /// parallel edges.
    pub fn get_edge_data(&self, u: &N, v: &N) -> Option<&Attrs> {
        self.edge_ids_between(u, v)
            .and_then(|es| es.first())
            .map(|&e| &self.edge_data(e).attrs)
    }

    /// Return an iterator over all edges.
    ///
    /// Undirected edges are reported once. Parallel edges are reported
    /// separately.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.edge_triples().map(move |(u, v, _)| (self.id2node(u), self.id2node(v)))
    }

    pub fn edges_with_data(&self) -> impl Iterator<Item = (&N, &N, &Attrs)> + '_ {
        self.edge_triples()
            .map(move |(u, v, e)| (self.id2node(u), self.id2node(v), &self.edge_data(e).attrs))
    }

    /// Return the edges incident to the nodes in `nbunch`.
    ///
    /// For directed graphs these are the outgoing edges.
    pub fn edges_of<'a, I>(&'a self, nbunch: I) -> Vec<(&'a N, &'a N)>
    where
        I: IntoIterator<Item = &'a N>,
    {
        let mut seen = HashSet::new();
        let mut result = vec![];
        for u in self.nbunch_ids(nbunch) {
            for (v, es) in self.out_adj(u) {
                if D::is_directed() || !seen.contains(v) {
                    for _ in es {
                        result.push((self.id2node(u), self.id2node(*v)));
                    }
                }
            }
            seen.insert(u);
        }
        result
    }

    pub fn number_of_edges(&self) -> usize {
        self.nedges
    }

    /// Return the number of edges from `u` to `v`.
    pub fn number_of_edges_between(&self, u: &N, v: &N) -> usize {
        self.edge_ids_between(u, v).map_or(0, <[EdgeId]>::len)
    }

    /// Return the number of edges or the total weight of all edges.
    pub fn size(&self, weight: Option<&str>) -> Result<f64> {
        match weight {
            None => Ok(self.nedges as f64),
            Some(weight) => {
                let mut total = 0.0;
                for (_, _, e) in self.edge_triples() {
                    total += weight_of(&self.edge_data(e).attrs.borrow(), weight)?;
                }
                Ok(total)
            }
        }
    }

    /// Sum of `f(e)` over the incident edges of a node.
    ///
    /// Undirected self-loops are counted twice.
    fn incident_sum<F>(&self, id: NodeId, mut f: F) -> Result<f64>
    where
        F: FnMut(EdgeId) -> Result<f64>,
    {
        let data = self.node_data(id);
        let mut sum = 0.0;
        for (&v, es) in &data.out {
            for &e in es {
                let x = f(e)?;
                sum += if v == id && !D::is_directed() { 2.0 * x } else { x };
            }
        }
        if D::is_directed() {
            for &e in data.inc.values().flatten() {
                sum += f(e)?;
            }
        }
        Ok(sum)
    }

    pub(crate) fn degree_of(&self, id: NodeId) -> usize {
        let data = self.node_data(id);
        let mut deg = 0;
        for (&v, es) in &data.out {
            deg += es.len();
            if v == id && !D::is_directed() {
                deg += es.len();
            }
        }
        if D::is_directed() {
            deg += data.inc.values().map(Vec::len).sum::<usize>();
        }
        deg
    }

    /// Return the number of incident edges of a node.
    ///
    /// Undirected self-loops are counted twice, directed graphs count
    /// incoming and outgoing edges.
    pub fn degree(&self, n: &N) -> Result<usize> {
        self.require(n).map(|id| self.degree_of(id))
    }

    /// Return the sum of the weights of the incident edges of a node.
    ///
    /// Edges without the attribute `weight` have weight 1.
    pub fn weighted_degree(&self, n: &N, weight: &str) -> Result<f64> {
        let id = self.require(n)?;
        self.incident_sum(id, |e| weight_of(&self.edge_data(e).attrs.borrow(), weight))
    }

    /// Return the degrees of all nodes.
    pub fn degrees(&self) -> impl Iterator<Item = (&N, usize)> + '_ {
        self.node_ids().map(move |id| (self.id2node(id), self.degree_of(id)))
    }

    /// Return the (possibly weighted) degrees of the nodes in `nbunch`.
    pub fn degrees_of<'a, I>(&'a self, nbunch: I, weight: Option<&str>) -> Result<Vec<(&'a N, f64)>>
    where
        I: IntoIterator<Item = &'a N>,
    {
        let mut result = vec![];
        for id in self.nbunch_ids(nbunch) {
            let deg = match weight {
                None => self.degree_of(id) as f64,
                Some(w) => self.incident_sum(id, |e| weight_of(&self.edge_data(e).attrs.borrow(), w))?,
            };
            result.push((self.id2node(id), deg));
        }
        Ok(result)
    }

    pub fn nodes_with_selfloops(&self) -> Vec<&N> {
        self.node_ids()
            .filter(|&id| self.out_adj(id).contains_key(&id))
            .map(|id| self.id2node(id))
            .collect()
    }

    pub fn selfloop_edges(&self) -> Vec<(&N, &N)> {
        self.edge_triples()
            .filter(|(u, v, _)| u == v)
            .map(|(u, v, _)| (self.id2node(u), self.id2node(v)))
            .collect()
    }

    pub fn number_of_selfloops(&self) -> usize {
        self.edge_triples().filter(|(u, v, _)| u == v).count()
    }

    /// Build a graph on the given nodes and all edges of this graph
    /// between them.
    ///
    /// If `deep` is false the attribute storage is shared.
    fn induced<D2, M2>(&self, ids: &[NodeId], deep: bool) -> BaseGraph<N, D2, M2>
    where
        D2: EdgeType,
        M2: Multiplicity,
    {
        let share = |a: &Attrs| if deep { a.deep_copy() } else { a.clone() };
        let mut h = BaseGraph::<N, D2, M2>::new();
        h.attrs = share(&self.attrs);
        let mut map = vec![None; self.node_bound()];
        for &id in ids {
            let data = self.node_data(id);
            map[id.0] = Some(h.insert_node(data.key.clone(), share(&data.attrs)));
        }
        for (u, v, e) in self.edge_triples() {
            if let (Some(nu), Some(nv)) = (map[u.0], map[v.0]) {
                let data = self.edge_data(e);
                h.insert_edge(nu, nv, data.key.clone(), share(&data.attrs));
            }
        }
        h
    }

    /// Return the subgraph induced by the nodes in `nbunch`.
    ///
    /// The subgraph has its own structure but shares the graph, node and
    /// edge attributes with this graph.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_netgraph::Graph;
    /// use serde_json::json;
    ///
    /// let mut g = Graph::new();
    /// g.add_path(0..4).unwrap();
    /// let mut h = g.subgraph(&[1, 2]);
    /// assert_eq!(h.number_of_edges(), 1);
    ///
    /// h.get_edge_data(&1, &2).unwrap().borrow_mut().insert("color".into(), json!("red"));
    /// assert_eq!(g.get_edge_data(&2, &1).unwrap().get("color"), Some(json!("red")));
    ///
    /// h.remove_node(&1).unwrap();
    /// assert!(g.has_node(&1));
    /// ```
    pub fn subgraph<'a, I>(&self, nbunch: I) -> Self
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        let ids = self.nbunch_ids(nbunch);
        self.induced(&ids, false)
    }

    /// Return an independent copy of this graph.
    ///
    /// The copy is never frozen.
    pub fn copy(&self) -> Self {
        let ids: Vec<_> = self.node_ids().collect();
        self.induced(&ids, true)
    }

    /// Add a node or merge `attrs` into the attributes of an existing node.
    pub(crate) fn merge_node(&mut self, n: N, attrs: Attrs) -> NodeId {
        if let Some(id) = self.node_id(&n) {
            let old = &self.node_data(id).attrs;
            if !old.ptr_eq(&attrs) {
                old.update(&attrs.borrow());
            }
            return id;
        }
        self.insert_node(n, attrs)
    }

    /// Add an edge or merge `attrs` into the attributes of an existing edge.
    ///
    /// In a multigraph only an edge with the same key is merged, in a
    /// simple graph the key is ignored.
    pub(crate) fn merge_edge(&mut self, u: NodeId, v: NodeId, key: EdgeKey, attrs: Attrs) -> EdgeId {
        let existing = if M::is_multi() {
            self.edge_with_key(u, v, &key)
        } else {
            self.out_adj(u).get(&v).and_then(|es| es.first()).copied()
        };
        match existing {
            Some(e) => {
                let old = &self.edge_data(e).attrs;
                if !old.ptr_eq(&attrs) {
                    old.update(&attrs.borrow());
                }
                e
            }
            None if M::is_multi() => self.insert_edge(u, v, key, attrs),
            None => self.insert_edge(u, v, EdgeKey::Int(0), attrs),
        }
    }

    /// Return a copy with every node `n` renamed to `f(n)`.
    ///
    /// Nodes mapped to the same name are merged, as are edges that become
    /// parallel in a simple graph. If `deep` is false the attribute storage
    /// is shared.
    pub(crate) fn relabeled<N2, F>(&self, mut f: F, deep: bool) -> BaseGraph<N2, D, M>
    where
        N2: NodeKey,
        F: FnMut(&N) -> N2,
    {
        let share = |a: &Attrs| if deep { a.deep_copy() } else { a.clone() };
        let mut h = BaseGraph::<N2, D, M>::new();
        h.attrs = share(&self.attrs);
        let mut map = vec![None; self.node_bound()];
        for id in self.node_ids() {
            let data = self.node_data(id);
            map[id.0] = Some(h.merge_node(f(&data.key), share(&data.attrs)));
        }
        for (u, v, e) in self.edge_triples() {
            if let (Some(nu), Some(nv)) = (map[u.0], map[v.0]) {
                let data = self.edge_data(e);
                h.merge_edge(nu, nv, data.key.clone(), share(&data.attrs));
            }
        }
        h
    }

    /// Remove all nodes, edges and graph attributes.
    pub fn clear(&mut self) -> Result<()> {
        self.check_mutable()?;
        trace!(nodes = self.nnodes, edges = self.nedges, "clear graph");
        self.attrs.borrow_mut().clear();
        self.nodes.clear();
        self.index.clear();
        self.edges.clear();
        self.nnodes = 0;
        self.nedges = 0;
        Ok(())
    }
}

impl<N, M> BaseGraph<N, Undirected, M>
where
    N: NodeKey,
    M: Multiplicity,
{
    /// Return a directed copy with both orientations of every edge.
    ///
    /// Each orientation receives its own copy of the edge attributes.
    pub fn to_directed(&self) -> BaseGraph<N, Directed, M> {
        let mut h = BaseGraph::<N, Directed, M>::new();
        h.attrs = self.attrs.deep_copy();
        let mut map = vec![None; self.node_bound()];
        for id in self.node_ids() {
            let data = self.node_data(id);
            map[id.0] = Some(h.insert_node(data.key.clone(), data.attrs.deep_copy()));
        }
        for (u, v, e) in self.edge_triples() {
            if let (Some(nu), Some(nv)) = (map[u.0], map[v.0]) {
                let data = self.edge_data(e);
                h.insert_edge(nu, nv, data.key.clone(), data.attrs.deep_copy());
                if u != v {
                    h.insert_edge(nv, nu, data.key.clone(), data.attrs.deep_copy());
                }
            }
        }
        h
    }

    /// Return an independent copy of this graph.
    pub fn to_undirected(&self) -> Self {
        self.copy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::attrs;
    use serde_json::json;

    #[test]
    fn test_add_remove() {
        let mut g = Graph::new();
        g.add_edges_from(vec![(1, 2), (2, 3), (3, 1)]).unwrap();
        g.add_node(4).unwrap();
        assert_eq!(g.nodes().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(g.number_of_edges(), 3);
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(&1, &2), (&1, &3), (&2, &3)]);

        g.remove_node(&2).unwrap();
        assert_eq!(g.number_of_nodes(), 3);
        assert_eq!(g.number_of_edges(), 1);
        assert!(!g.has_edge(&1, &2));
        assert!(g.has_edge(&3, &1));
        assert_eq!(g.remove_node(&2), Err(Error::node_not_found(&2)));
        assert!(matches!(g.remove_edge(&1, &4), Err(Error::NotFound(_))));

        g.remove_nodes_from(&[1, 7]).unwrap();
        assert_eq!(g.nodes().copied().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn test_idempotent() {
        let mut g = Graph::new();
        g.add_edge_with(1, 2, attrs(json!({"w": 1}))).unwrap();
        g.add_edge_with(1, 2, attrs(json!({"w": 1}))).unwrap();
        g.add_node(1).unwrap();
        assert_eq!(g.number_of_nodes(), 2);
        assert_eq!(g.number_of_edges(), 1);
        assert_eq!(*g.get_edge_data(&2, &1).unwrap().borrow(), attrs(json!({"w": 1})));

        g.add_edge_with(2, 1, attrs(json!({"c": "x"}))).unwrap();
        assert_eq!(*g.get_edge_data(&1, &2).unwrap().borrow(), attrs(json!({"w": 1, "c": "x"})));
    }

    #[test]
    fn test_degree_sum() {
        let mut g = Graph::new();
        g.add_edges_from(vec![(0, 1), (1, 2), (2, 2), (2, 3), (3, 0)]).unwrap();
        assert_eq!(g.degree(&2), Ok(4));
        let total: usize = g.degrees().map(|(_, d)| d).sum();
        assert_eq!(total, 2 * g.number_of_edges());
        assert_eq!(g.nodes_with_selfloops(), vec![&2]);
        assert_eq!(g.selfloop_edges(), vec![(&2, &2)]);
        assert_eq!(
            g.degrees_of(&[2, 9], Some("weight")).unwrap(),
            vec![(&2, 4.0)]
        );
    }

    #[test]
    fn test_frozen() {
        let mut g = Graph::new();
        g.add_edge(1, 2).unwrap();
        g.freeze();
        assert!(g.is_frozen());
        assert_eq!(g.add_node(3), Err(Error::frozen()));
        assert_eq!(g.add_edge(1, 3), Err(Error::frozen()));
        assert_eq!(g.remove_node(&1), Err(Error::frozen()));
        assert_eq!(g.clear(), Err(Error::frozen()));
        g.node_attrs(&1).unwrap().borrow_mut().insert("x".into(), json!(1));
        g.set_name("frozen");
        assert_eq!(g.name(), "frozen");

        let mut h = g.copy();
        assert!(!h.is_frozen());
        h.add_node(3).unwrap();
        assert_eq!(g.number_of_nodes(), 2);
    }

    #[test]
    fn test_copy_is_deep() {
        let mut g = Graph::with_attrs(attrs(json!({"name": "g"})));
        g.add_edge_with(1, 2, attrs(json!({"w": 1}))).unwrap();
        let h = g.copy();
        h.get_edge_data(&1, &2).unwrap().borrow_mut().insert("w".into(), json!(5));
        h.graph_attrs().borrow_mut().insert("name".into(), json!("h"));
        assert_eq!(g.get_edge_data(&1, &2).unwrap().get("w"), Some(json!(1)));
        assert_eq!(g.name(), "g");
    }

    #[test]
    fn test_subgraph_shares_attrs() {
        let mut g = Graph::new();
        g.add_node_with(1, attrs(json!({"c": 0}))).unwrap();
        g.add_path(vec![1, 2, 3]).unwrap();
        let h = g.subgraph(&[3, 2, 5]);
        assert_eq!(h.nodes().copied().collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(h.number_of_edges(), 1);
        h.graph_attrs().borrow_mut().insert("name".into(), json!("sub"));
        assert_eq!(g.name(), "sub");

        let h = g.subgraph(&[1]);
        h.node_attrs(&1).unwrap().borrow_mut().insert("c".into(), json!(1));
        assert_eq!(g.node_attrs(&1).unwrap().get("c"), Some(json!(1)));
    }

    #[test]
    fn test_clear() {
        let mut g = Graph::new();
        g.set_name("x");
        g.add_cycle(0..3).unwrap();
        g.clear().unwrap();
        assert_eq!(g.number_of_nodes(), 0);
        assert_eq!(g.number_of_edges(), 0);
        assert_eq!(g.name(), "");
    }

    #[test]
    fn test_to_directed() {
        let mut g = Graph::new();
        g.add_edge_with(1, 2, attrs(json!({"w": 3}))).unwrap();
        g.add_edge(2, 2).unwrap();
        g.remove_node(&1).unwrap();
        g.add_edge(2, 3).unwrap();
        let d = g.to_directed();
        assert_eq!(d.number_of_edges(), 3);
        assert!(d.has_edge(&2, &3) && d.has_edge(&3, &2));
        d.get_edge_data(&2, &3).unwrap().borrow_mut().insert("w".into(), json!(1));
        assert_eq!(d.get_edge_data(&3, &2).unwrap().get("w"), None);
    }

    #[test]
    fn test_star_and_size() {
        let mut g = Graph::new();
        g.add_star(vec![0, 1, 2, 3]).unwrap();
        g.add_weighted_edges_from("weight", vec![(1, 2, 0.5)]).unwrap();
        assert_eq!(g.degree(&0), Ok(3));
        assert_eq!(g.size(None), Ok(4.0));
        assert_eq!(g.size(Some("weight")), Ok(3.5));
        assert_eq!(g.edges_of(&[1]), vec![(&1, &0), (&1, &2)]);
        assert_eq!(g.neighbors(&1).unwrap().copied().collect::<Vec<_>>(), vec![0, 2]);
    }
}
