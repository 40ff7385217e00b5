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

//! Operations on keyed parallel edges.

use super::BaseGraph;
use crate::attributes::{AttrMap, Attrs, EdgeKey};
use crate::error::{Error, Result};
use crate::traits::{EdgeType, Multi, NodeKey};

impl<N, D> BaseGraph<N, D, Multi>
where
    N: NodeKey,
    D: EdgeType,
{
    /// Add an edge with a key.
    ///
    /// Without a key the smallest unused integer for the pair is chosen.
    /// If an edge with the given key exists, its attributes are updated.
    /// Returns the key of the edge.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_netgraph::{MultiGraph, attributes::{AttrMap, EdgeKey}};
    ///
    /// let mut g = MultiGraph::new();
    /// assert_eq!(g.add_edge_with_key(1, 2, None, AttrMap::new()).unwrap(), EdgeKey::Int(0));
    /// assert_eq!(g.add_edge_with_key(2, 1, None, AttrMap::new()).unwrap(), EdgeKey::Int(1));
    /// g.add_edge_with_key(1, 2, Some("x".into()), AttrMap::new()).unwrap();
    /// g.add_edge_with_key(1, 2, Some(EdgeKey::Int(0)), AttrMap::new()).unwrap();
    /// assert_eq!(g.number_of_edges(), 3);
    /// assert_eq!(g.degree(&1).unwrap(), 3);
    /// ```
    pub fn add_edge_with_key(&mut self, u: N, v: N, key: Option<EdgeKey>, attrs: AttrMap) -> Result<EdgeKey> {
        self.check_mutable()?;
        let uid = self.ensure_node(u);
        let vid = self.ensure_node(v);
        let key = key.unwrap_or_else(|| self.next_key(uid, vid));
        match self.edge_with_key(uid, vid, &key) {
            Some(e) => self.edge_data(e).attrs.update(&attrs),
            None => {
                self.insert_edge(uid, vid, key.clone(), Attrs::new(attrs));
            }
        }
        Ok(key)
    }

    /// Remove the edge from `u` to `v` with the given key.
    pub fn remove_edge_with_key(&mut self, u: &N, v: &N, key: &EdgeKey) -> Result<()> {
        self.check_mutable()?;
        let e = self
            .node_id(u)
            .zip(self.node_id(v))
            .and_then(|(uid, vid)| self.edge_with_key(uid, vid, key))
            .ok_or_else(|| Error::NotFound(format!("edge {:?}-{:?} with key {} is not in the graph", u, v, key)))?;
        self.unlink_edge(e);
        Ok(())
    }

    pub fn has_edge_with_key(&self, u: &N, v: &N, key: &EdgeKey) -> bool {
        self.get_edge_data_with_key(u, v, key).is_some()
    }

    /// Return the keys of all edges from `u` to `v` in insertion order.
    pub fn edge_keys(&self, u: &N, v: &N) -> Vec<&EdgeKey> {
        self.edge_ids_between(u, v)
            .into_iter()
            .flatten()
            .map(|&e| &self.edge_data(e).key)
            .collect()
    }

    pub fn get_edge_data_with_key(&self, u: &N, v: &N, key: &EdgeKey) -> Option<&Attrs> {
        let uid = self.node_id(u)?;
        let vid = self.node_id(v)?;
        self.edge_with_key(uid, vid, key).map(|e| &self.edge_data(e).attrs)
    }

    /// Return all edges with their keys and attributes.
    pub fn edges_with_keys(&self) -> impl Iterator<Item = (&N, &N, &EdgeKey, &Attrs)> + '_ {
        self.edge_triples().map(move |(u, v, e)| {
            let data = self.edge_data(e);
            (self.id2node(u), self.id2node(v), &data.key, &data.attrs)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::attributes::{attrs, AttrMap, EdgeKey};
    use crate::error::Error;
    use crate::{MultiDiGraph, MultiGraph};
    use serde_json::json;

    #[test]
    fn test_keys() {
        let mut g = MultiGraph::new();
        g.add_edge(1, 2).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge_with_key(1, 2, Some("a".into()), AttrMap::new()).unwrap();
        assert_eq!(g.edge_keys(&2, &1), vec![&EdgeKey::Int(0), &EdgeKey::Int(1), &EdgeKey::from("a")]);

        g.remove_edge_with_key(&1, &2, &EdgeKey::Int(0)).unwrap();
        assert_eq!(g.add_edge_with_key(1, 2, None, AttrMap::new()), Ok(EdgeKey::Int(0)));
        assert!(matches!(
            g.remove_edge_with_key(&1, &2, &EdgeKey::Int(7)),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_update_existing_key() {
        let mut g = MultiDiGraph::new();
        g.add_edge_with_key(1, 2, Some(EdgeKey::Int(3)), attrs(json!({"w": 1}))).unwrap();
        g.add_edge_with_key(1, 2, Some(EdgeKey::Int(3)), attrs(json!({"w": 2}))).unwrap();
        assert_eq!(g.number_of_edges(), 1);
        assert_eq!(
            g.get_edge_data_with_key(&1, &2, &EdgeKey::Int(3)).unwrap().get("w"),
            Some(json!(2))
        );
        assert!(!g.has_edge_with_key(&2, &1, &EdgeKey::Int(3)));
    }

    #[test]
    fn test_remove_last_parallel() {
        let mut g = MultiGraph::new();
        g.add_edge(1, 2).unwrap();
        g.add_edge(1, 2).unwrap();
        g.remove_edge(&1, &2).unwrap();
        assert_eq!(g.edge_keys(&1, &2), vec![&EdgeKey::Int(0)]);
    }

    #[test]
    fn test_multi_selfloop_degree() {
        let mut g = MultiGraph::new();
        g.add_edge(1, 1).unwrap();
        g.add_edge(1, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        assert_eq!(g.degree(&1), Ok(5));
        assert_eq!(g.number_of_selfloops(), 2);
        let total: usize = g.degrees().map(|(_, d)| d).sum();
        assert_eq!(total, 2 * g.number_of_edges());
    }
}
