/*
 * Copyright (c) 2023 Frank Fischer <frank-fischer@shadow-soft.de>
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

use rs_netgraph::attributes::attrs;
use rs_netgraph::traits::{EdgeType, Multiplicity};
use rs_netgraph::{classes, convert, operators, relabel};
use rs_netgraph::{AttrMap, BaseGraph, DiGraph, EdgeKey, Graph, MultiGraph};

use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::error::Error;

fn edge_set<D: EdgeType, M: Multiplicity>(g: &BaseGraph<usize, D, M>) -> HashSet<(usize, usize)> {
    g.edges()
        .map(|(&u, &v)| if D::is_directed() || u <= v { (u, v) } else { (v, u) })
        .collect()
}

fn edge_attrs<D: EdgeType>(g: &BaseGraph<usize, D>) -> HashMap<(usize, usize), AttrMap> {
    g.edges_with_data()
        .map(|(&u, &v, a)| {
            let e = if D::is_directed() || u <= v { (u, v) } else { (v, u) };
            (e, a.borrow().clone())
        })
        .collect()
}

fn keyed_edge_attrs(g: &MultiGraph<usize>) -> HashMap<(usize, usize, EdgeKey), AttrMap> {
    g.edges_with_keys()
        .map(|(&u, &v, key, a)| ((u.min(v), u.max(v), key.clone()), a.borrow().clone()))
        .collect()
}

fn node_attrs<D: EdgeType, M: Multiplicity>(g: &BaseGraph<usize, D, M>) -> HashMap<usize, AttrMap> {
    g.nodes_with_data().map(|(&u, a)| (u, a.borrow().clone())).collect()
}

#[test]
fn test_round_trips() -> Result<(), Box<dyn Error>> {
    let mut g: Graph<usize> = classes::petersen_graph();
    g.add_node(10)?;
    g.set_name("petersen");
    for (&u, &v, a) in g.edges_with_data() {
        a.borrow_mut().insert("weight".to_string(), json!(u * v + 1));
    }
    g.get_edge_data(&0, &1)
        .ok_or("missing edge")?
        .borrow_mut()
        .insert("color".to_string(), json!("red"));
    g.node_attrs(&3)
        .ok_or("missing node")?
        .borrow_mut()
        .insert("label".to_string(), json!("three"));
    assert_eq!(edge_attrs(&g).len(), 15);

    let h: Graph<usize> = convert::from_dict_of_dicts(convert::to_dict_of_dicts(&g));
    assert_eq!(h.number_of_nodes(), g.number_of_nodes());
    assert_eq!(edge_set(&h), edge_set(&g));
    assert_eq!(edge_attrs(&h), edge_attrs(&g));
    assert_eq!(h.get_edge_data(&1, &0).and_then(|a| a.get("color")), Some(json!("red")));

    let h: Graph<usize> = convert::from_dict_of_lists(convert::to_dict_of_lists(&g));
    assert_eq!(h.number_of_nodes(), g.number_of_nodes());
    assert_eq!(edge_set(&h), edge_set(&g));

    // isolated nodes are lost in an edge list
    let h: Graph<usize> = convert::from_edgelist(convert::to_edgelist(&g));
    assert_eq!(h.number_of_nodes(), g.number_of_nodes() - 1);
    assert_eq!(edge_set(&h), edge_set(&g));
    assert_eq!(edge_attrs(&h), edge_attrs(&g));

    let h: Graph<usize> = convert::from_graph_data(convert::to_graph_data(&g))?;
    assert_eq!(h.name(), "petersen");
    assert_eq!(node_attrs(&h), node_attrs(&g));
    assert_eq!(edge_attrs(&h), edge_attrs(&g));
    assert_eq!(h.node_attrs(&3).and_then(|a| a.get("label")), Some(json!("three")));

    // the snapshot is a copy
    g.get_edge_data(&0, &1)
        .ok_or("missing edge")?
        .borrow_mut()
        .insert("color".to_string(), json!("blue"));
    assert_eq!(h.get_edge_data(&0, &1).and_then(|a| a.get("color")), Some(json!("red")));

    let d: DiGraph<usize> = classes::complete_graph(4);
    for (&u, &v, a) in d.edges_with_data() {
        a.borrow_mut().insert("capacity".to_string(), json!(10 * u + v));
    }
    let h: DiGraph<usize> = convert::from_dict_of_lists(convert::to_dict_of_lists(&d));
    assert_eq!(h.number_of_edges(), 12);
    assert_eq!(edge_set(&h), edge_set(&d));

    let h: DiGraph<usize> = convert::from_dict_of_dicts(convert::to_dict_of_dicts(&d));
    assert_eq!(edge_attrs(&h), edge_attrs(&d));
    assert_eq!(h.get_edge_data(&3, &1).and_then(|a| a.get("capacity")), Some(json!(31)));
    assert_eq!(h.get_edge_data(&1, &3).and_then(|a| a.get("capacity")), Some(json!(13)));
    Ok(())
}

#[test]
fn test_multigraph_round_trip() -> Result<(), Box<dyn Error>> {
    let mut g = MultiGraph::new();
    g.add_edges_from(vec![(0, 1), (1, 0), (1, 2), (3, 3)])?;
    let road = EdgeKey::Name("road".to_string());
    g.add_edge_with_key(1, 2, Some(road.clone()), attrs(json!({"length": 3.5, "lanes": [1, 2]})))?;
    g.add_edge_with_key(0, 1, Some(EdgeKey::Int(7)), attrs(json!({"weight": 2})))?;
    g.node_attrs(&3)
        .ok_or("missing node")?
        .borrow_mut()
        .insert("loop".to_string(), json!(true));

    let h: MultiGraph<usize> = convert::from_dict_of_lists(convert::to_dict_of_lists(&g));
    assert_eq!(h.number_of_edges(), 6);
    assert_eq!(h.number_of_edges_between(&0, &1), 3);

    let h: MultiGraph<usize> = convert::from_dict_of_multidicts(convert::to_dict_of_multidicts(&g));
    assert_eq!(h.number_of_edges(), 6);
    assert_eq!(keyed_edge_attrs(&h), keyed_edge_attrs(&g));
    assert_eq!(
        h.get_edge_data_with_key(&2, &1, &road).and_then(|a| a.get("lanes")),
        Some(json!([1, 2]))
    );
    assert_eq!(
        h.get_edge_data_with_key(&0, &1, &EdgeKey::Int(7)).and_then(|a| a.get("weight")),
        Some(json!(2))
    );

    let h: MultiGraph<usize> = convert::from_graph_data(convert::to_graph_data(&g))?;
    assert_eq!(convert::to_graph_data(&h), convert::to_graph_data(&g));
    assert_eq!(keyed_edge_attrs(&h), keyed_edge_attrs(&g));
    assert_eq!(node_attrs(&h), node_attrs(&g));
    assert_eq!(h.get_edge_data_with_key(&1, &2, &road).and_then(|a| a.get("length")), Some(json!(3.5)));

    // a simple graph cannot be built from multigraph data
    let simple: Result<Graph<usize>, _> = convert::from_graph_data(convert::to_graph_data(&g));
    assert!(simple.is_err());
    Ok(())
}

#[test]
fn test_relabel_and_combine() -> Result<(), Box<dyn Error>> {
    let mut g = Graph::new();
    g.add_edge_with("x", "y", attrs(json!({"weight": 2})))?;
    g.add_edge("y", "z")?;

    let h = relabel::convert_node_labels_to_integers(&g, 0, relabel::Ordering::Sorted, Some("name"));
    let u = operators::disjoint_union(&h, &h);
    assert_eq!(u.number_of_nodes(), 6);
    assert_eq!(u.number_of_edges(), 4);
    assert_eq!(u.get_edge_data(&3, &4).and_then(|a| a.get("weight")), Some(json!(2)));
    assert_eq!(u.node_attrs(&5).and_then(|a| a.get("name")), Some(json!("z")));

    let c = operators::compose(&h, &classes::cycle_graph(3));
    assert_eq!(c.number_of_edges(), 3);
    assert_eq!(c.get_edge_data(&0, &1).and_then(|a| a.get("weight")), Some(json!(2)));
    Ok(())
}
