/*
 * Copyright (c) 2018-2023 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Attributes of graphs, nodes and edges.
//!
//! Each graph, node and edge carries a map from attribute names to
//! [`Value`]s. The maps are stored in shared cells ([`Attrs`]): cloning an
//! `Attrs` handle does *not* copy the map, both handles refer to the same
//! storage. This is how subgraphs share their attributes with the parent
//! graph. Use [`Attrs::deep_copy`] to get an independent map.
//!
//! # Example
//!
//! ```
//! use rs_netgraph::attributes::{attrs, Attrs};
//! use serde_json::json;
//!
//! let a = Attrs::new(attrs(json!({"weight": 2.5})));
//! let b = a.clone();
//! b.borrow_mut().insert("color".to_string(), json!("red"));
//! assert_eq!(a.borrow()["color"], json!("red"));
//!
//! let c = a.deep_copy();
//! c.borrow_mut().clear();
//! assert_eq!(a.borrow().len(), 2);
//! ```

use crate::error::{Error, Result};

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

pub use serde_json::Value;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A map of attribute names to values.
pub type AttrMap = serde_json::Map<String, Value>;

/// Convert a JSON object into an attribute map.
///
/// Anything but an object results in an empty map.
pub fn attrs(value: Value) -> AttrMap {
    match value {
        Value::Object(map) => map,
        _ => AttrMap::new(),
    }
}

/// Shared attribute storage.
#[derive(Clone, Default)]
pub struct Attrs(Rc<RefCell<AttrMap>>);

impl Attrs {
    pub fn new(map: AttrMap) -> Self {
        Attrs(Rc::new(RefCell::new(map)))
    }

    /// Return read access to the attributes.
    pub fn borrow(&self) -> Ref<'_, AttrMap> {
        self.0.borrow()
    }

    /// Return write access to the attributes.
    ///
    /// The change is visible through every handle sharing this storage.
    pub fn borrow_mut(&self) -> RefMut<'_, AttrMap> {
        self.0.borrow_mut()
    }

    /// Return a handle to a fresh copy of the attributes.
    pub fn deep_copy(&self) -> Attrs {
        Attrs::new(self.0.borrow().clone())
    }

    /// Insert all entries of `other`, overwriting existing keys.
    pub fn update(&self, other: &AttrMap) {
        if other.is_empty() {
            return;
        }
        let mut map = self.0.borrow_mut();
        for (k, v) in other {
            map.insert(k.clone(), v.clone());
        }
    }

    /// Return a copy of the value of a single attribute.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Return `true` if both handles refer to the same storage.
    pub fn ptr_eq(&self, other: &Attrs) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.borrow().fmt(f)
    }
}

/// Key distinguishing parallel edges of a multigraph.
///
/// If no key is given when an edge is added, the smallest unused
/// non-negative integer for the node pair is chosen.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum EdgeKey {
    Int(usize),
    Name(String),
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EdgeKey::Int(i) => write!(f, "{}", i),
            EdgeKey::Name(s) => write!(f, "{}", s),
        }
    }
}

impl From<usize> for EdgeKey {
    fn from(i: usize) -> Self {
        EdgeKey::Int(i)
    }
}

impl From<&str> for EdgeKey {
    fn from(s: &str) -> Self {
        EdgeKey::Name(s.to_string())
    }
}

impl From<String> for EdgeKey {
    fn from(s: String) -> Self {
        EdgeKey::Name(s)
    }
}

/// Return the numeric value of the weight attribute `weight`.
///
/// Missing attributes count as weight 1.
pub(crate) fn weight_of(attrs: &AttrMap, weight: &str) -> Result<f64> {
    match attrs.get(weight) {
        None => Ok(1.0),
        Some(v) => v.as_f64().ok_or_else(|| {
            Error::PreconditionViolation(format!("edge attribute '{}' is not a number: {}", weight, v))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_weight_of() {
        let a = attrs(json!({"w": 3, "s": "x"}));
        assert_eq!(weight_of(&a, "w"), Ok(3.0));
        assert_eq!(weight_of(&a, "missing"), Ok(1.0));
        assert!(matches!(weight_of(&a, "s"), Err(Error::PreconditionViolation(_))));
    }

    #[test]
    fn test_update_overwrites() {
        let a = Attrs::new(attrs(json!({"a": 1, "b": 2})));
        a.update(&attrs(json!({"b": 3, "c": 4})));
        assert_eq!(*a.borrow(), attrs(json!({"a": 1, "b": 3, "c": 4})));
    }

    #[test]
    fn test_non_object() {
        assert!(attrs(json!(5)).is_empty());
    }
}
