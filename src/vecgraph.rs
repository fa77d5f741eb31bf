/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! A vector based directed multigraph.

use crate::builder::{Buildable, Builder};
use crate::traits::{Directed, FindArc, FiniteDigraph, GraphIterator, GraphType};
use crate::traits::{IndexDigraph, Indexable};

use crate::num::iter::{range, Range};
use crate::num::traits::{PrimInt, Unsigned};

use std::fmt;
use std::slice::Iter as SliceIter;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Node of a vector graph.
///
/// This is basically a newtype of the node index.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Node<ID = u32>(ID)
where
    ID: PrimInt + Unsigned;

impl<ID> fmt::Display for Node<ID>
where
    ID: PrimInt + Unsigned + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl<ID> Indexable for Node<ID>
where
    ID: PrimInt + Unsigned,
{
    fn index(&self) -> usize {
        self.0.to_usize().unwrap()
    }
}

/// Arc of a vector graph.
///
/// This is basically a newtype of the arc index.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Arc<ID = u32>(ID)
where
    ID: PrimInt + Unsigned;

impl<ID> fmt::Display for Arc<ID>
where
    ID: PrimInt + Unsigned + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl<ID> Indexable for Arc<ID>
where
    ID: PrimInt + Unsigned,
{
    fn index(&self) -> usize {
        self.0.to_usize().unwrap()
    }
}

/// Data for a node in a vector graph.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
struct NodeData<ID> {
    firstout: ID,
    firstin: ID,
}

/// Data for an arc in a vector graph.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
struct ArcData<ID> {
    nodes: [ID; 2],
}

/// A vector based directed graph data structure.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VecGraph<ID = u32> {
    nodes: Vec<NodeData<ID>>,
    arcs: Vec<ArcData<ID>>,
    // The list of adjacencies. This list contains the arc numbers
    // shifted left with the direction in the lowest bit, so that for
    // each node the incident outgoing and incoming arcs are in
    // successive positions.
    adj: Vec<ID>,
}

/// A graph iterator over all nodes of a vector graph.
#[derive(Clone)]
pub struct NodeIt<ID>(Range<ID>);

impl<'a, ID> GraphIterator<VecGraph<ID>> for NodeIt<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Item = Node<ID>;

    fn next(&mut self, _g: &VecGraph<ID>) -> Option<Self::Item> {
        Iterator::next(&mut self.0).map(Node)
    }

    fn size_hint(&self, _g: &VecGraph<ID>) -> (usize, Option<usize>) {
        Iterator::size_hint(&self.0)
    }

    fn count(self, _g: &VecGraph<ID>) -> usize {
        Iterator::count(self.0)
    }
}

/// An iterator over all arcs of a vector graph.
#[derive(Clone)]
pub struct ArcIt<ID>(Range<ID>);

impl<'a, ID> GraphIterator<VecGraph<ID>> for ArcIt<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Item = Arc<ID>;

    fn next(&mut self, _g: &VecGraph<ID>) -> Option<Self::Item> {
        Iterator::next(&mut self.0).map(Arc)
    }

    fn size_hint(&self, _g: &VecGraph<ID>) -> (usize, Option<usize>) {
        Iterator::size_hint(&self.0)
    }

    fn count(self, _g: &VecGraph<ID>) -> usize {
        Iterator::count(self.0)
    }
}

impl<'a, ID> GraphType<'a> for VecGraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Node = Node<ID>;
    type Arc = Arc<ID>;
}

impl<'a, ID> FiniteDigraph<'a> for VecGraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type NodeIt = NodeIt<ID>;
    type ArcIt = ArcIt<ID>;

    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    fn nodes_iter(&'a self) -> Self::NodeIt {
        NodeIt(range(ID::zero(), ID::from(self.num_nodes()).unwrap()))
    }

    fn arcs_iter(&'a self) -> Self::ArcIt {
        ArcIt(range(ID::zero(), ID::from(self.num_arcs()).unwrap()))
    }

    fn src(&'a self, a: Self::Arc) -> Self::Node {
        Node(self.arcs[a.index()].nodes[0])
    }

    fn snk(&'a self, a: Self::Arc) -> Self::Node {
        Node(self.arcs[a.index()].nodes[1])
    }
}

/// An iterator over the arcs incident to some node.
#[derive(Clone)]
pub struct NeighIt<'a, ID>(SliceIter<'a, ID>);

impl<'a, ID> GraphIterator<VecGraph<ID>> for NeighIt<'a, ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Item = (Arc<ID>, Node<ID>);

    fn next(&mut self, g: &VecGraph<ID>) -> Option<Self::Item> {
        self.0.next().map(|&eid| {
            let i = eid.to_usize().unwrap();
            (Arc(eid >> 1), Node(g.arcs[i >> 1].nodes[1 - (i & 1)]))
        })
    }
}

impl<'a, ID> Directed<'a> for VecGraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type OutIt = NeighIt<'a, ID>;

    type InIt = NeighIt<'a, ID>;

    fn out_iter(&'a self, u: Self::Node) -> Self::OutIt {
        let uid = u.index();
        let beg = self.nodes[uid].firstout.to_usize().unwrap();
        let end = self.nodes[uid].firstin.to_usize().unwrap();
        NeighIt(self.adj[beg..end].iter())
    }

    fn in_iter(&'a self, u: Self::Node) -> Self::InIt {
        let uid = u.index();
        let beg = self.nodes[uid].firstin.to_usize().unwrap();
        let end = self
            .nodes
            .get(uid + 1)
            .map(|n| n.firstout.to_usize().unwrap())
            .unwrap_or_else(|| self.adj.len());
        NeighIt(self.adj[beg..end].iter())
    }
}

impl<'a, ID> IndexDigraph<'a> for VecGraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    fn node_id(&self, u: Self::Node) -> usize {
        u.index()
    }

    fn id2node(&'a self, id: usize) -> Self::Node {
        debug_assert!(id < self.nodes.len(), "Invalid node id");
        Node(ID::from(id).unwrap())
    }

    fn arc_id(&self, a: Self::Arc) -> usize {
        a.index()
    }

    fn id2arc(&'a self, id: usize) -> Self::Arc {
        debug_assert!(id < self.arcs.len(), "Invalid arc id: {}, must be in 0..{}", id, self.arcs.len());
        Arc(ID::from(id).unwrap())
    }
}

impl<'a, ID> FindArc<'a> for VecGraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    fn find_arc(&'a self, u: Self::Node, v: Self::Node, prev: Option<Self::Arc>) -> Option<Self::Arc> {
        let uid = u.index();
        let beg = self.nodes[uid].firstout.to_usize().unwrap();
        let end = self.nodes[uid].firstin.to_usize().unwrap();
        let adj = &self.adj[beg..end];
        let skip = match prev {
            None => 0,
            Some(p) => match adj.iter().position(|&eid| (eid >> 1) == p.0) {
                Some(i) => i + 1,
                None => return None,
            },
        };
        for &eid in &adj[skip..] {
            let aid = (eid >> 1).to_usize().unwrap();
            if self.arcs[aid].nodes[1] == v.0 {
                return Some(Arc(eid >> 1));
            }
        }
        None
    }
}

/// A builder for a VecGraph.
///
/// The basic task is to arrange the final outgoing and incoming arcs in the
/// adjacency lists appropriately (i.e. first outgoing, then incoming arcs).
pub struct VecGraphBuilder<ID> {
    /// The outgoing and incoming arcs of each node.
    nodes: Vec<[Vec<ID>; 2]>,

    /// The end nodes of each arc.
    arcs: Vec<ArcData<ID>>,
}

impl<ID> Builder for VecGraphBuilder<ID>
where
    ID: PrimInt + Unsigned,
{
    type Graph = VecGraph<ID>;
    type Node = Node<ID>;
    type Arc = Arc<ID>;

    fn with_capacities(nnodes: usize, narcs: usize) -> Self {
        VecGraphBuilder {
            nodes: Vec::with_capacity(nnodes),
            arcs: Vec::with_capacity(narcs),
        }
    }

    fn reserve(&mut self, nnodes: usize, narcs: usize) {
        self.nodes.reserve(nnodes);
        self.arcs.reserve(narcs);
    }

    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    fn add_node(&mut self) -> Self::Node {
        assert!(
            self.nodes.len() + 1 < ID::max_value().to_usize().unwrap(),
            "Node capacity exceeded"
        );
        let id = self.nodes.len();
        self.nodes.push([vec![], vec![]]);
        Node(ID::from(id).unwrap())
    }

    fn add_arc(&mut self, u: Self::Node, v: Self::Node) -> Self::Arc {
        assert!(
            self.arcs.len() * 2 + 2 < ID::max_value().to_usize().unwrap(),
            "Arc capacity exceeded"
        );
        let aid = ID::from(self.arcs.len()).unwrap();
        self.arcs.push(ArcData { nodes: [u.0, v.0] });
        self.nodes[u.index()][0].push(aid << 1);
        self.nodes[v.index()][1].push((aid << 1) | ID::one());
        Arc(aid)
    }

    fn node2id(&self, u: Self::Node) -> usize {
        u.index()
    }

    fn arc2id(&self, a: Self::Arc) -> usize {
        a.index()
    }

    fn into_graph(self) -> VecGraph<ID> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        let mut adj = Vec::with_capacity(self.arcs.len() * 2);

        for [outs, ins] in self.nodes.into_iter() {
            nodes.push(NodeData {
                firstout: ID::from(adj.len()).unwrap(),
                firstin: ID::from(adj.len() + outs.len()).unwrap(),
            });
            adj.extend(outs);
            adj.extend(ins);
        }

        VecGraph {
            nodes,
            arcs: self.arcs,
            adj,
        }
    }
}

impl<ID> Buildable for VecGraph<ID>
where
    ID: PrimInt + Unsigned,
{
    type Builder = VecGraphBuilder<ID>;
}

impl<ID> VecGraph<ID>
where
    ID: PrimInt + Unsigned,
{
    pub fn new() -> VecGraph<ID> {
        VecGraph {
            nodes: vec![],
            arcs: vec![],
            adj: vec![],
        }
    }
}

impl<ID> Default for VecGraph<ID>
where
    ID: PrimInt + Unsigned,
{
    fn default() -> Self {
        VecGraph::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::classes::*;
    use crate::traits::*;
    use crate::VecGraph;

    #[test]
    fn test_digraph() {
        const N: usize = 7;
        let g = cycle::<VecGraph>(N);

        assert_eq!(g.num_nodes(), N);
        assert_eq!(g.num_arcs(), N);

        let mut balances = vec![0; g.num_nodes()];

        for u in g.nodes() {
            balances[g.node_id(u)] = u.index();
        }

        for u in g.nodes() {
            assert_eq!(balances[g.node_id(u)], u.index());
        }

        for u in g.nodes() {
            let outs: Vec<_> = g.outarcs(u).collect();
            assert_eq!(outs.len(), 1);
            assert_eq!(outs[0].1.index(), (u.index() + 1) % N);
            assert_eq!(g.src(outs[0].0), u);
            assert_eq!(g.snk(outs[0].0), outs[0].1);

            let ins: Vec<_> = g.inarcs(u).collect();
            assert_eq!(ins.len(), 1);
            assert_eq!(ins[0].1.index(), (u.index() + N - 1) % N);
            assert_eq!(g.src(ins[0].0), ins[0].1);
            assert_eq!(g.snk(ins[0].0), u);
        }
    }

    #[test]
    fn test_arc_vec() {
        let g = cycle::<VecGraph>(7);

        let mut x = vec![0; g.num_arcs()];
        for (i, a) in g.arcs().enumerate() {
            x[g.arc_id(a)] = i;
        }

        for u in g.nodes() {
            for (a, _) in g.outarcs(u) {
                assert_eq!(x[g.arc_id(a)], a.index());
            }
            for (a, _) in g.inarcs(u) {
                assert_eq!(x[g.arc_id(a)], a.index());
            }
        }
    }

    #[test]
    fn test_incidence() {
        for g in [cycle::<VecGraph>(7), path(5), complete_bipartite(4, 3)].iter() {
            for u in g.nodes() {
                for (a, v) in g.outarcs(u) {
                    assert_eq!(u, g.src(a));
                    assert_eq!(v, g.snk(a));
                }
                for (a, v) in g.inarcs(u) {
                    assert_eq!(v, g.src(a));
                    assert_eq!(u, g.snk(a));
                }
            }
            let nincidences = g.nodes().map(|u| g.outarcs(u).count() + g.inarcs(u).count()).sum::<usize>();
            assert_eq!(nincidences, 2 * g.num_arcs());
        }
    }

    #[test]
    fn test_find_arc() {
        let g = path::<VecGraph>(3);
        let u = g.id2node(1);
        let v = g.id2node(2);

        let a = g.find_arc(u, v, None);
        assert_eq!(a, Some(g.id2arc(1)));
        assert_eq!(g.find_arc(u, v, a), None);
        assert_eq!(g.find_arc(v, u, None), None);
    }

    #[cfg(feature = "serialize")]
    mod serialize {
        use super::VecGraph;
        use crate::classes::cycle;
        use crate::traits::{FiniteDigraph, IndexDigraph};
        use serde_json;

        #[test]
        fn test_serde() {
            let g = cycle::<VecGraph>(5);

            let serialized = serde_json::to_string(&g).unwrap();

            let h: VecGraph = serde_json::from_str(&serialized).unwrap();

            assert_eq!(g.num_nodes(), h.num_nodes());
            assert_eq!(g.num_arcs(), h.num_arcs());
            for a in g.arcs() {
                let b = h.id2arc(g.arc_id(a));
                assert_eq!(g.node_id(g.src(a)), h.node_id(h.src(b)));
                assert_eq!(g.node_id(g.snk(a)), h.node_id(h.snk(b)));
            }
        }
    }
}
