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

//! Complete graph classes.
//!
//! Both graph types in this module are completely static. They store
//! only the number of nodes, all incidence information is computed
//! from the arc identifiers.
//!
//! - [`FullDigraph`] is the complete directed graph on `n` nodes with
//!   `n²` arcs, one for each ordered node pair including the loops.
//! - [`FullGraph`] is the complete undirected graph on `n` nodes with
//!   `n(n-1)/2` edges. Each edge is represented by two oppositely
//!   directed arcs, so the graph can be used wherever a directed graph
//!   is expected.

use crate::traits::{Directed, FindArc, FiniteDigraph, GraphIter, GraphIterator, GraphType};
use crate::traits::{IndexDigraph, Indexable};

use crate::num::iter::{range, range_step, Range, RangeStep};
use crate::num::traits::{PrimInt, Unsigned};

use std::fmt;
use std::marker::PhantomData;

/// Node of a complete graph.
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

/// Arc of a complete graph.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Arc<ID = u32>(ID)
where
    ID: PrimInt + Unsigned;

impl<ID> Indexable for Arc<ID>
where
    ID: PrimInt + Unsigned,
{
    fn index(&self) -> usize {
        self.0.to_usize().unwrap()
    }
}

/// Edge of a complete undirected graph.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Edge<ID = u32>(ID)
where
    ID: PrimInt + Unsigned;

impl<ID> Indexable for Edge<ID>
where
    ID: PrimInt + Unsigned,
{
    fn index(&self) -> usize {
        self.0.to_usize().unwrap()
    }
}

/// A graph iterator over all nodes of a complete graph.
#[derive(Clone)]
pub struct NodeIt<ID>(Range<ID>);

/// A graph iterator over all arcs of a complete graph.
#[derive(Clone)]
pub struct ArcIt<ID>(Range<ID>);

/// A graph iterator over all edges of a complete undirected graph.
#[derive(Clone)]
pub struct EdgeIt<ID>(Range<ID>);

// ----- the complete directed graph ---------------------------------

/// The complete directed graph on `n` nodes.
///
/// The arc from `s` to `t` has the identifier `s·n + t`, hence the
/// graph contains all `n²` ordered pairs including the self loops.
pub struct FullDigraph<ID = u32> {
    nnodes: usize,
    phantom: PhantomData<ID>,
}

impl<ID> FullDigraph<ID>
where
    ID: PrimInt + Unsigned,
{
    /// Create a complete digraph with `n` nodes and `n²` arcs.
    pub fn new(n: usize) -> Self {
        FullDigraph {
            nnodes: n,
            phantom: PhantomData,
        }
    }

    /// Return the node with the given index.
    pub fn node(&self, index: usize) -> Node<ID> {
        debug_assert!(index < self.nnodes, "Invalid node index");
        Node(ID::from(index).unwrap())
    }

    /// Return the arc from `s` to `t`.
    pub fn arc(&self, s: Node<ID>, t: Node<ID>) -> Arc<ID> {
        Arc(ID::from(s.index() * self.nnodes + t.index()).unwrap())
    }
}

impl<'a, ID> GraphIterator<FullDigraph<ID>> for NodeIt<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Item = Node<ID>;

    fn next(&mut self, _g: &FullDigraph<ID>) -> Option<Self::Item> {
        Iterator::next(&mut self.0).map(Node)
    }

    fn size_hint(&self, _g: &FullDigraph<ID>) -> (usize, Option<usize>) {
        Iterator::size_hint(&self.0)
    }
}

impl<'a, ID> GraphIterator<FullDigraph<ID>> for ArcIt<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Item = Arc<ID>;

    fn next(&mut self, _g: &FullDigraph<ID>) -> Option<Self::Item> {
        Iterator::next(&mut self.0).map(Arc)
    }

    fn size_hint(&self, _g: &FullDigraph<ID>) -> (usize, Option<usize>) {
        Iterator::size_hint(&self.0)
    }
}

/// A graph iterator over the arcs leaving a node of a complete digraph.
#[derive(Clone)]
pub struct OutIt<ID>(Range<ID>);

impl<'a, ID> GraphIterator<FullDigraph<ID>> for OutIt<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Item = (Arc<ID>, Node<ID>);

    fn next(&mut self, g: &FullDigraph<ID>) -> Option<Self::Item> {
        Iterator::next(&mut self.0).map(|a| {
            let aid = a.to_usize().unwrap();
            (Arc(a), Node(ID::from(aid % g.nnodes).unwrap()))
        })
    }

    fn size_hint(&self, _g: &FullDigraph<ID>) -> (usize, Option<usize>) {
        Iterator::size_hint(&self.0)
    }
}

/// A graph iterator over the arcs entering a node of a complete digraph.
#[derive(Clone)]
pub struct InIt<ID>(RangeStep<ID>);

impl<'a, ID> GraphIterator<FullDigraph<ID>> for InIt<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Item = (Arc<ID>, Node<ID>);

    fn next(&mut self, g: &FullDigraph<ID>) -> Option<Self::Item> {
        Iterator::next(&mut self.0).map(|a| {
            let aid = a.to_usize().unwrap();
            (Arc(a), Node(ID::from(aid / g.nnodes).unwrap()))
        })
    }

    fn size_hint(&self, _g: &FullDigraph<ID>) -> (usize, Option<usize>) {
        Iterator::size_hint(&self.0)
    }
}

impl<'a, ID> GraphType<'a> for FullDigraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Node = Node<ID>;
    type Arc = Arc<ID>;
}

impl<'a, ID> FiniteDigraph<'a> for FullDigraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type NodeIt = NodeIt<ID>;
    type ArcIt = ArcIt<ID>;

    fn num_nodes(&self) -> usize {
        self.nnodes
    }

    fn num_arcs(&self) -> usize {
        self.nnodes * self.nnodes
    }

    fn nodes_iter(&'a self) -> Self::NodeIt {
        NodeIt(range(ID::zero(), ID::from(self.nnodes).unwrap()))
    }

    fn arcs_iter(&'a self) -> Self::ArcIt {
        ArcIt(range(ID::zero(), ID::from(self.num_arcs()).unwrap()))
    }

    fn src(&'a self, a: Self::Arc) -> Self::Node {
        Node(ID::from(a.index() / self.nnodes).unwrap())
    }

    fn snk(&'a self, a: Self::Arc) -> Self::Node {
        Node(ID::from(a.index() % self.nnodes).unwrap())
    }
}

impl<'a, ID> Directed<'a> for FullDigraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type OutIt = OutIt<ID>;

    type InIt = InIt<ID>;

    fn out_iter(&'a self, u: Self::Node) -> Self::OutIt {
        let first = u.index() * self.nnodes;
        OutIt(range(ID::from(first).unwrap(), ID::from(first + self.nnodes).unwrap()))
    }

    fn in_iter(&'a self, u: Self::Node) -> Self::InIt {
        InIt(range_step(
            ID::from(u.index()).unwrap(),
            ID::from(self.num_arcs()).unwrap(),
            ID::from(self.nnodes).unwrap(),
        ))
    }
}

impl<'a, ID> IndexDigraph<'a> for FullDigraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    fn node_id(&self, u: Self::Node) -> usize {
        u.index()
    }

    fn id2node(&'a self, id: usize) -> Self::Node {
        debug_assert!(id < self.nnodes, "Invalid node id");
        Node(ID::from(id).unwrap())
    }

    fn arc_id(&self, a: Self::Arc) -> usize {
        a.index()
    }

    fn id2arc(&'a self, id: usize) -> Self::Arc {
        debug_assert!(id < self.num_arcs(), "Invalid arc id");
        Arc(ID::from(id).unwrap())
    }
}

impl<'a, ID> FindArc<'a> for FullDigraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    fn find_arc(&'a self, u: Self::Node, v: Self::Node, prev: Option<Self::Arc>) -> Option<Self::Arc> {
        if prev.is_none() {
            Some(self.arc(u, v))
        } else {
            None
        }
    }
}

// ----- the complete undirected graph -------------------------------

/// The complete undirected graph on `n` nodes.
///
/// The `n(n-1)/2` edges are numbered by folding the strict upper
/// triangle of the adjacency matrix onto the rows below the diagonal,
/// so that every unordered pair `{u,v}` with `u≠v` obtains a unique
/// identifier in `0..n(n-1)/2`. The arcs of an edge are the edge
/// identifier shifted left with the direction in the lowest bit: the
/// odd arc runs from the smaller to the larger end node.
pub struct FullGraph<ID = u32> {
    nnodes: usize,
    nedges: usize,
    phantom: PhantomData<ID>,
}

impl<ID> FullGraph<ID>
where
    ID: PrimInt + Unsigned,
{
    /// Create a complete graph with `n` nodes and `n(n-1)/2` edges.
    pub fn new(n: usize) -> Self {
        FullGraph {
            nnodes: n,
            nedges: n * n.saturating_sub(1) / 2,
            phantom: PhantomData,
        }
    }

    /// Return the node with the given index.
    pub fn node(&self, index: usize) -> Node<ID> {
        debug_assert!(index < self.nnodes, "Invalid node index");
        Node(ID::from(index).unwrap())
    }

    /// Return the number of edges.
    pub fn num_edges(&self) -> usize {
        self.nedges
    }

    /// Return an iterator over all edges.
    pub fn edges(&self) -> GraphIter<'_, Self, EdgeIt<ID>> {
        GraphIter(
            EdgeIt(range(ID::zero(), ID::from(self.nedges).unwrap())),
            self,
        )
    }

    // The folded edge id of the pair `u < v`.
    fn eid(&self, u: usize, v: usize) -> usize {
        if u < (self.nnodes - 1) / 2 {
            u * self.nnodes + v
        } else {
            (self.nnodes - 1 - u) * self.nnodes - v - 1
        }
    }

    // The end nodes `(u, v)` with `u < v` of an edge id.
    fn ends(&self, e: usize) -> (usize, usize) {
        let u = e / self.nnodes;
        let v = e % self.nnodes;
        if u < v {
            (u, v)
        } else {
            (self.nnodes - 2 - u, self.nnodes - 1 - v)
        }
    }

    /// Return the edge connecting `u` and `v`.
    ///
    /// Returns `None` if `u == v`.
    pub fn edge(&self, u: Node<ID>, v: Node<ID>) -> Option<Edge<ID>> {
        let (u, v) = (u.index(), v.index());
        if u < v {
            Some(Edge(ID::from(self.eid(u, v)).unwrap()))
        } else if u != v {
            Some(Edge(ID::from(self.eid(v, u)).unwrap()))
        } else {
            None
        }
    }

    /// Return the arc from `s` to `t`.
    ///
    /// Returns `None` if `s == t`.
    pub fn arc(&self, s: Node<ID>, t: Node<ID>) -> Option<Arc<ID>> {
        let (s, t) = (s.index(), t.index());
        if s < t {
            Some(Arc(ID::from((self.eid(s, t) << 1) | 1).unwrap()))
        } else if s != t {
            Some(Arc(ID::from(self.eid(t, s) << 1).unwrap()))
        } else {
            None
        }
    }

    /// Return the end nodes `(u, v)` of an edge with `u < v`.
    pub fn enodes(&self, e: Edge<ID>) -> (Node<ID>, Node<ID>) {
        let (u, v) = self.ends(e.index());
        (Node(ID::from(u).unwrap()), Node(ID::from(v).unwrap()))
    }

    /// Return the directed arc of an edge.
    ///
    /// If `dir` is `true` the arc runs from the smaller to the larger
    /// end node.
    pub fn direct(&self, e: Edge<ID>, dir: bool) -> Arc<ID> {
        Arc((e.0 << 1) | if dir { ID::one() } else { ID::zero() })
    }

    /// Return whether an arc runs from the smaller to the larger end node.
    pub fn direction(&self, a: Arc<ID>) -> bool {
        (a.0 & ID::one()) == ID::one()
    }

    /// Return the underlying edge of an arc.
    pub fn edge_of(&self, a: Arc<ID>) -> Edge<ID> {
        Edge(a.0 >> 1)
    }

    /// Return the next edge connecting `u` and `v` after `prev`.
    pub fn find_edge(&self, u: Node<ID>, v: Node<ID>, prev: Option<Edge<ID>>) -> Option<Edge<ID>> {
        if prev.is_none() {
            self.edge(u, v)
        } else {
            None
        }
    }
}

impl<'a, ID> GraphIterator<FullGraph<ID>> for NodeIt<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Item = Node<ID>;

    fn next(&mut self, _g: &FullGraph<ID>) -> Option<Self::Item> {
        Iterator::next(&mut self.0).map(Node)
    }

    fn size_hint(&self, _g: &FullGraph<ID>) -> (usize, Option<usize>) {
        Iterator::size_hint(&self.0)
    }
}

impl<'a, ID> GraphIterator<FullGraph<ID>> for ArcIt<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Item = Arc<ID>;

    fn next(&mut self, _g: &FullGraph<ID>) -> Option<Self::Item> {
        Iterator::next(&mut self.0).map(Arc)
    }

    fn size_hint(&self, _g: &FullGraph<ID>) -> (usize, Option<usize>) {
        Iterator::size_hint(&self.0)
    }
}

impl<'a, ID> GraphIterator<FullGraph<ID>> for EdgeIt<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Item = Edge<ID>;

    fn next(&mut self, _g: &FullGraph<ID>) -> Option<Self::Item> {
        Iterator::next(&mut self.0).map(Edge)
    }

    fn size_hint(&self, _g: &FullGraph<ID>) -> (usize, Option<usize>) {
        Iterator::size_hint(&self.0)
    }
}

/// A graph iterator over the arcs leaving or entering a node of a
/// complete undirected graph.
#[derive(Clone)]
pub struct NeighIt<ID> {
    u: usize,
    other: std::ops::Range<usize>,
    out: bool,
    phantom: PhantomData<ID>,
}

impl<'a, ID> GraphIterator<FullGraph<ID>> for NeighIt<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Item = (Arc<ID>, Node<ID>);

    fn next(&mut self, g: &FullGraph<ID>) -> Option<Self::Item> {
        for t in &mut self.other {
            if t != self.u {
                let (s, t2) = if self.out { (self.u, t) } else { (t, self.u) };
                let a = g.arc(g.node(s), g.node(t2)).unwrap();
                return Some((a, Node(ID::from(t).unwrap())));
            }
        }
        None
    }
}

impl<'a, ID> GraphType<'a> for FullGraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type Node = Node<ID>;
    type Arc = Arc<ID>;
}

impl<'a, ID> FiniteDigraph<'a> for FullGraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type NodeIt = NodeIt<ID>;
    type ArcIt = ArcIt<ID>;

    fn num_nodes(&self) -> usize {
        self.nnodes
    }

    fn num_arcs(&self) -> usize {
        2 * self.nedges
    }

    fn nodes_iter(&'a self) -> Self::NodeIt {
        NodeIt(range(ID::zero(), ID::from(self.nnodes).unwrap()))
    }

    fn arcs_iter(&'a self) -> Self::ArcIt {
        ArcIt(range(ID::zero(), ID::from(self.num_arcs()).unwrap()))
    }

    fn src(&'a self, a: Self::Arc) -> Self::Node {
        let (u, v) = self.ends(a.index() >> 1);
        Node(ID::from(if a.index() & 1 == 1 { u } else { v }).unwrap())
    }

    fn snk(&'a self, a: Self::Arc) -> Self::Node {
        let (u, v) = self.ends(a.index() >> 1);
        Node(ID::from(if a.index() & 1 == 1 { v } else { u }).unwrap())
    }
}

impl<'a, ID> Directed<'a> for FullGraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    type OutIt = NeighIt<ID>;

    type InIt = NeighIt<ID>;

    fn out_iter(&'a self, u: Self::Node) -> Self::OutIt {
        NeighIt {
            u: u.index(),
            other: 0..self.nnodes,
            out: true,
            phantom: PhantomData,
        }
    }

    fn in_iter(&'a self, u: Self::Node) -> Self::InIt {
        NeighIt {
            u: u.index(),
            other: 0..self.nnodes,
            out: false,
            phantom: PhantomData,
        }
    }
}

impl<'a, ID> IndexDigraph<'a> for FullGraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    fn node_id(&self, u: Self::Node) -> usize {
        u.index()
    }

    fn id2node(&'a self, id: usize) -> Self::Node {
        debug_assert!(id < self.nnodes, "Invalid node id");
        Node(ID::from(id).unwrap())
    }

    fn arc_id(&self, a: Self::Arc) -> usize {
        a.index()
    }

    fn id2arc(&'a self, id: usize) -> Self::Arc {
        debug_assert!(id < self.num_arcs(), "Invalid arc id");
        Arc(ID::from(id).unwrap())
    }
}

impl<'a, ID> FindArc<'a> for FullGraph<ID>
where
    ID: 'a + PrimInt + Unsigned,
{
    fn find_arc(&'a self, u: Self::Node, v: Self::Node, prev: Option<Self::Arc>) -> Option<Self::Arc> {
        if prev.is_none() {
            self.arc(u, v)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FullDigraph, FullGraph};
    use crate::traits::*;

    #[test]
    fn test_full_digraph() {
        let n = 5;
        let g = FullDigraph::<u32>::new(n);

        assert_eq!(g.num_nodes(), n);
        assert_eq!(g.num_arcs(), n * n);
        assert_eq!(g.nodes().count(), n);
        assert_eq!(g.arcs().count(), n * n);

        for s in g.nodes() {
            for t in g.nodes() {
                let a = g.arc(s, t);
                assert_eq!(a.index(), s.index() * n + t.index());
                assert_eq!(g.src(a), s);
                assert_eq!(g.snk(a), t);
                assert_eq!(g.find_arc(s, t, None), Some(a));
                assert_eq!(g.find_arc(s, t, Some(a)), None);
            }
        }

        for a in g.arcs() {
            assert_eq!(g.arc(g.src(a), g.snk(a)), a);
        }

        for u in g.nodes() {
            let outs: Vec<_> = g.outarcs(u).collect();
            assert_eq!(outs.len(), n);
            for (i, &(a, v)) in outs.iter().enumerate() {
                assert_eq!(a.index(), u.index() * n + i);
                assert_eq!(v.index(), i);
                assert_eq!(g.src(a), u);
            }

            let ins: Vec<_> = g.inarcs(u).collect();
            assert_eq!(ins.len(), n);
            for (i, &(a, v)) in ins.iter().enumerate() {
                assert_eq!(a.index(), i * n + u.index());
                assert_eq!(v.index(), i);
                assert_eq!(g.snk(a), u);
            }
        }
    }

    #[test]
    fn test_full_graph_encoding() {
        for n in 2..9 {
            let g = FullGraph::<u32>::new(n);
            let nedges = n * (n - 1) / 2;

            assert_eq!(g.num_nodes(), n);
            assert_eq!(g.num_edges(), nedges);
            assert_eq!(g.num_arcs(), 2 * nedges);
            assert_eq!(g.edges().count(), nedges);
            assert_eq!(g.arcs().count(), 2 * nedges);

            // The edge ids of all unordered pairs are a bijection.
            let mut eids = vec![];
            for u in 0..n {
                for v in u + 1..n {
                    let e = g.edge(g.node(u), g.node(v)).unwrap();
                    assert_eq!(g.edge(g.node(v), g.node(u)), Some(e));
                    assert_eq!(g.enodes(e), (g.node(u), g.node(v)));
                    eids.push(e.index());
                }
            }
            eids.sort();
            assert_eq!(eids, (0..nedges).collect::<Vec<_>>());

            assert_eq!(g.edge(g.node(0), g.node(0)), None);
            assert_eq!(g.arc(g.node(0), g.node(0)), None);
        }
    }

    #[test]
    fn test_full_graph_arcs() {
        let n = 6;
        let g = FullGraph::<u32>::new(n);

        for a in g.arcs() {
            let (s, t) = (g.src(a), g.snk(a));
            assert_ne!(s, t);
            assert_eq!(g.arc(s, t), Some(a));
            assert_eq!(g.direct(g.edge_of(a), g.direction(a)), a);
            assert_eq!(g.find_arc(s, t, None), Some(a));
            assert_eq!(g.find_arc(s, t, Some(a)), None);
        }

        for e in g.edges() {
            let (u, v) = g.enodes(e);
            assert!(u.index() < v.index());
            let a = g.direct(e, true);
            assert_eq!(g.src(a), u);
            assert_eq!(g.snk(a), v);
            let b = g.direct(e, false);
            assert_eq!(g.src(b), v);
            assert_eq!(g.snk(b), u);
            assert_eq!(g.find_edge(u, v, None), Some(e));
            assert_eq!(g.find_edge(u, v, Some(e)), None);
        }

        for u in g.nodes() {
            let outs: Vec<_> = g.outarcs(u).collect();
            assert_eq!(outs.len(), n - 1);
            for &(a, v) in &outs {
                assert_eq!(g.src(a), u);
                assert_eq!(g.snk(a), v);
            }
            let ins: Vec<_> = g.inarcs(u).collect();
            assert_eq!(ins.len(), n - 1);
            for &(a, v) in &ins {
                assert_eq!(g.src(a), v);
                assert_eq!(g.snk(a), u);
            }
        }
    }
}
