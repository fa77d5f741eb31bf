/*
 * Copyright (c) 2017-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Traits for directed graph data structures.
//!
//! All graphs in this crate are directed multigraphs: every arc has a
//! designated source and a designated sink node. The traits describe
//! the operations a graph type must provide, from plain finiteness
//! (`FiniteDigraph`) over incidence list access (`Directed`) up to
//! stable dense integer identifiers (`IndexDigraph`), which the flow
//! algorithms rely on.

/// A graph iterator.
///
/// This is roughly the same interface as a standard iterator. However,
/// all its method take additionally the graph itself as parameter. This
/// allows the iterator to not contain a reference to internal graph data.
///
/// This might be useful for algorithms that need to store several
/// iterators because they require less memory (they do not need to store
/// a reference to the same graph, each!).
pub trait GraphIterator<G: ?Sized>: Clone {
    type Item;

    fn next(&mut self, g: &G) -> Option<Self::Item>;

    fn size_hint(&self, _g: &G) -> (usize, Option<usize>) {
        (0, None)
    }

    fn count(mut self, g: &G) -> usize {
        let mut c = 0;
        while self.next(g).is_some() {
            c += 1
        }
        c
    }

    fn iter(self, g: &G) -> GraphIter<G, Self>
    where
        G: Sized,
    {
        GraphIter(self, g)
    }
}

/// A graph iterator as a standard iterator.
///
/// This is a pair consisting of a graph iterator and a reference the
/// graph itself. It can be used as a standard iterator.
pub struct GraphIter<'a, G, I>(pub(crate) I, pub(crate) &'a G);

impl<'a, G, I> Clone for GraphIter<'a, G, I>
where
    I: Clone,
{
    fn clone(&self) -> Self {
        GraphIter(self.0.clone(), self.1)
    }
}

impl<'a, G, I> Iterator for GraphIter<'a, G, I>
where
    I: GraphIterator<G>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next(self.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint(self.1)
    }

    fn count(self) -> usize {
        self.0.count(self.1)
    }
}

/// Base information of a graph.
pub trait GraphType<'a> {
    /// Type of a node.
    type Node: 'a + Copy + Eq;

    /// Type of an arc.
    type Arc: 'a + Copy + Eq;
}

/// Iterator over all nodes of a graph.
pub type NodeIterator<'a, G> = GraphIter<'a, G, <G as FiniteDigraph<'a>>::NodeIt>;

/// Iterator over all arcs of a graph.
pub type ArcIterator<'a, G> = GraphIter<'a, G, <G as FiniteDigraph<'a>>::ArcIt>;

/// A (finite) directed graph with a known number of nodes and arcs.
///
/// Finite graphs also provide access to the list of all nodes and arcs
/// and to the end nodes of each arc.
pub trait FiniteDigraph<'a>: GraphType<'a> {
    /// Type of an iterator over all nodes.
    type NodeIt: GraphIterator<Self, Item = Self::Node>;

    /// Type of an iterator over all arcs.
    type ArcIt: GraphIterator<Self, Item = Self::Arc>;

    /// Return the number of nodes in the graph.
    fn num_nodes(&self) -> usize;

    /// Return the number of arcs in the graph.
    fn num_arcs(&self) -> usize;

    /// Return a graph iterator over all nodes.
    fn nodes_iter(&'a self) -> Self::NodeIt;

    /// Return an iterator over all nodes.
    fn nodes(&'a self) -> NodeIterator<'a, Self>
    where
        Self: Sized,
    {
        GraphIter(self.nodes_iter(), self)
    }

    /// Return a graph iterator over all arcs.
    fn arcs_iter(&'a self) -> Self::ArcIt;

    /// Return an iterator over all arcs.
    fn arcs(&'a self) -> ArcIterator<'a, Self>
    where
        Self: Sized,
    {
        GraphIter(self.arcs_iter(), self)
    }

    /// Return the source node of an arc.
    fn src(&'a self, a: Self::Arc) -> Self::Node;

    /// Return the sink node of an arc.
    fn snk(&'a self, a: Self::Arc) -> Self::Node;
}

/// Iterator over arcs leaving a node.
type OutIterator<'a, G> = GraphIter<'a, G, <G as Directed<'a>>::OutIt>;

/// Iterator over arcs entering a node.
type InIterator<'a, G> = GraphIter<'a, G, <G as Directed<'a>>::InIt>;

/// A graph with list access to the arcs leaving and entering a node.
///
/// The items of both incidence iterators are pairs `(a, v)` of an arc
/// and the other end node of that arc.
pub trait Directed<'a>: GraphType<'a> {
    /// Type of a graph iterator over arcs leaving a node.
    type OutIt: GraphIterator<Self, Item = (Self::Arc, Self::Node)>;

    /// Type of a graph iterator over arcs entering a node.
    type InIt: GraphIterator<Self, Item = (Self::Arc, Self::Node)>;

    /// Return a graph iterator over the arcs leaving a node.
    fn out_iter(&'a self, u: Self::Node) -> Self::OutIt;

    /// Return an iterator over the arcs leaving a node.
    fn outarcs(&'a self, u: Self::Node) -> OutIterator<'a, Self>
    where
        Self: Sized,
    {
        GraphIter(self.out_iter(u), self)
    }

    /// Return a graph iterator over the arcs entering a node.
    fn in_iter(&'a self, u: Self::Node) -> Self::InIt;

    /// Return an iterator over the arcs entering a node.
    fn inarcs(&'a self, u: Self::Node) -> InIterator<'a, Self>
    where
        Self: Sized,
    {
        GraphIter(self.in_iter(u), self)
    }
}

/// A trait for general directed, finite graphs.
pub trait Digraph<'a>: FiniteDigraph<'a> + Directed<'a> {}

impl<'a, G> Digraph<'a> for G where G: FiniteDigraph<'a> + Directed<'a> {}

/// An item that has an index.
pub trait Indexable {
    fn index(&self) -> usize;
}

/// Associates nodes and arcs with unique dense ids.
///
/// Node ids lie in `0..num_nodes()`, arc ids in `0..num_arcs()`. The
/// ids are stable for one graph instance.
pub trait IndexDigraph<'a>: Digraph<'a> {
    /// Return a unique id associated with a node.
    fn node_id(&self, u: Self::Node) -> usize;

    /// Return the node associated with the given id.
    ///
    /// The method panics if the id is invalid.
    fn id2node(&'a self, id: usize) -> Self::Node;

    /// Return a unique id associated with an arc.
    fn arc_id(&self, a: Self::Arc) -> usize;

    /// Return the arc associated with the given id.
    ///
    /// The method panics if the id is invalid.
    fn id2arc(&'a self, id: usize) -> Self::Arc;
}

/// Finding arcs by their end nodes.
///
/// The first call (with `prev = None`) returns the first arc from `u`
/// to `v`. Passing the previous result steps to the next parallel arc,
/// `None` is returned when there are no further `u`-`v` arcs.
pub trait FindArc<'a>: GraphType<'a> {
    /// Return the next arc from `u` to `v` after `prev`.
    fn find_arc(&'a self, u: Self::Node, v: Self::Node, prev: Option<Self::Arc>) -> Option<Self::Arc>;
}

impl<'a, 'g: 'a, G> GraphType<'a> for &'g G
where
    G: GraphType<'g>,
{
    type Node = G::Node;

    type Arc = G::Arc;
}

#[derive(Clone)]
pub struct WrapIt<I>(pub I);

impl<'a, G, I> GraphIterator<&'a G> for WrapIt<I>
where
    I: GraphIterator<G>,
{
    type Item = I::Item;

    fn next(&mut self, g: &&'a G) -> Option<Self::Item> {
        self.0.next(*g)
    }

    fn size_hint(&self, g: &&'a G) -> (usize, Option<usize>) {
        self.0.size_hint(*g)
    }

    fn count(self, g: &&'a G) -> usize {
        self.0.count(*g)
    }
}

impl<I> From<I> for WrapIt<I> {
    fn from(it: I) -> WrapIt<I> {
        WrapIt(it)
    }
}

impl<'a, 'g: 'a, G> FiniteDigraph<'a> for &'g G
where
    G: FiniteDigraph<'g>,
{
    type NodeIt = WrapIt<G::NodeIt>;

    type ArcIt = WrapIt<G::ArcIt>;

    fn num_nodes(&self) -> usize {
        (*self).num_nodes()
    }

    fn num_arcs(&self) -> usize {
        (*self).num_arcs()
    }

    fn nodes_iter(&'a self) -> Self::NodeIt {
        (*self).nodes_iter().into()
    }

    fn arcs_iter(&'a self) -> Self::ArcIt {
        (*self).arcs_iter().into()
    }

    fn src(&'a self, a: Self::Arc) -> Self::Node {
        (*self).src(a)
    }

    fn snk(&'a self, a: Self::Arc) -> Self::Node {
        (*self).snk(a)
    }
}

impl<'a, 'g: 'a, G> Directed<'a> for &'g G
where
    G: Directed<'g>,
{
    type OutIt = WrapIt<G::OutIt>;

    type InIt = WrapIt<G::InIt>;

    fn out_iter(&'a self, u: Self::Node) -> Self::OutIt {
        (*self).out_iter(u).into()
    }

    fn in_iter(&'a self, u: Self::Node) -> Self::InIt {
        (*self).in_iter(u).into()
    }
}

impl<'a, 'g: 'a, G> IndexDigraph<'a> for &'g G
where
    G: IndexDigraph<'g>,
{
    fn node_id(&self, u: Self::Node) -> usize {
        (*self).node_id(u)
    }

    fn id2node(&'a self, id: usize) -> Self::Node {
        (*self).id2node(id)
    }

    fn arc_id(&self, a: Self::Arc) -> usize {
        (*self).arc_id(a)
    }

    fn id2arc(&'a self, id: usize) -> Self::Arc {
        (*self).id2arc(id)
    }
}

impl<'a, 'g: 'a, G> FindArc<'a> for &'g G
where
    G: FindArc<'g>,
{
    fn find_arc(&'a self, u: Self::Node, v: Self::Node, prev: Option<Self::Arc>) -> Option<Self::Arc> {
        (*self).find_arc(u, v, prev)
    }
}
