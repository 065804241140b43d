use std::collections::VecDeque;

pub type NodeIdx = usize;

/// Represents a Node, or State, in a graph storing a link to it's first edge
/// and its data.
pub struct Node<D> {
    data: D,
    /// The index for the first edge in a linked list of edges.
    first_outgoing_edge: Option<EdgeIdx>,
}

impl<D> Node<D> {
    // Instantiates a new node with the given data and no adjacent edges.
    pub fn new(data: D) -> Self {
        Self {
            data,
            first_outgoing_edge: None,
        }
    }

    // Associates an edge to the node.
    fn with_outgoing_edge_mut(&mut self, edge_idx: EdgeIdx) {
        self.first_outgoing_edge = Some(edge_idx);
    }
}

impl<D> AsRef<D> for Node<D> {
    fn as_ref(&self) -> &D {
        &self.data
    }
}

/// An offset index into the graphs edge array.
pub type EdgeIdx = usize;

/// A directed edge carrying the symbol consumed when it is followed.
pub struct LabeledEdge {
    label: char,
    target: NodeIdx,

    /// The index for the next edge in a linked list of edges sharing a source.
    next_outgoing_edge: Option<EdgeIdx>,
}

impl LabeledEdge {
    fn new(label: char, target: NodeIdx) -> Self {
        Self {
            label,
            target,
            next_outgoing_edge: None,
        }
    }

    fn with_adjacent(mut self, adjacent: EdgeIdx) -> Self {
        self.next_outgoing_edge = Some(adjacent);
        self
    }
}

/// Graph defines a graph with a given set of nodes and labeled edges.
pub struct Graph<D> {
    nodes: Vec<Node<D>>,
    edges: Vec<LabeledEdge>,
}

impl<D> Graph<D> {
    /// Instantiates a new graph with a predefined list of nodes.
    pub fn new(nodes: Vec<Node<D>>) -> Self {
        Self {
            nodes,
            edges: vec![],
        }
    }

    /// Returns the number of nodes in a graph.
    pub fn node_cnt(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges in a graph.
    pub fn edge_cnt(&self) -> usize {
        self.edges.len()
    }

    /// Borrows a node by its index if it exists in the graph.
    pub fn get_node(&self, idx: NodeIdx) -> Option<&Node<D>> {
        self.nodes.get(idx)
    }

    /// Inserts a node into the graph, returning the index.
    pub fn insert_node_mut(&mut self, node: Node<D>) -> NodeIdx {
        let next_idx = self.node_cnt();
        self.nodes.push(node);

        next_idx
    }

    /// Inserts a new labeled link between a source and target node, returning
    /// the new index optionally if it can be created.
    pub fn insert_edge_mut(
        &mut self,
        source: NodeIdx,
        target: NodeIdx,
        label: char,
    ) -> Option<EdgeIdx> {
        let new_head_edge_idx = self.edge_cnt();

        // short_circuit if target doesn't exist
        self.get_node(target)?;

        let source_node = self.nodes.get_mut(source)?;
        let new_head_edge = match source_node.first_outgoing_edge {
            Some(prev_head_edge_idx) => {
                LabeledEdge::new(label, target).with_adjacent(prev_head_edge_idx)
            }
            None => LabeledEdge::new(label, target),
        };

        self.edges.push(new_head_edge);

        source_node.with_outgoing_edge_mut(new_head_edge_idx);
        Some(new_head_edge_idx)
    }

    /// Returns all direct successor nodes, paired with the edge label, from a
    /// given node. Edges are yielded most recently inserted first.
    pub fn successors(&self, source: NodeIdx) -> Successors<D> {
        let first_outgoing_edge = self
            .nodes
            .get(source)
            .and_then(|node| node.first_outgoing_edge);

        Successors {
            graph: self,
            current_edge_idx: first_outgoing_edge,
        }
    }

    /// Returns a `BreadthFirstTraversal` from the passed root of the graph.
    pub fn breadth_first_traversal(&self, root: NodeIdx) -> BreadthFirstTraversal<D> {
        BreadthFirstTraversal::new(root, self)
    }
}

impl<D> Default for Graph<D> {
    fn default() -> Self {
        Self::new(vec![])
    }
}

/// Represents an iterator over all direct successors for a given node.
pub struct Successors<'g, D> {
    graph: &'g Graph<D>,
    current_edge_idx: Option<EdgeIdx>,
}

impl<'g, D> Iterator for Successors<'g, D> {
    type Item = (char, NodeIdx);

    fn next(&mut self) -> Option<Self::Item> {
        let edge = &self.graph.edges[self.current_edge_idx?];
        self.current_edge_idx = edge.next_outgoing_edge;

        Some((edge.label, edge.target))
    }
}

/// Provides breadth-first traversal over a graph.
pub struct BreadthFirstTraversal<'g, D> {
    visited: Vec<bool>,
    graph: &'g Graph<D>,
    queue: VecDeque<NodeIdx>,
}

impl<'g, D> BreadthFirstTraversal<'g, D> {
    pub fn new(root: NodeIdx, graph: &'g Graph<D>) -> Self {
        let node_cnt = graph.node_cnt();
        let mut queue = VecDeque::with_capacity(node_cnt);
        let visited = vec![false; node_cnt];

        if root < node_cnt {
            queue.push_back(root);
        }

        Self {
            visited,
            graph,
            queue,
        }
    }
}

impl<'g, D> Iterator for BreadthFirstTraversal<'g, D> {
    type Item = NodeIdx;

    fn next(&mut self) -> Option<Self::Item> {
        // skip anything that was enqueued more than once before being visited.
        let current = loop {
            let candidate = self.queue.pop_front()?;
            if !self.visited[candidate] {
                break candidate;
            }
        };

        self.visited[current] = true;

        // enqueue in ascending label order so the traversal is stable
        // regardless of edge insertion order.
        let mut successors: Vec<_> = self.graph.successors(current).collect();
        successors.sort_unstable();
        for (_, node) in successors {
            if !self.visited[node] {
                self.queue.push_back(node);
            }
        }

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_add_nodes() {
        let mut graph = Graph::<()>::default();

        for i in 0..5 {
            let node_idx = graph.insert_node_mut(Node::new(()));
            assert_eq!(i, node_idx);
        }

        assert_eq!(5, graph.node_cnt())
    }

    #[test]
    fn should_yield_successors_with_labels() {
        let mut graph = Graph::<()>::default();
        let n0 = graph.insert_node_mut(Node::new(()));
        let n1 = graph.insert_node_mut(Node::new(()));
        let n2 = graph.insert_node_mut(Node::new(()));

        graph.insert_edge_mut(n0, n1, 'a');
        graph.insert_edge_mut(n0, n2, 'b');
        graph.insert_edge_mut(n0, n0, 'c');

        let successor_nodes: Vec<_> = graph.successors(n0).collect();
        assert_eq!(&[('c', n0), ('b', n2), ('a', n1)], &successor_nodes[..]);
        assert_eq!(3, graph.edge_cnt());
    }

    #[test]
    fn should_fail_to_add_edge_to_non_existent_nodes() {
        let mut graph = Graph::<()>::default();

        let n0 = graph.insert_node_mut(Node::new(()));
        let n1 = graph.insert_node_mut(Node::new(()));
        let n2 = 2;
        let n3 = 3;

        assert!(graph.insert_edge_mut(n0, n1, 'a').is_some());
        assert!(graph.insert_edge_mut(n0, n2, 'a').is_none());
        assert!(graph.insert_edge_mut(n3, n0, 'a').is_none());
    }

    #[test]
    fn should_traverse_in_breadth_first_order() {
        let mut graph = Graph::<()>::default();

        let n0 = graph.insert_node_mut(Node::new(()));
        let n1 = graph.insert_node_mut(Node::new(()));
        let n2 = graph.insert_node_mut(Node::new(()));
        let n3 = graph.insert_node_mut(Node::new(()));

        graph.insert_edge_mut(n0, n1, 'b'); // n0 -> n1
        graph.insert_edge_mut(n1, n2, 'a'); // n1 -> n2
        graph.insert_edge_mut(n0, n3, 'a'); // n0 -> n3

        // add loops
        graph.insert_edge_mut(n3, n2, 'a'); // n3 -> n2
        graph.insert_edge_mut(n2, n0, 'a'); // n2 -> n0

        let iterated_nodes: Vec<_> = graph.breadth_first_traversal(n0).collect();

        assert_eq!(&[n0, n3, n1, n2], &iterated_nodes[..]);
    }
}
