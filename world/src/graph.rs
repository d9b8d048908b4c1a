//! Arena-backed node graph that every mover walks on.

use std::collections::BTreeMap;

use maze_chase_core::{tile_to_pixel, AccessSet, Actor, DVec2, Direction, Link, NodeId};

const LINK_SLOTS: usize = 5;

/// Junction in the maze with up to four neighbours and an optional portal.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    position: DVec2,
    neighbors: [Option<NodeId>; LINK_SLOTS],
    access: [AccessSet; 4],
}

impl Node {
    fn new(position: DVec2) -> Self {
        Self {
            position,
            neighbors: [None; LINK_SLOTS],
            access: [AccessSet::all(); 4],
        }
    }

    /// Pixel position of the node.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Neighbour stored in the provided slot.
    #[must_use]
    pub const fn neighbor(&self, link: Link) -> Option<NodeId> {
        self.neighbors[link.index()]
    }

    /// Actors allowed to leave the node in the provided direction.
    #[must_use]
    pub fn access(&self, direction: Direction) -> AccessSet {
        direction
            .cardinal_index()
            .map_or(AccessSet::empty(), |index| self.access[index])
    }
}

/// Maze graph built once per level load.
///
/// Nodes live in a flat arena addressed by [`NodeId`]; neighbours are stored as
/// identifiers so the graph never contains owning cycles. A secondary index maps
/// pixel positions back to nodes for tile lookups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MazeGraph {
    nodes: Vec<Node>,
    index: BTreeMap<(i64, i64), NodeId>,
}

fn pixel_key(position: DVec2) -> (i64, i64) {
    (position.x.round() as i64, position.y.round() as i64)
}

impl MazeGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node at the provided pixel position, reusing an existing one.
    pub fn insert(&mut self, position: DVec2) -> NodeId {
        let key = pixel_key(position);
        if let Some(existing) = self.index.get(&key) {
            return *existing;
        }

        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node::new(position));
        let _ = self.index.insert(key, id);
        id
    }

    /// Links `from` to `to` in `direction` and `to` back to `from` in the opposite one.
    pub fn connect(&mut self, from: NodeId, direction: Direction, to: NodeId) {
        let (Some(forward), Some(backward)) = (
            Link::from_direction(direction),
            Link::from_direction(direction.opposite()),
        ) else {
            return;
        };
        self.nodes[from.index()].neighbors[forward.index()] = Some(to);
        self.nodes[to.index()].neighbors[backward.index()] = Some(from);
    }

    /// Pairs two nodes so that arriving at either relocates a mover to the other.
    pub fn set_portal_pair(&mut self, first: NodeId, second: NodeId) {
        self.nodes[first.index()].neighbors[Link::Portal.index()] = Some(second);
        self.nodes[second.index()].neighbors[Link::Portal.index()] = Some(first);
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Reports whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrows the node with the provided identifier.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Pixel position of the provided node.
    #[must_use]
    pub fn position(&self, id: NodeId) -> DVec2 {
        self.nodes[id.index()].position
    }

    /// Iterates nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index as u32), node))
    }

    /// Finds the node sitting exactly on a pixel position.
    #[must_use]
    pub fn node_at(&self, position: DVec2) -> Option<NodeId> {
        self.index.get(&pixel_key(position)).copied()
    }

    /// Finds the node at fractional tile coordinates.
    #[must_use]
    pub fn node_from_tiles(&self, column: f64, row: f64) -> Option<NodeId> {
        self.node_at(tile_to_pixel(column, row))
    }

    /// Neighbour of `id` in the provided slot.
    #[must_use]
    pub fn neighbor(&self, id: NodeId, link: Link) -> Option<NodeId> {
        self.nodes[id.index()].neighbor(link)
    }

    /// Reports whether `actor` may leave `id` heading in `direction`.
    #[must_use]
    pub fn is_valid(&self, id: NodeId, direction: Direction, actor: Actor) -> bool {
        self.step(id, direction, actor).is_some()
    }

    /// Neighbour reached by leaving `id` in `direction`, if the edge exists and is open to `actor`.
    #[must_use]
    pub fn step(&self, id: NodeId, direction: Direction, actor: Actor) -> Option<NodeId> {
        let link = Link::from_direction(direction)?;
        let node = &self.nodes[id.index()];
        let neighbor = node.neighbor(link)?;
        node.access(direction).contains(actor).then_some(neighbor)
    }

    /// Neighbour in `direction`, or `id` itself when the move is blocked.
    #[must_use]
    pub fn new_target(&self, id: NodeId, direction: Direction, actor: Actor) -> NodeId {
        self.step(id, direction, actor).unwrap_or(id)
    }

    /// Headings `actor` may take from `id`, in canonical order.
    pub fn valid_directions(
        &self,
        id: NodeId,
        actor: Actor,
    ) -> impl Iterator<Item = Direction> + '_ {
        Direction::CARDINAL
            .into_iter()
            .filter(move |direction| self.is_valid(id, *direction, actor))
    }

    /// Opens the edge leaving `id` in `direction` to `actor`.
    pub fn allow_access(&mut self, id: NodeId, direction: Direction, actor: Actor) {
        if let Some(index) = direction.cardinal_index() {
            self.nodes[id.index()].access[index].insert(actor);
        }
    }

    /// Closes the edge leaving `id` in `direction` to `actor`.
    pub fn deny_access(&mut self, id: NodeId, direction: Direction, actor: Actor) {
        if let Some(index) = direction.cardinal_index() {
            self.nodes[id.index()].access[index].remove(actor);
        }
    }

    /// Straight edges between neighbouring nodes, each reported once.
    #[must_use]
    pub fn edges(&self) -> Vec<(DVec2, DVec2)> {
        let mut edges = Vec::new();
        for node in &self.nodes {
            for link in [Link::Right, Link::Down] {
                if let Some(neighbor) = node.neighbor(link) {
                    edges.push((node.position, self.position(neighbor)));
                }
            }
        }
        edges
    }
}
