#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Static maze state for Maze Chase levels.
//!
//! A [`MazeBlueprint`] describes a level declaratively; [`Maze::build`] turns it
//! into a [`MazeGraph`] arena plus the pellets scattered over it. The graph's
//! topology is fixed once built. Only edge access changes afterwards, through
//! [`MazeGraph::allow_access`] and [`MazeGraph::deny_access`].

mod blueprint;
mod fruit;
mod graph;
mod layout;
mod pellets;

use maze_chase_core::{Actor, DVec2, Direction, NodeId};

pub use blueprint::{
    AccessRule, GhostBlueprint, GhostRelease, HomeBlueprint, MazeBlueprint, TilePosition,
};
pub use fruit::{Fruit, FRUIT_LIFESPAN};
pub use graph::{MazeGraph, Node};
pub use layout::LayoutError;
pub use pellets::{
    Pellet, PelletCollection, PELLET_COLLIDE_RADIUS, PELLET_POINTS, POWER_PELLET_POINTS,
};

use layout::Layout;

/// Ghost placement resolved against a built graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GhostLayout {
    /// Start node of each ghost.
    pub starts: Vec<(Actor, NodeId)>,
    /// Door node of the ghost home.
    pub home: NodeId,
    /// Node eaten ghosts return to.
    pub spawn: NodeId,
    /// Pellet-count releases.
    pub releases: Vec<GhostRelease>,
}

impl GhostLayout {
    /// Start node of the provided ghost.
    #[must_use]
    pub fn start_of(&self, ghost: Actor) -> Option<NodeId> {
        self.starts
            .iter()
            .find(|(actor, _)| *actor == ghost)
            .map(|(_, node)| *node)
    }
}

/// A loaded level: graph, pellets and resolved start nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    graph: MazeGraph,
    pellets: PelletCollection,
    columns: usize,
    rows: usize,
    pacman_start: NodeId,
    pacman_heading: Direction,
    fruit_start: Option<NodeId>,
    ghosts: Option<GhostLayout>,
}

impl Maze {
    /// Builds the graph and pellets described by the blueprint.
    pub fn build(blueprint: &MazeBlueprint) -> Result<Self, LayoutError> {
        let layout = Layout::parse(&blueprint.layout)?;
        let mut graph = MazeGraph::new();
        layout.link_into(&mut graph, (0.0, 0.0));

        let lookup = |graph: &MazeGraph, tile: TilePosition| {
            graph
                .node_from_tiles(tile.column, tile.row)
                .ok_or(LayoutError::MissingNode {
                    column: tile.column,
                    row: tile.row,
                })
        };

        if let Some(home) = &blueprint.home {
            let home_layout = Layout::parse(&home.layout)?;
            home_layout.link_into(&mut graph, (home.offset.column, home.offset.row));
            let entry = lookup(&graph, home.entry)?;
            for (direction, tile) in &home.exits {
                let exit = lookup(&graph, *tile)?;
                graph.connect(entry, *direction, exit);
            }
        }

        for (first, second) in &blueprint.portals {
            let first = lookup(&graph, *first)?;
            let second = lookup(&graph, *second)?;
            graph.set_portal_pair(first, second);
        }

        for rule in &blueprint.restrictions {
            let node = lookup(&graph, rule.tile)?;
            for actor in &rule.actors {
                graph.deny_access(node, rule.direction, *actor);
            }
        }

        let pacman_start = lookup(&graph, blueprint.pacman_start)?;
        let fruit_start = blueprint
            .fruit_start
            .map(|tile| lookup(&graph, tile))
            .transpose()?;

        let ghosts = match &blueprint.ghosts {
            Some(ghosts) => {
                let home = match &blueprint.home {
                    Some(home) => lookup(&graph, home.entry)?,
                    None => lookup(&graph, ghosts.spawn)?,
                };
                let starts = ghosts
                    .starts
                    .iter()
                    .map(|(actor, tile)| lookup(&graph, *tile).map(|node| (*actor, node)))
                    .collect::<Result<Vec<_>, _>>()?;
                Some(GhostLayout {
                    starts,
                    home,
                    spawn: lookup(&graph, ghosts.spawn)?,
                    releases: ghosts.releases.clone(),
                })
            }
            None => None,
        };

        let pellets = layout
            .pellet_tiles()
            .map(|(column, row, kind)| {
                Pellet::new(
                    TilePosition::new(column as f64, row as f64).pixel(),
                    kind,
                )
            })
            .collect();

        Ok(Self {
            graph,
            pellets: PelletCollection::new(pellets),
            columns: layout.columns(),
            rows: layout.rows(),
            pacman_start,
            pacman_heading: blueprint.pacman_heading,
            fruit_start,
            ghosts,
        })
    }

    /// Node graph of the level.
    #[must_use]
    pub const fn graph(&self) -> &MazeGraph {
        &self.graph
    }

    /// Mutable node graph, for access changes during play.
    pub fn graph_mut(&mut self) -> &mut MazeGraph {
        &mut self.graph
    }

    /// Pellets still in the level.
    #[must_use]
    pub const fn pellets(&self) -> &PelletCollection {
        &self.pellets
    }

    /// Mutable pellets.
    pub fn pellets_mut(&mut self) -> &mut PelletCollection {
        &mut self.pellets
    }

    /// Splits the maze into its graph and pellets for simultaneous mutation.
    pub fn parts_mut(&mut self) -> (&mut MazeGraph, &mut PelletCollection) {
        (&mut self.graph, &mut self.pellets)
    }

    /// Layout size in tiles as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Pac-Man's start node.
    #[must_use]
    pub const fn pacman_start(&self) -> NodeId {
        self.pacman_start
    }

    /// Heading Pac-Man starts with.
    #[must_use]
    pub const fn pacman_heading(&self) -> Direction {
        self.pacman_heading
    }

    /// Node the fruit appears next to.
    #[must_use]
    pub const fn fruit_start(&self) -> Option<NodeId> {
        self.fruit_start
    }

    /// Resolved ghost placement.
    #[must_use]
    pub const fn ghosts(&self) -> Option<&GhostLayout> {
        self.ghosts.as_ref()
    }
}

/// Read-only helpers over a loaded maze.
pub mod query {
    use super::{Actor, DVec2, Direction, Maze, NodeId};

    /// Open edges leaving `node` for `actor`, indexed like [`Direction::CARDINAL`].
    #[must_use]
    pub fn open_directions(maze: &Maze, node: NodeId, actor: Actor) -> [bool; 4] {
        Direction::CARDINAL.map(|direction| maze.graph().is_valid(node, direction, actor))
    }

    /// Remaining pellet closest to `position`.
    #[must_use]
    pub fn nearest_pellet(maze: &Maze, position: DVec2) -> Option<DVec2> {
        maze.pellets().nearest(position)
    }

    /// Size of the level in pixels.
    #[must_use]
    pub fn pixel_size(maze: &Maze) -> DVec2 {
        let (columns, rows) = maze.dimensions();
        super::TilePosition::new(columns as f64, rows as f64).pixel()
    }
}
