//! Declarative description of a level.

use maze_chase_core::{tile_to_pixel, Actor, DVec2, Direction};

const CLASSIC_LAYOUT: &str = include_str!("mazes/classic.txt");
const CLASSIC_HOME: &str = include_str!("mazes/home.txt");

/// Fractional tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePosition {
    /// Tile column; may be fractional for nodes between tiles.
    pub column: f64,
    /// Tile row.
    pub row: f64,
}

impl TilePosition {
    /// Creates a tile position.
    #[must_use]
    pub const fn new(column: f64, row: f64) -> Self {
        Self { column, row }
    }

    /// Position shifted by another tile offset.
    #[must_use]
    pub fn offset(self, by: TilePosition) -> Self {
        Self::new(self.column + by.column, self.row + by.row)
    }

    /// Pixel position of the tile.
    #[must_use]
    pub fn pixel(self) -> DVec2 {
        tile_to_pixel(self.column, self.row)
    }
}

/// Ghost home overlaid onto the main layout.
#[derive(Clone, Debug, PartialEq)]
pub struct HomeBlueprint {
    /// Symbol grid of the home.
    pub layout: String,
    /// Tile offset of the home grid's top-left symbol.
    pub offset: TilePosition,
    /// Door node ghosts pass through, in absolute tiles.
    pub entry: TilePosition,
    /// Maze nodes joined to the door, with the direction leading to them.
    pub exits: Vec<(Direction, TilePosition)>,
}

/// Edge closed to a group of actors when a level loads.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessRule {
    /// Node the edge leaves from.
    pub tile: TilePosition,
    /// Direction of the edge.
    pub direction: Direction,
    /// Actors that may not use the edge.
    pub actors: Vec<Actor>,
}

impl AccessRule {
    /// Creates a rule closing `direction` at `tile` to `actors`.
    #[must_use]
    pub fn deny(tile: TilePosition, direction: Direction, actors: &[Actor]) -> Self {
        Self {
            tile,
            direction,
            actors: actors.to_vec(),
        }
    }
}

/// Pellet count at which a ghost's start node opens in one direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostRelease {
    /// Ghost being released.
    pub ghost: Actor,
    /// Direction opened at the ghost's start node.
    pub direction: Direction,
    /// Number of pellets that must have been eaten.
    pub after_pellets: usize,
}

/// Where ghosts begin and where eaten ghosts return.
#[derive(Clone, Debug, PartialEq)]
pub struct GhostBlueprint {
    /// Start tile of each ghost.
    pub starts: Vec<(Actor, TilePosition)>,
    /// Node an eaten ghost travels back to.
    pub spawn: TilePosition,
    /// Pellet-count releases.
    pub releases: Vec<GhostRelease>,
}

/// Everything needed to load a level.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeBlueprint {
    /// Human readable name.
    pub name: String,
    /// Main symbol grid; the only source of pellets.
    pub layout: String,
    /// Optional ghost home.
    pub home: Option<HomeBlueprint>,
    /// Pairs of nodes joined by a portal.
    pub portals: Vec<(TilePosition, TilePosition)>,
    /// Pac-Man's start node.
    pub pacman_start: TilePosition,
    /// Heading Pac-Man starts and restarts with.
    pub pacman_heading: Direction,
    /// Node the fruit appears next to.
    pub fruit_start: Option<TilePosition>,
    /// Ghost placement; `None` for a ghost-free level.
    pub ghosts: Option<GhostBlueprint>,
    /// Edges closed when the level loads.
    pub restrictions: Vec<AccessRule>,
}

impl MazeBlueprint {
    /// Ghost-free level built from a single layout.
    #[must_use]
    pub fn open(layout: impl Into<String>, pacman_start: TilePosition) -> Self {
        Self {
            name: "custom".to_owned(),
            layout: layout.into(),
            home: None,
            portals: Vec::new(),
            pacman_start,
            pacman_heading: Direction::Left,
            fruit_start: None,
            ghosts: None,
            restrictions: Vec::new(),
        }
    }

    /// The classic 28 by 36 arcade maze with its ghost home.
    #[must_use]
    pub fn classic() -> Self {
        let home_offset = TilePosition::new(11.5, 14.0);
        let entry = TilePosition::new(2.0, 0.0).offset(home_offset);
        let spawn = TilePosition::new(2.0, 3.0).offset(home_offset);
        let inky = TilePosition::new(0.0, 3.0).offset(home_offset);
        let clyde = TilePosition::new(4.0, 3.0).offset(home_offset);

        let mut restrictions = vec![AccessRule::deny(
            entry,
            Direction::Down,
            &[
                Actor::Pacman,
                Actor::Blinky,
                Actor::Pinky,
                Actor::Inky,
                Actor::Clyde,
            ],
        )];
        restrictions.extend(
            [(12.0, 14.0), (15.0, 14.0), (12.0, 26.0), (15.0, 26.0)]
                .into_iter()
                .map(|(column, row)| {
                    AccessRule::deny(
                        TilePosition::new(column, row),
                        Direction::Up,
                        &Actor::GHOSTS,
                    )
                }),
        );
        restrictions.push(AccessRule::deny(spawn, Direction::Left, &Actor::GHOSTS));
        restrictions.push(AccessRule::deny(spawn, Direction::Right, &Actor::GHOSTS));
        restrictions.push(AccessRule::deny(inky, Direction::Right, &[Actor::Inky]));
        restrictions.push(AccessRule::deny(clyde, Direction::Left, &[Actor::Clyde]));

        Self {
            name: "classic".to_owned(),
            layout: CLASSIC_LAYOUT.to_owned(),
            home: Some(HomeBlueprint {
                layout: CLASSIC_HOME.to_owned(),
                offset: home_offset,
                entry,
                exits: vec![
                    (Direction::Left, TilePosition::new(12.0, 14.0)),
                    (Direction::Right, TilePosition::new(15.0, 14.0)),
                ],
            }),
            portals: vec![(TilePosition::new(0.0, 17.0), TilePosition::new(27.0, 17.0))],
            pacman_start: TilePosition::new(15.0, 26.0),
            pacman_heading: Direction::Left,
            fruit_start: Some(TilePosition::new(9.0, 20.0)),
            ghosts: Some(GhostBlueprint {
                starts: vec![
                    (Actor::Blinky, entry),
                    (Actor::Pinky, spawn),
                    (Actor::Inky, inky),
                    (Actor::Clyde, clyde),
                ],
                spawn,
                releases: vec![
                    GhostRelease {
                        ghost: Actor::Inky,
                        direction: Direction::Right,
                        after_pellets: 30,
                    },
                    GhostRelease {
                        ghost: Actor::Clyde,
                        direction: Direction::Left,
                        after_pellets: 70,
                    },
                ],
            }),
            restrictions,
        }
    }
}
