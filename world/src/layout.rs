//! Text maze layouts.
//!
//! A layout is a grid of whitespace separated symbols, one row per line.
//! `+`, `P` and `n` mark nodes; `.`, `-`, `|` and `p` mark the path between
//! them. `.` and `+` carry a pellet, `P` and `p` a power pellet. Any other
//! symbol is a wall.

use maze_chase_core::{tile_to_pixel, Direction, NodeId, PelletKind};
use thiserror::Error;

use crate::graph::MazeGraph;

/// Problems found while turning a blueprint into a maze.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutError {
    /// The layout text had no rows.
    #[error("maze layout is empty")]
    Empty,
    /// A row did not have the same width as the first one.
    #[error("row {row} has {found} symbols, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Symbols found on the row.
        found: usize,
        /// Symbols found on the first row.
        expected: usize,
    },
    /// A blueprint referenced a tile without a node.
    #[error("no node at tile ({column}, {row})")]
    MissingNode {
        /// Tile column.
        column: f64,
        /// Tile row.
        row: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cell {
    Wall,
    Node(Option<PelletKind>),
    Path(Option<PelletKind>),
}

impl Cell {
    fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "+" => Cell::Node(Some(PelletKind::Regular)),
            "P" => Cell::Node(Some(PelletKind::Power)),
            "n" => Cell::Node(None),
            "." => Cell::Path(Some(PelletKind::Regular)),
            "p" => Cell::Path(Some(PelletKind::Power)),
            "-" | "|" => Cell::Path(None),
            _ => Cell::Wall,
        }
    }

    const fn pellet(self) -> Option<PelletKind> {
        match self {
            Cell::Wall => None,
            Cell::Node(pellet) | Cell::Path(pellet) => pellet,
        }
    }
}

/// Parsed symbol grid.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Layout {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Layout {
    pub(crate) fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut columns = None;
        let mut rows = 0;
        let mut cells = Vec::new();

        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            let before = cells.len();
            cells.extend(line.split_whitespace().map(Cell::from_symbol));
            let found = cells.len() - before;
            let expected = *columns.get_or_insert(found);
            if found != expected {
                return Err(LayoutError::RaggedRow {
                    row: rows,
                    found,
                    expected,
                });
            }
            rows += 1;
        }

        match columns {
            Some(columns) if columns > 0 => Ok(Self {
                columns,
                rows,
                cells,
            }),
            _ => Err(LayoutError::Empty),
        }
    }

    pub(crate) const fn columns(&self) -> usize {
        self.columns
    }

    pub(crate) const fn rows(&self) -> usize {
        self.rows
    }

    fn cell(&self, column: usize, row: usize) -> Cell {
        self.cells[row * self.columns + column]
    }

    /// Adds every node to the graph and joins nodes that share an unbroken
    /// horizontal or vertical run of path symbols.
    pub(crate) fn link_into(&self, graph: &mut MazeGraph, offset: (f64, f64)) {
        let node_at = |graph: &mut MazeGraph, column: usize, row: usize| -> NodeId {
            graph.insert(tile_to_pixel(
                column as f64 + offset.0,
                row as f64 + offset.1,
            ))
        };

        for row in 0..self.rows {
            let mut previous = None;
            for column in 0..self.columns {
                match self.cell(column, row) {
                    Cell::Node(_) => {
                        let node = node_at(graph, column, row);
                        if let Some(previous) = previous {
                            graph.connect(previous, Direction::Right, node);
                        }
                        previous = Some(node);
                    }
                    Cell::Path(_) => {}
                    Cell::Wall => previous = None,
                }
            }
        }

        for column in 0..self.columns {
            let mut previous = None;
            for row in 0..self.rows {
                match self.cell(column, row) {
                    Cell::Node(_) => {
                        let node = node_at(graph, column, row);
                        if let Some(previous) = previous {
                            graph.connect(previous, Direction::Down, node);
                        }
                        previous = Some(node);
                    }
                    Cell::Path(_) => {}
                    Cell::Wall => previous = None,
                }
            }
        }
    }

    /// Tiles holding a pellet, in row-major order.
    pub(crate) fn pellet_tiles(&self) -> impl Iterator<Item = (usize, usize, PelletKind)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).filter_map(move |column| {
                self.cell(column, row)
                    .pellet()
                    .map(|kind| (column, row, kind))
            })
        })
    }
}
