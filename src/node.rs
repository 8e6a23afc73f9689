//! Search nodes: one tile placement each, linked to the placement it was
//! expanded from.
//!
//! Nodes live in a `NodeArena` and refer to their parent by `NodeId`. A node
//! is never modified after it is pushed, so scores are computed once at
//! construction.

use crate::catalog::ConnectionTileSet;
use crate::location::*;
use crate::socket::*;
use itertools::Itertools;

/// Handle to a node in a `NodeArena`. Ids grow in creation order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identity of a placement for the closed set. Two nodes with the same
/// signature lead to identical futures, but not necessarily the same
/// destination test, which also looks at the parent's exit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct PlacementSignature {
    location: Point,
    exit: ConnectionSocket,
}

#[derive(Clone, Debug)]
pub struct SearchNode {
    location: Point,
    /// Position of the placed tile within the tile-set; `None` for the start.
    tile: Option<usize>,
    parent: Option<NodeId>,
    exit: ConnectionSocket,
    destination: Point,
    g_score: f32,
    h_score: f32,
}

impl SearchNode {
    /// Synthetic root: no tile, and an exit open in every direction.
    pub fn start(location: Point, destination: Point, side: Side) -> SearchNode {
        let exit = ConnectionSocket::open(side);
        let exit_coordinates = location + exit.offset;

        SearchNode {
            location,
            tile: None,
            parent: None,
            exit,
            destination,
            g_score: 0.0,
            h_score: exit_coordinates.distance_to(destination),
        }
    }

    /// A placement of `tile` at `location`, continuing from `parent`.
    pub fn child(
        parent_id: NodeId,
        parent: &SearchNode,
        location: Point,
        tile: usize,
        exit: ConnectionSocket,
    ) -> SearchNode {
        let exit_coordinates = location + exit.offset;
        let step = parent.exit_coordinates().distance_to(exit_coordinates);

        SearchNode {
            location,
            tile: Some(tile),
            parent: Some(parent_id),
            exit,
            destination: parent.destination,
            g_score: parent.g_score + step,
            h_score: exit_coordinates.distance_to(parent.destination),
        }
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn tile(&self) -> Option<usize> {
        self.tile
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn exit(&self) -> &ConnectionSocket {
        &self.exit
    }

    pub fn destination(&self) -> Point {
        self.destination
    }

    #[inline]
    pub fn exit_coordinates(&self) -> Point {
        self.location + self.exit.offset
    }

    /// Path length from the start to this node's exit.
    #[inline]
    pub fn g_score(&self) -> f32 {
        self.g_score
    }

    /// Straight-line distance from this node's exit to the destination.
    #[inline]
    pub fn h_score(&self) -> f32 {
        self.h_score
    }

    #[inline]
    pub fn f_score(&self) -> f32 {
        self.g_score + self.h_score
    }

    pub fn signature(&self) -> PlacementSignature {
        PlacementSignature {
            location: self.location,
            exit: self.exit,
        }
    }

    /// Every placement that can continue the path from this node's exit.
    ///
    /// For each tile and each of its sockets, the socket is tried as the
    /// entry in every direction the exit licenses. The entry socket lands one
    /// step from the exit in that direction, and the tile's other socket
    /// becomes the new exit. Nothing else is pruned here.
    pub fn expand(&self, id: NodeId, tile_set: &ConnectionTileSet) -> Vec<SearchNode> {
        let exit_coordinates = self.exit_coordinates();

        tile_set
            .tiles()
            .iter()
            .enumerate()
            .flat_map(move |(position, tile)| {
                tile.sockets
                    .iter()
                    .map(move |entry| (position, tile, entry))
            })
            .flat_map(move |(position, tile, entry)| {
                entry
                    .directions_from(&self.exit)
                    .directions()
                    .filter_map(move |direction| {
                        let exit = *tile.exit_for(entry.offset)?;
                        // Placements that fall off the coordinate range are dropped.
                        let placement = exit_coordinates
                            .checked_add(Point::from(direction.unit_offset()))?
                            .checked_sub(entry.offset)?;
                        placement.checked_add(exit.offset)?;

                        Some(SearchNode::child(id, self, placement, position, exit))
                    })
            })
            .collect_vec()
    }
}

/// Owns every node created during one search.
#[derive(Default, Debug)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids from the root down to `id`.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            path.push(node_id);
            current = self.get(node_id).parent;
        }

        path.reverse();
        path
    }
}
