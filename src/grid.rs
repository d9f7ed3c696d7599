//! The owning container of the adaptive mesh graph.
//!
//! [`AdaptiveGrid`] is the sole owner of every leaf cell and transition
//! connector. Records refer to each other only through [`NodeId`] handles,
//! and the grid holds the explicit global traversal order over all leaf cells.
//! Refinement and derefinement edit that order with explicit inserts and
//! removals.
//!
//! `grid_position` of every leaf tracks its index in the order, so
//! [`previous`](AdaptiveGrid::previous) and [`next`](AdaptiveGrid::next)
//! are constant-time lookups unless a caller overwrote the field.

use crate::data::Node;
use crate::data::connector::TransitionConnector;
use crate::data::leaf_cell::{CellConfig, LeafCell};
use crate::mesh_error::MeshError;
use crate::topology::arena::CellArena;
use crate::topology::handle::{Neighbor, NodeId};
use crate::topology::header::CellHeader;

#[derive(Debug, Default)]
pub struct AdaptiveGrid {
    nodes: CellArena<Node>,
    order: Vec<NodeId>,
}

impl AdaptiveGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for `leaves` cells; connectors allocate on demand.
    pub fn with_capacity(leaves: usize) -> Self {
        Self {
            nodes: CellArena::with_capacity(leaves),
            order: Vec::with_capacity(leaves),
        }
    }

    // ---------------------------------------------------------------------
    // Creation and destruction
    // ---------------------------------------------------------------------

    /// Build a fresh leaf from `config` and append it to the global order.
    ///
    /// `config.grid_position` is overwritten with the cell's actual index.
    pub fn create_leaf(&mut self, config: CellConfig) -> NodeId {
        let mut cell = LeafCell::new();
        cell.configure(config);
        self.push_leaf(cell)
    }

    /// Store `cell` and append it to the end of the global order.
    pub fn push_leaf(&mut self, mut cell: LeafCell) -> NodeId {
        cell.grid_position = self.order.len() as u32;
        let id = self.nodes.insert(Node::Leaf(cell));
        self.order.push(id);
        log::trace!("created leaf {id} at order position {}", self.order.len() - 1);
        id
    }

    /// Store `cell` and place it directly after `anchor` in the global order.
    ///
    /// # Errors
    /// `StaleHandle` / `NotALeafCell` if `anchor` is not a live leaf.
    pub fn insert_leaf_after(
        &mut self,
        anchor: NodeId,
        cell: LeafCell,
    ) -> Result<NodeId, MeshError> {
        let at = self.position(anchor)? + 1;
        let id = self.nodes.insert(Node::Leaf(cell));
        self.order.insert(at, id);
        self.reindex_from(at);
        log::trace!("created leaf {id} after {anchor}");
        Ok(id)
    }

    /// Store a connector. Connectors never enter the global order.
    pub fn create_connector(&mut self, connector: TransitionConnector) -> NodeId {
        let id = self.nodes.insert(Node::Connector(connector));
        log::trace!("created connector {id}");
        id
    }

    /// Remove a leaf from the order and free it, dropping its entry list,
    /// extension data and lock.
    pub fn destroy_leaf(&mut self, id: NodeId) -> Result<(), MeshError> {
        let at = self.position(id)?;
        self.order.remove(at);
        self.nodes.remove(id);
        self.reindex_from(at);
        log::trace!("destroyed leaf {id}");
        Ok(())
    }

    pub fn destroy_connector(&mut self, id: NodeId) -> Result<(), MeshError> {
        self.connector(id)?;
        self.nodes.remove(id);
        log::trace!("destroyed connector {id}");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    #[inline]
    pub fn node(&self, id: NodeId) -> Result<&Node, MeshError> {
        self.nodes.get(id).ok_or(MeshError::StaleHandle(id))
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, MeshError> {
        self.nodes.get_mut(id).ok_or(MeshError::StaleHandle(id))
    }

    #[inline]
    pub fn header(&self, id: NodeId) -> Result<CellHeader, MeshError> {
        self.node(id).map(Node::header)
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn leaf(&self, id: NodeId) -> Result<&LeafCell, MeshError> {
        self.node(id)?.as_leaf().ok_or(MeshError::NotALeafCell(id))
    }

    pub fn leaf_mut(&mut self, id: NodeId) -> Result<&mut LeafCell, MeshError> {
        self.node_mut(id)?
            .as_leaf_mut()
            .ok_or(MeshError::NotALeafCell(id))
    }

    pub fn connector(&self, id: NodeId) -> Result<&TransitionConnector, MeshError> {
        self.node(id)?
            .as_connector()
            .ok_or(MeshError::NotAConnector(id))
    }

    pub fn connector_mut(&mut self, id: NodeId) -> Result<&mut TransitionConnector, MeshError> {
        self.node_mut(id)?
            .as_connector_mut()
            .ok_or(MeshError::NotAConnector(id))
    }

    // ---------------------------------------------------------------------
    // Global order
    // ---------------------------------------------------------------------

    /// All leaf cells, active or not, in traversal order.
    #[inline]
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Index of `id` in the global order.
    pub fn position(&self, id: NodeId) -> Result<usize, MeshError> {
        let hint = self.leaf(id)?.grid_position as usize;
        if self.order.get(hint) == Some(&id) {
            return Ok(hint);
        }
        self.order
            .iter()
            .position(|&other| other == id)
            .ok_or_else(|| MeshError::OrderMismatch(format!("live leaf {id} is not in the order")))
    }

    /// Leaf before `id` in the global order; `None` for the first leaf.
    pub fn previous(&self, id: NodeId) -> Result<Neighbor, MeshError> {
        let at = self.position(id)?;
        Ok(at.checked_sub(1).map(|p| self.order[p]))
    }

    /// Leaf after `id` in the global order; `None` for the last leaf.
    pub fn next(&self, id: NodeId) -> Result<Neighbor, MeshError> {
        let at = self.position(id)?;
        Ok(self.order.get(at + 1).copied())
    }

    /// Leaves in traversal order.
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &LeafCell)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.nodes.get(id).and_then(Node::as_leaf).map(|c| (id, c)))
    }

    /// Active leaves in traversal order.
    pub fn active_leaves(&self) -> impl Iterator<Item = (NodeId, &LeafCell)> + '_ {
        self.leaves().filter(|(_, cell)| cell.active)
    }

    /// Handles of the active leaves in traversal order.
    pub fn active_ids(&self) -> Vec<NodeId> {
        self.active_leaves().map(|(id, _)| id).collect()
    }

    /// Apply `f` to every leaf, active or not, in traversal order.
    pub fn for_each_leaf_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(NodeId, &mut LeafCell),
    {
        for &id in &self.order {
            if let Some(cell) = self.nodes.get_mut(id).and_then(Node::as_leaf_mut) {
                f(id, cell);
            }
        }
    }

    /// Every live record, leaves and connectors, in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter()
    }

    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn connector_count(&self) -> usize {
        self.nodes.len() - self.order.len()
    }

    /// Assign `grid_position` to every leaf and a dense `sv_position` to the
    /// active ones, both in traversal order. Returns the number of active leaves.
    pub fn renumber(&mut self) -> usize {
        let mut active = 0u32;
        self.for_each_leaf_mut(|_, cell| {
            if cell.active {
                cell.sv_position = active;
                active += 1;
            }
        });
        self.reindex_from(0);
        log::debug!(
            "renumbered {} leaves ({} active, {} connectors)",
            self.leaf_count(),
            active,
            self.connector_count()
        );
        active as usize
    }

    fn reindex_from(&mut self, start: usize) {
        for (offset, &id) in self.order[start..].iter().enumerate() {
            if let Some(cell) = self.nodes.get_mut(id).and_then(Node::as_leaf_mut) {
                cell.grid_position = (start + offset) as u32;
            }
        }
    }
}
