//! Records stored in the grid arena: leaf control volumes and transition connectors.

pub mod connector;
pub mod entries;
pub mod flux;
pub mod leaf_cell;

use crate::topology::header::CellHeader;
use connector::TransitionConnector;
use leaf_cell::LeafCell;

/// One arena record. Inspect [`Node::header`] before downcasting.
#[derive(Debug)]
pub enum Node {
    Leaf(LeafCell),
    Connector(TransitionConnector),
}

impl Node {
    #[inline]
    pub fn header(&self) -> CellHeader {
        match self {
            Node::Leaf(cell) => cell.header(),
            Node::Connector(connector) => connector.header(),
        }
    }

    #[inline]
    pub fn as_leaf(&self) -> Option<&LeafCell> {
        match self {
            Node::Leaf(cell) => Some(cell),
            Node::Connector(_) => None,
        }
    }

    #[inline]
    pub fn as_leaf_mut(&mut self) -> Option<&mut LeafCell> {
        match self {
            Node::Leaf(cell) => Some(cell),
            Node::Connector(_) => None,
        }
    }

    #[inline]
    pub fn as_connector(&self) -> Option<&TransitionConnector> {
        match self {
            Node::Connector(connector) => Some(connector),
            Node::Leaf(_) => None,
        }
    }

    #[inline]
    pub fn as_connector_mut(&mut self) -> Option<&mut TransitionConnector> {
        match self {
            Node::Connector(connector) => Some(connector),
            Node::Leaf(_) => None,
        }
    }
}

impl From<LeafCell> for Node {
    fn from(cell: LeafCell) -> Self {
        Node::Leaf(cell)
    }
}

impl From<TransitionConnector> for Node {
    fn from(connector: TransitionConnector) -> Self {
        Node::Connector(connector)
    }
}
