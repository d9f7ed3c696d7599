//! Common header shared by leaf cells and transition connectors.

/// Kind of an arena record.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellKind {
    /// A simulated control volume.
    LeafCell,
    /// A hanging-node bridge across a non-conforming face.
    TransitionConnector,
}

/// Root refinement level. Deeper levels are finer.
pub const ROOT_LEVEL: u16 = 1;

/// Kind and refinement level, readable without knowing the concrete record type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CellHeader {
    pub kind: CellKind,
    pub level: u16,
}

impl CellHeader {
    /// Header for a freshly created record at the root level.
    pub const fn new(kind: CellKind) -> Self {
        Self {
            kind,
            level: ROOT_LEVEL,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.kind == CellKind::LeafCell
    }

    #[inline]
    pub fn is_connector(&self) -> bool {
        self.kind == CellKind::TransitionConnector
    }
}
