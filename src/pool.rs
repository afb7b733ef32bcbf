//! # Pool de Nós (Alocação Bruta)
//!
//! Aloca sempre subindo o cursor. Não possui free list: as tabelas publicadas
//! são reconstruídas por cópia, nunca editadas destrutivamente, então nó
//! algum é devolvido. Exaustão é condição fatal do subsistema inteiro.

use crate::error::{MidgardError, MidgardResult};
use crate::node::{Node, NodeId};
use alloc::vec::Vec;

/// Pool de nós de capacidade fixa, append-only
pub struct NodePool {
    nodes: Vec<Node>,
    slots: usize,
}

impl NodePool {
    /// Reserva o pool inteiro na construção. `slots` é o teto definitivo;
    /// não há crescimento posterior.
    pub fn new(slots: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(slots),
            slots,
        }
    }

    pub fn with_default_slots() -> Self {
        Self::new(crate::config::DEFAULT_POOL_SLOTS)
    }

    /// Cria um nó zerado e devolve seu índice.
    /// Falha com `PoolExhausted` quando o cursor atinge a capacidade: o nó
    /// recusado nunca chega a ser ligado em árvore alguma.
    pub fn create_node(&mut self, leaf: bool) -> MidgardResult<NodeId> {
        if self.nodes.len() == self.slots {
            crate::kerror!("(MIDGARD) Pool de nós esgotado! slots=", self.slots as u64);
            return Err(MidgardError::PoolExhausted);
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::blank(leaf));
        Ok(id)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Endereço do storage do nó, para tradução em identificador de hardware
    #[inline]
    pub fn node_ptr(&self, id: NodeId) -> *const Node {
        &self.nodes[id.index()] as *const Node
    }

    /// Cursor de alocação (nós já entregues)
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots
    }
}
