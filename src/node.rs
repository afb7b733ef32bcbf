//! # Nó da B-Tree de Mapeamentos
//!
//! Nós de capacidade fixa (GRADE = 4: até 3 chaves, até 4 filhos), ordenados
//! por `base`. Filhos são índices no pool, nunca ponteiros: a árvore viva e
//! as cópias em preparação compartilham o mesmo pool sem aliasing.

use crate::config::{BTREE_GRADE, MAX_KEYS};
use crate::key::MappingKey;

/// Índice de um nó dentro do pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Nó da árvore de mapeamentos
#[derive(Debug, Clone)]
pub struct Node {
    /// Chaves ordenadas por `base`; apenas `key_cnt` primeiras são válidas
    pub(crate) keys: [MappingKey; MAX_KEYS],
    /// Filhos; nó interno usa `key_cnt + 1` slots, folha nenhum
    pub(crate) children: [Option<NodeId>; BTREE_GRADE],
    /// Quantidade de chaves válidas
    pub(crate) key_cnt: usize,
    /// Folha-ness é fixada na criação e nunca muda
    pub(crate) leaf: bool,
}

impl Node {
    pub(crate) fn blank(leaf: bool) -> Self {
        Self {
            keys: [MappingKey::EMPTY; MAX_KEYS],
            children: [None; BTREE_GRADE],
            key_cnt: 0,
            leaf,
        }
    }

    #[inline]
    pub fn key_count(&self) -> usize {
        self.key_cnt
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.key_cnt == MAX_KEYS
    }

    /// Chaves válidas, em ordem
    pub fn keys(&self) -> &[MappingKey] {
        &self.keys[..self.key_cnt]
    }

    /// Filho no slot `i`, se houver
    #[inline]
    pub fn child(&self, i: usize) -> Option<NodeId> {
        self.children[i]
    }
}
