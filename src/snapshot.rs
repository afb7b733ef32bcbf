//! # Sanitização: Visão Consumível pelo Walker
//!
//! O walker de hardware não derreferencia índices de pool; ele precisa de
//! identificadores endereçáveis (tipicamente endereços físicos). A passada de
//! sanitização percorre a árvore em pós-ordem e materializa uma tabela plana
//! de links de filho por nó: a "forma da árvore" e a "visão publicada" são
//! estruturas separadas, então a árvore viva nunca carrega estado voltado
//! para hardware.
//!
//! Só é executada sobre árvore totalmente possuída pelo chamador: a árvore
//! viva em modo privado, ou uma réplica recém-construída antes de publicar.

use crate::addr::HwAddr;
use crate::config::BTREE_GRADE;
use crate::hw::WalkerHw;
use crate::node::NodeId;
use crate::pool::NodePool;
use crate::tree::MapTree;
use alloc::vec::Vec;

/// Tabela derivada de identificadores de hardware, indexada por nó do pool.
/// Determinística: sanitizar duas vezes a mesma árvore intocada produz
/// tabelas iguais.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkerTable {
    /// Identificador da raiz, `NULL` para tabela vazia
    root: HwAddr,
    /// Uma linha de links por nó visitado; `None` para nós de outras árvores
    rows: Vec<Option<[HwAddr; BTREE_GRADE]>>,
}

impl WalkerTable {
    pub const fn empty() -> Self {
        Self {
            root: HwAddr::NULL,
            rows: Vec::new(),
        }
    }

    #[inline]
    pub fn root(&self) -> HwAddr {
        self.root
    }

    /// Linha de links do nó, se ele pertence à árvore sanitizada
    pub fn row(&self, id: NodeId) -> Option<&[HwAddr; BTREE_GRADE]> {
        self.rows.get(id.index()).and_then(|r| r.as_ref())
    }

    fn set_row(&mut self, id: NodeId, row: [HwAddr; BTREE_GRADE]) {
        self.rows[id.index()] = Some(row);
    }
}

/// Percorre `tree` em pós-ordem preenchendo os identificadores de filho.
/// Slot vazio vira `HwAddr::NULL`; filho presente é sanitizado primeiro e só
/// então registrado com o identificador que o walker derreferencia.
pub fn sanitize<H: WalkerHw>(tree: &MapTree, pool: &NodePool, hw: &H) -> WalkerTable {
    let mut table = WalkerTable {
        root: HwAddr::NULL,
        rows: alloc::vec![None; pool.len()],
    };
    if let Some(root) = tree.root() {
        fill_rows(pool, hw, &mut table, root);
        table.root = hw.node_handle(pool.node_ptr(root));
    }
    table
}

fn fill_rows<H: WalkerHw>(pool: &NodePool, hw: &H, table: &mut WalkerTable, id: NodeId) {
    let mut row = [HwAddr::NULL; BTREE_GRADE];
    for (j, slot) in pool.node(id).children.iter().enumerate() {
        if let Some(child) = *slot {
            fill_rows(pool, hw, table, child);
            row[j] = hw.node_handle(pool.node_ptr(child));
        }
    }
    table.set_row(id, row);
}
