//! # Orquestração de Mapeamento e Publicação
//!
//! Ponto único de entrada do subsistema. Cada tabela de tradução tem um dono
//! lógico por vez (tipicamente um address space); não há lock interno: o
//! kernel embrulha o `Midgard` num `spin::Mutex` e serializa as chamadas,
//! como faz com o frame allocator.
//!
//! Dois modos por chamada:
//! - privado: insere e re-sanitiza a própria árvore viva, sem tocar hardware;
//! - publicado: insere, congela uma réplica compactada, sanitiza SÓ a réplica
//!   e troca o registrador de raiz numa única escrita. Double-buffering
//!   manual: o walker nunca observa uma árvore no meio de uma mutação.

use crate::addr::{MidgardAddr, VirtAddr};
use crate::config::{MID_SEQ_SHIFT, MID_SPACE_BASE};
use crate::error::{MidgardError, MidgardResult};
use crate::hw::WalkerHw;
use crate::key::{MappingKey, Protection};
use crate::pool::NodePool;
use crate::snapshot::{sanitize, WalkerTable};
use crate::tree::MapTree;
use core::sync::atomic::{AtomicU64, Ordering};

/// Contador de síntese de endereços midgard.
/// Estado de processo inteiro: começa em 1 e nunca reseta.
pub struct MidCounter(AtomicU64);

impl MidCounter {
    pub const fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    /// Sintetiza um endereço novo: padrão alto fixo, sequência a partir do
    /// bit 48, offset de página preservado da base virtual. Distinguível por
    /// chamada; único apenas dentro do período do contador.
    pub fn next(&self, base: VirtAddr) -> MidgardAddr {
        let seq = self.0.fetch_add(1, Ordering::Relaxed);
        MidgardAddr::new(MID_SPACE_BASE | (seq << MID_SEQ_SHIFT) | base.page_offset())
    }
}

impl Default for MidCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Uma tabela de tradução por address space / domínio.
/// Dona da árvore viva e da visão sanitizada corrente dela.
pub struct TranslationTable {
    tree: MapTree,
    view: WalkerTable,
}

impl TranslationTable {
    pub const fn new() -> Self {
        Self {
            tree: MapTree::new(),
            view: WalkerTable::empty(),
        }
    }

    #[inline]
    pub fn tree(&self) -> &MapTree {
        &self.tree
    }

    /// Visão sanitizada corrente da árvore viva (modo privado)
    #[inline]
    pub fn view(&self) -> &WalkerTable {
        &self.view
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl Default for TranslationTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Serviço midgard: pool de nós compartilhado entre todas as tabelas,
/// contador de síntese e colaboradores de hardware.
pub struct Midgard<H: WalkerHw> {
    pool: NodePool,
    mids: MidCounter,
    hw: H,
}

impl<H: WalkerHw> Midgard<H> {
    pub fn new(hw: H, slots: usize) -> Self {
        Self {
            pool: NodePool::new(slots),
            mids: MidCounter::new(),
            hw,
        }
    }

    pub fn with_default_slots(hw: H) -> Self {
        Self::new(hw, crate::config::DEFAULT_POOL_SLOTS)
    }

    #[inline]
    pub fn pool(&self) -> &NodePool {
        &self.pool
    }

    #[inline]
    pub fn hw(&self) -> &H {
        &self.hw
    }

    /// Mapeia `[base, base+size)` com endereço midgard sintetizado.
    ///
    /// Colisão aqui é fatal: o contador interno nunca deveria produzir uma
    /// base já coberta, então o erro sobe para o dono do contexto decidir
    /// abortar.
    pub fn map(
        &mut self,
        table: &mut TranslationTable,
        base: VirtAddr,
        size: u64,
        prot: Protection,
        publish: bool,
    ) -> MidgardResult<MidgardAddr> {
        check_range(base, size)?;
        if table.tree.find(&self.pool, base).is_some() {
            crate::kerror!("(MIDGARD) Base já mapeada: ", base.as_u64());
            return Err(MidgardError::DuplicateMapping);
        }
        let mid = self.mids.next(base);
        self.commit(table, base, size, mid, prot, publish)
    }

    /// Mapeia com endereço midgard escolhido pelo chamador.
    ///
    /// Região já coberta NÃO é fatal: devolve a tradução que a tabela já
    /// registrou para `base`, sem tocar na árvore.
    pub fn map_at(
        &mut self,
        table: &mut TranslationTable,
        mid: MidgardAddr,
        base: VirtAddr,
        size: u64,
        prot: Protection,
        publish: bool,
    ) -> MidgardResult<MidgardAddr> {
        check_range(base, size)?;
        if let Some((node, i)) = table.tree.find(&self.pool, base) {
            let existing = self.pool.node(node).keys()[i];
            crate::kwarn!("(MIDGARD) Região já mapeada, mantendo: ", base.as_u64());
            return Ok(existing.translate(base));
        }
        self.commit(table, base, size, mid, prot, publish)
    }

    fn commit(
        &mut self,
        table: &mut TranslationTable,
        base: VirtAddr,
        size: u64,
        mid: MidgardAddr,
        prot: Protection,
        publish: bool,
    ) -> MidgardResult<MidgardAddr> {
        let key = MappingKey::new(base, base.wrapping_add(size), mid, prot);
        table.tree.insert(&mut self.pool, key)?;
        crate::ktrace!("(MIDGARD) Mapeado base=", base.as_u64());

        if publish {
            self.publish(table)?;
        } else {
            // Modo privado: a visão da árvore viva fica corrente mesmo sem
            // nada chegar ao hardware
            table.view = sanitize(&table.tree, &self.pool, &self.hw);
        }
        Ok(mid)
    }

    /// Busca o mapeamento que cobre `addr` (bound exclusivo)
    pub fn lookup(&self, table: &TranslationTable, addr: VirtAddr) -> Option<MappingKey> {
        table
            .tree
            .find(&self.pool, addr)
            .map(|(node, i)| self.pool.node(node).keys()[i])
    }

    /// Busca com bound inclusivo: consulta exata no fim de uma região
    /// resolve para ela (caso de extensão de mapeamento adjacente)
    pub fn lookup_close(&self, table: &TranslationTable, addr: VirtAddr) -> Option<MappingKey> {
        table
            .tree
            .find_close(&self.pool, addr)
            .map(|(node, i)| self.pool.node(node).keys()[i])
    }

    /// Congela e publica a tabela sem inserir nada: réplica compactada,
    /// sanitiza a réplica, instala a raiz dela no registrador. A árvore viva
    /// segue limpa e mutável; última publicação vence.
    pub fn publish(&mut self, table: &TranslationTable) -> MidgardResult<()> {
        if table.tree.is_empty() {
            return Err(MidgardError::EmptyTable);
        }
        let frozen = table.tree.duplicate(&mut self.pool)?;
        let view = sanitize(&frozen, &self.pool, &self.hw);
        self.hw.install_root(view.root());
        Ok(())
    }

    /// Dump da estrutura da tabela para diagnóstico
    pub fn dump(&self, table: &TranslationTable) {
        table.tree.dump(&self.pool);
    }
}

fn check_range(base: VirtAddr, size: u64) -> MidgardResult<()> {
    if size == 0 || base.as_u64().checked_add(size).is_none() {
        return Err(MidgardError::InvalidRange);
    }
    Ok(())
}
