//! # B-Tree de Intervalos de Mapeamento
//!
//! Árvore de busca balanceada que mapeia intervalos virtuais `[base, bound)`
//! para o espaço midgard. Split preemptivo top-down: todo filho cheio é
//! dividido antes da descida entrar nele, então a folha alvo sempre tem vaga
//! quando a inserção chega: nunca há backtracking nem merge de nós.
//!
//! Todas as operações recebem o pool explicitamente (mesma disciplina do
//! PMM: o lock é adquirido uma única vez no nível de cima e o recurso desce
//! por parâmetro).

use crate::addr::VirtAddr;
use crate::config::BTREE_GRADE;
use crate::error::{MidgardError, MidgardResult};
use crate::key::MappingKey;
use crate::node::NodeId;
use crate::pool::NodePool;
use alloc::vec::Vec;

/// Semântica do limite superior na busca por intervalo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundMode {
    /// `base <= addr < bound`
    Exclusive,
    /// `base <= addr <= bound`: consulta exatamente no fim de uma região
    /// ainda resolve para ela
    Inclusive,
}

/// Árvore de mapeamentos, identificada pela raiz no pool.
/// Vazia (raiz ausente) até a primeira inserção.
pub struct MapTree {
    root: Option<NodeId>,
}

impl MapTree {
    pub const fn new() -> Self {
        Self { root: None }
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insere uma chave, criando a raiz folha na primeira inserção.
    ///
    /// Ordenação estrita por `base`; rejeição de duplicatas acontece uma
    /// camada acima, via busca prévia.
    pub fn insert(&mut self, pool: &mut NodePool, key: MappingKey) -> MidgardResult<()> {
        let root = match self.root {
            Some(r) => r,
            None => {
                let r = pool.create_node(true)?;
                self.root = Some(r);
                r
            }
        };

        if pool.node(root).is_full() {
            // Raiz cheia: sobe um nível antes de descer
            let new_root = pool.create_node(false)?;
            pool.node_mut(new_root).children[0] = Some(root);
            Self::split_child(pool, new_root, 0)?;
            self.root = Some(new_root);
            Self::insert_non_full(pool, new_root, key)
        } else {
            Self::insert_non_full(pool, root, key)
        }
    }

    /// Descida recursiva em nó garantidamente não-cheio
    fn insert_non_full(pool: &mut NodePool, id: NodeId, key: MappingKey) -> MidgardResult<()> {
        if pool.node(id).leaf {
            let node = pool.node_mut(id);
            let mut i = node.key_cnt;
            while i > 0 && key.base < node.keys[i - 1].base {
                node.keys[i] = node.keys[i - 1];
                i -= 1;
            }
            node.keys[i] = key;
            node.key_cnt += 1;
            return Ok(());
        }

        let node = pool.node(id);
        let mut i = node.key_cnt;
        while i > 0 && key.base < node.keys[i - 1].base {
            i -= 1;
        }
        let mut child = node.children[i].ok_or(MidgardError::CorruptedNode)?;
        if pool.node(child).is_full() {
            Self::split_child(pool, id, i)?;
            // A mediana subiu para a posição i; a chave pode cair no irmão novo
            if key.base > pool.node(id).keys[i].base {
                i += 1;
            }
            child = pool.node(id).children[i].ok_or(MidgardError::CorruptedNode)?;
        }
        Self::insert_non_full(pool, child, key)
    }

    /// Divide o filho cheio `i` de `parent`: a metade alta migra para um
    /// irmão novo de mesma folha-ness e a mediana é promovida ao pai na
    /// posição `i`, com o irmão entrando como filho `i + 1`.
    fn split_child(pool: &mut NodePool, parent: NodeId, i: usize) -> MidgardResult<()> {
        const MID: usize = (BTREE_GRADE - 1) / 2;
        const SIBLING_KEYS: usize = BTREE_GRADE / 2 - 1;
        const SIBLING_CHILDREN: usize = BTREE_GRADE / 2;

        let full = pool.node(parent).children[i].ok_or(MidgardError::CorruptedNode)?;
        let leaf = pool.node(full).leaf;
        let sibling = pool.create_node(leaf)?;

        // Arrays são Copy: lê o nó cheio de uma vez, escreve no irmão depois
        let (full_keys, full_children) = {
            let f = pool.node(full);
            (f.keys, f.children)
        };

        {
            let s = pool.node_mut(sibling);
            for j in 0..SIBLING_KEYS {
                s.keys[j] = full_keys[j + MID + 1];
            }
            if !leaf {
                for j in 0..SIBLING_CHILDREN {
                    s.children[j] = full_children[j + MID + 1];
                }
            }
            s.key_cnt = SIBLING_KEYS;
        }

        {
            let f = pool.node_mut(full);
            f.key_cnt = MID;
            // Slots migrados ficam vazios: nenhum filho pode ser alcançável
            // por dois nós ao mesmo tempo
            if !leaf {
                for j in MID + 1..BTREE_GRADE {
                    f.children[j] = None;
                }
            }
        }

        let median = full_keys[MID];
        let p = pool.node_mut(parent);
        let mut j = p.key_cnt;
        while j > i {
            p.children[j + 1] = p.children[j];
            j -= 1;
        }
        p.children[i + 1] = Some(sibling);
        let mut j = p.key_cnt;
        while j > i {
            p.keys[j] = p.keys[j - 1];
            j -= 1;
        }
        p.keys[i] = median;
        p.key_cnt += 1;
        Ok(())
    }

    /// Busca o mapeamento que cobre `addr` com bound exclusivo
    pub fn find(&self, pool: &NodePool, addr: VirtAddr) -> Option<(NodeId, usize)> {
        self.locate(pool, addr, BoundMode::Exclusive)
    }

    /// Busca com bound inclusivo: `addr == bound` ainda resolve
    pub fn find_close(&self, pool: &NodePool, addr: VirtAddr) -> Option<(NodeId, usize)> {
        self.locate(pool, addr, BoundMode::Inclusive)
    }

    /// Descida O(GRADE * profundidade), leitura pura.
    /// O predicado de avanço acompanha o modo: com bound inclusivo a chave só
    /// é ultrapassada quando `addr` passa DO bound, para que consulta exata
    /// no fim resolva para a própria região e não para a vizinha.
    fn locate(&self, pool: &NodePool, addr: VirtAddr, mode: BoundMode) -> Option<(NodeId, usize)> {
        let mut cur = self.root?;
        loop {
            let node = pool.node(cur);
            let mut i = 0;
            while i < node.key_cnt {
                let past = match mode {
                    BoundMode::Exclusive => addr >= node.keys[i].bound,
                    BoundMode::Inclusive => addr > node.keys[i].bound,
                };
                if !past {
                    break;
                }
                i += 1;
            }

            if i < node.key_cnt {
                let hit = match mode {
                    BoundMode::Exclusive => node.keys[i].covers(addr),
                    BoundMode::Inclusive => node.keys[i].covers_close(addr),
                };
                if hit {
                    return Some((cur, i));
                }
            }

            if node.leaf {
                return None;
            }
            cur = node.children[i]?;
        }
    }

    /// Acumula a sequência de chaves por travessia em ordem
    pub fn collect_keys(&self, pool: &NodePool, out: &mut Vec<MappingKey>) {
        if let Some(root) = self.root {
            Self::collect_in_order(pool, root, out);
        }
    }

    fn collect_in_order(pool: &NodePool, id: NodeId, out: &mut Vec<MappingKey>) {
        let node = pool.node(id);
        for i in 0..node.key_cnt {
            if let Some(c) = node.children[i] {
                Self::collect_in_order(pool, c, out);
            }
            out.push(node.keys[i]);
        }
        if let Some(c) = node.children[node.key_cnt] {
            Self::collect_in_order(pool, c, out);
        }
    }

    /// Cópia compactada e independente: mesmo conjunto de chaves, nenhum nó
    /// em comum com a origem. A árvore viva continua mutável enquanto a
    /// cópia congelada é preparada para publicação.
    pub fn duplicate(&self, pool: &mut NodePool) -> MidgardResult<MapTree> {
        let mut keys = Vec::new();
        self.collect_keys(pool, &mut keys);
        let mut copy = MapTree::new();
        for key in keys {
            copy.insert(pool, key)?;
        }
        Ok(copy)
    }

    /// Dump recursivo da estrutura para diagnóstico
    pub fn dump(&self, pool: &NodePool) {
        match self.root {
            Some(root) => {
                crate::kdebug!("(MIDGARD) dump: raiz no=", root.index() as u64);
                Self::dump_node(pool, root, 0);
            }
            None => {
                crate::kdebug!("(MIDGARD) dump: tabela vazia");
            }
        }
    }

    fn dump_node(pool: &NodePool, id: NodeId, depth: usize) {
        let node = pool.node(id);
        crate::klog!("no=", id.index() as u64, " prof=", depth as u64);
        if node.leaf {
            crate::klog!(" folha");
        }
        crate::knl!();
        for key in node.keys() {
            crate::klog!("  base=", key.base.as_u64(), " bound=", key.bound.as_u64());
            crate::klog!(" off=", key.offset);
            crate::knl!();
        }
        for i in 0..=node.key_cnt {
            if let Some(c) = node.children[i] {
                Self::dump_node(pool, c, depth + 1);
            }
        }
    }
}

impl Default for MapTree {
    fn default() -> Self {
        Self::new()
    }
}
