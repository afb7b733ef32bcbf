//! # Chave de Mapeamento (Mapping Key)
//!
//! Cada região virtual mapeada para o espaço midgard, com offset e proteção.

use crate::addr::{MidgardAddr, VirtAddr};
use bitflags::bitflags;

bitflags! {
    /// Byte de proteção carregado por região.
    /// O core só armazena e devolve; quem interpreta é o walker/política.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Protection: u8 {
        const READ  = 1 << 0;
        const WRITE = 1 << 1;
        const EXEC  = 1 << 2;
    }
}

impl Protection {
    pub const RW: Self = Self::READ.union(Self::WRITE);
    pub const RX: Self = Self::READ.union(Self::EXEC);
}

/// Registro de intervalo: `[base, bound)` traduzido por `offset`.
///
/// `offset = midgard - base` em aritmética wrapping; somar o offset a
/// qualquer endereço dentro do intervalo produz seu endereço midgard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingKey {
    /// Base virtual (inclusiva)
    pub base: VirtAddr,
    /// Limite virtual (exclusivo no lookup normal)
    pub bound: VirtAddr,
    /// Constante de tradução para o espaço midgard
    pub offset: u64,
    /// Byte de proteção opaco
    pub prot: Protection,
}

impl MappingKey {
    pub fn new(base: VirtAddr, bound: VirtAddr, mid: MidgardAddr, prot: Protection) -> Self {
        Self {
            base,
            bound,
            offset: mid.as_u64().wrapping_sub(base.as_u64()),
            prot,
        }
    }

    /// Cobertura com bound exclusivo: `base <= addr < bound`
    #[inline]
    pub fn covers(&self, addr: VirtAddr) -> bool {
        addr >= self.base && addr < self.bound
    }

    /// Cobertura com bound inclusivo: `base <= addr <= bound`.
    /// Usada para estender/anexar regiões adjacentes.
    #[inline]
    pub fn covers_close(&self, addr: VirtAddr) -> bool {
        addr >= self.base && addr <= self.bound
    }

    /// Traduz um endereço virtual coberto para seu endereço midgard
    #[inline]
    pub fn translate(&self, addr: VirtAddr) -> MidgardAddr {
        MidgardAddr::new(addr.as_u64().wrapping_add(self.offset))
    }

    /// Chave vazia usada para inicializar slots de nó ainda não ocupados
    pub(crate) const EMPTY: Self = Self {
        base: VirtAddr::new(0),
        bound: VirtAddr::new(0),
        offset: 0,
        prot: Protection::empty(),
    };
}
