//! # Interface com o Walker de Hardware
//!
//! Fronteira estreita com o ambiente: traduzir a referência de um nó para o
//! identificador que o walker derreferencia, e instalar a raiz publicada no
//! registrador de controle. O layout interno do registrador pertence ao
//! walker, não a este subsistema.

use crate::addr::HwAddr;
use crate::config::KERNEL_IMAGE_BASE;
use crate::node::Node;
use core::ptr::NonNull;
use volatile::VolatilePtr;

/// Colaboradores de hardware do subsistema midgard
pub trait WalkerHw {
    /// Traduz o storage de um nó para identificador endereçável pelo walker
    /// (identidade em configurações sem tradução física)
    fn node_handle(&self, node: *const Node) -> HwAddr;

    /// Instala o identificador de raiz no registrador de controle.
    /// Escrita atômica de uma palavra; última escrita vence.
    fn install_root(&mut self, root: HwAddr);
}

/// Registrador de controle atrás de uma palavra MMIO, com tradução
/// virtual→física fornecida pelo kernel.
pub struct MmioWalkerReg {
    reg: usize,
    translate: fn(*const Node) -> u64,
}

impl MmioWalkerReg {
    /// # Safety
    ///
    /// `reg` deve ser o endereço mapeado do registrador de raiz do walker,
    /// válido por toda a vida do valor.
    pub const unsafe fn new(reg: usize, translate: fn(*const Node) -> u64) -> Self {
        Self { reg, translate }
    }
}

impl WalkerHw for MmioWalkerReg {
    fn node_handle(&self, node: *const Node) -> HwAddr {
        // Antes da relocação da imagem, traduções simbólicas ainda não
        // produzem endereços físicos válidos; identidade até lá.
        if (self.translate as usize) < KERNEL_IMAGE_BASE {
            return HwAddr::new(node as u64);
        }
        HwAddr::new((self.translate)(node))
    }

    fn install_root(&mut self, root: HwAddr) {
        let reg = self.reg as *mut u64;
        // SAFETY: contrato do construtor: `reg` aponta para o registrador
        // de controle mapeado.
        let ptr = unsafe { VolatilePtr::new(NonNull::new_unchecked(reg)) };
        ptr.write(root.as_u64());
        crate::kinfo!("(MIDGARD) Raiz publicada no walker: ", root.as_u64());
    }
}

/// Stub para plataformas sem walker e para testes: registra a última raiz
/// instalada em vez de tocar hardware.
#[derive(Debug, Default)]
pub struct NullWalkerReg {
    last_root: Option<HwAddr>,
    installs: usize,
}

impl NullWalkerReg {
    pub const fn new() -> Self {
        Self {
            last_root: None,
            installs: 0,
        }
    }

    /// Última raiz instalada, se alguma publicação já ocorreu
    pub fn last_root(&self) -> Option<HwAddr> {
        self.last_root
    }

    /// Quantidade de publicações observadas
    pub fn installs(&self) -> usize {
        self.installs
    }
}

impl WalkerHw for NullWalkerReg {
    fn node_handle(&self, node: *const Node) -> HwAddr {
        HwAddr::new(node as u64)
    }

    fn install_root(&mut self, root: HwAddr) {
        self.last_root = Some(root);
        self.installs += 1;
        crate::ktrace!("(MIDGARD) NullWalkerReg: raiz=", root.as_u64());
    }
}
