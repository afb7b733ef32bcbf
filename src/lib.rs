//! Midgard: Tabelas de Tradução Gerenciadas por Software.
//!
//! Lado de software do mecanismo de lookup midgard: uma B-tree aumentada
//! mapeia intervalos virtuais para o espaço de endereços secundário, é
//! congelada periodicamente numa forma consumível por hardware e publicada
//! através do registrador de controle do walker.
//!
//! Fluxo: o chamador pede um mapeamento; a orquestração rejeita duplicatas
//! via busca por intervalo, insere a chave (pool de nós de alocação bruta,
//! split preemptivo) e, conforme o modo, sanitiza a árvore viva ou congela
//! uma réplica, sanitiza só ela e troca o registrador de raiz.

#![no_std]

#[cfg(test)]
extern crate std;

extern crate alloc;

// --- Infra (configuração, erros, diagnóstico) ---
pub mod config; // Constantes da B-tree e da síntese de endereços
pub mod console; // Primitivos de emissão com sink instalável
pub mod error; // Erros estruturados do subsistema
pub mod logging; // Macros k* zero-overhead

// --- Modelo de dados ---
pub mod addr; // VirtAddr / MidgardAddr / HwAddr
pub mod key; // MappingKey e byte de proteção
pub mod node; // Nó da B-tree, índices de pool
pub mod pool; // Pool de nós append-only

// --- Motor e publicação ---
pub mod hw; // Colaboradores de hardware (walker)
pub mod snapshot; // Sanitização e visão do walker
pub mod table; // Orquestração de mapeamento e publicação
pub mod tree; // B-tree de intervalos

#[cfg(feature = "self_test")]
pub mod selftest;

#[cfg(test)]
mod tests;

// Re-exports do caminho comum
pub use addr::{HwAddr, MidgardAddr, VirtAddr};
pub use error::{MidgardError, MidgardResult};
pub use key::{MappingKey, Protection};
pub use table::{Midgard, TranslationTable};
