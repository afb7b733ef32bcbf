//! # Testes do Subsistema Midgard
//!
//! Organização modular dos testes:
//! - `tree.rs` - Inserção, splits e invariantes estruturais da B-tree
//! - `lookup.rs` - Busca por intervalo nas duas semânticas de bound
//! - `publish.rs` - Réplica, sanitização e publicação no walker
//! - `pool.rs` - Exaustão do pool de nós
//! - `console.rs` - Sink de console e dump de diagnóstico

pub mod console;
pub mod pool;
pub mod publish;

use crate::config::{MAX_KEYS, MIN_KEYS};
use crate::key::{MappingKey, Protection};
use crate::node::NodeId;
use crate::pool::NodePool;
use crate::tree::MapTree;
use crate::{MidgardAddr, VirtAddr};
use std::vec::Vec;

/// Chave de teste: midgard sintético determinístico derivado da base
pub(crate) fn key(base: u64, size: u64) -> MappingKey {
    MappingKey::new(
        VirtAddr::new(base),
        VirtAddr::new(base + size),
        MidgardAddr::new(0xff00_0000_0000_0000 | base),
        Protection::READ,
    )
}

/// Sequência de bases em ordem de travessia
pub(crate) fn in_order_bases(pool: &NodePool, tree: &MapTree) -> Vec<u64> {
    let mut keys = Vec::new();
    tree.collect_keys(pool, &mut keys);
    keys.iter().map(|k| k.base.as_u64()).collect()
}

/// Valida os invariantes estruturais da árvore inteira
pub(crate) fn check_invariants(pool: &NodePool, tree: &MapTree) {
    if let Some(root) = tree.root() {
        check_node(pool, root, true);
    }
}

fn check_node(pool: &NodePool, id: NodeId, is_root: bool) {
    let node = pool.node(id);

    if !is_root {
        assert!(
            node.key_count() >= MIN_KEYS && node.key_count() <= MAX_KEYS,
            "nó não-raiz com contagem de chaves fora da faixa"
        );
    }

    let keys = node.keys();
    for w in keys.windows(2) {
        assert!(w[0].base < w[1].base, "chaves fora de ordem estrita");
    }
    for k in keys {
        assert!(k.base < k.bound, "intervalo degenerado em chave");
    }

    if node.is_leaf() {
        for i in 0..crate::config::BTREE_GRADE {
            assert!(node.child(i).is_none(), "folha com filho");
        }
    } else {
        for i in 0..=node.key_count() {
            let child = node.child(i).expect("nó interno com slot de filho vazio");
            check_node(pool, child, false);
        }
        for i in node.key_count() + 1..crate::config::BTREE_GRADE {
            assert!(node.child(i).is_none(), "filho além de key_cnt + 1");
        }
    }
}

// A suite de self test roda dentro do kernel; aqui só garantimos que ela
// passa inteira no host também.
#[cfg(feature = "self_test")]
#[test]
fn test_selftest_suite_all_pass() {
    let (passed, failed, skipped) = crate::selftest::run_midgard_tests();
    assert_eq!(failed, 0);
    assert_eq!(skipped, 0);
    assert_eq!(passed, crate::selftest::MIDGARD_TESTS.len());
}
