//! Testes de exaustão do pool de nós

use super::{in_order_bases, key};
use crate::error::MidgardError;
use crate::hw::NullWalkerReg;
use crate::pool::NodePool;
use crate::table::{Midgard, TranslationTable};
use crate::tree::MapTree;
use crate::{Protection, VirtAddr};

#[test]
fn test_pool_refuses_allocation_past_capacity() {
    let mut pool = NodePool::new(4);

    for _ in 0..4 {
        pool.create_node(true).unwrap();
    }
    assert_eq!(pool.len(), 4);
    assert_eq!(pool.create_node(true), Err(MidgardError::PoolExhausted));
    // cursor não anda em falha
    assert_eq!(pool.len(), 4);
}

#[test]
fn test_exhaustion_is_fatal_and_leaves_tree_consistent() {
    let mut pool = NodePool::new(4);
    let mut tree = MapTree::new();

    let mut inserted = 0u64;
    let err = loop {
        let base = 0x1000 + inserted * 0x2000;
        match tree.insert(&mut pool, key(base, 0x1000)) {
            Ok(()) => inserted += 1,
            Err(e) => break e,
        }
    };

    assert_eq!(err, MidgardError::PoolExhausted);
    assert!(err.is_fatal());

    // a inserção falhada não vazou chave nem quebrou a árvore
    let bases = in_order_bases(&pool, &tree);
    assert_eq!(bases.len() as u64, inserted);
    super::check_invariants(&pool, &tree);
}

#[test]
fn test_exhaustion_surfaces_through_orchestrator() {
    let mut mg = Midgard::new(NullWalkerReg::new(), 4);
    let mut table = TranslationTable::new();

    let mut last = Ok(());
    for i in 0u64..64 {
        let base = 0x1000 + i * 0x2000;
        match mg.map(&mut table, VirtAddr::new(base), 0x1000, Protection::READ, false) {
            Ok(_) => {}
            Err(e) => {
                last = Err(e);
                break;
            }
        }
    }
    assert_eq!(last, Err(MidgardError::PoolExhausted));
}

#[test]
fn test_publish_needs_room_for_replica() {
    // pool com espaço para a árvore viva mas não para a réplica
    let mut mg = Midgard::new(NullWalkerReg::new(), 1);
    let mut table = TranslationTable::new();

    mg.map(&mut table, VirtAddr::new(0x1000), 0x1000, Protection::READ, false)
        .unwrap();
    assert_eq!(mg.publish(&table), Err(MidgardError::PoolExhausted));
    assert_eq!(mg.hw().installs(), 0);
}
