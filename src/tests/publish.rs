//! Testes de réplica, sanitização e publicação no walker

use crate::error::MidgardError;
use crate::hw::NullWalkerReg;
use crate::snapshot::sanitize;
use crate::table::{Midgard, TranslationTable};
use crate::{MidgardAddr, Protection, VirtAddr};

fn service() -> (Midgard<NullWalkerReg>, TranslationTable) {
    (Midgard::new(NullWalkerReg::new(), 128), TranslationTable::new())
}

fn map_n(mg: &mut Midgard<NullWalkerReg>, table: &mut TranslationTable, n: u64, publish: bool) {
    for i in 0..n {
        let base = 0x1000 + i * 0x2000;
        mg.map_at(
            table,
            MidgardAddr::new(0xff00_0000_0000_0000 | base),
            VirtAddr::new(base),
            0x1000,
            Protection::READ,
            publish,
        )
        .unwrap();
    }
}

#[test]
fn test_private_mode_keeps_view_current_without_hardware() {
    let (mut mg, mut table) = service();
    map_n(&mut mg, &mut table, 5, false);

    // nada chegou ao registrador
    assert_eq!(mg.hw().installs(), 0);
    assert!(mg.hw().last_root().is_none());

    // mas a visão da árvore viva está corrente
    assert!(!table.view().root().is_null());
    let root = table.tree().root().unwrap();
    assert!(table.view().row(root).is_some());
}

#[test]
fn test_publish_mode_installs_replica_root() {
    let (mut mg, mut table) = service();
    map_n(&mut mg, &mut table, 1, true);

    assert_eq!(mg.hw().installs(), 1);
    let published = mg.hw().last_root().unwrap();
    assert!(!published.is_null());

    // a raiz publicada é da réplica, não da árvore viva
    let live_root = table.tree().root().unwrap();
    let live_handle = mg.pool().node_ptr(live_root) as u64;
    assert_ne!(published.as_u64(), live_handle);

    // árvore viva não foi marcada neste modo
    assert!(table.view().root().is_null());
}

#[test]
fn test_publish_snapshot_without_insert() {
    let (mut mg, mut table) = service();
    map_n(&mut mg, &mut table, 3, false);

    mg.publish(&table).unwrap();
    assert_eq!(mg.hw().installs(), 1);

    // última publicação vence
    mg.publish(&table).unwrap();
    assert_eq!(mg.hw().installs(), 2);
}

#[test]
fn test_publish_empty_table_fails() {
    let (mut mg, table) = service();
    assert_eq!(mg.publish(&table), Err(MidgardError::EmptyTable));
    assert_eq!(mg.hw().installs(), 0);
}

#[test]
fn test_sanitize_is_idempotent() {
    let (mut mg, mut table) = service();
    map_n(&mut mg, &mut table, 7, false);

    let first = sanitize(table.tree(), mg.pool(), mg.hw());
    let second = sanitize(table.tree(), mg.pool(), mg.hw());
    assert_eq!(first, second);
    assert_eq!(first.root(), second.root());
}

#[test]
fn test_replica_preserves_key_sequence() {
    let (mut mg, mut table) = service();
    map_n(&mut mg, &mut table, 9, false);

    // a publicação congela uma réplica; a árvore viva continua respondendo
    mg.publish(&table).unwrap();
    for i in 0u64..9 {
        let base = 0x1000 + i * 0x2000;
        assert!(mg.lookup(&table, VirtAddr::new(base)).is_some());
    }
}

#[test]
fn test_duplicate_explicit_returns_existing_translation() {
    let (mut mg, mut table) = service();

    let first = MidgardAddr::new(0xff00_0000_0000_a000);
    mg.map_at(
        &mut table,
        first,
        VirtAddr::new(0x1000),
        0x1000,
        Protection::RW,
        false,
    )
    .unwrap();

    // segunda tentativa dentro da mesma região: devolve a tradução já
    // registrada e não toca na árvore
    let other = MidgardAddr::new(0xff00_0000_0000_b000);
    let got = mg
        .map_at(
            &mut table,
            other,
            VirtAddr::new(0x1500),
            0x1000,
            Protection::RW,
            false,
        )
        .unwrap();
    assert_eq!(got.as_u64(), first.as_u64() + 0x500);

    let mut keys = std::vec::Vec::new();
    table.tree().collect_keys(mg.pool(), &mut keys);
    assert_eq!(keys.len(), 1);
}

#[test]
fn test_duplicate_synthesized_is_fatal_error() {
    let (mut mg, mut table) = service();

    mg.map(&mut table, VirtAddr::new(0x5000), 0x1000, Protection::READ, false)
        .unwrap();
    let err = mg
        .map(&mut table, VirtAddr::new(0x5000), 0x1000, Protection::READ, false)
        .unwrap_err();
    assert_eq!(err, MidgardError::DuplicateMapping);
    assert!(err.is_fatal());
}

#[test]
fn test_synthesized_addresses_are_distinct() {
    let (mut mg, mut table) = service();

    let a = mg
        .map(&mut table, VirtAddr::new(0x1234), 0x1000, Protection::READ, false)
        .unwrap();
    let b = mg
        .map(&mut table, VirtAddr::new(0x4000), 0x1000, Protection::READ, false)
        .unwrap();

    assert_ne!(a, b);
    // padrão alto fixo + offset de página preservado
    assert_eq!(a.as_u64() >> 56, 0xff);
    assert_eq!(a.as_u64() & 0xfff, 0x234);
    assert_eq!(b.as_u64() & 0xfff, 0x000);
}

#[test]
fn test_malformed_range_rejected() {
    let (mut mg, mut table) = service();

    assert_eq!(
        mg.map(&mut table, VirtAddr::new(0x1000), 0, Protection::READ, false),
        Err(MidgardError::InvalidRange)
    );
    assert_eq!(
        mg.map(&mut table, VirtAddr::new(u64::MAX - 0xfff), 0x2000, Protection::READ, false),
        Err(MidgardError::InvalidRange)
    );
    assert!(table.is_empty());
}
