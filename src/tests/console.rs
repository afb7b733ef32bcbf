//! Testes do console instalável e do dump de diagnóstico

use super::key;
use crate::console;
use crate::pool::NodePool;
use crate::tree::MapTree;
use spin::Mutex;
use std::string::String;

static CAPTURED: Mutex<String> = Mutex::new(String::new());

fn capture(s: &str) {
    CAPTURED.lock().push_str(s);
}

#[test]
fn test_emit_hex_formats_full_width() {
    console::set_sink(capture);
    console::emit_hex(0xdead_beef);
    assert!(CAPTURED.lock().contains("0x00000000deadbeef"));
}

#[test]
fn test_dump_emits_node_structure() {
    console::set_sink(capture);

    let mut pool = NodePool::new(16);
    let mut tree = MapTree::new();
    tree.insert(&mut pool, key(0x1000, 0x1000)).unwrap();
    tree.dump(&pool);

    let out = CAPTURED.lock();
    assert!(out.contains("base="));
    assert!(out.contains("0x0000000000001000"));
    assert!(out.contains("folha"));
}
