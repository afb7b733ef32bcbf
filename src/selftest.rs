//! # Self Test do Subsistema Midgard
//!
//! Suite executável dentro do kernel (feature `self_test`), sem harness do
//! cargo. O boot chama `run_midgard_tests()` depois de instalar o sink de
//! console e decide o que fazer com falhas.

use crate::addr::VirtAddr;
use crate::hw::NullWalkerReg;
use crate::key::Protection;
use crate::table::{Midgard, TranslationTable};

/// Resultado de teste
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestResult {
    Passed,
    Failed,
    Skipped,
}

/// Um caso de teste
pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
}

impl TestCase {
    pub const fn new(name: &'static str, func: fn() -> TestResult) -> Self {
        Self { name, func }
    }
}

/// Executa suite de testes; retorna (passed, failed, skipped)
pub fn run_test_suite(name: &str, tests: &[TestCase]) -> (usize, usize, usize) {
    crate::klog!("=== Executando suite: ");
    crate::klog!(name);
    crate::knl!();

    let mut passed = 0;
    let mut failed = 0;
    let mut skipped = 0;

    for test in tests {
        match (test.func)() {
            TestResult::Passed => {
                crate::kok!(test.name);
                passed += 1;
            }
            TestResult::Failed => {
                crate::kfail!(test.name);
                failed += 1;
            }
            TestResult::Skipped => {
                crate::kwarn!(test.name);
                skipped += 1;
            }
        }
    }

    crate::kinfo!("Resultados: passed=", passed as u64);
    (passed, failed, skipped)
}

/// Suite do subsistema midgard
pub const MIDGARD_TESTS: &[TestCase] = &[
    TestCase::new("midgard_map_lookup", test_map_lookup),
    TestCase::new("midgard_root_split", test_root_split),
    TestCase::new("midgard_publish", test_publish),
];

pub fn run_midgard_tests() -> (usize, usize, usize) {
    run_test_suite("midgard", MIDGARD_TESTS)
}

/// Teste: mapear uma região e resolver um endereço interno
fn test_map_lookup() -> TestResult {
    let mut mg = Midgard::new(NullWalkerReg::new(), 64);
    let mut table = TranslationTable::new();

    let base = VirtAddr::new(0x4000_1000);
    let mid = match mg.map(&mut table, base, 0x1000, Protection::RW, false) {
        Ok(m) => m,
        Err(_) => {
            crate::kerror!("(SelfTest) map falhou");
            return TestResult::Failed;
        }
    };

    match mg.lookup(&table, VirtAddr::new(0x4000_1800)) {
        Some(key) if key.translate(base) == mid => TestResult::Passed,
        _ => {
            crate::kerror!("(SelfTest) lookup divergente");
            TestResult::Failed
        }
    }
}

/// Teste: quarta inserção força split da raiz
fn test_root_split() -> TestResult {
    let mut mg = Midgard::new(NullWalkerReg::new(), 64);
    let mut table = TranslationTable::new();

    for i in 0u64..4 {
        let base = VirtAddr::new(0x1000 + i * 0x2000);
        if mg.map(&mut table, base, 0x1000, Protection::READ, false).is_err() {
            crate::kerror!("(SelfTest) map falhou em i=", i);
            return TestResult::Failed;
        }
    }

    let root = match table.tree().root() {
        Some(r) => r,
        None => {
            crate::kerror!("(SelfTest) raiz ausente");
            return TestResult::Failed;
        }
    };
    let node = mg.pool().node(root);
    if node.is_leaf() || node.key_count() != 1 {
        crate::kerror!("(SelfTest) raiz nao dividiu");
        return TestResult::Failed;
    }
    TestResult::Passed
}

/// Teste: publicação instala raiz não-nula no registrador
fn test_publish() -> TestResult {
    let mut mg = Midgard::new(NullWalkerReg::new(), 64);
    let mut table = TranslationTable::new();

    let base = VirtAddr::new(0x7000);
    if mg.map(&mut table, base, 0x1000, Protection::RX, true).is_err() {
        crate::kerror!("(SelfTest) map com publish falhou");
        return TestResult::Failed;
    }

    match mg.hw().last_root() {
        Some(root) if !root.is_null() => TestResult::Passed,
        _ => {
            crate::kerror!("(SelfTest) raiz nao publicada");
            TestResult::Failed
        }
    }
}
