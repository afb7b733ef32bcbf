// =============================================================================
// MIDGARD LOGGING - ZERO OVERHEAD
// =============================================================================
//
// Mesmo desenho do logging do kernel: filtragem em tempo de compilação via
// features do Cargo. Com "no_logs", TODOS os macros viram expressões vazias.
// Sem core::fmt, sem alocação: apenas strings literais e valores hex.
//
// NÍVEIS (do mais crítico ao menos):
// - ERROR, WARN, INFO, DEBUG, TRACE
//
// USO:
//   kinfo!("(MIDGARD) Inicializando...");      // Apenas string
//   kinfo!("(MIDGARD) Base=", 0x1000);         // String + hex
//   klog!("base=", base, " bound=", bound);    // Múltiplos valores
//
// =============================================================================

// =============================================================================
// PREFIXOS COM CORES ANSI
// =============================================================================

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($msg:expr) => {{
        $crate::console::emit_str($crate::logging::P_ERROR);
        $crate::console::emit_str($msg);
        $crate::console::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::console::emit_str($crate::logging::P_ERROR);
        $crate::console::emit_str($msg);
        $crate::console::emit_hex($val as u64);
        $crate::console::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($msg:expr) => {{
        $crate::console::emit_str($crate::logging::P_WARN);
        $crate::console::emit_str($msg);
        $crate::console::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::console::emit_str($crate::logging::P_WARN);
        $crate::console::emit_str($msg);
        $crate::console::emit_hex($val as u64);
        $crate::console::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kinfo {
    ($msg:expr) => {{
        $crate::console::emit_str($crate::logging::P_INFO);
        $crate::console::emit_str($msg);
        $crate::console::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::console::emit_str($crate::logging::P_INFO);
        $crate::console::emit_str($msg);
        $crate::console::emit_hex($val as u64);
        $crate::console::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================

#[cfg(any(feature = "log_trace", feature = "log_debug"))]
#[macro_export]
macro_rules! kdebug {
    ($msg:expr) => {{
        $crate::console::emit_str($crate::logging::P_DEBUG);
        $crate::console::emit_str($msg);
        $crate::console::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::console::emit_str($crate::logging::P_DEBUG);
        $crate::console::emit_str($msg);
        $crate::console::emit_hex($val as u64);
        $crate::console::emit_nl();
    }};
}

#[cfg(not(any(feature = "log_trace", feature = "log_debug")))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================

#[cfg(feature = "log_trace")]
#[macro_export]
macro_rules! ktrace {
    ($msg:expr) => {{
        $crate::console::emit_str($crate::logging::P_TRACE);
        $crate::console::emit_str($msg);
        $crate::console::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::console::emit_str($crate::logging::P_TRACE);
        $crate::console::emit_str($msg);
        $crate::console::emit_hex($val as u64);
        $crate::console::emit_nl();
    }};
}

#[cfg(not(feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS AUXILIARES
// =============================================================================

/// klog! - Log genérico sem prefixo de nível, para linhas compostas.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! klog {
    ($msg:expr) => {{
        $crate::console::emit_str($msg);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::console::emit_str($msg);
        $crate::console::emit_hex($val as u64);
    }};
    ($msg1:expr, $val:expr, $msg2:expr) => {{
        $crate::console::emit_str($msg1);
        $crate::console::emit_hex($val as u64);
        $crate::console::emit_str($msg2);
    }};
    ($msg1:expr, $val1:expr, $msg2:expr, $val2:expr) => {{
        $crate::console::emit_str($msg1);
        $crate::console::emit_hex($val1 as u64);
        $crate::console::emit_str($msg2);
        $crate::console::emit_hex($val2 as u64);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! klog {
    ($($t:tt)*) => {{}};
}

/// knl! - Emite apenas newline.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! knl {
    () => {{
        $crate::console::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! knl {
    () => {{}};
}

/// kok! - Log de sucesso (prefixo verde [OK]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kok {
    ($msg:expr) => {{
        $crate::console::emit_str("\x1b[32m[OK]\x1b[0m ");
        $crate::console::emit_str($msg);
        $crate::console::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {{}};
}

/// kfail! - Log de falha (prefixo vermelho [FAIL]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kfail {
    ($msg:expr) => {{
        $crate::console::emit_str("\x1b[1;31m[FAIL]\x1b[0m ");
        $crate::console::emit_str($msg);
        $crate::console::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kfail {
    ($($t:tt)*) => {{}};
}
