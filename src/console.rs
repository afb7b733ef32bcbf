//! # Primitivos de Emissão de Diagnóstico
//!
//! O kernel loga pela serial; esta crate é neutra de plataforma, então os
//! primitivos escrevem num sink de linha instalável no boot. Sem sink
//! instalado, a emissão é descartada. O caminho de log não aloca e não passa
//! por `core::fmt`.

use spin::Mutex;

static SINK: Mutex<Option<fn(&str)>> = Mutex::new(None);

/// Instala o sink de saída. Chamado uma vez no boot pelo dono do console.
pub fn set_sink(sink: fn(&str)) {
    *SINK.lock() = Some(sink);
}

pub fn emit_str(s: &str) {
    if let Some(sink) = *SINK.lock() {
        sink(s);
    }
}

pub fn emit_nl() {
    emit_str("\n");
}

fn nibble_to_ascii(n: u8) -> u8 {
    if n < 10 {
        b'0' + n
    } else {
        b'a' + (n - 10)
    }
}

/// Emite um valor em hex com formatação manual de nibbles
pub fn emit_hex(value: u64) {
    let mut buf = [0u8; 18];
    buf[0] = b'0';
    buf[1] = b'x';
    for i in 0..16 {
        let shift = 60 - i * 4;
        buf[2 + i] = nibble_to_ascii(((value >> shift) & 0xF) as u8);
    }
    if let Ok(s) = core::str::from_utf8(&buf) {
        emit_str(s);
    }
}
