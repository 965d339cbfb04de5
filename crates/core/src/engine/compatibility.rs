use crate::domain::analysis::{CompatibilityCheckResult, Severity};
use crate::domain::build::Build;
use crate::domain::part::UNIVERSAL_SOCKET;
use crate::engine::wattage;

/// Evaluates every rule independently; a build is compatible when no rule raised an error.
pub fn check_compatibility(build: &Build) -> CompatibilityCheckResult {
    let mut out = CompatibilityCheckResult::default();

    let cpu = build.cpu();
    let board = build.motherboard();

    if let (Some((cpu_part, cpu)), Some((board_part, board))) = (cpu, board) {
        if cpu.socket != board.socket {
            out.push(
                Severity::Error,
                &[cpu_part, board_part],
                format!(
                    "CPU socket mismatch ({} vs motherboard {})",
                    cpu.socket, board.socket
                ),
            );
        }
    }

    if let (Some((cpu_part, cpu)), Some((cooler_part, cooler))) = (cpu, build.cooler()) {
        if cooler.socket != UNIVERSAL_SOCKET && cooler.socket != cpu.socket {
            out.push(
                Severity::Error,
                &[cpu_part, cooler_part],
                format!(
                    "Cooler socket mismatch ({} vs CPU {})",
                    cooler.socket, cpu.socket
                ),
            );
        }
    }

    if let (Some((ram_part, ram)), Some((board_part, board))) = (build.ram(), board) {
        if ram.memory_type != board.memory_type {
            out.push(
                Severity::Error,
                &[ram_part, board_part],
                format!(
                    "RAM type mismatch ({} vs motherboard {})",
                    ram.memory_type, board.memory_type
                ),
            );
        }
        if ram.capacity_gb > board.max_memory_gb {
            out.push(
                Severity::Warning,
                &[ram_part, board_part],
                format!(
                    "RAM capacity exceeds motherboard maximum ({}GB > {}GB)",
                    ram.capacity_gb, board.max_memory_gb
                ),
            );
        }
    }

    if let (Some((gpu_part, gpu)), Some((case_part, case))) = (build.gpu(), build.case()) {
        if gpu.length_mm > case.max_gpu_length_mm {
            out.push(
                Severity::Error,
                &[gpu_part, case_part],
                format!(
                    "GPU too long for case ({}mm > {}mm)",
                    gpu.length_mm, case.max_gpu_length_mm
                ),
            );
        }
    }

    if let (Some((board_part, board)), Some((case_part, case))) = (board, build.case()) {
        if !case.form_factor.case_fits_board(board.form_factor) {
            out.push(
                Severity::Error,
                &[board_part, case_part],
                format!(
                    "Form factor mismatch ({} motherboard in {} case)",
                    board.form_factor, case.form_factor
                ),
            );
        }
    }

    if let Some((psu_part, psu)) = build.psu() {
        let total = wattage::estimate_total_wattage(build);
        let recommended = wattage::recommended_for_total(total);
        if psu.wattage_rating < total {
            out.push(
                Severity::Error,
                &[psu_part],
                format!("Insufficient wattage ({}W < {}W)", psu.wattage_rating, total),
            );
        } else if psu.wattage_rating < recommended {
            out.push(
                Severity::Warning,
                &[psu_part],
                format!(
                    "Below recommended wattage ({}W < {}W)",
                    psu.wattage_rating, recommended
                ),
            );
        }
    }

    if let (Some((cpu_part, cpu)), None) = (cpu, build.gpu()) {
        if cpu.integrated_graphics {
            out.push(
                Severity::Note,
                &[cpu_part],
                "CPU has integrated graphics; adding a dedicated GPU is recommended for gaming"
                    .to_string(),
            );
        } else {
            out.push(
                Severity::Note,
                &[cpu_part],
                "CPU has no integrated graphics; a dedicated GPU is required for display output"
                    .to_string(),
            );
        }
    }

    out.is_compatible = out.errors.is_empty();
    out
}
