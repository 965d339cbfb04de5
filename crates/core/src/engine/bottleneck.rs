use crate::domain::analysis::{Bottleneck, BottleneckAnalysis};
use crate::domain::build::Build;
use crate::domain::part::{CpuSpecs, GpuSpecs, Part, RamSpecs};

const CPU_BOUND_RATIO: f64 = 1.35;
const GPU_BOUND_RATIO: f64 = 0.65;
const LOW_RAM_SCORE: u32 = 25;
const STRONG_COMPONENT_SCORE: u32 = 50;
const DEFAULT_GPU_TDP_W: f64 = 150.0;

fn clamp_score(raw: f64) -> u32 {
    raw.round().clamp(1.0, 100.0) as u32
}

pub fn score_cpu(cpu: &CpuSpecs) -> u32 {
    clamp_score(cpu.thread_count as f64 * 1.6 + cpu.boost_clock_ghz * 8.0)
}

pub fn score_gpu(part: &Part, gpu: &GpuSpecs) -> u32 {
    let tdp = part
        .wattage
        .map(f64::from)
        .unwrap_or(DEFAULT_GPU_TDP_W);
    let raw = gpu.memory_gb as f64 * 3.5 + gpu.boost_clock_mhz as f64 * 0.025 + tdp * 0.06;
    clamp_score(raw * 100.0 / 175.0)
}

pub fn score_ram(ram: &RamSpecs) -> u32 {
    clamp_score(ram.capacity_gb as f64 * 0.9 + ram.speed_mhz as f64 * 0.008)
}

pub fn analyse(build: &Build) -> BottleneckAnalysis {
    let cpu_score = build.cpu().map(|(_, s)| score_cpu(s)).unwrap_or(0);
    let gpu_score = build.gpu().map(|(p, s)| score_gpu(p, s)).unwrap_or(0);
    let ram_score = build.ram().map(|(_, s)| score_ram(s)).unwrap_or(0);

    if cpu_score == 0 && gpu_score == 0 {
        return BottleneckAnalysis {
            cpu_score,
            gpu_score,
            ram_score,
            balance_ratio: 0.0,
            bottleneck: Bottleneck::Unknown,
            summary: "Insufficient parts to analyse: add a CPU or GPU.".to_string(),
        };
    }

    let balance_ratio = if cpu_score == 0 {
        0.0
    } else {
        gpu_score as f64 / cpu_score as f64
    };

    let (mut bottleneck, mut summary) = if gpu_score == 0 {
        (
            Bottleneck::Gpu,
            "Severely GPU-limited: no dedicated GPU installed.".to_string(),
        )
    } else if cpu_score == 0 {
        (
            Bottleneck::Gpu,
            format!("GPU-limited: no CPU installed to pair with the GPU (score {gpu_score})."),
        )
    } else if balance_ratio > CPU_BOUND_RATIO {
        (
            Bottleneck::Cpu,
            format!(
                "CPU-limited: the GPU (score {gpu_score}) outpaces the CPU (score {cpu_score})."
            ),
        )
    } else if balance_ratio < GPU_BOUND_RATIO {
        (
            Bottleneck::Gpu,
            format!(
                "GPU-limited: the CPU (score {cpu_score}) outpaces the GPU (score {gpu_score})."
            ),
        )
    } else {
        (
            Bottleneck::Balanced,
            format!("Balanced: CPU score {cpu_score} and GPU score {gpu_score} are well matched."),
        )
    };

    let ram_limited = ram_score > 0
        && ram_score < LOW_RAM_SCORE
        && (cpu_score > STRONG_COMPONENT_SCORE || gpu_score > STRONG_COMPONENT_SCORE);
    if ram_limited {
        if bottleneck == Bottleneck::Balanced {
            bottleneck = Bottleneck::Ram;
        }
        summary.push_str(&format!(
            " RAM (score {ram_score}) is also a limiting factor; consider faster or larger memory."
        ));
    }

    BottleneckAnalysis {
        cpu_score,
        gpu_score,
        ram_score,
        balance_ratio,
        bottleneck,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::part::MemoryType;
    use crate::fixtures;

    #[test]
    fn scores_follow_formulas() {
        // 12 * 1.6 + 4.6 * 8 = 19.2 + 36.8 = 56
        assert_eq!(score_cpu(fixtures::cpu(1, 1, "AM5", 12, 4.6).cpu().unwrap()), 56);

        // (8*3.5 + 2000*0.025 + 200*0.06) * 100/175 = (28 + 50 + 12) / 1.75 = 51.43
        let gpu = fixtures::gpu(2, 1, 8, 2000, 250);
        assert_eq!(score_gpu(&gpu, gpu.gpu().unwrap()), 51);

        // 16 * 0.9 + 4800 * 0.008 = 14.4 + 38.4 = 52.8
        let ram = fixtures::ram(3, 1, MemoryType::Ddr5, 4800, 16);
        assert_eq!(score_ram(ram.ram().unwrap()), 53);
    }

    #[test]
    fn gpu_without_wattage_uses_default_tdp() {
        let mut gpu = fixtures::gpu(2, 1, 8, 2000, 250);
        gpu.wattage = None;
        // (28 + 50 + 9) / 1.75 = 49.71
        assert_eq!(score_gpu(&gpu, gpu.gpu().unwrap()), 50);
    }

    #[test]
    fn scores_are_clamped() {
        assert_eq!(score_cpu(fixtures::cpu(1, 1, "AM5", 128, 6.0).cpu().unwrap()), 100);
        assert_eq!(score_cpu(fixtures::cpu(1, 1, "AM5", 0, 0.0).cpu().unwrap()), 1);
    }

    #[test]
    fn cpu_bound_when_gpu_far_ahead() {
        // cpu: 4 threads @ 4.2 GHz -> 6.4 + 33.6 = 40
        // gpu: 24 GB @ 2520 MHz, 450 W -> (84 + 63 + 27) / 1.75 = 99.4
        let mut gpu = fixtures::gpu(2, 1, 24, 2520, 300);
        gpu.wattage = Some(450);
        let build = fixtures::build(vec![fixtures::cpu(1, 1, "AM5", 4, 4.2), gpu]);
        let a = analyse(&build);
        assert_eq!(a.cpu_score, 40);
        assert_eq!(a.bottleneck, Bottleneck::Cpu);
        assert!(a.balance_ratio > 1.35);
    }

    #[test]
    fn ratio_of_forty_and_ninety() {
        // gpu: (77 + 64.5 + 15.9) / 1.75 = 89.94
        let mut gpu = fixtures::gpu(2, 1, 22, 2580, 300);
        gpu.wattage = Some(265);
        let build = fixtures::build(vec![fixtures::cpu(1, 1, "AM5", 4, 4.2), gpu]);
        let a = analyse(&build);
        assert_eq!((a.cpu_score, a.gpu_score), (40, 90));
        assert!((a.balance_ratio - 2.25).abs() < 1e-9);
        assert_eq!(a.bottleneck, Bottleneck::Cpu);
    }

    #[test]
    fn missing_cpu_is_gpu_limited() {
        let build = fixtures::build(vec![fixtures::gpu(2, 1, 8, 2000, 250)]);
        let a = analyse(&build);
        assert_eq!(a.cpu_score, 0);
        assert_eq!(a.balance_ratio, 0.0);
        assert_eq!(a.bottleneck, Bottleneck::Gpu);
        assert!(a.summary.contains("GPU-limited"));
        assert!(a.summary.contains("no CPU installed"));
        assert!(!a.summary.contains("outpaces"));
    }

    #[test]
    fn missing_gpu_is_severely_gpu_limited() {
        let build = fixtures::build(vec![fixtures::cpu(1, 1, "AM5", 12, 4.6)]);
        let a = analyse(&build);
        assert_eq!(a.gpu_score, 0);
        assert_eq!(a.bottleneck, Bottleneck::Gpu);
        assert!(a.summary.contains("no dedicated GPU"));
    }

    #[test]
    fn nothing_to_score_is_unknown() {
        let build = fixtures::build(vec![fixtures::ram(3, 1, MemoryType::Ddr5, 4800, 16)]);
        let a = analyse(&build);
        assert_eq!(a.bottleneck, Bottleneck::Unknown);
        assert_eq!(a.ram_score, 53);
        assert!(a.summary.contains("Insufficient parts"));
    }

    #[test]
    fn balanced_build() {
        let a = analyse(&fixtures::baseline_build());
        assert_eq!((a.cpu_score, a.gpu_score), (56, 51));
        assert_eq!(a.bottleneck, Bottleneck::Balanced);
    }

    #[test]
    fn weak_ram_overrides_balanced() {
        // 8 GB @ 2133 -> 7.2 + 17.06 = 24
        let build = fixtures::build(vec![
            fixtures::cpu(1, 1, "AM5", 12, 4.6),
            fixtures::gpu(2, 1, 8, 2000, 250),
            fixtures::ram(3, 1, MemoryType::Ddr4, 2133, 8),
        ]);
        let a = analyse(&build);
        assert_eq!(a.ram_score, 24);
        assert_eq!(a.bottleneck, Bottleneck::Ram);
        assert!(a.summary.contains("RAM"));
    }

    #[test]
    fn weak_ram_is_noted_but_does_not_override_gpu_verdict() {
        let build = fixtures::build(vec![
            fixtures::cpu(1, 1, "AM5", 12, 4.6),
            fixtures::ram(3, 1, MemoryType::Ddr4, 2133, 8),
        ]);
        let a = analyse(&build);
        assert_eq!(a.bottleneck, Bottleneck::Gpu);
        assert!(a.summary.contains("RAM (score 24)"));
    }
}
