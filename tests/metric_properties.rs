use proptest::prelude::*;
use proctop::format::format_elapsed;
use proctop::system::fields::{self, StatField};
use proctop::system::metrics::{
    self, CpuSample, MemorySample, global_cpu_utilization, process_uptime,
};
use proctop::system::process::ProcessSnapshot;
use proctop::system::snapshot::select_top;

fn cpu_sample(c: [u64; 8]) -> CpuSample {
    CpuSample {
        user: c[0],
        nice: c[1],
        system: c[2],
        idle: c[3],
        iowait: c[4],
        irq: c[5],
        softirq: c[6],
        steal: c[7],
    }
}

fn make_processes(cpus: &[u8]) -> Vec<ProcessSnapshot> {
    cpus.iter()
        .enumerate()
        .map(|(i, &c)| ProcessSnapshot {
            pid: i as u32 + 1,
            cpu_utilization: f64::from(c) / 16.0,
            ram_mb: 0,
            user: String::new(),
            uptime_secs: 0,
            command: format!("p{i}"),
        })
        .collect()
}

proptest! {
    #[test]
    fn global_cpu_stays_in_unit_range(
        prev in prop::array::uniform8(any::<u64>()),
        curr in prop::array::uniform8(any::<u64>()),
        with_prev in any::<bool>(),
    ) {
        let prev = cpu_sample(prev);
        let curr = cpu_sample(curr);
        let value = global_cpu_utilization(with_prev.then_some(&prev), &curr);
        prop_assert!((0.0..=1.0).contains(&value), "out of range: {}", value);
    }

    #[test]
    fn memory_stays_in_unit_range(total in 0u64..1 << 40, available in 0u64..1 << 40) {
        let value = metrics::memory_utilization(&MemorySample {
            total_kb: total,
            available_kb: available,
        });
        prop_assert!((0.0..=1.0).contains(&value), "out of range: {}", value);
    }

    #[test]
    fn elapsed_is_fixed_width_and_reversible(secs in 0u64..10_000_000) {
        let text = format_elapsed(secs);
        prop_assert_eq!(text.len(), 8);

        let parts: Vec<u64> = text.split(':').map(|p| p.parse().unwrap()).collect();
        prop_assert_eq!(parts.len(), 3);
        prop_assert!(parts[1] < 60 && parts[2] < 60);
        let back = parts[0] * 3600 + parts[1] * 60 + parts[2];
        prop_assert_eq!(back, secs % 360_000);
    }

    #[test]
    fn top_selection_is_sorted_and_bounded(
        cpus in prop::collection::vec(0u8..8, 0..60),
        n in 0usize..20,
    ) {
        let top = select_top(make_processes(&cpus), n);
        prop_assert_eq!(top.len(), n.min(cpus.len()));

        for pair in top.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.cpu_utilization >= b.cpu_utilization);
            if a.cpu_utilization == b.cpu_utilization {
                prop_assert!(a.pid < b.pid);
            }
        }

        // nothing left out beats the last one kept
        if let Some(last) = top.last() {
            let kept: Vec<u32> = top.iter().map(|p| p.pid).collect();
            for p in make_processes(&cpus) {
                if !kept.contains(&p.pid) {
                    prop_assert!(p.cpu_utilization <= last.cpu_utilization);
                }
            }
        }
    }

    #[test]
    fn stat_offsets_survive_any_comm(
        comm in "[a-zA-Z0-9 ()_:/.-]{0,15}",
        utime in 0u64..1 << 40,
        start in 0u64..1 << 40,
    ) {
        let line = format!(
            "42 ({comm}) S 1 42 42 0 -1 0 0 0 0 0 {utime} 7 0 0 20 0 1 0 {start} 4096 10"
        );
        let tokens = fields::stat_tokens(&line);
        prop_assert_eq!(fields::stat_comm(&tokens), Some(comm.as_str()));
        prop_assert_eq!(fields::stat_field(&tokens, StatField::Utime), utime);
        prop_assert_eq!(fields::stat_field(&tokens, StatField::Stime), 7);
        prop_assert_eq!(fields::stat_field(&tokens, StatField::StartTime), start);
    }

    #[test]
    fn process_uptime_never_exceeds_system_uptime(
        start in any::<u64>(),
        uptime in any::<u64>(),
        hz in 0u64..10_000,
    ) {
        prop_assert!(process_uptime(start, uptime, hz) <= uptime);
    }

    #[test]
    fn process_cpu_is_never_negative(
        active in 0u64..1 << 40,
        start in 0u64..1 << 40,
        uptime in 0u64..1 << 32,
        hz in 0u64..10_000,
    ) {
        let value = metrics::process_cpu_utilization(active, start, uptime, hz);
        prop_assert!(value >= 0.0 && value.is_finite());
    }
}
