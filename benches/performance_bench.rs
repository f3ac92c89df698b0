use criterion::{black_box, criterion_group, criterion_main, Criterion};
use powerline_segments::parsers::{count_jobs_cygwin, count_jobs_macos, count_jobs_posix, parse_battery, DEFAULT_DENYLIST};
use powerline_segments::*;
use std::sync::Arc;

const PMSET: &str = "Now drawing from 'Battery Power'\n -InternalBattery-0 (id=3866723)\t85%; discharging; (no estimate) present: true";

fn create_ps_snapshot(rows: usize, ppid: u32) -> String {
    let mut lines = vec!["  UID   PID  PPID   C STIME   TTY           TIME CMD".to_string()];
    for i in 0..rows {
        let parent = if i % 3 == 0 { ppid } else { 1 };
        lines.push(format!(
            "  501  {}  {}   0  9:12AM ttys000    0:00.02 /usr/bin/worker-{}",
            10_000 + i,
            parent,
            i
        ));
    }
    lines.join("\n")
}

fn create_ppid_listing(rows: usize, ppid: u32) -> String {
    let mut lines = vec![" PPID".to_string()];
    for i in 0..rows {
        lines.push(format!("  {}", if i % 4 == 0 { ppid } else { 1 + i as u32 }));
    }
    lines.join("\n")
}

fn bench_parsers(c: &mut Criterion) {
    let snapshot = create_ps_snapshot(500, 4000);
    let listing = create_ppid_listing(500, 4000);

    c.bench_function("parse_battery_pmset", |b| b.iter(|| parse_battery(black_box(PMSET))));
    c.bench_function("count_jobs_macos_500", |b| {
        b.iter(|| count_jobs_macos(black_box(&snapshot), 4000, DEFAULT_DENYLIST))
    });
    c.bench_function("count_jobs_cygwin_500", |b| {
        b.iter(|| count_jobs_cygwin(black_box(&snapshot), 4000))
    });
    c.bench_function("count_jobs_posix_500", |b| {
        b.iter(|| count_jobs_posix(black_box(&listing), 4000, PidMatchMode::Substring))
    });
}

fn bench_mapper(c: &mut Criterion) {
    let style = BatteryStyle::default();

    c.bench_function("battery_triple_sweep", |b| {
        b.iter(|| {
            (0..=100u8)
                .filter_map(|level| battery_triple(black_box(level), level % 2 == 0, &style))
                .count()
        })
    });
}

fn bench_compose(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let snapshot = create_ps_snapshot(200, 400);
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_output("pmset -g batt", PMSET)
            .with_output("ps -af", &snapshot),
    );
    let theme = get_theme("default");

    c.bench_function("compose_scripted_prompt", |b| {
        b.iter(|| {
            rt.block_on(async {
                let battery = BatterySegment::new(runner.clone(), OsFamily::MacOs, BatteryStyle::from_colors(theme.battery));
                let probe = jobs_probe_for(OsFamily::MacOs, runner.clone(), &[], PidMatchMode::Substring);
                let jobs = JobsSegment::new(probe, ProcessIds::new(500, 400), JobsStyle::new(theme.jobs));
                let mut segments = vec![SegmentKind::Battery(battery), SegmentKind::Jobs(jobs)];
                black_box(compose(&mut segments).await)
            })
        })
    });
}

criterion_group!(benches, bench_parsers, bench_mapper, bench_compose);
criterion_main!(benches);
