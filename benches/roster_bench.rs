//! Criterion benchmarks for u-roster.
//!
//! Uses seeded random rosters (weekly services, a handful of roles,
//! partial availability) to measure the per-day search and the greedy
//! baseline on the same instances.

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_roster::models::{Shift, User};
use u_roster::{RosterConfig, RosterScheduler, Strategy};

const ROLES: [&str; 4] = ["guitar", "drums", "vocals", "nursery"];

fn at(week: u32, hour: u32) -> DateTime<Utc> {
    let first_sunday = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
    first_sunday + Duration::weeks(i64::from(week)) + Duration::hours(i64::from(hour))
}

/// `weeks` Sundays with one shift per role at two service times.
fn instance(weeks: u32, users: usize, seed: u64) -> (Vec<Shift>, Vec<User>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut shifts = Vec::new();
    for week in 0..weeks {
        for hour in [9, 11] {
            for role in ROLES {
                let needed = if role == "nursery" { 2 } else { 1 };
                shifts.push(
                    Shift::new(format!("{role}-{week}-{hour}"), at(week, hour), at(week, hour + 2))
                        .with_role(role)
                        .with_needed(needed),
                );
            }
        }
    }

    let users = (0..users)
        .map(|i| {
            let mut user = User::new(format!("u{i}"));
            for role in ROLES {
                match rng.random_range(0..4) {
                    0 => user = user.with_required_role(role),
                    1 => user = user.with_optional_role(role),
                    _ => {}
                }
            }
            if rng.random_bool(0.3) {
                let allowed: Vec<String> = shifts
                    .iter()
                    .filter(|_| rng.random_bool(0.5))
                    .map(|s| s.id.clone())
                    .collect();
                user = user.with_available_shifts(allowed);
            }
            user
        })
        .collect();

    (shifts, users)
}

fn bench_backtracking(c: &mut Criterion) {
    let mut group = c.benchmark_group("roster_backtracking");
    group.sample_size(20);

    for users in [6, 10, 14] {
        let (shifts, pool) = instance(4, users, 42);
        let scheduler = RosterScheduler::with_config(
            RosterConfig::new()
                .with_required_roles(["nursery"])
                .with_max_iterations(50_000),
        );
        group.bench_with_input(BenchmarkId::from_parameter(users), &(shifts, pool), |b, (s, u)| {
            b.iter(|| scheduler.schedule(black_box(s), black_box(u)))
        });
    }
    group.finish();
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("roster_greedy");

    for users in [6, 10, 14, 50] {
        let (shifts, pool) = instance(12, users, 42);
        let scheduler = RosterScheduler::with_config(
            RosterConfig::new()
                .with_required_roles(["nursery"])
                .with_strategy(Strategy::Greedy),
        );
        group.bench_with_input(BenchmarkId::from_parameter(users), &(shifts, pool), |b, (s, u)| {
            b.iter(|| scheduler.schedule(black_box(s), black_box(u)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_backtracking, bench_greedy);
criterion_main!(benches);
