use std::env;
use std::hint::black_box;
use std::process;
use std::time::{Duration, Instant};

use branchless_search::{SearchResult, search_branchless, search_std};

const DEFAULT_SEED: u64 = 0x1234_5678_9ABC_DEF0;

#[derive(Clone, Copy)]
enum Bench {
    SearchStd,
    SearchBranchless,
}

#[derive(Clone, Copy)]
struct Config {
    bench: Bench,
    len: usize,
    iters: usize,
    seed: u64,
    verify: bool,
    report: bool,
}

type SearchFn = fn(&[i32], i32) -> SearchResult;

fn main() {
    let config = match parse_args() {
        Ok(result) => result,
        Err(err) => {
            eprintln!("error: {err}");
            print_usage(&program_name());
            process::exit(2);
        }
    };

    if config.verify {
        verify_bench(config.bench);
    }

    run_bench(config);
}

fn parse_args() -> Result<Config, String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "perf_harness".to_string());

    let mut bench = None;
    let mut len = None;
    let mut iters = None;
    let mut seed = DEFAULT_SEED;
    let mut verify = false;
    let mut report = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--bench" => {
                let name = args.next().ok_or("--bench requires a value")?;
                let parsed = parse_bench(&name).ok_or_else(|| format!("unknown bench: {name}"))?;
                bench = Some(parsed);
            }
            "--len" => {
                let value = args.next().ok_or("--len requires a value")?;
                len = Some(parse_usize(&value, "--len")?);
            }
            "--iters" => {
                let value = args.next().ok_or("--iters requires a value")?;
                iters = Some(parse_usize(&value, "--iters")?);
            }
            "--seed" => {
                let value = args.next().ok_or("--seed requires a value")?;
                seed = parse_u64(&value, "--seed")?;
            }
            "--verify" => verify = true,
            "--report" => report = true,
            "--no-report" => report = false,
            "--list" => {
                list_benches();
                process::exit(0);
            }
            "-h" | "--help" => {
                print_usage(&program);
                process::exit(0);
            }
            _ => return Err(format!("unknown argument: {arg}")),
        }
    }

    let bench = bench.ok_or("missing --bench")?;

    Ok(Config {
        bench,
        len: len.unwrap_or(1_000_000),
        iters: iters.unwrap_or(5),
        seed,
        verify,
        report,
    })
}

fn program_name() -> String {
    env::args()
        .next()
        .unwrap_or_else(|| "perf_harness".to_string())
}

fn print_usage(program: &str) {
    eprintln!(
        "\
Usage:
  {program} --bench <name> [--len N] [--iters N] [--seed N] [--verify] [--report]
  {program} --list

Options:
  --bench <name>   Benchmark to run (see --list)
  --len N          Sorted array length (default: 1000000)
  --iters N        Passes over the query set (default: 5)
  --seed N         RNG seed (default: 0x123456789ABCDEF0)
  --verify         Run a quick correctness check before benchmarking
  --report         Print throughput summary after the run
  --no-report      Disable throughput summary
  --list           Show available benches
"
    );
}

fn list_benches() {
    println!("search_std");
    println!("search_branchless");
}

fn parse_bench(name: &str) -> Option<Bench> {
    match name {
        "search_std" => Some(Bench::SearchStd),
        "search_branchless" => Some(Bench::SearchBranchless),
        _ => None,
    }
}

impl Bench {
    fn name(self) -> &'static str {
        match self {
            Bench::SearchStd => "search_std",
            Bench::SearchBranchless => "search_branchless",
        }
    }

    fn func(self) -> SearchFn {
        match self {
            Bench::SearchStd => search_std,
            Bench::SearchBranchless => search_branchless,
        }
    }
}

fn parse_usize(value: &str, flag: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("{flag} expects a non-negative integer"))
}

fn parse_u64(value: &str, flag: &str) -> Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|_| format!("{flag} expects a non-negative integer"))
}

#[inline]
fn next_u64(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    *state = x;
    x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

fn make_sorted_values(len: usize) -> Vec<i32> {
    let mut values = Vec::with_capacity(len);
    for i in 0..len {
        values.push((i as i32) * 2);
    }
    values
}

// Half the queries hit an element, half land in a gap, in random order, so
// the branchy baseline sees an unpredictable mix.
fn make_search_queries(values: &[i32], seed: u64) -> Vec<i32> {
    let mut state = seed;
    let mut queries = Vec::with_capacity(values.len());
    for _ in 0..values.len() {
        let bits = next_u64(&mut state);
        let idx = (bits as usize) % values.len();
        queries.push(values[idx] + ((bits >> 63) as i32));
    }
    queries
}

fn verify_bench(bench: Bench) {
    let func = bench.func();
    let values = [1, 3, 5, 7, 9];
    assert_eq!(func(&values, 5), SearchResult::Found(2));
    assert_eq!(func(&values, 6), SearchResult::NotFound(3));
    assert_eq!(func(&values, 11), SearchResult::NotFound(5));
    assert_eq!(func(&[], 6), SearchResult::Empty);
}

fn run_bench(config: Config) {
    let work_items = (config.len as u128) * (config.iters as u128);
    let start = Instant::now();
    bench_search(config, config.bench.func());
    let elapsed = start.elapsed();
    if config.report {
        print_report(config, work_items, elapsed);
    }
}

fn bench_search(config: Config, func: SearchFn) {
    if config.len == 0 {
        return;
    }

    let values = make_sorted_values(config.len);
    let queries = make_search_queries(&values, config.seed);
    let mut acc = 0isize;
    for _ in 0..config.iters {
        let haystack = black_box(values.as_slice());
        for &q in &queries {
            acc ^= func(haystack, black_box(q)).encode();
        }
    }
    black_box(acc);
}

fn print_report(config: Config, work_items: u128, elapsed: Duration) {
    let elapsed_s = elapsed.as_secs_f64();
    let queries_per_s = work_items as f64 / elapsed_s;
    let ns_per_query = (elapsed_s * 1.0e9) / work_items as f64;

    println!(
        "bench={} len={} iters={}",
        config.bench.name(),
        config.len,
        config.iters
    );
    println!(
        "elapsed_s={:.6} ns_per_query={:.3} throughput={}",
        elapsed_s,
        ns_per_query,
        format_rate(queries_per_s, "query")
    );
}

fn format_rate(rate: f64, unit: &str) -> String {
    let (value, prefix) = if rate >= 1.0e9 {
        (rate / 1.0e9, "G")
    } else if rate >= 1.0e6 {
        (rate / 1.0e6, "M")
    } else if rate >= 1.0e3 {
        (rate / 1.0e3, "K")
    } else {
        (rate, "")
    };
    format!("{value:.3} {prefix}{unit}/s")
}
