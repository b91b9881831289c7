use std::time::Instant;
use std::hint;
use slist::List;

const COUNT: usize = 1_000_000;

fn warmup() {
  let mut s = 1u64;
  for i in 0 .. 100_000_000 { s = s.wrapping_mul(i); }
  let _: u64 = hint::black_box(s);
}

fn timeit<A, F>(f: F) -> f64 where F: FnOnce() -> A {
  let start = Instant::now();
  let _: A = hint::black_box(f());
  let stop = Instant::now();
  stop.saturating_duration_since(start).as_nanos() as f64
}

fn run_bench<F>(name: &str, f: F) where F: FnOnce(usize) -> u64 {
  let elapsed = timeit(|| f(hint::black_box(COUNT)));
  print!("{:25} {:.3} ns\n", name, elapsed / (COUNT as f64));
}

// Appends `count` values, then deletes every other one from the front half so
// both the splice path and slot reuse are exercised.

#[inline(never)]
fn churn<A: allocator_api2::alloc::Allocator>(list: &mut List<u64, A>, count: usize) -> u64 {
  for i in 1 .. count as u64 {
    let _ = list.append(i);
  }
  for i in (0 .. 64).step_by(2) {
    let _ = list.delete(&i);
  }
  for i in 0 .. 32 {
    let _ = list.push_front(i);
  }
  list.iter().fold(0, |s, x| s.wrapping_add(*x))
}

fn main() {
  warmup();

  run_bench("global", |n| churn(&mut List::new(0), n));
  run_bench("global (presized)", |n| churn(&mut List::with_capacity(0, n), n));

  let bump = bumpalo::Bump::new();
  run_bench("bumpalo", |n| churn(&mut List::new_in(0, &bump), n));
}
