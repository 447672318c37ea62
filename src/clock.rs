//! Clock Source
//!
//! Nanosecond timestamps since an arbitrary per-process epoch. On Unix this
//! reads `CLOCK_MONOTONIC` directly, falling back to `CLOCK_REALTIME` when
//! the monotonic clock is unavailable (availability wins over robustness
//! against wall-clock adjustment). Other platforms measure against a
//! process-lifetime `std::time::Instant` anchor, which on Windows is backed
//! by QueryPerformanceCounter.
//!
//! A harness without a working clock has no purpose, so total clock failure
//! is fatal: diagnostic to stderr, then exit with failure status.

/// Nanoseconds in one second.
pub const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Current timestamp in nanoseconds since an unspecified epoch.
///
/// Monotonically non-decreasing for the lifetime of the process unless the
/// realtime fallback is in use and the wall clock is stepped backwards.
#[cfg(unix)]
#[inline]
pub fn now_ns() -> i64 {
    match clock_gettime_ns(libc::CLOCK_MONOTONIC).or_else(|_| clock_gettime_ns(libc::CLOCK_REALTIME))
    {
        Ok(ns) => ns,
        Err(err) => {
            eprintln!("tickbench: clock_gettime failed: {err}");
            std::process::exit(1);
        }
    }
}

/// Read one clock via `clock_gettime(2)`.
#[cfg(unix)]
fn clock_gettime_ns(clock: libc::clockid_t) -> std::io::Result<i64> {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: ts is a valid, writable timespec; clock_gettime has no other
    // preconditions.
    let ret = unsafe { libc::clock_gettime(clock, &mut ts) };
    if ret != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(ts.tv_sec as i64 * NANOS_PER_SEC + ts.tv_nsec as i64)
}

/// Current timestamp in nanoseconds since an unspecified epoch.
#[cfg(not(unix))]
#[inline]
pub fn now_ns() -> i64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_nanos() as i64
}
