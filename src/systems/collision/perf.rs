use std::cell::RefCell;

thread_local! {
    pub static PERF_SWEEPS: RefCell<u64> = RefCell::new(0);
    pub static PERF_PATH_STEPS: RefCell<u64> = RefCell::new(0);
    pub static PERF_CONTACTS: RefCell<u64> = RefCell::new(0);
    pub static PERF_WEDGES: RefCell<u64> = RefCell::new(0);
    pub static PERF_ABORTS: RefCell<u64> = RefCell::new(0);
}

/// Counters gathered by the collision core since the last take
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionCounters {
    pub sweeps: u64,
    pub path_steps: u64,
    pub contacts: u64,
    pub wedges: u64,
    pub aborts: u64,
}

#[inline]
pub(crate) fn bump(key: &'static std::thread::LocalKey<RefCell<u64>>, n: u64) {
    key.with(|c| {
        let mut v = c.borrow_mut();
        *v = v.saturating_add(n);
    });
}

fn take(key: &'static std::thread::LocalKey<RefCell<u64>>) -> u64 {
    key.with(|c| std::mem::take(&mut *c.borrow_mut()))
}

pub fn reset_collision_perf_counters() {
    let _ = take_collision_perf_counters();
}

pub fn take_collision_perf_counters() -> CollisionCounters {
    CollisionCounters {
        sweeps: take(&PERF_SWEEPS),
        path_steps: take(&PERF_PATH_STEPS),
        contacts: take(&PERF_CONTACTS),
        wedges: take(&PERF_WEDGES),
        aborts: take(&PERF_ABORTS),
    }
}
