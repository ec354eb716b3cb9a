use std::sync::{Mutex, MutexGuard};

use tracing::warn;

/// Lock a backend mutex, recovering the guard if a previous holder panicked.
pub(crate) fn mutex_lock<'a, T>(
    lock: &'a Mutex<T>,
    backend: &'static str,
    op: &'static str,
) -> MutexGuard<'a, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!(
                op,
                backend,
                lock_kind = "mutex.lock",
                result = "poisoned_recovered",
                "Recovered poisoned cache backend lock; entries may be stale"
            );
            poisoned.into_inner()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn poisoned_mutex_is_recovered() {
        let lock = Arc::new(Mutex::new(1u32));
        let shared = Arc::clone(&lock);
        let _ = thread::spawn(move || {
            let _guard = shared.lock().expect("first lock");
            panic!("poison the lock");
        })
        .join();

        assert!(lock.is_poisoned());
        let mut guard = mutex_lock(&lock, "memory", "test");
        *guard += 1;
        assert_eq!(*guard, 2);
    }
}
