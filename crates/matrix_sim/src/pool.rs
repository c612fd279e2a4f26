use rayon::prelude::*;

/// Fixed pool of reusable worker threads. Built once and reused for
/// every dispatch instead of spawning threads per call — a tick-rate
/// workload cannot afford thread-creation overhead every frame.
pub struct WorkPool {
    pool: rayon::ThreadPool,
}

impl WorkPool {
    pub fn new(workers: usize) -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .build()
            .expect("failed to build work pool");
        Self { pool }
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Partition `[0, len)` into up to `worker_count()` contiguous
    /// chunks, run `work` once per chunk across the pool, and block
    /// until every chunk has returned. Results are concatenated in
    /// chunk order, not completion order.
    pub fn dispatch<T: Send>(
        &self,
        len: usize,
        work: impl Fn(std::ops::Range<usize>) -> Vec<T> + Sync,
    ) -> Vec<T> {
        if len == 0 {
            return Vec::new();
        }
        let chunk_size = len.div_ceil(self.worker_count()).max(1);
        let begins: Vec<usize> = (0..len).step_by(chunk_size).collect();

        self.pool.install(|| {
            begins
                .into_par_iter()
                .flat_map(|begin| {
                    let end = (begin + chunk_size).min(len);
                    work(begin..end)
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_covers_every_index_exactly_once() {
        let pool = WorkPool::new(4);
        let len = 137;
        let mut results = pool.dispatch(len, |range| range.collect::<Vec<_>>());
        results.sort_unstable();
        assert_eq!(results, (0..len).collect::<Vec<_>>());
    }

    #[test]
    fn dispatch_on_empty_range_returns_empty() {
        let pool = WorkPool::new(2);
        let results: Vec<usize> = pool.dispatch(0, |range| range.collect());
        assert!(results.is_empty());
    }

    #[test]
    fn single_worker_still_covers_the_whole_range() {
        let pool = WorkPool::new(1);
        let len = 10;
        let mut results = pool.dispatch(len, |range| range.collect::<Vec<_>>());
        results.sort_unstable();
        assert_eq!(results, (0..len).collect::<Vec<_>>());
    }
}
