//! 无放回的均匀随机抽取
//!
//! 随机源通过 [`RandomSource`] 注入，测试可替换为确定性序列。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::DrawError;

/// 随机源接口
pub trait RandomSource: Send {
    /// 返回 `[0, bound)` 内均匀分布的下标，`bound` 保证大于 0
    fn index_below(&mut self, bound: usize) -> usize;
}

/// 线程本地熵源（默认）
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index_below(&mut self, bound: usize) -> usize {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// 固定种子的随机源，便于复现
#[derive(Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index_below(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// 根据配置构建随机源
pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => {
            log::info!("Using seeded random source (seed={seed})");
            Box::new(SeededRandom::new(seed))
        }
        None => Box::new(ThreadRandom),
    }
}

/// 从池中均匀抽取一个元素
pub fn pick_one<T: Clone>(pool: &[T], rng: &mut dyn RandomSource) -> Result<T, DrawError> {
    if pool.is_empty() {
        return Err(DrawError::EmptyPool);
    }
    Ok(pool[rng.index_below(pool.len())].clone())
}

/// 无放回抽取 `count` 个不同元素
///
/// 仅对前 `count` 个位置做 Fisher–Yates 洗牌，每种有序结果概率相同。
pub fn pick_many<T: Clone>(
    pool: &[T],
    count: usize,
    rng: &mut dyn RandomSource,
) -> Result<Vec<T>, DrawError> {
    if count > pool.len() {
        return Err(DrawError::InsufficientPool {
            requested: count,
            available: pool.len(),
        });
    }

    let mut shuffled = pool.to_vec();
    let n = shuffled.len();
    for i in 0..count {
        let j = i + rng.index_below(n - i);
        shuffled.swap(i, j);
    }
    shuffled.truncate(count);
    Ok(shuffled)
}
