//! 抽奖引擎
//!
//! 控制流: 选择奖项与额外标签 -> 计算候选名单 -> 随机抽取 -> 账本校验并提交。
//! 引擎本身是同步、单线程的，并发控制由调用方（`DrawService`）负责。

pub mod eligibility;
pub mod error;
pub mod ledger;
pub mod sampler;
pub mod session;
pub mod tags;

pub use eligibility::eligible_participants;
pub use error::DrawError;
pub use ledger::{DrawLedger, DrawOutcome};
pub use sampler::{RandomSource, SeededRandom, ThreadRandom, pick_many, pick_one, random_source};
pub use session::Session;
pub use tags::{TagDictionary, normalize_tag, normalize_tags};
