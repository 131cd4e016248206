//! # thirteen-ai: Enemy Policies and Boss Content
//!
//! Provides the boss-grade decision policy and the shipped bosses for the
//! thirteen card battle. Policies implement the engine's
//! [`EnemyPolicy`] trait and plug into a battle through its boss config.
//!
//! ## Core Components
//!
//! - [`probabilistic`] - Win-rate enumeration over the remaining deck
//! - [`content`] - The scarecrow boss, the LAZY debuff and the node table
//! - [`create_policy`] - Factory function for creating policies by name
//!
//! ## Quick Start
//!
//! ```rust
//! use thirteen_ai::content::{default_content, SCARECROW_NODE};
//! use thirteen_engine::engine::BattleController;
//! use thirteen_engine::player::CombatStats;
//! use thirteen_engine::rng::Pcg32;
//!
//! let content = default_content();
//! let options = content
//!     .boss_battle(SCARECROW_NODE, CombatStats::default())
//!     .expect("scarecrow is shipped");
//! let mut battle = BattleController::new(Some(Box::new(Pcg32::new(42))), options);
//! battle.start_battle();
//! battle.start_round();
//! assert_eq!(battle.policy_name(), "ProbabilisticPolicy");
//! ```
//!
//! ## Policy Types
//!
//! - `"threshold"` - Hits at 10 or below
//! - `"probabilistic"` - Compares stand and hit win rates

use std::sync::Arc;

use thirteen_engine::errors::EngineError;
use thirteen_engine::policy::{EnemyPolicy, ThresholdPolicy};

pub mod content;
pub mod probabilistic;

pub use probabilistic::{ProbabilisticConfig, ProbabilisticPolicy};

/// Factory function to create enemy policies by type string.
///
/// # Example
///
/// ```rust
/// use thirteen_ai::create_policy;
///
/// let policy = create_policy("probabilistic").unwrap();
/// assert_eq!(policy.name(), "ProbabilisticPolicy");
/// assert!(create_policy("oracle").is_err());
/// ```
pub fn create_policy(policy_type: &str) -> Result<Arc<dyn EnemyPolicy>, EngineError> {
    match policy_type.trim().to_ascii_lowercase().as_str() {
        "threshold" => Ok(Arc::new(ThresholdPolicy::new())),
        "probabilistic" => Ok(Arc::new(ProbabilisticPolicy::new())),
        other => Err(EngineError::UnknownPolicy(other.to_string())),
    }
}
