//! # thirteen-engine: Card Battle Engine Core
//!
//! A deterministic, turn-based card battle where both sides draw toward a
//! total of 13 (PERFECT) and bust above it. Provides the battle state
//! machine, hand evaluation, combat resolution, and JSONL round logging
//! with a reproducible RNG for replays and simulations.
//!
//! ## Core Modules
//!
//! - [`cards`] - Ranks, special cards and deck composition
//! - [`deck`] - Draw pile with Fisher–Yates shuffling and replenishment
//! - [`engine`] - [`engine::BattleController`], the phase state machine
//! - [`game`] - Battle state, phases and buff bookkeeping
//! - [`hand`] - Optimal-sum evaluation and sum contexts
//! - [`player`] - Actions, combat stats and combatants
//! - [`policy`] - Enemy decision policies
//! - [`registry`] - Boss, buff and map-node tables
//! - [`rng`] - The random source abstraction and a seedable PCG32
//! - [`rules`] - Round resolution and damage
//! - [`logger`] - RoundRecord serialization
//! - [`errors`] - Error types for parsing and lookups
//!
//! ## Quick Start
//!
//! ```rust
//! use thirteen_engine::cards::parse_cards;
//! use thirteen_engine::hand::Hand;
//!
//! // An ace counts as 7 when that lands on 13
//! let hand = Hand::from_cards(parse_cards("A,6").unwrap());
//! assert_eq!(hand.sum(None), 13);
//! assert!(hand.is_perfect(None));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All battle outcomes are reproducible using a seeded source:
//!
//! ```rust
//! use thirteen_engine::cards::standard_deck;
//! use thirteen_engine::deck::Deck;
//! use thirteen_engine::rng::Pcg32;
//!
//! let mut a = Deck::new(standard_deck);
//! let mut b = Deck::new(standard_deck);
//! a.shuffle(&mut Pcg32::new(42));
//! b.shuffle(&mut Pcg32::new(42));
//! assert_eq!(a.remaining_cards(), b.remaining_cards());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod policy;
pub mod registry;
pub mod rng;
pub mod rules;
