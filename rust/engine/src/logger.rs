use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::cards::format_cards;
use crate::game::{BattleEndReason, BattleState};
use crate::rules::RoundResult;

/// One resolved round, serialized as a JSONL line for replay and analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Battle identifier (format: YYYYMMDD-NNNNNN)
    pub battle_id: String,
    /// Seed the battle's random source was built from, if any
    pub seed: Option<u64>,
    /// 1-based round number within the battle
    pub round: u32,
    /// Player's cards in draw order, comma separated
    pub player_cards: String,
    /// Enemy's cards in draw order, comma separated
    pub enemy_cards: String,
    pub player_sum: u32,
    /// Enemy total with the boss sum rule applied
    pub enemy_sum: u32,
    pub result: RoundResult,
    /// HP after the result was applied
    pub player_hp: u32,
    pub enemy_hp: u32,
    /// Set on the round that ended the battle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battle_end_reason: Option<BattleEndReason>,
    /// Timestamp when the round was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl RoundRecord {
    /// Snapshot taken between `resolve_round` and `apply_round_result`,
    /// while the hands are still on the table.
    pub fn capture(
        battle_id: impl Into<String>,
        seed: Option<u64>,
        state: &BattleState,
        enemy_sum: u32,
        result: RoundResult,
    ) -> Self {
        Self {
            battle_id: battle_id.into(),
            seed,
            round: state.round_index,
            player_cards: format_cards(state.player.hand.cards()),
            enemy_cards: format_cards(state.enemy.hand.cards()),
            player_sum: state.player.hand.sum(None),
            enemy_sum,
            result,
            player_hp: state.player.hp(),
            enemy_hp: state.enemy.hp(),
            battle_end_reason: None,
            ts: None,
            meta: None,
        }
    }

    /// Refreshes HP and end reason once the result has been applied.
    pub fn settle(&mut self, state: &BattleState) {
        self.player_hp = state.player.hp();
        self.enemy_hp = state.enemy.hp();
        self.battle_end_reason = state.end_reason;
    }
}

pub fn format_battle_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Writes [`RoundRecord`]s as JSON lines.
pub struct RoundLogger<W: Write> {
    writer: W,
    date: String,
    seq: u32,
}

impl RoundLogger<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self::new(BufWriter::new(f)))
    }
}

impl<W: Write> RoundLogger<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        }
    }

    /// Pins the id date so ids are reproducible.
    pub fn with_date(writer: W, date: &str) -> Self {
        Self {
            writer,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_battle_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    /// Direct access for lines that are not round records.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
