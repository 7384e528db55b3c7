//! Wire types for the wallet signing bridge.

use crate::config::ChainConfig;
use bitcoin_toe_game::Persona;
use derive_new::new;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Entry function call in the ledger's JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct EntryFunctionPayload {
    /// Always `entry_function_payload`.
    #[new(value = "\"entry_function_payload\".to_string()")]
    #[serde(rename = "type")]
    pub kind: String,
    /// `<address>::<module>::<function>`.
    pub function: String,
    /// Generic type arguments, unused by the game module.
    #[new(default)]
    pub type_arguments: Vec<String>,
    /// Positional arguments.
    pub arguments: Vec<Value>,
}

impl EntryFunctionPayload {
    /// `create_game(character_code: u8)`.
    pub fn create_game(chain: &ChainConfig, persona: Persona) -> Self {
        Self::new(
            chain.entry_function("create_game"),
            vec![json!(persona.code())],
        )
    }

    /// `set_winner(game_id: u64, player_wins: bool)`.
    ///
    /// The ledger's JSON API carries u64 as decimal strings.
    pub fn set_winner(chain: &ChainConfig, game_id: u64, player_won: bool) -> Self {
        Self::new(
            chain.entry_function("set_winner"),
            vec![json!(game_id.to_string()), json!(player_won)],
        )
    }
}

/// Body posted to the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct SubmitRequest {
    /// Signing account.
    pub sender: String,
    /// Call to sign and submit.
    pub payload: EntryFunctionPayload,
}

/// Bridge reply after the transaction is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Transaction hash.
    pub hash: String,
    /// Whether execution succeeded.
    #[serde(default = "default_success")]
    pub success: bool,
    /// VM status message.
    #[serde(default)]
    pub vm_status: String,
}

fn default_success() -> bool {
    true
}
