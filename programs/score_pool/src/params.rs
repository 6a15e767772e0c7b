use anchor_lang::prelude::*;

use crate::state::Score;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeRegistryParams {
    pub quote_mint: Pubkey,
    pub default_commission_bps: u16,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreatePoolParams {
    pub home_team: String,
    pub away_team: String,
    pub event_start_time: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct PlaceBetParams {
    pub predicted: Score,
    pub amount: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct FinalizeOutcomeParams {
    pub final_score: Score,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct BatchParams {
    /// Upper bound on bets processed this call; `None` scans to the end.
    pub batch_size: Option<u32>,
}
