use anchor_lang::prelude::*;

use crate::state::Score;

#[event]
pub struct PoolCreated {
    pub registry: Pubkey,
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub home_team: String,
    pub away_team: String,
    pub event_start_time: i64,
    pub commission_bps: u16,
}

#[event]
pub struct PoolOpened {
    pub pool: Pubkey,
}

#[event]
pub struct PoolClosed {
    pub pool: Pubkey,
    pub closed_by: Pubkey,
    pub total_bets: u32,
    pub total_stake: u64,
}

#[event]
pub struct BetPlaced {
    pub pool: Pubkey,
    pub bettor: Pubkey,
    pub bet_index: u32,
    pub predicted: Score,
    pub amount: u64,
}

#[event]
pub struct OutcomeFinalized {
    pub pool: Pubkey,
    pub finalized_by: Pubkey,
    pub final_score: Score,
}

#[event]
pub struct WinnersIdentified {
    pub pool: Pubkey,
    pub home_team: String,
    pub away_team: String,
    pub final_score: Score,
    pub total_stake_of_winners: u64,
}

#[event]
pub struct PrizesCalculated {
    pub pool: Pubkey,
    pub commission: u64,
    pub distributable: u64,
    pub refunded: bool,
}

#[event]
pub struct PrizeWithdrawn {
    pub pool: Pubkey,
    pub bettor: Pubkey,
    pub bet_index: u32,
    pub prize: u64,
}

#[event]
pub struct CommissionClaimed {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}
