#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod error;
pub mod events;
pub mod helpers;
pub mod instructions;
pub mod params;
pub mod state;

use contexts::*;
use params::*;

declare_id!("11111111111111111111111111111111");

#[program]
pub mod score_pool {
    use super::*;

    pub fn initialize_registry(
        ctx: Context<InitializeRegistry>,
        params: InitializeRegistryParams,
    ) -> Result<()> {
        instructions::initialize_registry(ctx, params)
    }

    pub fn update_default_commission(
        ctx: Context<UpdateDefaultCommission>,
        default_commission_bps: u16,
    ) -> Result<()> {
        instructions::update_default_commission(ctx, default_commission_bps)
    }

    pub fn create_pool(ctx: Context<CreatePool>, params: CreatePoolParams) -> Result<()> {
        instructions::create_pool(ctx, params)
    }

    pub fn open_for_betting(ctx: Context<MutatePool>) -> Result<()> {
        instructions::open_for_betting(ctx)
    }

    pub fn place_bet(ctx: Context<PlaceBet>, params: PlaceBetParams) -> Result<()> {
        instructions::place_bet(ctx, params)
    }

    pub fn close_for_betting(ctx: Context<MutatePool>) -> Result<()> {
        instructions::close_for_betting(ctx)
    }

    pub fn finalize_outcome(
        ctx: Context<MutatePool>,
        params: FinalizeOutcomeParams,
    ) -> Result<()> {
        instructions::finalize_outcome(ctx, params)
    }

    pub fn identify_winners(ctx: Context<CrankSettlement>, params: BatchParams) -> Result<()> {
        instructions::identify_winners(ctx, params)
    }

    pub fn calc_prizes(ctx: Context<CrankSettlement>, params: BatchParams) -> Result<()> {
        instructions::calc_prizes(ctx, params)
    }

    pub fn withdraw_prize(ctx: Context<WithdrawPrize>, bet_index: u32) -> Result<()> {
        instructions::withdraw_prize(ctx, bet_index)
    }

    pub fn claim_commission(ctx: Context<ClaimCommission>) -> Result<()> {
        instructions::claim_commission(ctx)
    }
}
