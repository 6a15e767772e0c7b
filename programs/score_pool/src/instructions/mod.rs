use anchor_lang::prelude::*;

use crate::{
    constants::{BASIS_POINT_SCALE, MAX_TEAM_NAME_BYTES},
    contexts::*,
    error::ErrorCode,
    events::{
        BetPlaced, CommissionClaimed, OutcomeFinalized, PoolClosed, PoolCreated, PoolOpened,
        PrizeWithdrawn, PrizesCalculated, WinnersIdentified,
    },
    helpers::{transfer_quote_from_bettor, transfer_quote_from_vault},
    params::*,
};

pub fn initialize_registry(
    ctx: Context<InitializeRegistry>,
    params: InitializeRegistryParams,
) -> Result<()> {
    require!(
        u64::from(params.default_commission_bps) <= BASIS_POINT_SCALE,
        ErrorCode::InvalidCommission
    );

    let registry = &mut ctx.accounts.registry;
    registry.admin = ctx.accounts.admin.key();
    registry.quote_mint = params.quote_mint;
    registry.default_commission_bps = params.default_commission_bps;
    registry.pools_created = 0;
    registry.bump = ctx.bumps.registry;
    Ok(())
}

/// Changes the commission snapshot handed to pools created from now on.
/// Existing pools keep the snapshot taken at their creation.
pub fn update_default_commission(
    ctx: Context<UpdateDefaultCommission>,
    default_commission_bps: u16,
) -> Result<()> {
    require!(
        u64::from(default_commission_bps) <= BASIS_POINT_SCALE,
        ErrorCode::InvalidCommission
    );
    ctx.accounts.registry.default_commission_bps = default_commission_bps;
    Ok(())
}

pub fn create_pool(ctx: Context<CreatePool>, params: CreatePoolParams) -> Result<()> {
    require!(
        params.home_team.len() <= MAX_TEAM_NAME_BYTES
            && params.away_team.len() <= MAX_TEAM_NAME_BYTES,
        ErrorCode::TeamNameTooLong
    );

    let registry = &mut ctx.accounts.registry;
    let pool = &mut ctx.accounts.pool;

    pool.registry = registry.key();
    pool.owner = ctx.accounts.owner.key();
    pool.index = registry.pools_created;
    pool.home_team = params.home_team;
    pool.away_team = params.away_team;
    pool.event_start_time = params.event_start_time;
    pool.commission_bps = registry.default_commission_bps;
    pool.open = false;
    pool.finalized = false;
    pool.winners_identified = false;
    pool.prizes_calculated = false;
    pool.commission_claimed = false;
    pool.final_score = crate::state::Score { home: 0, away: 0 };
    pool.total_stake = 0;
    pool.total_stake_of_winners = 0;
    pool.distributable = 0;
    pool.match_cursor = 0;
    pool.payout_cursor = 0;
    pool.bump = ctx.bumps.pool;
    pool.bets = Vec::new();

    registry.pools_created = registry
        .pools_created
        .checked_add(1)
        .ok_or(ErrorCode::MathOverflow)?;

    emit!(PoolCreated {
        registry: registry.key(),
        pool: pool.key(),
        owner: pool.owner,
        home_team: pool.home_team.clone(),
        away_team: pool.away_team.clone(),
        event_start_time: pool.event_start_time,
        commission_bps: pool.commission_bps,
    });

    Ok(())
}

pub fn open_for_betting(ctx: Context<MutatePool>) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    ctx.accounts.pool.open_for_betting(&caller)?;

    emit!(PoolOpened {
        pool: ctx.accounts.pool.key(),
    });
    Ok(())
}

pub fn place_bet(ctx: Context<PlaceBet>, params: PlaceBetParams) -> Result<()> {
    let bettor = ctx.accounts.bettor.key();
    let bet_index = ctx
        .accounts
        .pool
        .record_bet(bettor, params.predicted, params.amount)?;

    transfer_quote_from_bettor(
        &ctx.accounts.bettor,
        &ctx.accounts.bettor_quote_ata,
        &ctx.accounts.stake_vault,
        &ctx.accounts.quote_mint,
        &ctx.accounts.token_program,
        params.amount,
    )?;

    emit!(BetPlaced {
        pool: ctx.accounts.pool.key(),
        bettor,
        bet_index,
        predicted: params.predicted,
        amount: params.amount,
    });

    Ok(())
}

pub fn close_for_betting(ctx: Context<MutatePool>) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;
    pool.close_for_betting(&caller, now)?;

    emit!(PoolClosed {
        pool: pool.key(),
        closed_by: caller,
        total_bets: pool.bets.len() as u32,
        total_stake: pool.total_stake,
    });
    Ok(())
}

pub fn finalize_outcome(ctx: Context<MutatePool>, params: FinalizeOutcomeParams) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;
    pool.finalize(&caller, now, params.final_score)?;

    emit!(OutcomeFinalized {
        pool: pool.key(),
        finalized_by: caller,
        final_score: params.final_score,
    });
    Ok(())
}

pub fn identify_winners(ctx: Context<CrankSettlement>, params: BatchParams) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let completed = pool.identify_winners(params.batch_size)?;
    msg!(
        "identify_winners: cursor {}/{}",
        pool.match_cursor,
        pool.bets.len()
    );

    if completed {
        emit!(WinnersIdentified {
            pool: pool.key(),
            home_team: pool.home_team.clone(),
            away_team: pool.away_team.clone(),
            final_score: pool.final_score,
            total_stake_of_winners: pool.total_stake_of_winners,
        });
    }
    Ok(())
}

pub fn calc_prizes(ctx: Context<CrankSettlement>, params: BatchParams) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let completed = pool.calc_prizes(params.batch_size)?;
    msg!(
        "calc_prizes: cursor {}/{}",
        pool.payout_cursor,
        pool.bets.len()
    );

    if completed {
        emit!(PrizesCalculated {
            pool: pool.key(),
            commission: pool.commission_value()?,
            distributable: pool.distributable,
            refunded: pool.total_stake_of_winners == 0,
        });
    }
    Ok(())
}

pub fn withdraw_prize(ctx: Context<WithdrawPrize>, bet_index: u32) -> Result<()> {
    let bettor = ctx.accounts.bettor.key();
    let prize = ctx.accounts.pool.withdraw_prize(bet_index, &bettor)?;

    transfer_quote_from_vault(
        &ctx.accounts.pool,
        ctx.bumps.vault_authority,
        &ctx.accounts.vault_authority,
        &ctx.accounts.stake_vault,
        &ctx.accounts.bettor_quote_ata,
        &ctx.accounts.quote_mint,
        &ctx.accounts.token_program,
        prize,
    )?;

    emit!(PrizeWithdrawn {
        pool: ctx.accounts.pool.key(),
        bettor,
        bet_index,
        prize,
    });

    Ok(())
}

pub fn claim_commission(ctx: Context<ClaimCommission>) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let amount = ctx.accounts.pool.claim_commission(&owner)?;

    transfer_quote_from_vault(
        &ctx.accounts.pool,
        ctx.bumps.vault_authority,
        &ctx.accounts.vault_authority,
        &ctx.accounts.stake_vault,
        &ctx.accounts.owner_quote_ata,
        &ctx.accounts.quote_mint,
        &ctx.accounts.token_program,
        amount,
    )?;

    emit!(CommissionClaimed {
        pool: ctx.accounts.pool.key(),
        owner,
        amount,
    });

    Ok(())
}
