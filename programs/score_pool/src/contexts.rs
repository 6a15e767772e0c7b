use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{error::ErrorCode, state::*};

#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,
    #[account(
        init,
        payer = admin,
        space = Registry::LEN,
        seeds = [b"registry"],
        bump
    )]
    pub registry: Account<'info, Registry>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateDefaultCommission<'info> {
    #[account(address = registry.admin)]
    pub admin: Signer<'info>,
    #[account(mut, seeds = [b"registry"], bump = registry.bump)]
    pub registry: Account<'info, Registry>,
}

#[derive(Accounts)]
pub struct CreatePool<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,
    #[account(mut, seeds = [b"registry"], bump = registry.bump)]
    pub registry: Account<'info, Registry>,
    #[account(address = registry.quote_mint)]
    pub quote_mint: Account<'info, Mint>,
    #[account(
        init,
        payer = owner,
        space = Pool::space(0),
        seeds = [b"pool", registry.key().as_ref(), &registry.pools_created.to_le_bytes()],
        bump
    )]
    pub pool: Account<'info, Pool>,
    /// CHECK: PDA authority for the pool stake vault.
    #[account(seeds = [b"vault_authority", pool.key().as_ref()], bump)]
    pub vault_authority: UncheckedAccount<'info>,
    #[account(
        init,
        payer = owner,
        associated_token::mint = quote_mint,
        associated_token::authority = vault_authority,
    )]
    pub stake_vault: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct MutatePool<'info> {
    pub caller: Signer<'info>,
    #[account(
        mut,
        seeds = [b"pool", pool.registry.as_ref(), &pool.index.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    #[account(seeds = [b"registry"], bump = registry.bump)]
    pub registry: Account<'info, Registry>,
    #[account(
        mut,
        has_one = registry,
        seeds = [b"pool", pool.registry.as_ref(), &pool.index.to_le_bytes()],
        bump = pool.bump,
        realloc = Pool::space(pool.bets.len() + 1),
        realloc::payer = bettor,
        realloc::zero = false,
    )]
    pub pool: Account<'info, Pool>,
    #[account(address = registry.quote_mint)]
    pub quote_mint: Account<'info, Mint>,
    /// CHECK: PDA authority for the pool stake vault.
    #[account(seeds = [b"vault_authority", pool.key().as_ref()], bump)]
    pub vault_authority: UncheckedAccount<'info>,
    #[account(
        mut,
        associated_token::mint = quote_mint,
        associated_token::authority = vault_authority,
    )]
    pub stake_vault: Account<'info, TokenAccount>,
    #[account(mut)]
    pub bettor: Signer<'info>,
    #[account(
        mut,
        constraint = bettor_quote_ata.owner == bettor.key() @ ErrorCode::InvalidQuoteAccount,
        constraint = bettor_quote_ata.mint == quote_mint.key() @ ErrorCode::InvalidQuoteAccount,
    )]
    pub bettor_quote_ata: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CrankSettlement<'info> {
    pub cranker: Signer<'info>,
    #[account(
        mut,
        seeds = [b"pool", pool.registry.as_ref(), &pool.index.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

#[derive(Accounts)]
pub struct WithdrawPrize<'info> {
    pub bettor: Signer<'info>,
    #[account(seeds = [b"registry"], bump = registry.bump)]
    pub registry: Account<'info, Registry>,
    #[account(
        mut,
        has_one = registry,
        seeds = [b"pool", pool.registry.as_ref(), &pool.index.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
    #[account(address = registry.quote_mint)]
    pub quote_mint: Account<'info, Mint>,
    /// CHECK: PDA authority for the pool stake vault.
    #[account(seeds = [b"vault_authority", pool.key().as_ref()], bump)]
    pub vault_authority: UncheckedAccount<'info>,
    #[account(
        mut,
        associated_token::mint = quote_mint,
        associated_token::authority = vault_authority,
    )]
    pub stake_vault: Account<'info, TokenAccount>,
    #[account(
        mut,
        constraint = bettor_quote_ata.owner == bettor.key() @ ErrorCode::InvalidQuoteAccount,
        constraint = bettor_quote_ata.mint == quote_mint.key() @ ErrorCode::InvalidQuoteAccount,
    )]
    pub bettor_quote_ata: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct ClaimCommission<'info> {
    pub owner: Signer<'info>,
    #[account(seeds = [b"registry"], bump = registry.bump)]
    pub registry: Account<'info, Registry>,
    #[account(
        mut,
        has_one = registry,
        seeds = [b"pool", pool.registry.as_ref(), &pool.index.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
    #[account(address = registry.quote_mint)]
    pub quote_mint: Account<'info, Mint>,
    /// CHECK: PDA authority for the pool stake vault.
    #[account(seeds = [b"vault_authority", pool.key().as_ref()], bump)]
    pub vault_authority: UncheckedAccount<'info>,
    #[account(
        mut,
        associated_token::mint = quote_mint,
        associated_token::authority = vault_authority,
    )]
    pub stake_vault: Account<'info, TokenAccount>,
    #[account(
        mut,
        constraint = owner_quote_ata.owner == owner.key() @ ErrorCode::InvalidQuoteAccount,
        constraint = owner_quote_ata.mint == quote_mint.key() @ ErrorCode::InvalidQuoteAccount,
    )]
    pub owner_quote_ata: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
}
