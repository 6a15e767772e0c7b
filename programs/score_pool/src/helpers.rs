use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::{constants::BASIS_POINT_SCALE, error::ErrorCode, state::Pool};

/// Exact 128-bit product of two u64 words, returned as (high, low).
pub fn full_multiply(a: u64, b: u64) -> (u64, u64) {
    let wide = (a as u128) * (b as u128);
    ((wide >> 64) as u64, wide as u64)
}

/// Floor of a * b / denominator, with the intermediate product kept at
/// double width so a * b alone never corrupts the result.
pub fn mul_div(a: u64, b: u64, denominator: u64) -> Result<u64> {
    require!(denominator != 0, ErrorCode::DivisionByZero);
    let (high, low) = full_multiply(a, b);
    let wide = ((high as u128) << 64) | low as u128;
    let quotient = wide / denominator as u128;
    u64::try_from(quotient).map_err(|_| error!(ErrorCode::MathOverflow))
}

/// Floor percentage in basis points. Flooring guarantees the sum of all
/// computed shares never exceeds the amount being split.
pub fn percentage_of(amount: u64, basis_points: u16) -> Result<u64> {
    mul_div(amount, basis_points as u64, BASIS_POINT_SCALE)
}

pub fn transfer_quote_from_bettor<'info>(
    bettor: &Signer<'info>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    mint: &Account<'info, Mint>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let cpi_accounts = TransferChecked {
        from: from.to_account_info(),
        to: to.to_account_info(),
        authority: bettor.to_account_info(),
        mint: mint.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
    token::transfer_checked(cpi_ctx, amount, mint.decimals)
}

pub fn transfer_quote_from_vault<'info>(
    pool: &Account<'info, Pool>,
    vault_authority_bump: u8,
    vault_authority: &UncheckedAccount<'info>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    mint: &Account<'info, Mint>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let pool_key = pool.key();
    let signer_seeds: &[&[u8]] = &[
        b"vault_authority",
        pool_key.as_ref(),
        &[vault_authority_bump],
    ];

    let cpi_accounts = TransferChecked {
        from: from.to_account_info(),
        to: to.to_account_info(),
        authority: vault_authority.to_account_info(),
        mint: mint.to_account_info(),
    };
    let signer_binding = [signer_seeds];
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        &signer_binding,
    );
    token::transfer_checked(cpi_ctx, amount, mint.decimals)
}
