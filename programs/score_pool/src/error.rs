use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Pool is not closed")]
    NotClosed,
    #[msg("Pool is not open for betting")]
    NotOpen,
    #[msg("Pool is still open for betting")]
    StillOpen,
    #[msg("Final score has already been recorded")]
    AlreadyFinalized,
    #[msg("Final score has not been recorded yet")]
    GameNotFinalized,
    #[msg("Winners have already been identified")]
    WinnersAlreadyKnown,
    #[msg("Winners have not been identified yet")]
    UnknownWinners,
    #[msg("Prizes have already been calculated")]
    PrizesAlreadyCalculated,
    #[msg("Prizes have not been calculated yet")]
    PrizesNotCalculated,
    #[msg("Bet result does not permit withdrawing")]
    InvalidBettingResultForWithdrawing,
    #[msg("Commission has already been claimed")]
    CommissionAlreadyClaimed,
    #[msg("Caller is not authorized for this action")]
    Unauthorized,
    #[msg("Caller is not the bettor recorded for this bet")]
    InvalidPrizeWithdrawer,
    #[msg("Bet index is out of bounds")]
    InvalidBetIndex,
    #[msg("Bet amount must be greater than zero")]
    InvalidBetAmount,
    #[msg("Commission must not exceed 10000 bps")]
    InvalidCommission,
    #[msg("Team name exceeds supported length")]
    TeamNameTooLong,
    #[msg("Division by zero")]
    DivisionByZero,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Invalid quote token account")]
    InvalidQuoteAccount,
}
