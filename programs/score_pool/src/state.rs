use anchor_lang::prelude::*;

use crate::{
    constants::{FINALIZE_DELAY_SECS, MAX_TEAM_NAME_BYTES},
    error::ErrorCode,
    helpers::{mul_div, percentage_of},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub const SIZE: usize = 1 + 1;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum BetResult {
    NoResult,
    Loser,
    Winner,
    Tied,
    Paid,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct Bet {
    pub bettor: Pubkey,
    pub predicted: Score,
    pub amount: u64,
    pub result: BetResult,
    pub prize: u64,
}

impl Bet {
    pub const SIZE: usize = 32 + Score::SIZE + 8 + 1 + 8;
}

#[account]
pub struct Registry {
    pub admin: Pubkey,
    pub quote_mint: Pubkey,
    pub default_commission_bps: u16,
    pub pools_created: u64,
    pub bump: u8,
}

impl Registry {
    pub const LEN: usize = 8 + 32 + 32 + 2 + 8 + 1;
}

#[account]
pub struct Pool {
    pub registry: Pubkey,
    pub owner: Pubkey,
    pub index: u64,
    pub home_team: String,
    pub away_team: String,
    pub event_start_time: i64,
    /// Snapshot taken at creation; never changes for the life of the pool.
    pub commission_bps: u16,
    pub open: bool,
    pub finalized: bool,
    pub winners_identified: bool,
    pub prizes_calculated: bool,
    pub commission_claimed: bool,
    pub final_score: Score,
    pub total_stake: u64,
    pub total_stake_of_winners: u64,
    /// Net prize pool, fixed on the first payout batch.
    pub distributable: u64,
    pub match_cursor: u32,
    pub payout_cursor: u32,
    pub bump: u8,
    pub bets: Vec<Bet>,
}

impl Pool {
    pub fn space(bet_count: usize) -> usize {
        8 + 32
            + 32
            + 8
            + (4 + MAX_TEAM_NAME_BYTES)
            + (4 + MAX_TEAM_NAME_BYTES)
            + 8
            + 2
            + 5
            + Score::SIZE
            + 8
            + 8
            + 8
            + 4
            + 4
            + 1
            + (4 + bet_count * Bet::SIZE)
    }

    pub fn open_for_betting(&mut self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, ErrorCode::Unauthorized);
        require!(!self.finalized, ErrorCode::AlreadyFinalized);
        require!(!self.open, ErrorCode::NotClosed);
        self.open = true;
        Ok(())
    }

    /// The owner may close at any time; anyone may once the match has
    /// kicked off, so a vanished owner cannot keep a pool open forever.
    pub fn close_for_betting(&mut self, caller: &Pubkey, now: i64) -> Result<()> {
        require!(self.open, ErrorCode::NotOpen);
        if *caller != self.owner {
            require!(now >= self.event_start_time, ErrorCode::Unauthorized);
        }
        self.open = false;
        Ok(())
    }

    /// Read-only predicate mirroring `finalize`'s guards, for polling.
    pub fn can_finalize(&self, caller: &Pubkey, now: i64) -> bool {
        !self.open
            && !self.finalized
            && (*caller == self.owner
                || now >= self.event_start_time + FINALIZE_DELAY_SECS)
    }

    /// Records the final score. Terminal: the score is immutable afterwards
    /// and no correction path exists.
    pub fn finalize(&mut self, caller: &Pubkey, now: i64, final_score: Score) -> Result<()> {
        require!(!self.open, ErrorCode::StillOpen);
        require!(!self.finalized, ErrorCode::AlreadyFinalized);
        if *caller != self.owner {
            require!(
                now >= self.event_start_time + FINALIZE_DELAY_SECS,
                ErrorCode::Unauthorized
            );
        }
        self.final_score = final_score;
        self.finalized = true;
        Ok(())
    }

    /// Appends a bet to the ledger and returns its zero-based index. The
    /// ledger is append-only; amounts are immutable once recorded.
    pub fn record_bet(&mut self, bettor: Pubkey, predicted: Score, amount: u64) -> Result<u32> {
        require!(self.open, ErrorCode::NotOpen);
        require!(amount > 0, ErrorCode::InvalidBetAmount);

        self.total_stake = self
            .total_stake
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;

        let bet_index = self.bets.len() as u32;
        self.bets.push(Bet {
            bettor,
            predicted,
            amount,
            result: BetResult::NoResult,
            prize: 0,
        });
        Ok(bet_index)
    }

    /// Tags a bounded batch of bets Winner/Loser against the final score,
    /// resuming from `match_cursor`. Returns true once the whole ledger has
    /// been scanned, at which point `winners_identified` latches.
    pub fn identify_winners(&mut self, batch_size: Option<u32>) -> Result<bool> {
        require!(self.finalized, ErrorCode::GameNotFinalized);
        require!(!self.winners_identified, ErrorCode::WinnersAlreadyKnown);

        let len = self.bets.len();
        let start = self.match_cursor as usize;
        let end = match batch_size {
            Some(n) => (start + n as usize).min(len),
            None => len,
        };

        let final_score = self.final_score;
        let mut winners_stake = self.total_stake_of_winners;
        for bet in &mut self.bets[start..end] {
            if bet.predicted == final_score {
                bet.result = BetResult::Winner;
                winners_stake = winners_stake
                    .checked_add(bet.amount)
                    .ok_or(ErrorCode::MathOverflow)?;
            } else {
                bet.result = BetResult::Loser;
            }
        }

        self.total_stake_of_winners = winners_stake;
        self.match_cursor = end as u32;
        if end == len {
            self.winners_identified = true;
        }
        Ok(self.winners_identified)
    }

    /// Computes prizes for a bounded batch, resuming from `payout_cursor`.
    /// The net pool is fixed on the first batch; the regime (split among
    /// winners vs. proportional refund) is determined once by
    /// `total_stake_of_winners` and holds across all batches.
    pub fn calc_prizes(&mut self, batch_size: Option<u32>) -> Result<bool> {
        require!(self.winners_identified, ErrorCode::UnknownWinners);
        require!(!self.prizes_calculated, ErrorCode::PrizesAlreadyCalculated);

        if self.payout_cursor == 0 {
            let commission = percentage_of(self.total_stake, self.commission_bps)?;
            self.distributable = self
                .total_stake
                .checked_sub(commission)
                .ok_or(ErrorCode::MathOverflow)?;
        }

        let len = self.bets.len();
        let start = self.payout_cursor as usize;
        let end = match batch_size {
            Some(n) => (start + n as usize).min(len),
            None => len,
        };

        let distributable = self.distributable;
        if self.total_stake_of_winners > 0 {
            let winners_stake = self.total_stake_of_winners;
            for bet in &mut self.bets[start..end] {
                if bet.result == BetResult::Winner {
                    bet.prize = mul_div(distributable, bet.amount, winners_stake)?;
                }
            }
        } else {
            // Nobody matched: refund everyone pro rata to their own stake.
            let total_stake = self.total_stake;
            for bet in &mut self.bets[start..end] {
                bet.result = BetResult::Tied;
                bet.prize = mul_div(distributable, bet.amount, total_stake)?;
            }
        }

        self.payout_cursor = end as u32;
        if end == len {
            self.prizes_calculated = true;
        }
        Ok(self.prizes_calculated)
    }

    /// Authorizes a pull payment for one bet and marks it Paid. Returns the
    /// prize the caller is owed; the token transfer happens in the handler.
    pub fn withdraw_prize(&mut self, bet_index: u32, caller: &Pubkey) -> Result<u64> {
        let prizes_calculated = self.prizes_calculated;
        let bet = self
            .bets
            .get_mut(bet_index as usize)
            .ok_or(ErrorCode::InvalidBetIndex)?;
        require_keys_eq!(bet.bettor, *caller, ErrorCode::InvalidPrizeWithdrawer);
        require!(prizes_calculated, ErrorCode::PrizesNotCalculated);
        require!(
            matches!(bet.result, BetResult::Winner | BetResult::Tied),
            ErrorCode::InvalidBettingResultForWithdrawing
        );

        bet.result = BetResult::Paid;
        Ok(bet.prize)
    }

    /// One-shot commission payout to the owner once prizes are settled.
    /// Rounding dust stays in the vault, never claimable.
    pub fn claim_commission(&mut self, caller: &Pubkey) -> Result<u64> {
        require_keys_eq!(*caller, self.owner, ErrorCode::Unauthorized);
        require!(self.prizes_calculated, ErrorCode::PrizesNotCalculated);
        require!(!self.commission_claimed, ErrorCode::CommissionAlreadyClaimed);

        self.commission_claimed = true;
        self.commission_value()
    }

    pub fn commission_value(&self) -> Result<u64> {
        percentage_of(self.total_stake, self.commission_bps)
    }

    pub fn net_prize_pool(&self) -> Result<u64> {
        let commission = self.commission_value()?;
        self.total_stake
            .checked_sub(commission)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KICKOFF: i64 = 1_700_000_000;
    const COMMISSION_BPS: u16 = 1_000;

    fn assert_code(err: anchor_lang::error::Error, expected: ErrorCode) {
        match err {
            anchor_lang::error::Error::AnchorError(anchor_err) => {
                assert_eq!(anchor_err.error_code_number, u32::from(expected));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    fn score(home: u8, away: u8) -> Score {
        Score { home, away }
    }

    fn new_pool(owner: Pubkey) -> Pool {
        Pool {
            registry: Pubkey::new_unique(),
            owner,
            index: 0,
            home_team: "Crvena Zvezda".to_string(),
            away_team: "Partizan".to_string(),
            event_start_time: KICKOFF,
            commission_bps: COMMISSION_BPS,
            open: false,
            finalized: false,
            winners_identified: false,
            prizes_calculated: false,
            commission_claimed: false,
            final_score: score(0, 0),
            total_stake: 0,
            total_stake_of_winners: 0,
            distributable: 0,
            match_cursor: 0,
            payout_cursor: 0,
            bump: 255,
            bets: Vec::new(),
        }
    }

    /// Stakes of 100/1000/10/600/215 on 2-2, 2-2, 1-0, 0-1 and 0-3, as an
    /// open pool ready for closing. Total stake 1925, 10% commission 192,
    /// net pool 1733.
    fn reference_pool(owner: Pubkey) -> (Pool, Vec<Pubkey>) {
        let mut pool = new_pool(owner);
        pool.open_for_betting(&owner).unwrap();

        let bettors: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();
        let entries = [
            (score(2, 2), 100),
            (score(2, 2), 1000),
            (score(1, 0), 10),
            (score(0, 1), 600),
            (score(0, 3), 215),
        ];
        for (i, (predicted, amount)) in entries.iter().enumerate() {
            let index = pool.record_bet(bettors[i], *predicted, *amount).unwrap();
            assert_eq!(index, i as u32);
        }
        (pool, bettors)
    }

    fn settle(pool: &mut Pool, owner: &Pubkey, final_score: Score) {
        pool.close_for_betting(owner, KICKOFF - 60).unwrap();
        pool.finalize(owner, KICKOFF - 60, final_score).unwrap();
        assert!(pool.identify_winners(None).unwrap());
        assert!(pool.calc_prizes(None).unwrap());
    }

    #[test]
    fn open_requires_owner_and_closed_state() {
        let owner = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mut pool = new_pool(owner);

        assert_code(
            pool.open_for_betting(&stranger).unwrap_err(),
            ErrorCode::Unauthorized,
        );
        pool.open_for_betting(&owner).unwrap();
        assert_code(
            pool.open_for_betting(&owner).unwrap_err(),
            ErrorCode::NotClosed,
        );
    }

    #[test]
    fn finalized_pool_cannot_reopen() {
        let owner = Pubkey::new_unique();
        let mut pool = new_pool(owner);
        pool.finalize(&owner, KICKOFF, score(1, 1)).unwrap();
        assert_code(
            pool.open_for_betting(&owner).unwrap_err(),
            ErrorCode::AlreadyFinalized,
        );
    }

    #[test]
    fn close_allows_owner_any_time_and_public_after_kickoff() {
        let owner = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();

        let mut pool = new_pool(owner);
        assert_code(
            pool.close_for_betting(&owner, KICKOFF).unwrap_err(),
            ErrorCode::NotOpen,
        );
        pool.open_for_betting(&owner).unwrap();
        pool.close_for_betting(&owner, KICKOFF - 3600).unwrap();

        let mut pool = new_pool(owner);
        pool.open_for_betting(&owner).unwrap();
        assert_code(
            pool.close_for_betting(&stranger, KICKOFF - 1).unwrap_err(),
            ErrorCode::Unauthorized,
        );
        pool.close_for_betting(&stranger, KICKOFF).unwrap();
    }

    #[test]
    fn finalize_guards_state_caller_and_delay() {
        let owner = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mut pool = new_pool(owner);
        pool.open_for_betting(&owner).unwrap();

        assert_code(
            pool.finalize(&owner, KICKOFF, score(1, 0)).unwrap_err(),
            ErrorCode::StillOpen,
        );
        pool.close_for_betting(&owner, KICKOFF).unwrap();

        let early = KICKOFF + FINALIZE_DELAY_SECS - 1;
        assert!(!pool.can_finalize(&stranger, early));
        assert_code(
            pool.finalize(&stranger, early, score(1, 0)).unwrap_err(),
            ErrorCode::Unauthorized,
        );

        assert!(pool.can_finalize(&owner, early));
        assert!(pool.can_finalize(&stranger, KICKOFF + FINALIZE_DELAY_SECS));
        pool.finalize(&stranger, KICKOFF + FINALIZE_DELAY_SECS, score(1, 0))
            .unwrap();
        assert_eq!(pool.final_score, score(1, 0));

        assert!(!pool.can_finalize(&owner, early));
        assert_code(
            pool.finalize(&owner, early, score(2, 0)).unwrap_err(),
            ErrorCode::AlreadyFinalized,
        );
        // The recorded score is immutable.
        assert_eq!(pool.final_score, score(1, 0));
    }

    #[test]
    fn record_bet_requires_open_pool_and_positive_amount() {
        let owner = Pubkey::new_unique();
        let bettor = Pubkey::new_unique();
        let mut pool = new_pool(owner);

        assert_code(
            pool.record_bet(bettor, score(1, 1), 50).unwrap_err(),
            ErrorCode::NotOpen,
        );
        pool.open_for_betting(&owner).unwrap();
        assert_code(
            pool.record_bet(bettor, score(1, 1), 0).unwrap_err(),
            ErrorCode::InvalidBetAmount,
        );

        assert_eq!(pool.record_bet(bettor, score(1, 1), 50).unwrap(), 0);
        assert_eq!(pool.record_bet(bettor, score(0, 2), 70).unwrap(), 1);
        assert_eq!(pool.total_stake, 120);
        assert_eq!(pool.bets[1].result, BetResult::NoResult);
        assert_eq!(pool.bets[1].prize, 0);
    }

    #[test]
    fn identify_winners_requires_finalized_outcome() {
        let owner = Pubkey::new_unique();
        let (mut pool, _) = reference_pool(owner);
        pool.close_for_betting(&owner, KICKOFF).unwrap();
        assert_code(
            pool.identify_winners(None).unwrap_err(),
            ErrorCode::GameNotFinalized,
        );
    }

    #[test]
    fn calc_prizes_requires_identified_winners() {
        let owner = Pubkey::new_unique();
        let (mut pool, _) = reference_pool(owner);
        pool.close_for_betting(&owner, KICKOFF).unwrap();
        pool.finalize(&owner, KICKOFF, score(2, 2)).unwrap();
        assert_code(pool.calc_prizes(None).unwrap_err(), ErrorCode::UnknownWinners);
    }

    #[test]
    fn single_winner_takes_whole_net_pool() {
        let owner = Pubkey::new_unique();
        let (mut pool, _) = reference_pool(owner);
        settle(&mut pool, &owner, score(0, 3));

        assert_eq!(pool.total_stake, 1925);
        assert_eq!(pool.commission_value().unwrap(), 192);
        assert_eq!(pool.net_prize_pool().unwrap(), 1733);
        assert_eq!(pool.total_stake_of_winners, 215);

        for (i, bet) in pool.bets.iter().enumerate() {
            if i == 4 {
                assert_eq!(bet.result, BetResult::Winner);
                assert_eq!(bet.prize, 1733);
            } else {
                assert_eq!(bet.result, BetResult::Loser);
                assert_eq!(bet.prize, 0);
            }
        }
    }

    #[test]
    fn split_winners_share_proportionally_with_floor() {
        let owner = Pubkey::new_unique();
        let (mut pool, _) = reference_pool(owner);
        settle(&mut pool, &owner, score(2, 2));

        assert_eq!(pool.total_stake_of_winners, 1100);
        assert_eq!(pool.bets[0].prize, 157); // 1733 * 100 / 1100
        assert_eq!(pool.bets[1].prize, 1575); // 1733 * 1000 / 1100
        assert_eq!(pool.bets[2].prize, 0);
        assert_eq!(pool.bets[3].prize, 0);
        assert_eq!(pool.bets[4].prize, 0);

        let paid: u64 = pool.bets.iter().map(|b| b.prize).sum();
        assert!(paid <= pool.distributable);
        assert_eq!(pool.distributable - paid, 1); // rounding dust
    }

    #[test]
    fn no_winners_refunds_everyone_pro_rata() {
        let owner = Pubkey::new_unique();
        let (mut pool, _) = reference_pool(owner);
        settle(&mut pool, &owner, score(7, 7));

        assert_eq!(pool.total_stake_of_winners, 0);
        let expected = [90u64, 900, 9, 540, 193];
        for (bet, want) in pool.bets.iter().zip(expected) {
            assert_eq!(bet.result, BetResult::Tied);
            assert_eq!(bet.prize, want);
        }

        let paid: u64 = pool.bets.iter().map(|b| b.prize).sum();
        assert!(paid <= pool.distributable);
    }

    #[test]
    fn batched_passes_converge_to_the_one_shot_result() {
        let owner = Pubkey::new_unique();
        for chunk in [1u32, 2, 3, 7] {
            let (mut pool, _) = reference_pool(owner);
            pool.close_for_betting(&owner, KICKOFF).unwrap();
            pool.finalize(&owner, KICKOFF, score(2, 2)).unwrap();

            let mut prev = 0;
            while !pool.identify_winners(Some(chunk)).unwrap() {
                assert!(pool.match_cursor > prev);
                assert!((pool.match_cursor as usize) < pool.bets.len());
                prev = pool.match_cursor;
            }
            assert_eq!(pool.match_cursor as usize, pool.bets.len());

            while !pool.calc_prizes(Some(chunk)).unwrap() {
                assert!((pool.payout_cursor as usize) <= pool.bets.len());
            }

            let (mut reference, _) = reference_pool(owner);
            settle(&mut reference, &owner, score(2, 2));
            for (a, b) in pool.bets.iter().zip(reference.bets.iter()) {
                assert_eq!(a.result, b.result);
                assert_eq!(a.prize, b.prize);
            }
        }
    }

    #[test]
    fn completed_passes_reject_further_calls() {
        let owner = Pubkey::new_unique();
        let (mut pool, _) = reference_pool(owner);
        settle(&mut pool, &owner, score(2, 2));

        let snapshot = pool.bets.clone();
        assert_code(
            pool.identify_winners(Some(1)).unwrap_err(),
            ErrorCode::WinnersAlreadyKnown,
        );
        assert_code(
            pool.calc_prizes(Some(1)).unwrap_err(),
            ErrorCode::PrizesAlreadyCalculated,
        );
        for (a, b) in pool.bets.iter().zip(snapshot.iter()) {
            assert_eq!(a.result, b.result);
            assert_eq!(a.prize, b.prize);
        }
        assert!(pool.winners_identified);
        assert!(pool.prizes_calculated);
    }

    #[test]
    fn zero_batch_is_a_no_op_that_keeps_the_cursor() {
        let owner = Pubkey::new_unique();
        let (mut pool, _) = reference_pool(owner);
        pool.close_for_betting(&owner, KICKOFF).unwrap();
        pool.finalize(&owner, KICKOFF, score(2, 2)).unwrap();

        assert!(!pool.identify_winners(Some(0)).unwrap());
        assert_eq!(pool.match_cursor, 0);
        assert!(pool.identify_winners(None).unwrap());
    }

    #[test]
    fn empty_ledger_settles_in_one_call_each() {
        let owner = Pubkey::new_unique();
        let mut pool = new_pool(owner);
        pool.finalize(&owner, KICKOFF, score(3, 1)).unwrap();
        assert!(pool.identify_winners(Some(10)).unwrap());
        assert!(pool.calc_prizes(Some(10)).unwrap());
        assert_eq!(pool.distributable, 0);
    }

    #[test]
    fn withdraw_guards_index_caller_state_and_result() {
        let owner = Pubkey::new_unique();
        let (mut pool, bettors) = reference_pool(owner);
        pool.close_for_betting(&owner, KICKOFF).unwrap();
        pool.finalize(&owner, KICKOFF, score(2, 2)).unwrap();
        pool.identify_winners(None).unwrap();

        assert_code(
            pool.withdraw_prize(99, &bettors[0]).unwrap_err(),
            ErrorCode::InvalidBetIndex,
        );
        assert_code(
            pool.withdraw_prize(0, &bettors[1]).unwrap_err(),
            ErrorCode::InvalidPrizeWithdrawer,
        );
        assert_code(
            pool.withdraw_prize(0, &bettors[0]).unwrap_err(),
            ErrorCode::PrizesNotCalculated,
        );

        pool.calc_prizes(None).unwrap();
        assert_code(
            pool.withdraw_prize(2, &bettors[2]).unwrap_err(),
            ErrorCode::InvalidBettingResultForWithdrawing,
        );
        assert_eq!(pool.withdraw_prize(0, &bettors[0]).unwrap(), 157);
        assert_eq!(pool.bets[0].result, BetResult::Paid);
    }

    #[test]
    fn second_withdrawal_on_same_index_is_rejected() {
        let owner = Pubkey::new_unique();
        let (mut pool, bettors) = reference_pool(owner);
        settle(&mut pool, &owner, score(0, 3));

        assert_eq!(pool.withdraw_prize(4, &bettors[4]).unwrap(), 1733);
        assert_code(
            pool.withdraw_prize(4, &bettors[4]).unwrap_err(),
            ErrorCode::InvalidBettingResultForWithdrawing,
        );
    }

    #[test]
    fn tied_bets_withdraw_their_refund() {
        let owner = Pubkey::new_unique();
        let (mut pool, bettors) = reference_pool(owner);
        settle(&mut pool, &owner, score(7, 7));

        assert_eq!(pool.withdraw_prize(0, &bettors[0]).unwrap(), 90);
        assert_eq!(pool.withdraw_prize(3, &bettors[3]).unwrap(), 540);
    }

    #[test]
    fn commission_claim_is_owner_only_and_one_shot() {
        let owner = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let (mut pool, _) = reference_pool(owner);

        assert_code(
            pool.claim_commission(&owner).unwrap_err(),
            ErrorCode::PrizesNotCalculated,
        );
        settle(&mut pool, &owner, score(0, 3));

        assert_code(
            pool.claim_commission(&stranger).unwrap_err(),
            ErrorCode::Unauthorized,
        );
        assert_eq!(pool.claim_commission(&owner).unwrap(), 192);
        assert_code(
            pool.claim_commission(&owner).unwrap_err(),
            ErrorCode::CommissionAlreadyClaimed,
        );
    }

    #[test]
    fn account_space_grows_linearly_with_the_ledger() {
        assert_eq!(Pool::space(1) - Pool::space(0), Bet::SIZE);
        assert_eq!(Pool::space(10) - Pool::space(9), Bet::SIZE);
    }
}
