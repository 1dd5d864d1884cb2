use crate::errors::GameError;
use crate::player::PlayerAction as A;

/// An action that passed validation, carrying the chips it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips moved to the pot; may be less than the deficit when short
    Call(u32),
    /// New table bet and the chips moved to reach it
    Raise { total: u32, added: u32 },
    /// Entire remaining stack
    AllIn(u32),
}

/// Betting view of the acting seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BettingContext {
    /// Chips behind
    pub stack: u32,
    /// Chips already committed this round
    pub contribution: u32,
    /// Amount every seat must match this round
    pub table_bet: u32,
    /// Smallest legal raise total (one big blind)
    pub min_raise: u32,
}

impl BettingContext {
    pub fn to_call(&self) -> u32 {
        self.table_bet.saturating_sub(self.contribution)
    }
}

/// Validates a player action against the betting rules without touching
/// any state.
///
/// # Errors
///
/// - [`GameError::CannotCheck`] - check while facing a bet
/// - [`GameError::NothingToCall`] - call with nothing owed
/// - [`GameError::InvalidRaise`] - raise total below one big blind, above the
///   stack, or not above the table bet
/// - [`GameError::NoChips`] - all-in with an empty stack
///
/// # Examples
///
/// ```
/// use headsup_engine::rules::{validate_action, BettingContext, ValidatedAction};
/// use headsup_engine::player::PlayerAction;
/// use headsup_engine::errors::GameError;
///
/// let ctx = BettingContext { stack: 990, contribution: 10, table_bet: 20, min_raise: 20 };
/// assert_eq!(validate_action(&ctx, PlayerAction::Call), Ok(ValidatedAction::Call(10)));
/// assert!(matches!(
///     validate_action(&ctx, PlayerAction::Raise(15)),
///     Err(GameError::InvalidRaise { .. })
/// ));
/// ```
pub fn validate_action(ctx: &BettingContext, action: A) -> Result<ValidatedAction, GameError> {
    let to_call = ctx.to_call();
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CannotCheck { to_call })
            }
        }
        A::Call => {
            if to_call == 0 {
                Err(GameError::NothingToCall)
            } else if ctx.stack == 0 {
                Err(GameError::NoChips)
            } else {
                Ok(ValidatedAction::Call(to_call.min(ctx.stack)))
            }
        }
        A::Raise(total) => {
            let minimum = ctx.min_raise.max(ctx.table_bet + 1);
            if total < minimum || total > ctx.stack {
                return Err(GameError::InvalidRaise {
                    amount: total,
                    minimum,
                    maximum: ctx.stack,
                });
            }
            Ok(ValidatedAction::Raise {
                total,
                added: total - ctx.contribution,
            })
        }
        A::AllIn => {
            if ctx.stack == 0 {
                Err(GameError::NoChips)
            } else {
                Ok(ValidatedAction::AllIn(ctx.stack))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(stack: u32, contribution: u32, table_bet: u32) -> BettingContext {
        BettingContext {
            stack,
            contribution,
            table_bet,
            min_raise: 20,
        }
    }

    #[test]
    fn short_call_takes_whole_stack() {
        assert_eq!(
            validate_action(&ctx(30, 0, 100), A::Call),
            Ok(ValidatedAction::Call(30))
        );
    }

    #[test]
    fn raise_must_exceed_table_bet() {
        let err = validate_action(&ctx(500, 10, 60), A::Raise(60)).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidRaise {
                amount: 60,
                minimum: 61,
                maximum: 500
            }
        );
        assert_eq!(
            validate_action(&ctx(500, 10, 60), A::Raise(120)),
            Ok(ValidatedAction::Raise {
                total: 120,
                added: 110
            })
        );
    }
}
