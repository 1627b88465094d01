pub const DEFAULT_BALANCE: i64 = 100;

/// Reply of the store's atomic compare-and-decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebitResult {
    pub authorized: bool,
    pub remaining_balance: i64,
}

impl DebitResult {
    pub fn authorized(remaining_balance: i64) -> Self {
        Self {
            authorized: true,
            remaining_balance,
        }
    }

    pub fn denied(remaining_balance: i64) -> Self {
        Self {
            authorized: false,
            remaining_balance,
        }
    }
}

/// Decision for one conditional debit given the stored balance.
///
/// `current` is `None` when no record exists. An absent record behaves like a
/// zero balance except that it never authorizes a non-zero amount, and a
/// zero-amount debit against it leaves the record absent.
///
/// A debit whose result would not fit in an `i64` is denied.
///
/// Returns the debit reply and the value to write back, if any. Stores that
/// execute the debit as one indivisible unit must apply exactly this rule.
pub fn decide_debit(current: Option<i64>, amount: i64) -> (DebitResult, Option<i64>) {
    match current {
        None if amount == 0 => (DebitResult::authorized(0), None),
        None => (DebitResult::denied(0), None),
        Some(balance) if balance >= amount => match balance.checked_sub(amount) {
            Some(remaining) => (DebitResult::authorized(remaining), Some(remaining)),
            None => (DebitResult::denied(balance), None),
        },
        Some(balance) => (DebitResult::denied(balance), None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeOutcome {
    pub is_authorized: bool,
    pub remaining_balance: i64,
    pub charges: i64,
}

impl ChargeOutcome {
    pub fn from_debit(debit: DebitResult, requested: i64) -> Self {
        Self {
            is_authorized: debit.authorized,
            remaining_balance: debit.remaining_balance,
            charges: if debit.authorized { requested } else { 0 },
        }
    }
}
