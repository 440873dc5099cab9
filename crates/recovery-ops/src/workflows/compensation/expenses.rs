use super::domain::ExpenseEntry;
use rust_decimal::Decimal;

/// Sum of the usable expense amounts. Entries without a numeric amount, with
/// a negative one, or that would push the sum out of range contribute nothing.
pub fn sum_expenses(expenses: &[ExpenseEntry]) -> Decimal {
    tally_expenses(expenses).total
}

pub(crate) struct ExpenseTally<'a> {
    pub(crate) total: Decimal,
    /// Entries the sum skipped, in input order.
    pub(crate) rejected: Vec<&'a ExpenseEntry>,
}

pub(crate) fn tally_expenses(expenses: &[ExpenseEntry]) -> ExpenseTally<'_> {
    let mut tally = ExpenseTally {
        total: Decimal::ZERO,
        rejected: Vec::new(),
    };

    for entry in expenses {
        match usable_amount(entry).and_then(|amount| tally.total.checked_add(amount)) {
            Some(total) => tally.total = total,
            None => tally.rejected.push(entry),
        }
    }

    tally
}

fn usable_amount(entry: &ExpenseEntry) -> Option<Decimal> {
    entry.amount.filter(|amount| !amount.is_sign_negative())
}
