use crate::models::{Amount, FinancialRecord, FinancialSummary, TransactionKind};

/// Totals over `records`; the balance is always income minus expenses.
pub fn summarize<'a, I>(records: I) -> FinancialSummary
where
    I: IntoIterator<Item = &'a FinancialRecord>,
{
    let mut income = Amount::ZERO;
    let mut expenses = Amount::ZERO;

    for record in records {
        match record.kind {
            TransactionKind::In => income = income + record.amount,
            TransactionKind::Out => expenses = expenses + record.amount,
        }
    }

    FinancialSummary {
        income,
        expenses,
        balance: income - expenses,
    }
}
