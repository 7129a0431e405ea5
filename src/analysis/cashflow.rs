use crate::config::{
    DEFAULT_INTEREST_RATE_PERCENT, DEFAULT_OWN_EQUITY, DEFAULT_RESERVE_FUND, DEFAULT_TERM_YEARS,
};
use crate::error::CashflowError;

// ---------------------------------------------------------------------------
// Financing parameters (calculator inputs in the side panel)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancingInputs {
    pub own_equity: f64,
    pub annual_interest_rate_percent: f64,
    pub term_years: u32,
    /// Monthly building reserve fund ("fond oprav").
    pub monthly_reserve_fund: f64,
}

impl Default for FinancingInputs {
    fn default() -> Self {
        Self {
            own_equity: DEFAULT_OWN_EQUITY,
            annual_interest_rate_percent: DEFAULT_INTEREST_RATE_PERCENT,
            term_years: DEFAULT_TERM_YEARS,
            monthly_reserve_fund: DEFAULT_RESERVE_FUND,
        }
    }
}

impl FinancingInputs {
    pub fn validate(&self) -> Result<(), CashflowError> {
        if self.term_years == 0 {
            return Err(CashflowError::InvalidTerm);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Estimate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashflowIndicator {
    Positive,
    Negative,
}

/// Monthly figures for one listing. Unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashflowEstimate {
    pub loan_principal: f64,
    pub monthly_rent: f64,
    pub monthly_payment: f64,
    pub net_monthly_cashflow: f64,
}

impl CashflowEstimate {
    pub fn indicator(&self) -> CashflowIndicator {
        if self.net_monthly_cashflow >= 0.0 {
            CashflowIndicator::Positive
        } else {
            CashflowIndicator::Negative
        }
    }
}

/// Fixed-rate annuity payment. A zero rate degrades to straight-line
/// repayment.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    if principal <= 0.0 {
        return 0.0;
    }
    let n = f64::from(term_years * 12);
    let r = annual_rate_percent / 100.0 / 12.0;
    if r == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + r).powf(n);
    principal * (r * growth) / (growth - 1.0)
}

/// Rent implied by the gross yield, per month.
pub fn monthly_rent(price: f64, yield_percent: f64) -> f64 {
    (yield_percent * price / 100.0) / 12.0
}

/// Estimate rent, mortgage payment and net cashflow of buying at `price`.
pub fn estimate(
    price: f64,
    yield_percent: f64,
    financing: &FinancingInputs,
) -> Result<CashflowEstimate, CashflowError> {
    financing.validate()?;

    let loan_principal = (price - financing.own_equity).max(0.0);
    let payment = monthly_payment(
        loan_principal,
        financing.annual_interest_rate_percent,
        financing.term_years,
    );
    let rent = monthly_rent(price, yield_percent);

    Ok(CashflowEstimate {
        loan_principal,
        monthly_rent: rent,
        monthly_payment: payment,
        net_monthly_cashflow: rent - payment - financing.monthly_reserve_fund,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn financing(equity: f64, rate: f64, years: u32, fund: f64) -> FinancingInputs {
        FinancingInputs {
            own_equity: equity,
            annual_interest_rate_percent: rate,
            term_years: years,
            monthly_reserve_fund: fund,
        }
    }

    #[test]
    fn reference_mortgage() {
        let est = estimate(2_000_000.0, 5.0, &financing(1_000_000.0, 5.1, 30, 3_500.0)).unwrap();
        assert_eq!(est.loan_principal, 1_000_000.0);
        assert!((est.monthly_payment - 5_429.5).abs() < 0.5, "{}", est.monthly_payment);
        assert!((est.monthly_rent - 8_333.333).abs() < 0.01);
        let expected_net = est.monthly_rent - est.monthly_payment - 3_500.0;
        assert_eq!(est.net_monthly_cashflow, expected_net);
        assert_eq!(est.indicator(), CashflowIndicator::Negative);
    }

    #[test]
    fn equity_covering_price_means_no_loan() {
        let est = estimate(900_000.0, 6.0, &financing(1_000_000.0, 5.1, 30, 0.0)).unwrap();
        assert_eq!(est.loan_principal, 0.0);
        assert_eq!(est.monthly_payment, 0.0);
        assert_eq!(est.net_monthly_cashflow, 4_500.0);
        assert_eq!(est.indicator(), CashflowIndicator::Positive);
    }

    #[test]
    fn zero_rate_is_straight_line() {
        let est = estimate(1_200_000.0, 0.0, &financing(0.0, 0.0, 10, 0.0)).unwrap();
        assert_eq!(est.monthly_payment, 10_000.0);
        assert!(est.monthly_payment.is_finite());
    }

    #[test]
    fn zero_term_is_a_configuration_error() {
        let err = estimate(1_000_000.0, 5.0, &financing(0.0, 5.0, 0, 0.0)).unwrap_err();
        assert_eq!(err, CashflowError::InvalidTerm);
    }

    #[test]
    fn break_even_counts_as_positive() {
        let est = CashflowEstimate {
            loan_principal: 0.0,
            monthly_rent: 3_500.0,
            monthly_payment: 0.0,
            net_monthly_cashflow: 0.0,
        };
        assert_eq!(est.indicator(), CashflowIndicator::Positive);
    }
}
