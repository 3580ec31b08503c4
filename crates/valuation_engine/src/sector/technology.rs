//! Technology / subscription KPIs.

use valuation_core::math::stats::safe_div;
use valuation_core::traits::SectorFormulaSet;
use valuation_core::types::{SectorData, SectorMetrics, TechnologyData, TechnologyMetrics};

/// Technology formula set, registered as `"technology"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TechnologyFormulas;

impl SectorFormulaSet for TechnologyFormulas {
    fn sector(&self) -> &str {
        "technology"
    }

    fn compute_metrics(&self, data: &SectorData) -> SectorMetrics {
        match data {
            SectorData::Technology(d) => SectorMetrics::Technology(technology_metrics(d)),
            _ => SectorMetrics::Empty,
        }
    }
}

/// Unit economics of a subscription business.
///
/// LTV is ARPU over churn and payback is CAC over ARPU; both resolve to
/// zero when their denominator is zero.
pub fn technology_metrics(d: &TechnologyData) -> TechnologyMetrics {
    let arpu = safe_div(d.revenue, d.active_users);
    let churn_rate = safe_div(d.churned_users, d.total_users);
    let user_acquisition_cost = safe_div(d.marketing_costs, d.new_users);
    TechnologyMetrics {
        arpu,
        user_acquisition_cost,
        churn_rate,
        monthly_active_users: d.active_users,
        lifetime_value: safe_div(arpu, churn_rate),
        payback_period: safe_div(user_acquisition_cost, arpu),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn data() -> TechnologyData {
        TechnologyData {
            revenue: 1_200_000.0,
            active_users: 10_000.0,
            churned_users: 500.0,
            total_users: 10_000.0,
            marketing_costs: 300_000.0,
            new_users: 1_500.0,
        }
    }

    #[test]
    fn test_unit_economics() {
        let m = technology_metrics(&data());
        assert_relative_eq!(m.arpu, 120.0, epsilon = 1e-10);
        assert_relative_eq!(m.churn_rate, 0.05, epsilon = 1e-12);
        assert_relative_eq!(m.lifetime_value, 2400.0, epsilon = 1e-8);
        assert_relative_eq!(m.user_acquisition_cost, 200.0, epsilon = 1e-10);
        assert_relative_eq!(m.payback_period, 200.0 / 120.0, epsilon = 1e-12);
        assert_eq!(m.monthly_active_users, 10_000.0);
    }

    #[test]
    fn test_zero_denominators() {
        let m = technology_metrics(&TechnologyData {
            revenue: 500.0,
            ..Default::default()
        });
        assert_eq!(m.arpu, 0.0);
        assert_eq!(m.churn_rate, 0.0);
        assert_eq!(m.lifetime_value, 0.0);
        assert_eq!(m.payback_period, 0.0);
    }

    #[test]
    fn test_other_sector_data_is_empty() {
        let metrics = TechnologyFormulas.compute_metrics(&SectorData::Unsupported);
        assert_eq!(metrics, SectorMetrics::Empty);
    }
}
