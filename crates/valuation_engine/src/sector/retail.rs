//! Retail KPIs.

use valuation_core::math::stats::safe_div;
use valuation_core::traits::SectorFormulaSet;
use valuation_core::types::{RetailData, RetailMetrics, SectorData, SectorMetrics};

/// Retail formula set, registered as `"retail"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetailFormulas;

impl SectorFormulaSet for RetailFormulas {
    fn sector(&self) -> &str {
        "retail"
    }

    fn compute_metrics(&self, data: &SectorData) -> SectorMetrics {
        match data {
            SectorData::Retail(d) => SectorMetrics::Retail(retail_metrics(d)),
            _ => SectorMetrics::Empty,
        }
    }
}

/// Store productivity and customer KPIs.
pub fn retail_metrics(d: &RetailData) -> RetailMetrics {
    RetailMetrics {
        same_store_sales: safe_div(
            d.same_store_revenue - d.prior_same_store_revenue,
            d.prior_same_store_revenue,
        ),
        sales_per_square_foot: safe_div(d.revenue, d.selling_area_sq_ft),
        inventory_turnover: safe_div(d.cost_of_goods_sold, d.average_inventory),
        customer_retention: safe_div(d.returning_customers, d.total_customers),
        basket_size: safe_div(d.revenue, d.transactions),
        store_count: d.store_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_retail_metrics() {
        let m = retail_metrics(&RetailData {
            revenue: 5_000_000.0,
            same_store_revenue: 4_200_000.0,
            prior_same_store_revenue: 4_000_000.0,
            selling_area_sq_ft: 20_000.0,
            cost_of_goods_sold: 3_000_000.0,
            average_inventory: 500_000.0,
            returning_customers: 6_000.0,
            total_customers: 10_000.0,
            transactions: 100_000.0,
            store_count: 12.0,
        });
        assert_relative_eq!(m.same_store_sales, 0.05, epsilon = 1e-12);
        assert_relative_eq!(m.sales_per_square_foot, 250.0, epsilon = 1e-10);
        assert_relative_eq!(m.inventory_turnover, 6.0, epsilon = 1e-12);
        assert_relative_eq!(m.customer_retention, 0.6, epsilon = 1e-12);
        assert_relative_eq!(m.basket_size, 50.0, epsilon = 1e-12);
        assert_eq!(m.store_count, 12.0);
    }

    #[test]
    fn test_no_prior_period() {
        let m = retail_metrics(&RetailData {
            same_store_revenue: 100.0,
            ..Default::default()
        });
        assert_eq!(m.same_store_sales, 0.0);
    }
}
