//! Healthcare provider KPIs.

use valuation_core::math::stats::safe_div;
use valuation_core::traits::SectorFormulaSet;
use valuation_core::types::{HealthcareData, HealthcareMetrics, SectorData, SectorMetrics};

/// Healthcare formula set, registered as `"healthcare"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthcareFormulas;

impl SectorFormulaSet for HealthcareFormulas {
    fn sector(&self) -> &str {
        "healthcare"
    }

    fn compute_metrics(&self, data: &SectorData) -> SectorMetrics {
        match data {
            SectorData::Healthcare(d) => SectorMetrics::Healthcare(healthcare_metrics(d)),
            _ => SectorMetrics::Empty,
        }
    }
}

/// Utilisation, payer and outcome KPIs.
pub fn healthcare_metrics(d: &HealthcareData) -> HealthcareMetrics {
    HealthcareMetrics {
        patient_volume: d.patient_volume,
        average_length_of_stay: safe_div(d.patient_days, d.admissions),
        occupancy_rate: safe_div(d.patient_days, d.beds * d.days_in_period),
        reimbursement_rate: safe_div(d.reimbursed_amount, d.billed_amount),
        readmission_rate: safe_div(d.readmissions, d.discharges),
        patient_satisfaction: d.patient_satisfaction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_healthcare_metrics() {
        let m = healthcare_metrics(&HealthcareData {
            patient_volume: 25_000.0,
            patient_days: 29_200.0,
            admissions: 6_000.0,
            beds: 100.0,
            days_in_period: 365.0,
            reimbursed_amount: 45_000_000.0,
            billed_amount: 60_000_000.0,
            readmissions: 450.0,
            discharges: 5_900.0,
            patient_satisfaction: 4.2,
        });
        assert_relative_eq!(m.average_length_of_stay, 29_200.0 / 6_000.0, epsilon = 1e-12);
        assert_relative_eq!(m.occupancy_rate, 0.8, epsilon = 1e-12);
        assert_relative_eq!(m.reimbursement_rate, 0.75, epsilon = 1e-12);
        assert_relative_eq!(m.readmission_rate, 450.0 / 5_900.0, epsilon = 1e-12);
        assert_eq!(m.patient_volume, 25_000.0);
    }

    #[test]
    fn test_no_beds() {
        let m = healthcare_metrics(&HealthcareData {
            patient_days: 10.0,
            days_in_period: 30.0,
            ..Default::default()
        });
        assert_eq!(m.occupancy_rate, 0.0);
    }
}
