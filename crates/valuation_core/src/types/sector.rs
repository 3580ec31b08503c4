//! Sector-specific operational inputs and the KPI records computed from them.
//!
//! Each supported sector has a strongly-typed input record. Sectors added at
//! runtime through the formula-set registry use [`SectorData::Custom`], a
//! free-form map of named figures.

use crate::traits::MetricSource;
use std::collections::BTreeMap;

/// Operational data for a technology / subscription business.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TechnologyData {
    /// Revenue for the period
    pub revenue: f64,
    /// Active users at period end
    pub active_users: f64,
    /// Users lost during the period
    pub churned_users: f64,
    /// Users at risk of churn (period start base)
    pub total_users: f64,
    /// Sales and marketing spend
    pub marketing_costs: f64,
    /// Users acquired during the period
    pub new_users: f64,
}

/// Operational data for a manufacturer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManufacturingData {
    /// Units produced
    pub actual_production: f64,
    /// Nameplate capacity
    pub total_capacity: f64,
    /// Value of unfilled orders
    pub order_backlog_value: f64,
    /// Revenue for the period
    pub revenue: f64,
    /// Purchases from the largest supplier
    pub top_supplier_purchases: f64,
    /// Total purchases
    pub total_purchases: f64,
    /// Raw material costs
    pub raw_material_costs: f64,
    /// Output units
    pub output_units: f64,
    /// Input units
    pub input_units: f64,
    /// Defective units
    pub defective_units: f64,
    /// Units inspected
    pub total_units: f64,
}

/// Operational data for a retailer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetailData {
    /// Revenue for the period
    pub revenue: f64,
    /// Revenue of stores open in both periods, current period
    pub same_store_revenue: f64,
    /// Revenue of the same stores, prior period
    pub prior_same_store_revenue: f64,
    /// Selling area in square feet
    pub selling_area_sq_ft: f64,
    /// Cost of goods sold
    pub cost_of_goods_sold: f64,
    /// Average inventory at cost
    pub average_inventory: f64,
    /// Customers who purchased again
    pub returning_customers: f64,
    /// Customers in the base
    pub total_customers: f64,
    /// Number of transactions
    pub transactions: f64,
    /// Stores operated
    pub store_count: f64,
}

/// Operational data for a healthcare provider.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HealthcareData {
    /// Patients treated
    pub patient_volume: f64,
    /// Inpatient days
    pub patient_days: f64,
    /// Admissions
    pub admissions: f64,
    /// Staffed beds
    pub beds: f64,
    /// Days in the reporting period
    pub days_in_period: f64,
    /// Amount reimbursed by payers
    pub reimbursed_amount: f64,
    /// Amount billed to payers
    pub billed_amount: f64,
    /// Readmissions within the window
    pub readmissions: f64,
    /// Discharges
    pub discharges: f64,
    /// Patient satisfaction score
    pub patient_satisfaction: f64,
}

/// Operational data for a bank or lender.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FinancialSectorData {
    /// Interest income
    pub interest_income: f64,
    /// Interest expense
    pub interest_expense: f64,
    /// Average earning assets
    pub earning_assets: f64,
    /// Average interest-bearing liabilities
    pub interest_bearing_liabilities: f64,
    /// Non-performing loans
    pub non_performing_loans: f64,
    /// Gross loans
    pub total_loans: f64,
    /// Regulatory capital
    pub regulatory_capital: f64,
    /// Risk-weighted assets
    pub risk_weighted_assets: f64,
    /// Customer deposits
    pub total_deposits: f64,
    /// Fee and commission income
    pub fee_income: f64,
    /// Total operating income
    pub total_operating_income: f64,
}

/// Named figures for sectors without a dedicated input record.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RawFields(pub BTreeMap<String, f64>);

impl RawFields {
    /// A figure by name, zero when absent.
    pub fn get(&self, name: &str) -> f64 {
        self.0.get(name).copied().unwrap_or(0.0)
    }

    /// Add or replace a figure.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.insert(name.into(), value);
        self
    }
}

/// Raw operational data, one variant per supported sector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SectorData {
    /// Technology inputs
    Technology(TechnologyData),
    /// Manufacturing inputs
    Manufacturing(ManufacturingData),
    /// Retail inputs
    Retail(RetailData),
    /// Healthcare inputs
    Healthcare(HealthcareData),
    /// Banking inputs
    Financial(FinancialSectorData),
    /// Free-form inputs for registered extension sectors
    Custom(RawFields),
    /// No operational data for an unsupported sector
    Unsupported,
}

/// Technology KPIs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TechnologyMetrics {
    /// Revenue per active user
    pub arpu: f64,
    /// Customer acquisition cost
    pub user_acquisition_cost: f64,
    /// Churned / total users
    pub churn_rate: f64,
    /// Active users
    pub monthly_active_users: f64,
    /// ARPU / churn
    pub lifetime_value: f64,
    /// CAC / ARPU
    pub payback_period: f64,
}

/// Manufacturing KPIs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManufacturingMetrics {
    /// Production / capacity
    pub capacity_utilization: f64,
    /// Backlog value / revenue
    pub order_backlog: f64,
    /// Top supplier / total purchases
    pub supplier_concentration: f64,
    /// Raw material costs
    pub raw_material_costs: f64,
    /// Output / input units
    pub production_efficiency: f64,
    /// One minus defect rate
    pub quality_metrics: f64,
}

/// Retail KPIs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetailMetrics {
    /// Same-store sales growth
    pub same_store_sales: f64,
    /// Revenue per square foot
    pub sales_per_square_foot: f64,
    /// COGS / average inventory
    pub inventory_turnover: f64,
    /// Returning / total customers
    pub customer_retention: f64,
    /// Revenue per transaction
    pub basket_size: f64,
    /// Stores operated
    pub store_count: f64,
}

/// Healthcare KPIs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthcareMetrics {
    /// Patients treated
    pub patient_volume: f64,
    /// Patient days / admissions
    pub average_length_of_stay: f64,
    /// Patient days / (beds x days in period)
    pub occupancy_rate: f64,
    /// Reimbursed / billed
    pub reimbursement_rate: f64,
    /// Readmissions / discharges
    pub readmission_rate: f64,
    /// Patient satisfaction score
    pub patient_satisfaction: f64,
}

/// Banking KPIs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinancialSectorMetrics {
    /// (Interest income - interest expense) / earning assets
    pub net_interest_margin: f64,
    /// Interest expense / interest-bearing liabilities
    pub cost_of_funds: f64,
    /// NPL / gross loans
    pub non_performing_loans: f64,
    /// Capital / risk-weighted assets
    pub capital_adequacy: f64,
    /// Loans / deposits
    pub loan_to_deposit: f64,
    /// Fee income / operating income
    pub fees_to_income: f64,
}

/// KPIs computed for one sector.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SectorMetrics {
    /// Technology KPIs
    Technology(TechnologyMetrics),
    /// Manufacturing KPIs
    Manufacturing(ManufacturingMetrics),
    /// Retail KPIs
    Retail(RetailMetrics),
    /// Healthcare KPIs
    Healthcare(HealthcareMetrics),
    /// Banking KPIs
    Financial(FinancialSectorMetrics),
    /// KPIs from a registered extension sector
    Custom {
        /// Sector tag, used as the path prefix
        sector: String,
        /// KPI values by name
        values: BTreeMap<String, f64>,
    },
    /// No KPIs (unknown or unsupported sector)
    #[default]
    Empty,
}

impl SectorMetrics {
    /// Path prefix of the KPIs, `None` for an empty record.
    pub fn prefix(&self) -> Option<&str> {
        match self {
            SectorMetrics::Technology(_) => Some("technology"),
            SectorMetrics::Manufacturing(_) => Some("manufacturing"),
            SectorMetrics::Retail(_) => Some("retail"),
            SectorMetrics::Healthcare(_) => Some("healthcare"),
            SectorMetrics::Financial(_) => Some("financial"),
            SectorMetrics::Custom { sector, .. } => Some(sector.as_str()),
            SectorMetrics::Empty => None,
        }
    }

    /// Whether no KPI was computed.
    pub fn is_empty(&self) -> bool {
        match self {
            SectorMetrics::Empty => true,
            SectorMetrics::Custom { values, .. } => values.is_empty(),
            _ => false,
        }
    }

    /// KPI name / value pairs, without the prefix.
    pub fn fields(&self) -> Vec<(String, f64)> {
        match self {
            SectorMetrics::Technology(m) => named(&[
                ("arpu", m.arpu),
                ("user_acquisition_cost", m.user_acquisition_cost),
                ("churn_rate", m.churn_rate),
                ("monthly_active_users", m.monthly_active_users),
                ("lifetime_value", m.lifetime_value),
                ("payback_period", m.payback_period),
            ]),
            SectorMetrics::Manufacturing(m) => named(&[
                ("capacity_utilization", m.capacity_utilization),
                ("order_backlog", m.order_backlog),
                ("supplier_concentration", m.supplier_concentration),
                ("raw_material_costs", m.raw_material_costs),
                ("production_efficiency", m.production_efficiency),
                ("quality_metrics", m.quality_metrics),
            ]),
            SectorMetrics::Retail(m) => named(&[
                ("same_store_sales", m.same_store_sales),
                ("sales_per_square_foot", m.sales_per_square_foot),
                ("inventory_turnover", m.inventory_turnover),
                ("customer_retention", m.customer_retention),
                ("basket_size", m.basket_size),
                ("store_count", m.store_count),
            ]),
            SectorMetrics::Healthcare(m) => named(&[
                ("patient_volume", m.patient_volume),
                ("average_length_of_stay", m.average_length_of_stay),
                ("occupancy_rate", m.occupancy_rate),
                ("reimbursement_rate", m.reimbursement_rate),
                ("readmission_rate", m.readmission_rate),
                ("patient_satisfaction", m.patient_satisfaction),
            ]),
            SectorMetrics::Financial(m) => named(&[
                ("net_interest_margin", m.net_interest_margin),
                ("cost_of_funds", m.cost_of_funds),
                ("non_performing_loans", m.non_performing_loans),
                ("capital_adequacy", m.capital_adequacy),
                ("loan_to_deposit", m.loan_to_deposit),
                ("fees_to_income", m.fees_to_income),
            ]),
            SectorMetrics::Custom { values, .. } => {
                values.iter().map(|(k, v)| (k.clone(), *v)).collect()
            }
            SectorMetrics::Empty => Vec::new(),
        }
    }

    /// Flatten to `prefix.name -> value`.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        match self.prefix() {
            Some(prefix) => self
                .fields()
                .into_iter()
                .map(|(k, v)| (format!("{}.{}", prefix, k), v))
                .collect(),
            None => BTreeMap::new(),
        }
    }
}

fn named(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl MetricSource for SectorMetrics {
    fn metric(&self, path: &str) -> Option<f64> {
        let (prefix, name) = path.split_once('.')?;
        if self.prefix() != Some(prefix) {
            return None;
        }
        self.fields()
            .into_iter()
            .find_map(|(k, v)| (k == name).then_some(v))
    }
}
