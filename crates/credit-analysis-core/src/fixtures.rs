//! Sample borrower group used by the CLI demo and the test suites: a
//! manufacturer, its real-estate affiliate and the owner as guarantor.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::borrower::*;
use crate::cash_flow::{Adjustment, AdjustmentCategory};
use crate::debt::{DebtObligation, DebtType};

pub const SMITH_MANUFACTURING: &str = "entity-1";
pub const SMITH_PROPERTIES: &str = "entity-2";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn timestamp(s: &str) -> Option<DateTime<Utc>> {
    s.parse().ok()
}

#[allow(clippy::too_many_arguments)]
fn debt(
    id: &str,
    lender: &str,
    debt_type: DebtType,
    original_balance: Decimal,
    current_balance: Decimal,
    interest_rate: Decimal,
    monthly_payment: Decimal,
    maturity_date: NaiveDate,
) -> DebtObligation {
    DebtObligation {
        id: id.into(),
        lender: lender.into(),
        debt_type,
        original_balance,
        current_balance,
        interest_rate,
        monthly_payment,
        maturity_date,
        is_proposed: false,
    }
}

fn smith_manufacturing_2023() -> FinancialPeriod {
    FinancialPeriod {
        id: "fp-1".into(),
        entity_id: SMITH_MANUFACTURING.into(),
        period_type: PeriodType::FY,
        period_end: date(2023, 12, 31),
        year: 2023,
        balance_sheet: BalanceSheet {
            cash: dec!(245_000),
            accounts_receivable: dec!(520_000),
            inventory: dec!(380_000),
            other_current_assets: dec!(45_000),
            total_current_assets: dec!(1_190_000),
            fixed_assets: dec!(1_850_000),
            accumulated_depreciation: dec!(620_000),
            net_fixed_assets: dec!(1_230_000),
            other_assets: dec!(85_000),
            total_assets: dec!(2_505_000),
            accounts_payable: dec!(285_000),
            current_portion_long_term_debt: dec!(120_000),
            other_current_liabilities: dec!(95_000),
            total_current_liabilities: dec!(500_000),
            long_term_debt: dec!(780_000),
            other_liabilities: dec!(45_000),
            total_liabilities: dec!(1_325_000),
            common_stock: dec!(100_000),
            retained_earnings: dec!(1_080_000),
            total_equity: dec!(1_180_000),
        },
        income_statement: IncomeStatement {
            revenue: dec!(4_250_000),
            cost_of_goods_sold: dec!(2_890_000),
            gross_profit: dec!(1_360_000),
            operating_expenses: dec!(785_000),
            officer_compensation: dec!(180_000),
            depreciation: dec!(145_000),
            amortization: dec!(12_000),
            interest_expense: dec!(68_000),
            other_income: dec!(15_000),
            other_expense: dec!(8_000),
            net_income: dec!(357_000),
            ebitda: dec!(582_000),
        },
        cash_flow: CashFlowStatement {
            net_income: dec!(357_000),
            depreciation: dec!(145_000),
            amortization: dec!(12_000),
            change_in_ar: dec!(-45_000),
            change_in_inventory: dec!(-28_000),
            change_in_ap: dec!(32_000),
            other_operating: dec!(5_000),
            operating_cash_flow: dec!(478_000),
            capital_expenditures: dec!(-185_000),
            other_investing: Decimal::ZERO,
            investing_cash_flow: dec!(-185_000),
            debt_proceeds: Decimal::ZERO,
            debt_payments: dec!(-115_000),
            distributions: dec!(-120_000),
            other_financing: Decimal::ZERO,
            financing_cash_flow: dec!(-235_000),
            net_cash_flow: dec!(58_000),
        },
    }
}

fn smith_manufacturing_2022() -> FinancialPeriod {
    let mut p = smith_manufacturing_2023();
    p.id = "fp-2".into();
    p.period_end = date(2022, 12, 31);
    p.year = 2022;
    p.balance_sheet.cash = dec!(187_000);
    p.balance_sheet.total_assets = dec!(2_320_000);
    p.income_statement.revenue = dec!(3_850_000);
    p.income_statement.net_income = dec!(298_000);
    p.income_statement.ebitda = dec!(512_000);
    p.cash_flow.operating_cash_flow = dec!(412_000);
    p
}

fn smith_properties_2023() -> FinancialPeriod {
    FinancialPeriod {
        id: "fp-3".into(),
        entity_id: SMITH_PROPERTIES.into(),
        period_type: PeriodType::FY,
        period_end: date(2023, 12, 31),
        year: 2023,
        balance_sheet: BalanceSheet {
            cash: dec!(85_000),
            accounts_receivable: dec!(12_000),
            other_current_assets: dec!(8_000),
            total_current_assets: dec!(105_000),
            fixed_assets: dec!(2_450_000),
            accumulated_depreciation: dec!(380_000),
            net_fixed_assets: dec!(2_070_000),
            other_assets: dec!(25_000),
            total_assets: dec!(2_200_000),
            accounts_payable: dec!(18_000),
            current_portion_long_term_debt: dec!(85_000),
            other_current_liabilities: dec!(12_000),
            total_current_liabilities: dec!(115_000),
            long_term_debt: dec!(1_420_000),
            total_liabilities: dec!(1_535_000),
            common_stock: dec!(50_000),
            retained_earnings: dec!(615_000),
            total_equity: dec!(665_000),
            ..Default::default()
        },
        income_statement: IncomeStatement {
            revenue: dec!(324_000),
            gross_profit: dec!(324_000),
            operating_expenses: dec!(95_000),
            depreciation: dec!(82_000),
            interest_expense: dec!(78_000),
            net_income: dec!(69_000),
            ebitda: dec!(229_000),
            ..Default::default()
        },
        cash_flow: CashFlowStatement {
            net_income: dec!(69_000),
            depreciation: dec!(82_000),
            change_in_ar: dec!(-2_000),
            change_in_ap: dec!(3_000),
            operating_cash_flow: dec!(152_000),
            capital_expenditures: dec!(-45_000),
            investing_cash_flow: dec!(-45_000),
            debt_payments: dec!(-82_000),
            distributions: dec!(-24_000),
            financing_cash_flow: dec!(-106_000),
            net_cash_flow: dec!(1_000),
            ..Default::default()
        },
    }
}

/// Smith Holdings: two entities included globally plus one guarantor.
pub fn smith_holdings() -> BorrowerGroup {
    let smith_manufacturing = Entity {
        id: SMITH_MANUFACTURING.into(),
        name: "Smith Manufacturing LLC".into(),
        entity_type: EntityType::Operating,
        ownership_percent: dec!(100),
        include_in_global: true,
        financials: vec![smith_manufacturing_2023(), smith_manufacturing_2022()],
        debts: vec![
            debt(
                "debt-1",
                "First National Bank",
                DebtType::Term,
                dec!(1_200_000),
                dec!(780_000),
                dec!(6.25),
                dec!(14_500),
                date(2028, 6, 15),
            ),
            debt(
                "debt-2",
                "First National Bank",
                DebtType::Revolver,
                dec!(500_000),
                dec!(185_000),
                dec!(7.5),
                dec!(1_156),
                date(2025, 12, 31),
            ),
        ],
    };

    let smith_properties = Entity {
        id: SMITH_PROPERTIES.into(),
        name: "Smith Properties LLC".into(),
        entity_type: EntityType::RealEstate,
        ownership_percent: dec!(100),
        include_in_global: true,
        financials: vec![smith_properties_2023()],
        debts: vec![debt(
            "debt-3",
            "Community Bank",
            DebtType::Mortgage,
            dec!(1_800_000),
            dec!(1_420_000),
            dec!(5.75),
            dec!(12_800),
            date(2033, 3, 1),
        )],
    };

    let john_smith = Guarantor {
        id: "guarantor-1".into(),
        name: "John Smith".into(),
        guarantor_type: GuarantorType::Individual,
        ownership_percent: dec!(100),
        personal_cash_flow: dec!(185_000),
        personal_debt: vec![
            debt(
                "debt-4",
                "Home Mortgage Co",
                DebtType::Mortgage,
                dec!(650_000),
                dec!(485_000),
                dec!(4.25),
                dec!(3_200),
                date(2048, 8, 1),
            ),
            debt(
                "debt-5",
                "Auto Finance",
                DebtType::Auto,
                dec!(62_000),
                dec!(28_000),
                dec!(5.9),
                dec!(1_150),
                date(2026, 4, 15),
            ),
        ],
    };

    BorrowerGroup {
        id: "bg-1".into(),
        name: "Smith Holdings".into(),
        status: AnalysisStatus::DebtService,
        entities: vec![smith_manufacturing, smith_properties],
        guarantors: vec![john_smith],
        analyst: Some("Sarah Johnson".into()),
        created_at: timestamp("2024-01-10T09:00:00Z"),
        updated_at: timestamp("2024-01-18T14:30:00Z"),
    }
}

fn adjustment(
    id: &str,
    category: AdjustmentCategory,
    description: &str,
    original_value: Decimal,
    adjusted_value: Decimal,
    impact: Decimal,
    rule: &str,
) -> Adjustment {
    Adjustment {
        id: id.into(),
        entity_id: SMITH_MANUFACTURING.into(),
        category,
        description: description.into(),
        original_value,
        adjusted_value,
        impact,
        rule: rule.into(),
        is_overridden: false,
        override_reason: None,
        overridden_by: None,
        overridden_at: None,
    }
}

/// Normalization entries against Smith Manufacturing; net impact +158,000.
pub fn smith_holdings_adjustments() -> Vec<Adjustment> {
    let mut rent = adjustment(
        "adj-4",
        AdjustmentCategory::RelatedParty,
        "Related party rent - below market rate",
        dec!(36_000),
        dec!(72_000),
        dec!(-36_000),
        "RP-001: Related party rent adjusted to market rate ($6,000/mo)",
    );
    rent.is_overridden = true;
    rent.override_reason =
        Some("Property appraisal confirms $4,500/mo is market rate for this location".into());
    rent.overridden_by = Some("Sarah Johnson".into());
    rent.overridden_at = timestamp("2024-01-17T10:30:00Z");

    vec![
        adjustment(
            "adj-1",
            AdjustmentCategory::NonRecurring,
            "Legal settlement expense - one-time litigation",
            dec!(85_000),
            Decimal::ZERO,
            dec!(85_000),
            "NR-001: Legal settlements > $25,000 flagged as non-recurring",
        ),
        adjustment(
            "adj-2",
            AdjustmentCategory::OwnerCompensation,
            "Officer compensation normalization",
            dec!(180_000),
            dec!(120_000),
            dec!(60_000),
            "OC-001: Officer comp > $120,000 normalized to market rate",
        ),
        adjustment(
            "adj-3",
            AdjustmentCategory::NonRecurring,
            "Equipment write-off - obsolete machinery",
            dec!(42_000),
            Decimal::ZERO,
            dec!(42_000),
            "NR-002: Asset write-offs flagged as non-recurring",
        ),
        rent,
        adjustment(
            "adj-5",
            AdjustmentCategory::OneTime,
            "Insurance claim proceeds - roof damage",
            Decimal::ZERO,
            dec!(-28_000),
            dec!(-28_000),
            "OT-001: Insurance proceeds > $10,000 removed from recurring income",
        ),
        adjustment(
            "adj-6",
            AdjustmentCategory::NonRecurring,
            "Employee severance package",
            dec!(35_000),
            Decimal::ZERO,
            dec!(35_000),
            "NR-003: Severance payments flagged as non-recurring",
        ),
    ]
}
