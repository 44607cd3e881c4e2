//! Presentation-level insights derived from a reconciliation result.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{DepartmentAggregate, JoinedRow, ReconciliationResult};

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// A department's discrepancy relative to its HR total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentShare {
    /// The HR department value.
    pub department: String,
    /// The department's absolute discrepancy.
    pub discrepancy: Decimal,
    /// `discrepancy / pay_hr * 100`, absent when the HR total is zero.
    pub percentage: Option<Decimal>,
}

/// How often an employment status meets a payroll status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusPair {
    /// The HR employment status.
    pub employment_status: String,
    /// The Payroll status.
    pub payroll_status: String,
    /// Rows present in both sources with this pair.
    pub count: usize,
}

/// A recommended follow-up area with its actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Short heading.
    pub title: String,
    /// Concrete actions.
    pub actions: Vec<String>,
}

impl Recommendation {
    fn new(title: impl Into<String>, actions: &[&str]) -> Self {
        Self {
            title: title.into(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Insights printed after a run summary.
///
/// # Example
///
/// ```
/// use payroll_audit::insights::AuditInsights;
/// use payroll_audit::reconciliation::reconcile;
///
/// let result = reconcile(&[], &[]).unwrap();
/// let insights = AuditInsights::from_result(&result);
/// assert!(insights.issue_rate.is_zero());
/// assert!(insights.worst_department.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditInsights {
    /// Percentage of joined rows in any discrepancy bucket, two decimals.
    pub issue_rate: Decimal,
    /// One entry per department aggregate, in department order.
    pub department_shares: Vec<DepartmentShare>,
    /// The department with the largest discrepancy.
    pub worst_department: Option<DepartmentAggregate>,
    /// Status pairs over rows present in both sources, ordered by pair.
    pub status_crosstab: Vec<StatusPair>,
    /// Follow-up actions chosen from the statistics.
    pub recommendations: Vec<Recommendation>,
}

fn percentage(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    part.checked_mul(HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .map(|pct| pct.round_dp(2))
}

fn worst_department(departments: &[DepartmentAggregate]) -> Option<&DepartmentAggregate> {
    departments.iter().fold(None, |worst, candidate| match worst {
        Some(current) if candidate.discrepancy <= current.discrepancy => Some(current),
        _ => Some(candidate),
    })
}

fn status_crosstab(result: &ReconciliationResult) -> Vec<StatusPair> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for classified in &result.rows {
        if let JoinedRow::Both { hr, payroll } = &classified.row {
            if let (Some(employment), Some(status)) =
                (hr.employment_status.as_deref(), payroll.payroll_status.as_deref())
            {
                *counts.entry((employment, status)).or_default() += 1;
            }
        }
    }
    counts
        .into_iter()
        .map(|((employment, status), count)| StatusPair {
            employment_status: employment.to_string(),
            payroll_status: status.to_string(),
            count,
        })
        .collect()
}

fn recommendations(
    result: &ReconciliationResult,
    worst: Option<&DepartmentAggregate>,
) -> Vec<Recommendation> {
    let statistics = &result.statistics;
    let mut recommendations = Vec::new();

    if statistics.mismatches > 0 {
        recommendations.push(Recommendation::new(
            "Address Pay Discrepancies",
            &[
                "Review all mismatched records, starting with the departments with the highest discrepancy percentages",
                "Reconcile HR and Payroll at every pay period",
                "Add validation rules for pay amounts in both systems",
            ],
        ));
    }
    if statistics.missing_in_hr > 0 {
        recommendations.push(Recommendation::new(
            "Resolve Missing HR Records",
            &[
                "Investigate why records exist in Payroll but not in HR",
                "Tighten onboarding so every employee is entered in HR first",
                "Synchronise employee records between the two systems",
            ],
        ));
    }
    if statistics.missing_in_payroll > 0 {
        recommendations.push(Recommendation::new(
            "Address Missing Payroll Records",
            &[
                "Review HR records that have no Payroll entry",
                "Verify employment status and confirm payroll processing",
                "Alert on HR records without a matching Payroll entry",
            ],
        ));
    }
    if let Some(worst) = worst {
        let focus = format!(
            "Prioritise review of the {} department, which has the highest absolute discrepancy",
            worst.department
        );
        recommendations.push(Recommendation {
            title: "Department-Specific Focus".to_string(),
            actions: vec![
                focus,
                "Train department administrators on payroll procedures".to_string(),
                "Add department-level reconciliation checkpoints".to_string(),
            ],
        });
    }
    recommendations.push(Recommendation::new(
        "System Improvements",
        &[
            "Automate data validation between HR and Payroll",
            "Schedule regular reconciliation reports",
            "Give department heads visibility of payroll accuracy",
        ],
    ));

    recommendations
}

impl AuditInsights {
    /// Derives insights from a result.
    pub fn from_result(result: &ReconciliationResult) -> Self {
        let statistics = &result.statistics;
        let issue_rate = percentage(
            Decimal::from(statistics.total_issues()),
            Decimal::from(statistics.total_records),
        )
        .unwrap_or(Decimal::ZERO);

        let department_shares = result
            .departments
            .iter()
            .map(|aggregate| DepartmentShare {
                department: aggregate.department.clone(),
                discrepancy: aggregate.discrepancy,
                percentage: percentage(aggregate.discrepancy, aggregate.pay_hr),
            })
            .collect();

        let worst = worst_department(&result.departments);

        Self {
            issue_rate,
            department_shares,
            worst_department: worst.cloned(),
            status_crosstab: status_crosstab(result),
            recommendations: recommendations(result, worst),
        }
    }
}

impl fmt::Display for AuditInsights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Overall issue rate: {:.2}% of records have some kind of discrepancy",
            self.issue_rate
        )?;

        if !self.department_shares.is_empty() {
            writeln!(f, "\nDiscrepancy percentage by department:")?;
            for share in &self.department_shares {
                match share.percentage {
                    Some(pct) => writeln!(f, "  {}: {:.2}%", share.department, pct)?,
                    None => writeln!(f, "  {}: n/a (no HR pay)", share.department)?,
                }
            }
        }

        if !self.status_crosstab.is_empty() {
            writeln!(f, "\nEmployment status vs payroll status:")?;
            for pair in &self.status_crosstab {
                writeln!(
                    f,
                    "  {} / {}: {}",
                    pair.employment_status, pair.payroll_status, pair.count
                )?;
            }
        }

        writeln!(f, "\nRecommendations:")?;
        for (i, recommendation) in self.recommendations.iter().enumerate() {
            writeln!(f, "{}. {}:", i + 1, recommendation.title)?;
            for action in &recommendation.actions {
                writeln!(f, "   - {}", action)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeRecord, PayrollRecord};
    use crate::reconciliation::reconcile;

    fn hr(id: &str, pay: i64, dept: &str, status: &str) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            pay: Some(Decimal::new(pay, 0)),
            position: None,
            department: Some(dept.to_string()),
            employment_status: Some(status.to_string()),
            pay_period_end: None,
            line: 2,
        }
    }

    fn payroll(id: &str, pay: i64, status: &str) -> PayrollRecord {
        PayrollRecord {
            employee_id: id.to_string(),
            pay: Some(Decimal::new(pay, 0)),
            position: None,
            department: None,
            payroll_status: Some(status.to_string()),
            pay_period_end: None,
            line: 2,
        }
    }

    #[test]
    fn test_issue_rate() {
        let result = reconcile(
            &[
                hr("E1", 5000, "CS", "Active"),
                hr("E2", 6000, "Math", "Active"),
                hr("E3", 4000, "Art", "Active"),
            ],
            &[payroll("E1", 5000, "Processed"), payroll("E2", 6100, "Processed")],
        )
        .unwrap();

        let insights = AuditInsights::from_result(&result);
        // 2 issues out of 3 rows
        assert_eq!(insights.issue_rate, Decimal::new(6667, 2));
    }

    #[test]
    fn test_department_percentage_and_worst() {
        let result = reconcile(
            &[hr("E2", 6000, "Math", "Active"), hr("E3", 4000, "Art", "Active")],
            &[payroll("E2", 6100, "Processed")],
        )
        .unwrap();

        let insights = AuditInsights::from_result(&result);
        let art = &insights.department_shares[0];
        let math = &insights.department_shares[1];

        assert_eq!(art.department, "Art");
        assert_eq!(art.percentage, Some(Decimal::new(100, 0)));
        assert_eq!(math.percentage, Some(Decimal::new(167, 2)));
        assert_eq!(insights.worst_department.unwrap().department, "Art");
    }

    #[test]
    fn test_zero_hr_total_has_no_percentage() {
        let mut record = hr("E5", 0, "Physics", "Active");
        record.pay = None;
        let result = reconcile(&[record], &[payroll("E5", 200, "Processed")]).unwrap();

        let insights = AuditInsights::from_result(&result);
        assert_eq!(insights.department_shares[0].percentage, None);
    }

    #[test]
    fn test_worst_department_keeps_first_on_ties() {
        let result = reconcile(
            &[hr("E1", 100, "Art", "Active"), hr("E2", 100, "Biology", "Active")],
            &[],
        )
        .unwrap();

        let insights = AuditInsights::from_result(&result);
        assert_eq!(insights.worst_department.unwrap().department, "Art");
    }

    #[test]
    fn test_status_crosstab_counts_rows_in_both() {
        let result = reconcile(
            &[
                hr("E1", 5000, "CS", "Active"),
                hr("E2", 6000, "Math", "Active"),
                hr("E3", 4000, "Art", "On Leave"),
                hr("E4", 4000, "Art", "Active"),
            ],
            &[
                payroll("E1", 5000, "Processed"),
                payroll("E2", 6100, "Processed"),
                payroll("E3", 4000, "Pending"),
            ],
        )
        .unwrap();

        let insights = AuditInsights::from_result(&result);
        assert_eq!(
            insights.status_crosstab,
            vec![
                StatusPair {
                    employment_status: "Active".to_string(),
                    payroll_status: "Processed".to_string(),
                    count: 2,
                },
                StatusPair {
                    employment_status: "On Leave".to_string(),
                    payroll_status: "Pending".to_string(),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_recommendations_follow_statistics() {
        let clean = reconcile(&[hr("E1", 5000, "CS", "Active")], &[payroll("E1", 5000, "Processed")])
            .unwrap();
        let titles: Vec<String> = AuditInsights::from_result(&clean)
            .recommendations
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Department-Specific Focus", "System Improvements"]);

        let messy = reconcile(
            &[hr("E2", 6000, "Math", "Active"), hr("E3", 4000, "Art", "Active")],
            &[payroll("E2", 6100, "Processed"), payroll("E4", 3000, "Processed")],
        )
        .unwrap();
        let insights = AuditInsights::from_result(&messy);
        let titles: Vec<&str> = insights.recommendations.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Address Pay Discrepancies",
                "Resolve Missing HR Records",
                "Address Missing Payroll Records",
                "Department-Specific Focus",
                "System Improvements",
            ]
        );
        assert!(insights.recommendations[3].actions[0].contains("Art department"));
    }

    #[test]
    fn test_display_lists_numbered_recommendations() {
        let result = reconcile(&[hr("E3", 4000, "Art", "Active")], &[]).unwrap();
        let text = AuditInsights::from_result(&result).to_string();

        assert!(text.starts_with("Overall issue rate: 100.00%"));
        assert!(text.contains("  Art: 100.00%"));
        assert!(text.contains("1. Address Missing Payroll Records:"));
        assert!(text.contains("3. System Improvements:"));
    }
}
