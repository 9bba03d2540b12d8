use serde::{Deserialize, Serialize};

/// 收支類型，序列化值與後端一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowType {
    #[serde(rename = "收入")]
    Income,
    #[serde(rename = "支出")]
    Expense,
}

impl std::str::FromStr for FlowType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" | "收入" => Ok(FlowType::Income),
            "expense" | "支出" => Ok(FlowType::Expense),
            other => Err(format!("unknown flow type '{}' (use income or expense)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub ok: bool,
}

/// 每月固定規則
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRule {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: FlowType,
    pub category: String,
    pub amount: f64,
    pub start_month: String,
    pub end_month: Option<String>,
    #[serde(default)]
    pub growth_rate: f64,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudgetRule {
    #[serde(rename = "type")]
    pub kind: FlowType,
    pub category: String,
    pub amount: f64,
    pub start_month: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_month: Option<String>,
    /// 年增長率，例如 0.03
    pub growth_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    #[serde(default)]
    pub id: Option<i64>,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: FlowType,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct AutofillRequest<'a> {
    pub month: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCurveRequest {
    pub years: u32,
    pub annual_return: f64,
    /// 省略時後端使用目前總資產
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_value: Option<f64>,
}

impl Default for PlanCurveRequest {
    fn default() -> Self {
        Self {
            years: 30,
            annual_return: 0.06,
            start_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCurveParams {
    pub years: u32,
    pub annual_return: f64,
    pub start_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub wealth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCurve {
    pub params: PlanCurveParams,
    pub points: Vec<CurvePoint>,
}

impl PlanCurve {
    pub fn final_wealth(&self) -> Option<f64> {
        self.points.last().map(|p| p.wealth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_budget_rule_from_backend_json() {
        let rule: BudgetRule = serde_json::from_value(json!({
            "id": 3,
            "type": "收入",
            "category": "養老金",
            "amount": 2000.0,
            "start_month": "2045-01",
            "end_month": null,
            "growth_rate": 0.02,
            "note": ""
        }))
        .unwrap();

        assert_eq!(rule.kind, FlowType::Income);
        assert_eq!(rule.start_month, "2045-01");
        assert!(rule.end_month.is_none());
    }

    #[test]
    fn test_new_rule_omits_empty_optionals() {
        let rule = NewBudgetRule {
            kind: FlowType::Expense,
            category: "房租".to_string(),
            amount: 1500.0,
            start_month: "2025-09".to_string(),
            end_month: None,
            growth_rate: 0.0,
            note: None,
        };

        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["type"], "支出");
        assert!(value.get("end_month").is_none());
        assert!(value.get("note").is_none());
    }

    #[test]
    fn test_flow_type_from_str() {
        assert_eq!("income".parse::<FlowType>(), Ok(FlowType::Income));
        assert_eq!("支出".parse::<FlowType>(), Ok(FlowType::Expense));
        assert!("transfer".parse::<FlowType>().is_err());
    }

    #[test]
    fn test_plan_curve_request_defaults() {
        let value = serde_json::to_value(PlanCurveRequest::default()).unwrap();
        assert_eq!(value, json!({"years": 30, "annual_return": 0.06}));
    }
}
