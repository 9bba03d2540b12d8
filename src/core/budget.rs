use crate::core::http::{self, HttpClient};
use crate::domain::model::{
    AutofillRequest, BudgetEntry, BudgetRule, DeleteAck, Health, NewBudgetRule, PlanCurve,
    PlanCurveRequest,
};
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{
    validate_amount, validate_month, validate_month_range, validate_positive_number, Validate,
};
use reqwest::Method;

impl Validate for NewBudgetRule {
    fn validate(&self) -> Result<()> {
        // 空白 category 交給後端補成預設分類
        validate_amount("amount", self.amount)?;
        validate_month_range(&self.start_month, self.end_month.as_deref())?;
        if !self.growth_rate.is_finite() || self.growth_rate <= -1.0 {
            return Err(ApiError::ValidationError {
                message: format!("growth_rate must be greater than -1, got {}", self.growth_rate),
            });
        }
        Ok(())
    }
}

impl Validate for PlanCurveRequest {
    fn validate(&self) -> Result<()> {
        validate_positive_number("years", self.years, 1)?;
        if !self.annual_return.is_finite() || self.annual_return <= -1.0 {
            return Err(ApiError::ValidationError {
                message: format!(
                    "annual_return must be greater than -1, got {}",
                    self.annual_return
                ),
            });
        }
        if let Some(start_value) = self.start_value {
            if !start_value.is_finite() {
                return Err(ApiError::ValidationError {
                    message: "start_value must be a finite number".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// 預算後端的型別化端點
#[derive(Debug, Clone, Copy)]
pub struct BudgetApi<'a> {
    http: &'a HttpClient,
}

impl<'a> BudgetApi<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &'a HttpClient {
        self.http
    }

    /// 健康檢查位於伺服器根目錄，不在 API 前綴之下
    pub async fn health(&self) -> Result<Health> {
        let url = self.http.origin_url("/health")?;
        self.http.request_json::<(), _>(Method::GET, url, None).await
    }

    pub async fn list_rules(&self) -> Result<Vec<BudgetRule>> {
        let rules: Vec<BudgetRule> = self.http.get_json("/budget/rules").await?;
        tracing::debug!("Fetched {} budget rules", rules.len());
        Ok(rules)
    }

    pub async fn create_rule(&self, rule: &NewBudgetRule) -> Result<BudgetRule> {
        rule.validate()?;
        let created: BudgetRule = self.http.post_json("/budget/rules", rule).await?;
        tracing::info!("Created budget rule {} ({})", created.id, created.category);
        Ok(created)
    }

    pub async fn delete_rule(&self, id: i64) -> Result<DeleteAck> {
        let ack = self
            .http
            .delete_json(&format!("/budget/rules/{}", id))
            .await?;
        tracing::info!("Deleted budget rule {}", id);
        Ok(ack)
    }

    /// 將當月規則寫成明細；後端會略過已存在的自動填充項目
    pub async fn autofill(&self, month: &str) -> Result<Vec<BudgetEntry>> {
        validate_month("month", month)?;
        let month = month.trim();
        let created: Vec<BudgetEntry> = self
            .http
            .post_json("/budget/autofill", &AutofillRequest { month })
            .await?;
        tracing::info!("Autofill for {} created {} entries", month, created.len());
        Ok(created)
    }

    pub async fn plan_curve(&self, request: &PlanCurveRequest) -> Result<PlanCurve> {
        request.validate()?;
        let curve: PlanCurve = self.http.post_json("/plan/curve", request).await?;
        tracing::debug!("Plan curve returned {} points", curve.points.len());
        Ok(curve)
    }
}

impl BudgetApi<'static> {
    /// 使用共用客戶端
    pub fn shared() -> Result<Self> {
        Ok(Self::new(http::shared()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FlowType;

    fn rule() -> NewBudgetRule {
        NewBudgetRule {
            kind: FlowType::Expense,
            category: "房租".to_string(),
            amount: 1500.0,
            start_month: "2025-09".to_string(),
            end_month: Some("2026-08".to_string()),
            growth_rate: 0.03,
            note: None,
        }
    }

    #[test]
    fn test_rule_validation() {
        assert!(rule().validate().is_ok());

        let mut empty_category = rule();
        empty_category.category = "  ".to_string();
        assert!(empty_category.validate().is_ok());

        let mut collapsing = rule();
        collapsing.growth_rate = -1.0;
        assert!(collapsing.validate().is_err());

        let mut reversed = rule();
        reversed.end_month = Some("2025-01".to_string());
        assert!(reversed.validate().is_err());

        let mut negative = rule();
        negative.amount = -10.0;
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_plan_curve_request_validation() {
        assert!(PlanCurveRequest::default().validate().is_ok());

        let zero_years = PlanCurveRequest {
            years: 0,
            ..PlanCurveRequest::default()
        };
        assert!(zero_years.validate().is_err());

        let wiped_out = PlanCurveRequest {
            annual_return: -1.0,
            ..PlanCurveRequest::default()
        };
        assert!(wiped_out.validate().is_err());
    }
}
