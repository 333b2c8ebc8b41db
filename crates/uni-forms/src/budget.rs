use serde_json::{Map, Value, json};
use uni_core::entities::Budget;
use uni_core::enums::BudgetType;

use crate::controller::FormController;
use crate::draft::{Draft, current_year, object, opt_text};
use crate::error::ValidationErrors;
use crate::rules::Checks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetForm {
    draft: Draft,
}

impl Default for BudgetForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: Draft::with_initial([
                ("budget_type", BudgetType::Operational.as_str().to_string()),
                ("year", current_year().to_string()),
                ("spent_amount", "0".to_string()),
                ("committed_amount", "0".to_string()),
                ("is_active", "true".to_string()),
            ]),
        }
    }

    #[must_use]
    pub fn edit(budget: &Budget) -> Self {
        Self {
            draft: Draft::with_initial([
                ("department", budget.department.clone()),
                ("budget_type", opt_text(budget.budget_type)),
                ("year", opt_text(budget.year)),
                ("allocated_amount", budget.allocated_amount.to_string()),
                ("spent_amount", budget.spent_amount.to_string()),
                ("committed_amount", budget.committed_amount.to_string()),
                ("description", budget.description.clone()),
                ("is_active", budget.is_active.unwrap_or(true).to_string()),
            ]),
        }
    }
}

impl FormController for BudgetForm {
    const ENTITY: &'static str = "budget";

    fn draft(&self) -> &Draft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let d = &self.draft;
        Checks::new(d)
            .required("department", "Le département est requis")
            .required("budget_type", "Le type de budget est requis")
            .choice::<BudgetType>("budget_type", "Type de budget inconnu")
            .required("year", "L'année doit être valide (2000-2100)")
            .integer_in("year", 2000..=2100, "L'année doit être valide (2000-2100)")
            .required("allocated_amount", "Le montant alloué est requis")
            .positive("allocated_amount", "Le montant alloué doit être un nombre positif")
            .non_negative(
                "spent_amount",
                "Le montant dépensé doit être un nombre positif ou zéro",
            )
            .non_negative(
                "committed_amount",
                "Le montant engagé doit être un nombre positif ou zéro",
            )
            .check(
                matches!(d.get("is_active"), "" | "true" | "false"),
                "is_active",
                "Valeur invalide",
            )
            .finish()
    }

    fn payload(&self) -> Map<String, Value> {
        let d = &self.draft;
        object(json!({
            "department": d.text_value("department"),
            "budget_type": d.text_value("budget_type"),
            "year": d.integer_value("year"),
            "allocated_amount": d.number_value("allocated_amount"),
            "spent_amount": d.number_or("spent_amount", 0.0),
            "committed_amount": d.number_or("committed_amount", 0.0),
            "description": d.text_value("description"),
            "is_active": d.get("is_active") != "false",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> BudgetForm {
        let mut form = BudgetForm::new();
        form.set("department", "Informatique");
        form.set("year", "2025");
        form.set("allocated_amount", "150000");
        form
    }

    #[test]
    fn blank_spent_and_committed_default_to_zero() {
        let mut form = filled();
        form.set("spent_amount", "");
        let body = form.submit().unwrap();
        assert_eq!(body["allocated_amount"], 150_000.0);
        assert_eq!(body["spent_amount"], 0.0);
        assert_eq!(body["committed_amount"], 0.0);
        assert_eq!(body["year"], 2025);
        assert_eq!(body["is_active"], true);
    }

    #[test]
    fn year_and_amount_bounds() {
        let mut form = filled();
        form.set("year", "1999");
        form.set("allocated_amount", "0");
        form.set("committed_amount", "-1");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("year"), Some("L'année doit être valide (2000-2100)"));
    }

    #[test]
    fn overspending_is_not_a_form_error() {
        let mut form = filled();
        form.set("spent_amount", "200000");
        assert!(form.validate().is_ok());
    }
}
