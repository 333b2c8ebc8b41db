use serde_json::{Map, Value, json};
use uni_core::entities::Transaction;
use uni_core::enums::{PaymentMethod, TransactionStatus, TransactionType};

use crate::controller::FormController;
use crate::draft::{Draft, date_text, object, opt_text, today};
use crate::error::ValidationErrors;
use crate::rules::Checks;

/// Who a transaction is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Beneficiary {
    #[default]
    Student,
    Teacher,
}

impl Beneficiary {
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

/// Financial transaction form.
///
/// The user always types a positive amount; scholarships and refunds are
/// sent negative. The category follows from the transaction type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionForm {
    draft: Draft,
    beneficiary: Beneficiary,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: Draft::with_initial([
                ("transaction_type", TransactionType::Tuition.as_str()),
                ("status", TransactionStatus::Pending.as_str()),
                ("method", PaymentMethod::BankTransfer.as_str()),
            ]),
            beneficiary: Beneficiary::Student,
        }
    }

    #[must_use]
    pub fn edit(tx: &Transaction) -> Self {
        let beneficiary = if tx.student.id().is_none() && tx.teacher.id().is_some() {
            Beneficiary::Teacher
        } else {
            Beneficiary::Student
        };
        Self {
            draft: Draft::with_initial([
                ("student", opt_text(tx.student.id())),
                ("teacher", opt_text(tx.teacher.id())),
                ("transaction_type", opt_text(tx.transaction_type)),
                ("amount", tx.amount.abs().to_string()),
                ("paid_amount", tx.paid_amount.to_string()),
                ("date", date_text(tx.date)),
                ("due_date", date_text(tx.due_date)),
                ("payment_date", date_text(tx.payment_date)),
                ("status", opt_text(tx.status)),
                ("method", opt_text(tx.method)),
                ("description", tx.description.clone()),
            ]),
            beneficiary,
        }
    }

    /// Switch beneficiary; the other reference is dropped from the payload.
    pub const fn set_beneficiary(&mut self, beneficiary: Beneficiary) {
        self.beneficiary = beneficiary;
    }

    #[must_use]
    pub const fn beneficiary(&self) -> Beneficiary {
        self.beneficiary
    }

    fn transaction_type(&self) -> Option<TransactionType> {
        self.draft.choice("transaction_type")
    }

    /// Amount as sent to the backend, sign applied.
    #[must_use]
    pub fn signed_amount(&self) -> Option<f64> {
        let magnitude = self.draft.number("amount")?.abs();
        Some(match self.transaction_type() {
            Some(ty) if ty.is_outflow() => -magnitude,
            _ => magnitude,
        })
    }
}

impl FormController for TransactionForm {
    const ENTITY: &'static str = "transaction";

    fn draft(&self) -> &Draft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let beneficiary = self.beneficiary.field();
        let missing = match self.beneficiary {
            Beneficiary::Student => "L'étudiant est requis",
            Beneficiary::Teacher => "L'enseignant est requis",
        };
        Checks::new(&self.draft)
            .id(beneficiary, missing)
            .required("transaction_type", "Le type de transaction est requis")
            .choice::<TransactionType>("transaction_type", "Type de transaction inconnu")
            .required("amount", "Le montant doit être un nombre valide")
            .positive("amount", "Le montant doit être positif")
            .non_negative("paid_amount", "Le montant payé doit être positif ou zéro")
            .required("due_date", "La date d'échéance est requise")
            .date("due_date")
            .date("date")
            .date("payment_date")
            .choice::<TransactionStatus>("status", "Statut inconnu")
            .choice::<PaymentMethod>("method", "Mode de paiement inconnu")
            .finish()
    }

    fn payload(&self) -> Map<String, Value> {
        let d = &self.draft;
        let category = self
            .transaction_type()
            .map_or(Value::Null, |ty| json!(ty.category().as_str()));
        let date = if d.is_blank("date") {
            Value::String(today())
        } else {
            d.text_value("date")
        };

        let mut body = Map::new();
        let field = self.beneficiary.field();
        body.insert(field.into(), d.integer_value(field));
        body.extend(object(json!({
            "transaction_type": d.text_value("transaction_type"),
            "category": category,
            "amount": self.signed_amount(),
            "date": date,
            "due_date": d.text_value("due_date"),
            "status": d.text_value("status"),
            "method": d.text_value("method"),
            "description": d.text_value("description"),
        })));
        if !d.is_blank("paid_amount") {
            body.insert("paid_amount".into(), d.number_value("paid_amount"));
        }
        if !d.is_blank("payment_date") {
            body.insert("payment_date".into(), d.text_value("payment_date"));
        }
        body
    }

    fn linked_fields(&self, field: &str) -> &'static [&'static str] {
        match field {
            "transaction_type" => &["amount", "category"],
            _ => &[],
        }
    }
}
