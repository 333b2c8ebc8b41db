//! Field checks shared by every form.
//!
//! Each check records at most one message per field. Apart from
//! [`Checks::required`] and [`Checks::id`], checks skip blank fields, so
//! optional fields are only validated once the user fills them in.

use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::draft::Draft;
use crate::error::ValidationErrors;

pub struct Checks<'a> {
    draft: &'a Draft,
    errors: ValidationErrors,
}

impl<'a> Checks<'a> {
    #[must_use]
    pub fn new(draft: &'a Draft) -> Self {
        Self {
            draft,
            errors: ValidationErrors::new(),
        }
    }

    #[must_use]
    pub fn required(mut self, field: &str, message: &str) -> Self {
        if self.draft.is_blank(field) {
            self.errors.add(field, message);
        }
        self
    }

    /// Loose `x@y.z` shape check.
    #[must_use]
    pub fn email(mut self, field: &str) -> Self {
        let value = self.draft.get(field);
        if !value.is_empty() && !looks_like_email(value) {
            self.errors.add(field, "Format d'email invalide");
        }
        self
    }

    #[must_use]
    pub fn number_in(mut self, field: &str, range: RangeInclusive<f64>, message: &str) -> Self {
        if self.draft.is_blank(field) {
            return self;
        }
        match self.draft.number(field) {
            Some(n) if range.contains(&n) => {}
            Some(_) => self.errors.add(field, message),
            None => self.errors.add(field, "Doit être un nombre"),
        }
        self
    }

    #[must_use]
    pub fn integer_in(mut self, field: &str, range: RangeInclusive<i64>, message: &str) -> Self {
        if self.draft.is_blank(field) {
            return self;
        }
        match self.draft.integer(field) {
            Some(n) if range.contains(&n) => {}
            Some(_) => self.errors.add(field, message),
            None => self.errors.add(field, "Doit être un nombre entier"),
        }
        self
    }

    #[must_use]
    pub fn positive(mut self, field: &str, message: &str) -> Self {
        if self.draft.is_blank(field) {
            return self;
        }
        if !self.draft.number(field).is_some_and(|n| n > 0.0) {
            self.errors.add(field, message);
        }
        self
    }

    #[must_use]
    pub fn non_negative(mut self, field: &str, message: &str) -> Self {
        if self.draft.is_blank(field) {
            return self;
        }
        if !self.draft.number(field).is_some_and(|n| n >= 0.0) {
            self.errors.add(field, message);
        }
        self
    }

    #[must_use]
    pub fn date(mut self, field: &str) -> Self {
        if !self.draft.is_blank(field) && self.draft.date(field).is_none() {
            self.errors.add(field, "Date invalide (AAAA-MM-JJ)");
        }
        self
    }

    /// The value must parse as one of `T`'s wire names.
    #[must_use]
    pub fn choice<T: FromStr>(mut self, field: &str, message: &str) -> Self {
        if !self.draft.is_blank(field) && self.draft.choice::<T>(field).is_none() {
            self.errors.add(field, message);
        }
        self
    }

    /// A required reference to another record by numeric id.
    #[must_use]
    pub fn id(mut self, field: &str, missing: &str) -> Self {
        if self.draft.is_blank(field) {
            self.errors.add(field, missing);
        } else if !self.draft.integer(field).is_some_and(|id| id > 0) {
            self.errors.add(field, "L'identifiant doit être un nombre valide");
        }
        self
    }

    /// Record an error computed by the caller.
    #[must_use]
    pub fn check(mut self, ok: bool, field: &str, message: &str) -> Self {
        if !ok {
            self.errors.add(field, message);
        }
        self
    }

    /// # Errors
    ///
    /// Returns every field that failed a check.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        self.errors.into_result()
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty() && !host.is_empty() && !tld.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(field: &str, value: &str) -> Draft {
        let mut d = Draft::new();
        d.set(field, value);
        d
    }

    #[rstest]
    #[case("amine@univ.tn", true)]
    #[case("a@b.c", true)]
    #[case("amine@univ", false)]
    #[case("@univ.tn", false)]
    #[case("amine univ@x.tn", false)]
    #[case("amine.univ.tn", false)]
    fn email_shape(#[case] email: &str, #[case] ok: bool) {
        assert_eq!(looks_like_email(email), ok);
    }

    #[rstest]
    #[case("0", true)]
    #[case("20", true)]
    #[case("20.01", false)]
    #[case("-1", false)]
    #[case("abc", false)]
    #[case("", true)]
    fn score_range(#[case] score: &str, #[case] ok: bool) {
        let d = draft("score", score);
        let result = Checks::new(&d)
            .number_in("score", 0.0..=20.0, "La note doit être entre 0 et 20")
            .finish();
        assert_eq!(result.is_ok(), ok);
    }

    #[test]
    fn required_message_is_kept_over_later_checks() {
        let d = Draft::new();
        let errors = Checks::new(&d)
            .required("student", "L'étudiant est requis")
            .id("student", "L'étudiant est requis")
            .finish()
            .unwrap_err();
        assert_eq!(errors.get("student"), Some("L'étudiant est requis"));
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let d = draft("course", "INF101");
        let errors = Checks::new(&d).id("course", "Le cours est requis").finish().unwrap_err();
        assert_eq!(
            errors.get("course"),
            Some("L'identifiant doit être un nombre valide")
        );
    }
}
