//! Tuition-fee and scholarship ledgers
//!
//! Flat key-value stores with no invariants of their own. Existence of the
//! course or student key is checked by the registry before writing.

use crate::core::error::{RecordsError, Result};
use std::collections::HashMap;

/// Tuition fee per course and scholarship amount per student
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    tuition_fees: HashMap<String, f64>,
    scholarships: HashMap<String, f64>,
}

impl Ledger {
    /// Tuition fee for a course, if one has been set
    #[must_use]
    pub fn tuition_fee(&self, course_id: &str) -> Option<f64> {
        self.tuition_fees.get(course_id).copied()
    }

    /// Scholarship amount for a student, if one has been allocated
    #[must_use]
    pub fn scholarship(&self, student_id: &str) -> Option<f64> {
        self.scholarships.get(student_id).copied()
    }

    /// All tuition fees, in no particular order
    pub fn tuition_fees(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.tuition_fees.iter()
    }

    /// All scholarships, in no particular order
    pub fn scholarships(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.scholarships.iter()
    }

    pub(crate) fn set_tuition_fee(&mut self, course_id: &str, fee: f64) -> Result<()> {
        self.tuition_fees
            .insert(course_id.to_string(), validate_amount("tuition fee", fee)?);
        Ok(())
    }

    pub(crate) fn set_scholarship(&mut self, student_id: &str, amount: f64) -> Result<()> {
        self.scholarships
            .insert(student_id.to_string(), validate_amount("scholarship", amount)?);
        Ok(())
    }
}

fn validate_amount(what: &str, amount: f64) -> Result<f64> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(RecordsError::invalid(format!(
            "{what} must be a number, got {amount}"
        )))
    }
}
