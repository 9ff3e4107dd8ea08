//! Converts raw form input into a validated [TransactionBuilder].

use std::str::FromStr;

use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    amount::Amount,
    error::WriteError,
    transaction::{Transaction, TransactionBuilder, TransactionType},
};

/// The fields of the add-transaction form, exactly as the user entered them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionForm {
    /// The date in the format `YYYY-MM-DD`.
    pub date: String,
    /// The category label, surrounding whitespace is ignored.
    pub category: String,
    /// Left empty when the user did not write a description.
    pub description: Option<String>,
    /// A non-negative decimal number, e.g. `"50"` or `"12.34"`.
    pub amount: String,
    /// `"income"` or `"expense"`, in any case.
    #[serde(rename = "type")]
    pub type_: String,
}

impl TryFrom<TransactionForm> for TransactionBuilder {
    type Error = WriteError;

    /// Parse and validate every field of the form.
    ///
    /// The category is trimmed and a blank description is treated as no
    /// description.
    ///
    /// # Errors
    /// Returns a [WriteError] describing the first field that is invalid.
    fn try_from(form: TransactionForm) -> Result<Self, Self::Error> {
        let date = parse_date(&form.date)?;
        let kind = TransactionType::from_str(&form.type_)?;
        let amount = Amount::from_str(&form.amount)?;
        let description = form
            .description
            .as_deref()
            .map(str::trim)
            .filter(|description| !description.is_empty());

        let builder =
            Transaction::build(date, form.category.trim(), amount, kind).description(description);
        builder.validate()?;

        Ok(builder)
    }
}

/// Parse a date in the format `YYYY-MM-DD`.
///
/// # Errors
/// Returns a [WriteError::InvalidDate] if `text` is not a real calendar date
/// in that format.
pub fn parse_date(text: &str) -> Result<Date, WriteError> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| WriteError::InvalidDate(text.to_owned()))
}
