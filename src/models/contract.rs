use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    Airline,
    Catering,
    Fuel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTerms {
    /// Daily cash flow, positive for income and negative for cost
    pub money_per_day: i64,
    /// One-time reputation change on signing
    pub reputation_effect: i32,
    /// One-time reputation hit on early cancellation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_penalty: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    pub description: String,
    pub terms: ContractTerms,
    /// Length in days
    pub duration: u32,
    /// Only present once signed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i32>,
}

impl Contract {
    pub fn is_airline(&self) -> bool {
        self.contract_type == ContractType::Airline
    }

    pub fn cancellation_penalty(&self) -> i32 {
        self.terms.cancellation_penalty.unwrap_or(0).max(0)
    }

    /// Full term in days, saturating at `i32::MAX`
    pub fn term_days(&self) -> i32 {
        i32::try_from(self.duration).unwrap_or(i32::MAX)
    }

    /// Days left on a signed contract; unsigned saves fall back to the full duration
    pub fn remaining_days(&self) -> i32 {
        self.days_remaining.unwrap_or_else(|| self.term_days())
    }
}
