// Contract operations - signing offers and cancelling active contracts
use crate::error::IntentError;
use crate::models::*;

pub struct ContractOperations<'a> {
    save: &'a mut SaveData,
}

impl<'a> ContractOperations<'a> {
    pub fn new(save: &'a mut SaveData) -> Self {
        Self { save }
    }

    /// Move an offer into the active list and apply its reputation effect
    pub fn sign_contract(&mut self, contract_id: &str) -> Result<&Contract, IntentError> {
        let index = self
            .save
            .available_contracts
            .iter()
            .position(|c| c.id == contract_id)
            .ok_or_else(|| IntentError::ContractNotFound(contract_id.to_string()))?;

        let mut contract = self.save.available_contracts.remove(index);
        contract.days_remaining = Some(contract.term_days());

        let state = &mut self.save.game_state;
        state.reputation.adjust(contract.terms.reputation_effect);
        state.log.push(format!(
            "Signed a {}-day contract with {}. Reputation changed by {}.",
            contract.duration, contract.name, contract.terms.reputation_effect
        ));

        self.save.active_contracts.push(contract);
        let signed = self.save.active_contracts.len() - 1;
        Ok(&self.save.active_contracts[signed])
    }

    /// Drop an active contract early; its cancellation penalty is charged
    /// against reputation
    pub fn cancel_contract(&mut self, contract_id: &str) -> Result<Contract, IntentError> {
        let index = self
            .save
            .active_contracts
            .iter()
            .position(|c| c.id == contract_id)
            .ok_or_else(|| IntentError::ContractNotFound(contract_id.to_string()))?;

        let contract = self.save.active_contracts.remove(index);
        let penalty = contract.cancellation_penalty();

        let state = &mut self.save.game_state;
        state.reputation.adjust(-penalty);
        state.log.push(format!(
            "Cancelled the contract with {}. Reputation penalty: -{}.",
            contract.name, penalty
        ));

        Ok(contract)
    }
}
