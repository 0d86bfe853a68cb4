// Infrastructure operations - gates and aircraft stands
use crate::error::IntentError;
use crate::models::*;

pub struct InfrastructureOperations<'a> {
    state: &'a mut GameState,
}

impl<'a> InfrastructureOperations<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn purchase_upgrade(&mut self, upgrade: UpgradeType) -> Result<(), IntentError> {
        let cost = upgrade.cost();
        if self.state.money < cost {
            return Err(IntentError::InsufficientFunds {
                needed: cost,
                available: self.state.money,
            });
        }

        self.state.money -= cost;
        self.state.reputation.adjust(upgrade.reputation());
        let label = match upgrade {
            UpgradeType::Gate => {
                self.state.gates += 1;
                "gate"
            }
            UpgradeType::AircraftStand => {
                self.state.stands += 1;
                "aircraft stand"
            }
        };
        self.state
            .log
            .push(format!("Purchased a new {} for {} $.", label, cost));

        Ok(())
    }
}
