// Fleet operations - buying and selling ground vehicles
use crate::error::IntentError;
use crate::models::*;

pub struct FleetOperations<'a> {
    state: &'a mut GameState,
}

impl<'a> FleetOperations<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Buy a vehicle of `vehicle_type`; it starts idle at the depot.
    /// Returns the new vehicle's id.
    pub fn purchase_vehicle(&mut self, vehicle_type: VehicleType) -> Result<String, IntentError> {
        let price = vehicle_type.purchase_price();
        if self.state.money < price {
            return Err(IntentError::InsufficientFunds {
                needed: price,
                available: self.state.money,
            });
        }

        let vehicle = Vehicle::new(vehicle_type);
        let vehicle_id = vehicle.id.clone();
        self.state.money -= price;
        self.state.vehicles.push(vehicle);
        self.state
            .log
            .push(format!("Purchased a new {} for {} $.", vehicle_type, price));

        Ok(vehicle_id)
    }

    /// Sell the first idle vehicle of `vehicle_type` for its resale price.
    /// Vehicles on a job are never sold.
    pub fn sell_vehicle(&mut self, vehicle_type: VehicleType) -> Result<i64, IntentError> {
        let index = self
            .state
            .vehicles
            .iter()
            .position(|v| v.vehicle_type == vehicle_type && v.is_idle())
            .ok_or(IntentError::NoIdleVehicle(vehicle_type))?;

        let price = vehicle_type.resale_price();
        self.state.vehicles.remove(index);
        self.state.money += price;
        self.state
            .log
            .push(format!("Sold a {} for {} $.", vehicle_type, price));

        Ok(price)
    }

    pub fn count(&self, vehicle_type: VehicleType) -> usize {
        self.state
            .vehicles
            .iter()
            .filter(|v| v.vehicle_type == vehicle_type)
            .count()
    }
}
