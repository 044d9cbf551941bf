//! Cargo allowances for a ride.

use super::DomainError;

/// Maximum number of luggage items a driver can allow.
pub const MAX_LUGGAGE: u8 = 2;

/// Maximum number of animals a driver can allow.
pub const MAX_ANIMALS: u8 = 1;

/// What a driver allows riders to bring along.
///
/// Defaults to no luggage and no animals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RideDetails {
    luggage: u8,
    animals: u8,
}

impl RideDetails {
    /// Construct an allowance, validating both counts.
    pub fn new(luggage: u8, animals: u8) -> Result<Self, DomainError> {
        if luggage > MAX_LUGGAGE {
            return Err(DomainError::LuggageOutOfRange(luggage));
        }
        if animals > MAX_ANIMALS {
            return Err(DomainError::AnimalsOutOfRange(animals));
        }
        Ok(Self { luggage, animals })
    }

    /// Luggage items allowed.
    pub fn luggage(&self) -> u8 {
        self.luggage
    }

    /// Animals allowed.
    pub fn animals(&self) -> u8 {
        self.animals
    }

    /// Whether this allowance covers what a rider wants to bring.
    pub fn accommodates(&self, luggage: u8, animals: u8) -> bool {
        self.luggage >= luggage && self.animals >= animals
    }
}
