//! Vehicle record types and the accumulation ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Mileage equivalent to one year of age in the derived-age formula.
pub const MILEAGE_YEAR_EQUIVALENT: u32 = 20_000;

/// An input record as it arrives from the loader.
///
/// The derived age is deliberately absent here: it exists only on
/// [`AgedVehicle`], which a worker produces exactly once per record. A
/// submission can therefore never carry a stale pre-computed age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Manufacturer name
    pub make: String,
    /// Model year
    pub year: i32,
    /// Odometer reading
    pub mileage: u32,
}

/// A record after a worker has computed its derived age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgedVehicle {
    /// The original record
    pub vehicle: Vehicle,
    /// Derived age: calendar age plus one year per 20 000 mileage
    pub age: i32,
}

/// Compute the derived age of a vehicle against a fixed reference year.
pub fn vehicle_age(vehicle: &Vehicle, reference_year: i32) -> i32 {
    reference_year - vehicle.year + (vehicle.mileage / MILEAGE_YEAR_EQUIVALENT) as i32
}

/// Ordering of the collector's accumulation: age ascending, ties broken by
/// model year descending. Equal (age, year) pairs compare equal, so a stable
/// sort keeps their arrival order.
pub fn accumulation_order(a: &AgedVehicle, b: &AgedVehicle) -> Ordering {
    a.age
        .cmp(&b.age)
        .then_with(|| b.vehicle.year.cmp(&a.vehicle.year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(make: &str, year: i32, mileage: u32) -> Vehicle {
        Vehicle {
            make: make.to_string(),
            year,
            mileage,
        }
    }

    #[test]
    fn age_adds_one_year_per_twenty_thousand_miles() {
        let high_mileage = vehicle("A", 2000, 200_000);
        assert_eq!(vehicle_age(&high_mileage, 2024), 34);

        let low_mileage = vehicle("B", 2020, 10_000);
        assert_eq!(vehicle_age(&low_mileage, 2024), 4);
    }

    #[test]
    fn partial_mileage_blocks_round_down() {
        let v = vehicle("C", 2020, 39_999);
        assert_eq!(vehicle_age(&v, 2024), 5);
    }

    #[test]
    fn accumulation_orders_by_age_then_year_descending() {
        let younger = AgedVehicle {
            vehicle: vehicle("A", 2015, 0),
            age: 3,
        };
        let older = AgedVehicle {
            vehicle: vehicle("B", 2010, 0),
            age: 7,
        };
        assert_eq!(accumulation_order(&younger, &older), Ordering::Less);

        let same_age_newer_year = AgedVehicle {
            vehicle: vehicle("C", 2018, 0),
            age: 7,
        };
        assert_eq!(
            accumulation_order(&same_age_newer_year, &older),
            Ordering::Less
        );

        let tie = AgedVehicle {
            vehicle: vehicle("D", 2010, 0),
            age: 7,
        };
        assert_eq!(accumulation_order(&tie, &older), Ordering::Equal);
    }
}
