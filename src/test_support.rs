#![cfg(test)]

// Tiny test-only dataset generators
use crate::record::{MovementDto, ProductRef, UserRef, WarehouseRef};
use chrono::{Duration, SecondsFormat, TimeZone, Utc};
use fake::Fake;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::FirstName;

/// `count` movements with deterministic identifiers and dates (one every
/// `hours_apart` hours counting back from a fixed instant), filler names
/// for the rest. Warehouses cycle through `1..=warehouses`.
pub fn sample_movements(count: usize, warehouses: i64, hours_apart: i64) -> Vec<MovementDto> {
    let latest = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let id = i as i64 + 1;
            let wh = (i as i64 % warehouses) + 1;
            let date = latest - Duration::hours(hours_apart * i as i64);
            MovementDto {
                id,
                movement_date: Some(date.to_rfc3339_opts(SecondsFormat::Secs, true)),
                movement_type: Some(if i % 2 == 0 { "IN" } else { "OUT" }.to_string()),
                product: Some(ProductRef { id: id * 10, name: Word().fake() }),
                warehouse: Some(WarehouseRef { id: wh, name: format!("Depo {wh}") }),
                quantity: Some((i as f64).mul_add(0.5, 1.0)),
                unit_price: if i % 3 == 0 { None } else { Some(i as f64 + 0.25) },
                user: Some(UserRef { id: 1, username: FirstName().fake() }),
                note: None,
            }
        })
        .collect()
}
