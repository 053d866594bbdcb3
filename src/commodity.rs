//! Commodity expenditure lines: bucketing by catalog range and per-person
//! numbering of individual food lines.

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

use crate::{
    format::{DASH, format_number},
    value::Value,
};

pub const VALUE_SLOTS: usize = 14;
/// First catalog sequence number of the individual food range.
pub const INDIVIDUAL_FOOD_START: i64 = 186;
/// First catalog sequence number of the non-food range.
pub const NON_FOOD_START: i64 = 226;
/// Slots from this one onwards are summarized as "other" columns.
const OTHER_SLOTS_START: usize = 7;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommodityLine {
    pub sequence_number: Option<i64>,
    pub person_id: Option<String>,
    pub columns: [Option<Value>; VALUE_SLOTS],
    pub description: Option<String>,
    pub classification_code: Option<String>,
}

impl CommodityLine {
    /// Value of the 1-based slot `Kolom<slot>`.
    pub fn slot(&self, slot: usize) -> Option<&Value> {
        slot.checked_sub(1)
            .and_then(|idx| self.columns.get(idx))
            .and_then(Option::as_ref)
    }

    pub fn has_any_value(&self) -> bool {
        self.columns.iter().any(Option::is_some)
    }

    pub fn sequence_or_zero(&self) -> i64 {
        self.sequence_number.unwrap_or(0)
    }

    pub fn person_or_empty(&self) -> &str {
        self.person_id.as_deref().unwrap_or("")
    }

    pub fn bucket(&self) -> Bucket {
        Bucket::for_sequence(self.sequence_or_zero())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bucket {
    Food,
    IndividualFood,
    NonFood,
}

impl Bucket {
    pub fn for_sequence(sequence: i64) -> Bucket {
        if sequence < INDIVIDUAL_FOOD_START {
            Bucket::Food
        } else if sequence < NON_FOOD_START {
            Bucket::IndividualFood
        } else {
            Bucket::NonFood
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommodityBuckets {
    pub food: Vec<CommodityLine>,
    pub individual_food: Vec<CommodityLine>,
    pub non_food: Vec<CommodityLine>,
}

impl CommodityBuckets {
    pub fn is_empty(&self) -> bool {
        self.food.is_empty() && self.individual_food.is_empty() && self.non_food.is_empty()
    }

    pub fn len(&self) -> usize {
        self.food.len() + self.individual_food.len() + self.non_food.len()
    }
}

/// Drops lines without any value, splits the rest by catalog range and sorts
/// the individual food lines by person, then sequence number.
pub fn split_commodities(lines: &[CommodityLine]) -> CommodityBuckets {
    let mut buckets = CommodityBuckets::default();
    for line in lines.iter().filter(|line| line.has_any_value()) {
        let target = match line.bucket() {
            Bucket::Food => &mut buckets.food,
            Bucket::IndividualFood => &mut buckets.individual_food,
            Bucket::NonFood => &mut buckets.non_food,
        };
        target.push(line.clone());
    }
    buckets.individual_food.sort_by(|a, b| {
        a.person_or_empty()
            .cmp(b.person_or_empty())
            .then_with(|| a.sequence_or_zero().cmp(&b.sequence_or_zero()))
    });
    buckets
}

/// Household members numbered 1..N in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonSequence {
    numbers: HashMap<String, usize>,
}

impl PersonSequence {
    /// Numbers the distinct non-empty person ids of `lines`. Lines without a
    /// person id are skipped and do not consume a number.
    pub fn assign(lines: &[CommodityLine]) -> Self {
        let numbers = lines
            .iter()
            .filter_map(|line| line.person_id.as_deref())
            .filter(|id| !id.is_empty())
            .unique()
            .enumerate()
            .map(|(idx, id)| (id.to_string(), idx + 1))
            .collect();
        Self { numbers }
    }

    pub fn get(&self, person_id: &str) -> Option<usize> {
        self.numbers.get(person_id).copied()
    }

    /// Display label for a line's person: its number, or `-` when the line
    /// has no numbered person.
    pub fn label(&self, person_id: Option<&str>) -> String {
        person_id
            .and_then(|id| self.get(id))
            .map(|number| number.to_string())
            .unwrap_or_else(|| DASH.to_string())
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.numbers.iter().map(|(id, number)| (id.as_str(), *number))
    }
}

/// Slots 7-14 with a value, as `K7:1, K9:2.50`, or `-` when none is set.
pub fn other_columns_summary(line: &CommodityLine) -> String {
    let parts = (OTHER_SLOTS_START..=VALUE_SLOTS)
        .filter_map(|slot| {
            line.slot(slot)
                .map(|value| format!("K{slot}:{}", format_number(Some(value))))
        })
        .collect::<Vec<_>>();
    if parts.is_empty() {
        DASH.to_string()
    } else {
        parts.join(", ")
    }
}
