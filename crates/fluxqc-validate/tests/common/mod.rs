#![allow(dead_code)]

use fluxqc_model::{Dataset, InMemoryDictionary, Status, VariableInfo};
use fluxqc_standards::{MessageCatalog, load_default_catalog};
use fluxqc_validate::{Check, CheckContext, CheckOptions, StatusBuilder};
use polars::prelude::{Column, DataFrame};

pub fn dataset(columns: &[(&str, Vec<String>)]) -> Dataset {
    let columns = columns
        .iter()
        .map(|(name, values)| Column::new((*name).into(), values.clone()))
        .collect();
    Dataset::new("US-Test", DataFrame::new(columns).unwrap())
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

/// Half-hourly start and end stamps from 2018-01-01 00:00.
pub fn half_hourly(rows: usize) -> (Vec<String>, Vec<String>) {
    let stamp = |slot: usize| {
        let minutes = slot * 30;
        let day = 1 + minutes / (24 * 60);
        let hour = (minutes / 60) % 24;
        format!("201801{day:02}{hour:02}{:02}", minutes % 60)
    };
    ((0..rows).map(stamp).collect(), (1..=rows).map(stamp).collect())
}

pub fn catalog() -> MessageCatalog {
    load_default_catalog().unwrap()
}

pub fn dictionary(names: &[&str]) -> InMemoryDictionary {
    names
        .iter()
        .map(|name| VariableInfo {
            name: (*name).to_string(),
            unit: String::new(),
            description: String::new(),
        })
        .collect()
}

pub fn run_check(
    check: &dyn Check,
    dataset: &Dataset,
    dictionary: &InMemoryDictionary,
    options: &CheckOptions,
) -> Vec<Status> {
    let catalog = catalog();
    let ctx = CheckContext {
        dataset,
        dictionary,
        builder: StatusBuilder::new(&catalog),
        options,
    };
    check.run(&ctx).unwrap()
}
