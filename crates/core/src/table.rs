//! Detection of tabular JSON.
//!
//! A value is tabular when it can be laid out as a rectangle of scalar
//! cells. Four orientations are recognised:
//!
//! | Shape                               | Columns            | Rows            |
//! |-------------------------------------|--------------------|-----------------|
//! | `[{"a":1,"b":2}, ...]` (records)    | union of keys      | one per element |
//! | `[[1,2], [3,4]]` (values)           | `"0"`, `"1"`, ...  | one per element |
//! | `[1, 2, 3]` (single column)         | `"0"`              | one per element |
//! | `{"a":{"x":1}, "b":{"x":2}}`        | outer keys         | union of inner keys |
//! | `{"a":[1,2], "b":[3,4]}`            | outer keys         | by position     |
//!
//! Missing cells in the record and column-object shapes are `null`. `[]` and
//! `{}` are empty tables. Nested arrays/objects inside a cell, arrays mixing
//! scalars with containers, and objects of bare scalars are not tabular.

use serde::Serialize;
use serde_json::{Map, Value};

/// A rectangular table of scalar JSON cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Lay out `value` as a table, or `None` if it has no tabular shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) if items.is_empty() => Some(Self {
                columns: Vec::new(),
                rows: Vec::new(),
            }),
            Value::Array(items) => from_records(items)
                .or_else(|| from_value_rows(items))
                .or_else(|| from_single_column(items)),
            Value::Object(map) if map.is_empty() => Some(Self {
                columns: Vec::new(),
                rows: Vec::new(),
            }),
            Value::Object(map) => from_column_objects(map).or_else(|| from_column_arrays(map)),
            _ => None,
        }
    }

    /// Parse JSON text and lay it out as a table.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|v| Self::from_value(&v))
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn scalar_object(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) if map.values().all(is_scalar) => Some(map),
        _ => None,
    }
}

fn scalar_array(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) if items.iter().all(is_scalar) => Some(items),
        _ => None,
    }
}

/// Keys of `maps` in first-seen order, without duplicates.
fn union_keys<'a>(maps: impl IntoIterator<Item = &'a Map<String, Value>>) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for map in maps {
        for key in map.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

fn from_records(items: &[Value]) -> Option<Table> {
    let records: Vec<&Map<String, Value>> =
        items.iter().map(scalar_object).collect::<Option<_>>()?;
    let columns = union_keys(records.iter().copied());
    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();
    Some(Table { columns, rows })
}

fn from_value_rows(items: &[Value]) -> Option<Table> {
    let rows: Vec<&Vec<Value>> = items.iter().map(scalar_array).collect::<Option<_>>()?;
    let width = rows.first().map(|r| r.len())?;
    if width == 0 || rows.iter().any(|r| r.len() != width) {
        return None;
    }
    Some(Table {
        columns: (0..width).map(|i| i.to_string()).collect(),
        rows: rows.into_iter().cloned().collect(),
    })
}

fn from_single_column(items: &[Value]) -> Option<Table> {
    if !items.iter().all(is_scalar) {
        return None;
    }
    Some(Table {
        columns: vec!["0".to_string()],
        rows: items.iter().map(|v| vec![v.clone()]).collect(),
    })
}

fn from_column_objects(map: &Map<String, Value>) -> Option<Table> {
    let columns: Vec<&Map<String, Value>> =
        map.values().map(scalar_object).collect::<Option<_>>()?;
    let index = union_keys(columns.iter().copied());
    let rows = index
        .iter()
        .map(|idx| {
            columns
                .iter()
                .map(|col| col.get(idx).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();
    Some(Table {
        columns: map.keys().cloned().collect(),
        rows,
    })
}

fn from_column_arrays(map: &Map<String, Value>) -> Option<Table> {
    let columns: Vec<&Vec<Value>> = map.values().map(scalar_array).collect::<Option<_>>()?;
    let height = columns.first().map(|c| c.len())?;
    if columns.iter().any(|c| c.len() != height) {
        return None;
    }
    let rows = (0..height)
        .map(|i| columns.iter().map(|col| col[i].clone()).collect())
        .collect();
    Some(Table {
        columns: map.keys().cloned().collect(),
        rows,
    })
}
