//! Dataset inspection
//!
//! Lists the dimensions and variables of a year file so the variable names
//! and grid extent can be checked before a run is configured.

use netcdf::{AttributeValue, File, Variable};

/// Information about a dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionInfo {
    pub name: String,
    pub length: usize,
    pub is_unlimited: bool,
}

/// Shape and the attributes relevant to plotting for one variable
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSummary {
    pub name: String,
    pub dimensions: Vec<DimensionInfo>,
    pub units: Option<String>,
    pub long_name: Option<String>,
    pub fill_value: Option<f64>,
}

impl VariableSummary {
    pub fn shape(&self) -> Vec<usize> {
        self.dimensions.iter().map(|d| d.length).collect()
    }
}

fn string_attribute(var: &Variable<'_>, name: &str) -> Option<String> {
    match var.attribute(name)?.value().ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

fn numeric_attribute(var: &Variable<'_>, name: &str) -> Option<f64> {
    match var.attribute(name)?.value().ok()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        AttributeValue::Short(v) => Some(f64::from(v)),
        _ => None,
    }
}

/// Summaries of every variable, sorted by name
pub fn summarize_variables(file: &File) -> Vec<VariableSummary> {
    let mut summaries: Vec<VariableSummary> = file
        .variables()
        .map(|var| VariableSummary {
            name: var.name(),
            dimensions: var
                .dimensions()
                .iter()
                .map(|d| DimensionInfo {
                    name: d.name(),
                    length: d.len(),
                    is_unlimited: d.is_unlimited(),
                })
                .collect(),
            units: string_attribute(&var, "units"),
            long_name: string_attribute(&var, "long_name"),
            fill_value: numeric_attribute(&var, "_FillValue")
                .or_else(|| numeric_attribute(&var, "missing_value")),
        })
        .collect();
    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    summaries
}

/// Print dimensions and variables of a dataset
pub fn print_dataset_summary(file: &File) {
    println!("\n Dimensions");
    println!("==============");

    let mut dimensions: Vec<_> = file.dimensions().collect();
    dimensions.sort_by_key(|d| d.name());

    if dimensions.is_empty() {
        println!("   (No dimensions found)");
    }
    for dim in dimensions {
        let unlimited = if dim.is_unlimited() { " (unlimited)" } else { "" };
        println!("    {} = {}{}", dim.name(), dim.len(), unlimited);
    }

    println!("\n Variables");
    println!("=============");

    let summaries = summarize_variables(file);
    if summaries.is_empty() {
        println!("   (No variables found)");
    }
    for summary in summaries {
        let dims: Vec<String> = summary
            .dimensions
            .iter()
            .map(|d| format!("{}[{}]", d.name, d.length))
            .collect();
        println!("    {} ({})", summary.name, dims.join(", "));

        let mut key_attrs = Vec::new();
        if let Some(units) = &summary.units {
            key_attrs.push(format!("units: {units}"));
        }
        if let Some(long_name) = &summary.long_name {
            key_attrs.push(format!("long_name: {long_name}"));
        }
        if let Some(fill) = summary.fill_value {
            key_attrs.push(format!("_FillValue: {fill:e}"));
        }
        if !key_attrs.is_empty() {
            println!("      └─ {}", key_attrs.join(", "));
        }
    }
}
