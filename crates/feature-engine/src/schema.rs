//! Schema Alignment
//!
//! A trained model expects its input columns in a fixed order. The schema is
//! resolved against the known feature set once, so aligning a
//! [`FeatureVector`] is a plain projection.

use crate::features::{Feature, FeatureVector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// A single expected column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    feature: Option<Feature>,
}

impl Column {
    fn new(name: String) -> Self {
        let feature = Feature::from_name(&name);
        Self { name, feature }
    }

    /// Column name as the model knows it
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The feature this column carries, if the builder produces it
    pub fn feature(&self) -> Option<Feature> {
        self.feature
    }
}

/// Ordered list of columns a model was trained on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExpectedSchema {
    columns: Vec<Column>,
}

impl ExpectedSchema {
    /// Create a schema from column names, in model order
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names.into_iter().map(|name| Column::new(name.into())).collect(),
        }
    }

    /// Schema matching the builder's own canonical feature order
    pub fn canonical() -> Self {
        Self::new(Feature::ALL.iter().map(|feature| feature.name()))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(Column::name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns that no built feature will ever fill
    pub fn unknown_columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns
            .iter()
            .filter(|column| column.feature.is_none())
            .map(Column::name)
    }

    /// Column names that appear more than once
    pub fn duplicate_columns(&self) -> Vec<&str> {
        let mut seen = HashMap::new();
        for name in self.names() {
            *seen.entry(name).or_insert(0usize) += 1;
        }
        let mut duplicates: Vec<&str> = seen
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect();
        duplicates.sort_unstable();
        duplicates
    }
}

impl From<Vec<String>> for ExpectedSchema {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<ExpectedSchema> for Vec<String> {
    fn from(schema: ExpectedSchema) -> Self {
        schema.columns.into_iter().map(|column| column.name).collect()
    }
}

/// Anything that can supply a value for a named column
pub trait FeatureSource {
    /// Value for `column`, or `None` when the source does not carry it
    fn value(&self, column: &Column) -> Option<f64>;
}

impl FeatureSource for FeatureVector {
    fn value(&self, column: &Column) -> Option<f64> {
        column.feature.map(|feature| self.get(feature))
    }
}

impl FeatureSource for AlignedRow {
    fn value(&self, column: &Column) -> Option<f64> {
        self.get(column.name())
    }
}

impl FeatureSource for HashMap<String, f64> {
    fn value(&self, column: &Column) -> Option<f64> {
        self.get(column.name()).copied()
    }
}

impl FeatureSource for BTreeMap<String, f64> {
    fn value(&self, column: &Column) -> Option<f64> {
        self.get(column.name()).copied()
    }
}

/// Single input row in model column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedRow {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl AlignedRow {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the first column named `name`
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|column| column == name)
            .map(|idx| self.values[idx])
    }

    /// Iterate `(column name, value)` pairs in model order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Project `features` onto `schema`.
///
/// Every schema column appears exactly once, in order; columns the source
/// does not carry are zero, and source values outside the schema are dropped.
pub fn align<S: FeatureSource + ?Sized>(features: &S, schema: &ExpectedSchema) -> AlignedRow {
    let mut columns = Vec::with_capacity(schema.len());
    let mut values = Vec::with_capacity(schema.len());

    for column in schema.columns() {
        columns.push(column.name.clone());
        values.push(features.value(column).unwrap_or(0.0));
    }

    trace!("Aligned {} columns", values.len());

    AlignedRow { columns, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FeatureBuilder, FuelType, RawInput, SellerType, Transmission};
    use proptest::prelude::*;

    fn family_diesel() -> FeatureVector {
        FeatureBuilder::new(2024)
            .build(&RawInput {
                year: 2016,
                present_price: 7.5,
                kms_driven: 45_000,
                owner: 0,
                fuel_type: FuelType::Diesel,
                seller_type: SellerType::Dealer,
                transmission: Transmission::Manual,
            })
            .unwrap()
    }

    #[test]
    fn test_zero_fills_unknown_columns() {
        let schema = ExpectedSchema::new(["Present_Price", "Car_Age", "Unknown_Col"]);
        let features: BTreeMap<String, f64> = [
            ("Present_Price".to_string(), 7.5),
            ("Car_Age".to_string(), 8.0),
        ]
        .into_iter()
        .collect();

        let row = align(&features, &schema);
        assert_eq!(row.values(), &[7.5, 8.0, 0.0]);
        assert_eq!(row.columns(), &["Present_Price", "Car_Age", "Unknown_Col"]);
    }

    #[test]
    fn test_feature_vector_projection() {
        let schema = ExpectedSchema::new(["Car_Age", "Present_Price", "Unknown_Col"]);
        let row = align(&family_diesel(), &schema);
        assert_eq!(row.values(), &[8.0, 7.5, 0.0]);
    }

    #[test]
    fn test_drops_extra_features() {
        let schema = ExpectedSchema::new(["Fuel_Type_Diesel"]);
        let row = align(&family_diesel(), &schema);
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("Fuel_Type_Diesel"), Some(1.0));
        assert_eq!(row.get("Present_Price"), None);
    }

    #[test]
    fn test_canonical_schema_matches_builder_order() {
        let features = family_diesel();
        let row = align(&features, &ExpectedSchema::canonical());
        let expected: Vec<f64> = features.iter().map(|(_, value)| value).collect();
        assert_eq!(row.values(), expected.as_slice());
        assert_eq!(ExpectedSchema::canonical().unknown_columns().count(), 0);
    }

    #[test]
    fn test_empty_schema() {
        let schema = ExpectedSchema::new(Vec::<String>::new());
        let row = align(&family_diesel(), &schema);
        assert!(row.is_empty());
    }

    #[test]
    fn test_duplicate_columns() {
        let schema = ExpectedSchema::new(["Owner", "Car_Age", "Owner"]);
        assert_eq!(schema.duplicate_columns(), vec!["Owner"]);
        assert_eq!(align(&family_diesel(), &schema).len(), 3);
    }

    fn arb_schema() -> impl Strategy<Value = ExpectedSchema> {
        let name = prop_oneof![
            proptest::sample::select(Feature::ALL.to_vec()).prop_map(|f| f.name().to_string()),
            "[A-Z][a-z_]{0,12}",
        ];
        prop::collection::vec(name, 0..16).prop_map(ExpectedSchema::new)
    }

    fn arb_features() -> impl Strategy<Value = HashMap<String, f64>> {
        prop::collection::hash_map("[A-Za-z_]{1,16}", -1.0e6f64..1.0e6, 0..12)
    }

    proptest! {
        #[test]
        fn output_width_matches_schema(schema in arb_schema(), features in arb_features()) {
            prop_assert_eq!(align(&features, &schema).len(), schema.len());
        }

        #[test]
        fn alignment_is_idempotent(schema in arb_schema(), features in arb_features()) {
            let once = align(&features, &schema);
            let twice = align(&once, &schema);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn feature_vector_alignment_is_idempotent(schema in arb_schema()) {
            let once = align(&family_diesel(), &schema);
            prop_assert_eq!(align(&once, &schema), once);
        }
    }
}
