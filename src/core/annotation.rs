//! Model of one functional-annotation (VEP) response entry.
//!
//! Only the fields used for prioritization are modelled; everything else in the
//! service payload is ignored during deserialization.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// Annotation of a single submitted variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationResult {
    /// Identifier assigned by the annotation service
    #[serde(default, rename = "id", skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,

    #[serde(default)]
    pub seq_region_name: String,

    #[serde(default)]
    pub start: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_severe_consequence: Option<String>,

    #[serde(default)]
    pub transcript_consequences: Vec<TranscriptConsequence>,

    #[serde(default)]
    pub colocated_variants: Vec<ColocatedVariant>,

    /// Identifier of the input record this annotation was requested for.
    /// Set locally by the annotator; never part of the service payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_identifier: Option<String>,
}

impl AnnotationResult {
    /// `chrom:pos` of the annotated variant
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}:{}", self.seq_region_name, self.start)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptConsequence {
    #[serde(default)]
    pub consequence_terms: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_symbol: Option<String>,
}

/// A known variant at the same position, carrying ClinVar and population data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColocatedVariant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub clin_sig: Vec<String>,

    #[serde(default)]
    pub frequencies: AlleleFrequencies,
}

/// Allele -> (source -> frequency), kept in payload order.
///
/// Order matters: evidence extraction takes the first allele that has a usable value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlleleFrequencies(Vec<(String, BTreeMap<String, JsonValue>)>);

impl AlleleFrequencies {
    #[must_use]
    pub fn from_entries(entries: Vec<(String, BTreeMap<String, JsonValue>)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, JsonValue>)> {
        self.0.iter().map(|(allele, sources)| (allele.as_str(), sources))
    }
}

impl Serialize for AlleleFrequencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(allele, sources)| (allele, sources)))
    }
}

impl<'de> Deserialize<'de> for AlleleFrequencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FrequenciesVisitor;

        impl<'de> Visitor<'de> for FrequenciesVisitor {
            type Value = AlleleFrequencies;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of allele to per-source frequencies")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, BTreeMap<String, JsonValue>>()? {
                    entries.push(entry);
                }
                Ok(AlleleFrequencies(entries))
            }
        }

        deserializer.deserialize_map(FrequenciesVisitor)
    }
}
