use serde::{Deserialize, Serialize};

/// A variant with a fully specified position and allele change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomicVariant {
    /// Chromosome name as given by the source (`1`, `chr1`, `X`, ...)
    pub chrom: String,

    /// 1-based position
    pub pos: u64,

    /// Reference allele
    #[serde(rename = "ref")]
    pub reference: String,

    /// Single alternate allele
    #[serde(rename = "alt")]
    pub alternate: String,

    /// External identifier (e.g. `rs12345`) carried from the input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsid: Option<String>,
}

impl GenomicVariant {
    pub fn new(
        chrom: impl Into<String>,
        pos: u64,
        reference: impl Into<String>,
        alternate: impl Into<String>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
            reference: reference.into(),
            alternate: alternate.into(),
            rsid: None,
        }
    }

    #[must_use]
    pub fn with_rsid(mut self, rsid: Option<String>) -> Self {
        self.rsid = rsid;
        self
    }

    /// Region query for the effect predictor: `{chrom}:{pos}-{pos}:1/{alt}`.
    ///
    /// A leading `chr` is stripped so UCSC-style names match Ensembl naming.
    #[must_use]
    pub fn region_string(&self) -> String {
        let chrom = self.chrom.strip_prefix("chr").unwrap_or(&self.chrom);
        format!("{chrom}:{pos}-{pos}:1/{alt}", pos = self.pos, alt = self.alternate)
    }

    /// `chrom:pos`
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}:{}", self.chrom, self.pos)
    }
}

/// Genotype-array call kept alongside an identifier; not used for scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayCall {
    pub chrom: String,
    pub genotype: String,
}

/// A variant known only by its external identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierVariant {
    pub rsid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_call: Option<ArrayCall>,
}

/// Kind of a [`VariantRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    Coordinate,
    IdentifierOnly,
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coordinate => write!(f, "coordinate"),
            Self::IdentifierOnly => write!(f, "identifier_only"),
        }
    }
}

/// A parsed input variant.
///
/// Either fully positioned or identifier-only; partial coordinates cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VariantRecord {
    Coordinate(GenomicVariant),
    IdentifierOnly(IdentifierVariant),
}

impl VariantRecord {
    pub fn coordinate(
        chrom: impl Into<String>,
        pos: u64,
        reference: impl Into<String>,
        alternate: impl Into<String>,
        rsid: Option<String>,
    ) -> Self {
        Self::Coordinate(GenomicVariant::new(chrom, pos, reference, alternate).with_rsid(rsid))
    }

    pub fn identifier(rsid: impl Into<String>) -> Self {
        Self::IdentifierOnly(IdentifierVariant {
            rsid: rsid.into(),
            array_call: None,
        })
    }

    #[must_use]
    pub fn kind(&self) -> VariantKind {
        match self {
            Self::Coordinate(_) => VariantKind::Coordinate,
            Self::IdentifierOnly(_) => VariantKind::IdentifierOnly,
        }
    }

    #[must_use]
    pub fn rsid(&self) -> Option<&str> {
        match self {
            Self::Coordinate(v) => v.rsid.as_deref(),
            Self::IdentifierOnly(v) => Some(&v.rsid),
        }
    }

    #[must_use]
    pub fn as_coordinate(&self) -> Option<&GenomicVariant> {
        match self {
            Self::Coordinate(v) => Some(v),
            Self::IdentifierOnly(_) => None,
        }
    }
}

/// Split records into positioned variants and identifiers awaiting resolution,
/// preserving input order within each group.
#[must_use]
pub fn partition(records: Vec<VariantRecord>) -> (Vec<GenomicVariant>, Vec<IdentifierVariant>) {
    let mut coords = Vec::new();
    let mut identifiers = Vec::new();
    for record in records {
        match record {
            VariantRecord::Coordinate(v) => coords.push(v),
            VariantRecord::IdentifierOnly(v) => identifiers.push(v),
        }
    }
    (coords, identifiers)
}
